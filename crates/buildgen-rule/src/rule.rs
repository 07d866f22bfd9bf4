//! Rules, build files and directives.
//!
//! A [`Rule`] is either generated (attributes are native [`Value`]s, no
//! statement index) or read from an existing [`File`] (attributes are
//! [`Value::Expr`], index of the statement it came from).

use crate::error::Result;
use crate::value::{Value, expr_from_value};
use buildgen_syntax::Expr;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Private attribute carrying the statement index a new rule should be
/// inserted at. Read by the merge pipeline, never written to the file.
pub const UNSTABLE_INSERT_INDEX_KEY: &str = "_buildgen_insert_index";

/// Statements calling this are imports, never rules.
pub const LOAD_KIND: &str = "load";

/// Comment prefix that marks a directive, as in `# buildgen:key value`.
pub const DIRECTIVE_PREFIX: &str = "buildgen:";

/// What a language extension declares about a rule kind it generates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KindInfo {
    /// Any existing rule of this kind matches, regardless of name.
    pub match_any: bool,
    /// Attributes merged into existing values instead of replacing them.
    pub mergeable_attrs: BTreeSet<String>,
}

impl KindInfo {
    pub fn is_mergeable(&self, attr: &str) -> bool {
        self.mergeable_attrs.contains(attr)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    kind: String,
    name: String,
    args: Vec<Expr>,
    attrs: IndexMap<String, Value>,
    private_attrs: BTreeMap<String, serde_json::Value>,
    index: Option<usize>,
}

impl Rule {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Rule {
            kind: kind.into(),
            name: name.into(),
            args: Vec::new(),
            attrs: IndexMap::new(),
            private_attrs: BTreeMap::new(),
            index: None,
        }
    }

    /// Read a rule from a statement.
    ///
    /// Every call of a bare identifier other than `load` is a rule, including
    /// calls with positional arguments such as `exports_files([...])`. A
    /// string `name` argument becomes the rule name.
    pub fn from_call(stmt: &Expr, index: usize) -> Option<Rule> {
        let call = stmt.as_call()?;
        let kind = call.callee_name()?;
        if kind == LOAD_KIND {
            return None;
        }
        let mut rule = Rule::new(kind, "");
        rule.index = Some(index);
        for arg in &call.args {
            match arg.as_keyword() {
                Some(("name", Expr::String(name))) => rule.name = name.value.clone(),
                Some((key, value)) => rule.set_attr(key, value.clone()),
                None => rule.args.push(arg.clone()),
            }
        }
        Some(rule)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positional arguments, in source order.
    pub fn args(&self) -> &[Expr] {
        &self.args
    }

    /// Index of the statement this rule was read from.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// The attribute's expression, when it holds one.
    pub fn attr_expr(&self, key: &str) -> Option<&Expr> {
        match self.attrs.get(key) {
            Some(Value::Expr(e)) => Some(e),
            _ => None,
        }
    }

    /// Set an attribute. An existing attribute keeps its position.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn del_attr(&mut self, key: &str) -> Option<Value> {
        self.attrs.shift_remove(key)
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn set_private_attr(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.private_attrs.insert(key.into(), value.into());
    }

    pub fn private_attr(&self, key: &str) -> Option<&serde_json::Value> {
        self.private_attrs.get(key)
    }

    /// Statement index requested through [`UNSTABLE_INSERT_INDEX_KEY`].
    pub fn insert_index(&self) -> Option<usize> {
        self.private_attr(UNSTABLE_INSERT_INDEX_KEY)?
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
    }

    /// The rule as a call statement: `kind(args..., name = "...", attr = ...)`.
    pub fn to_expr(&self) -> Result<Expr> {
        let mut args = Vec::with_capacity(self.args.len() + self.attrs.len() + 1);
        args.extend(self.args.iter().cloned());
        if !self.name.is_empty() {
            args.push(Expr::keyword("name", Expr::string(self.name.as_str())));
        }
        for (key, value) in &self.attrs {
            args.push(Expr::keyword(key.as_str(), expr_from_value(value)?));
        }
        Ok(Expr::call(self.kind.as_str(), args))
    }
}

/// A `key value` directive from a build file comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub key: String,
    pub value: String,
}

impl Directive {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Directive {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Parse a comment line like `# buildgen:default_visibility //foo:__pkg__`.
pub fn parse_directive(line: &str) -> Option<Directive> {
    let body = line.trim().strip_prefix('#')?.trim_start();
    let rest = body.strip_prefix(DIRECTIVE_PREFIX)?;
    let (key, value) = match rest.split_once(char::is_whitespace) {
        Some((key, value)) => (key, value.trim()),
        None => (rest.trim_end(), ""),
    };
    if key.is_empty() {
        return None;
    }
    Some(Directive::new(key, value))
}

/// Collect every directive from the comment lines of a build file.
pub fn parse_directives<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<Directive> {
    lines.into_iter().filter_map(parse_directive).collect()
}

/// An existing build file: its statements, the rules among them, and its
/// directives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct File {
    /// Package path relative to the repository root.
    pub pkg: String,
    pub stmts: Vec<Expr>,
    pub rules: Vec<Rule>,
    pub directives: Vec<Directive>,
}

impl File {
    pub fn from_stmts(pkg: impl Into<String>, stmts: Vec<Expr>) -> Self {
        let mut file = File {
            pkg: pkg.into(),
            stmts,
            rules: Vec::new(),
            directives: Vec::new(),
        };
        file.reindex();
        file
    }

    pub fn with_directives(mut self, directives: Vec<Directive>) -> Self {
        self.directives = directives;
        self
    }

    /// First rule of the given kind.
    pub fn rule_of_kind(&self, kind: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.kind() == kind)
    }

    /// Rebuild `rules` from `stmts`.
    pub fn reindex(&mut self) {
        self.rules = self
            .stmts
            .iter()
            .enumerate()
            .filter_map(|(i, stmt)| Rule::from_call(stmt, i))
            .collect();
    }
}
