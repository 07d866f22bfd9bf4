//! Recovering [`GlobValue`]s from `glob(...)` calls in existing build files.
//!
//! Build files are written by people as well as by earlier generator runs,
//! so the recognizer accepts any argument layout the `glob` builtin would and
//! keeps whatever string patterns it can find. It never fails: anything that
//! is not a call of `glob` is simply not a match.

use crate::kinds::GlobValue;
use buildgen_syntax::{Expr, ListExpr};

/// A recognized `glob` call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlobParse {
    pub glob: GlobValue,
    /// List elements that were not string literals and were left out.
    pub skipped: usize,
}

impl GlobParse {
    /// Whether every pattern and exclude was a string literal.
    pub fn is_complete(&self) -> bool {
        self.skipped == 0
    }
}

/// Recognize a call of `glob` and return its patterns and excludes.
///
/// Positional arguments are `include` then `exclude`. Keyword arguments
/// `include =` and `exclude =` are also understood; once a keyword argument
/// is seen, later positional arguments are ignored. Unknown keywords and
/// non-string list elements are skipped.
pub fn parse_glob_expr(expr: &Expr) -> Option<GlobValue> {
    parse_glob_expr_detailed(expr).map(|parse| parse.glob)
}

/// Like [`parse_glob_expr`], also reporting how many list elements were skipped.
pub fn parse_glob_expr_detailed(expr: &Expr) -> Option<GlobParse> {
    let call = expr.as_call()?;
    if call.callee_name() != Some("glob") {
        return None;
    }

    let mut parse = GlobParse::default();
    let mut allow_positional = true;
    for (i, arg) in call.args.iter().enumerate() {
        if let (true, Expr::List(list)) = (allow_positional, arg) {
            match i {
                0 => parse.glob.patterns = collect_strings(list, &mut parse.skipped),
                1 => {
                    parse.glob.excludes = collect_strings(list, &mut parse.skipped);
                    // glob takes at most two positional arguments.
                    return Some(parse);
                }
                _ => {}
            }
            continue;
        }

        let Expr::Assign(_) = arg else {
            continue;
        };
        allow_positional = false;
        let Some((key, Expr::List(list))) = arg.as_keyword() else {
            continue;
        };
        match key {
            "include" => parse.glob.patterns = collect_strings(list, &mut parse.skipped),
            "exclude" => parse.glob.excludes = collect_strings(list, &mut parse.skipped),
            _ => {}
        }
    }
    Some(parse)
}

fn collect_strings(list: &ListExpr, skipped: &mut usize) -> Vec<String> {
    let mut strings = Vec::with_capacity(list.list.len());
    for elem in &list.list {
        match elem.as_str() {
            Some(s) => strings.push(s.to_string()),
            None => *skipped += 1,
        }
    }
    strings
}
