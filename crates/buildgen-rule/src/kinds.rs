//! Domain value kinds with their own rendering and merge behavior.

use crate::sort_labels::sort_expr_labels;
use crate::value::{ToExpr, string_list_expr};
use buildgen_syntax::{DictExpr, Expr, KeyValueExpr};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Condition key that `select` falls back to when nothing else matches.
pub const DEFAULT_CONDITION: &str = "//conditions:default";

/// A `glob` call: files matching `patterns` minus those matching `excludes`.
///
/// A glob with no patterns is legal and selects nothing; `excludes` only has
/// meaning relative to `patterns`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobValue {
    pub patterns: Vec<String>,
    pub excludes: Vec<String>,
}

impl GlobValue {
    pub fn new(patterns: Vec<String>, excludes: Vec<String>) -> Self {
        GlobValue { patterns, excludes }
    }
}

impl ToExpr for GlobValue {
    /// `glob([patterns])`, with `exclude = [excludes]` only when there are excludes.
    ///
    /// Excludes are always passed by keyword.
    fn to_expr(&self) -> Expr {
        let mut args = vec![string_list_expr(&self.patterns).into()];
        if !self.excludes.is_empty() {
            args.push(Expr::keyword(
                "exclude",
                string_list_expr(&self.excludes).into(),
            ));
        }
        Expr::call("glob", args)
    }
}

/// String lists chosen by configuration condition, rendered as `select`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectStringListValue(pub BTreeMap<String, Vec<String>>);

impl ToExpr for SelectStringListValue {
    fn to_expr(&self) -> Expr {
        let entries = self
            .0
            .iter()
            .map(|(key, strs)| (key.as_str(), Expr::from(string_list_expr(strs))))
            .collect();
        select_expr(entries, false)
    }
}

impl FromIterator<(String, Vec<String>)> for SelectStringListValue {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        SelectStringListValue(iter.into_iter().collect())
    }
}

/// Strings kept in label order, merged as a sorted union.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortedStrings(pub Vec<String>);

impl ToExpr for SortedStrings {
    fn to_expr(&self) -> Expr {
        let mut list = string_list_expr(&self.0);
        sort_expr_labels(&mut list);
        list.into()
    }
}

/// Strings whose order is meaningful, merged as an order-preserving union.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnsortedStrings(pub Vec<String>);

impl ToExpr for UnsortedStrings {
    fn to_expr(&self) -> Expr {
        string_list_expr(&self.0).into()
    }
}

/// Build `select({...})` from rendered entries.
///
/// Keys come out in ascending order with [`DEFAULT_CONDITION`] last. List
/// values are marked multi-line; the default entry's list only when
/// `multiline_default` is set. Keys must be unique.
pub(crate) fn select_expr(entries: Vec<(&str, Expr)>, multiline_default: bool) -> Expr {
    let (mut conditions, default): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|(key, _)| *key != DEFAULT_CONDITION);
    conditions.sort_by(|a, b| a.0.cmp(b.0));

    let list = conditions
        .into_iter()
        .map(|(key, value)| (key, value, true))
        .chain(
            default
                .into_iter()
                .map(|(key, value)| (key, value, multiline_default)),
        )
        .map(|(key, mut value, multiline)| {
            if let (true, Expr::List(list)) = (multiline, &mut value) {
                list.force_multiline = true;
            }
            KeyValueExpr {
                key: Expr::string(key),
                value,
            }
        })
        .collect();

    Expr::call(
        "select",
        vec![
            DictExpr {
                list,
                force_multiline: true,
            }
            .into(),
        ],
    )
}
