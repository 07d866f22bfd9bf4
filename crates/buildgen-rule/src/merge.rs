//! Merging generated attribute values into existing expressions.
//!
//! Every value has a [`MergeStrategy`]:
//!
//! - `SortedUnion` ([`SortedStrings`](crate::SortedStrings)): union with the
//!   existing list, then label order
//! - `UnsortedUnion` ([`UnsortedStrings`](crate::UnsortedStrings)): existing
//!   elements keep their order, new elements are appended
//! - `Replace` (everything else): the generated value wins
//!
//! Unions never drop anything written by hand: list elements, concatenated
//! operands and expressions that cannot be unioned all survive. Merging is
//! pure and idempotent, so generation can be re-run against its own output.
//!
//! Whether an attribute is merged at all is decided by the caller from the
//! rule kind's mergeable attributes (see [`crate::merge_file`]).

use crate::error::Result;
use crate::sort_labels::sort_expr_labels;
use crate::value::{Value, expr_from_value};
use buildgen_syntax::{BinaryExpr, Expr, ListExpr};

/// How a generated value combines with an existing expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    SortedUnion,
    UnsortedUnion,
    Replace,
}

impl Value {
    pub fn merge_strategy(&self) -> MergeStrategy {
        match self {
            Value::Sorted(_) => MergeStrategy::SortedUnion,
            Value::Unsorted(_) => MergeStrategy::UnsortedUnion,
            _ => MergeStrategy::Replace,
        }
    }
}

/// Merge a generated value into the expression previously written for the
/// same attribute.
///
/// With no existing expression this is plain synthesis. For a union the
/// existing expression may be a list literal or a `+` concatenation; the
/// first list literal operand receives the union and the other operands are
/// kept. Any other existing expression (a `select`, a variable, a call) is
/// returned unchanged.
pub fn merge(value: &Value, existing: Option<&Expr>) -> Result<Expr> {
    let new = expr_from_value(value)?;
    let Some(existing) = existing else {
        return Ok(new);
    };

    let strategy = value.merge_strategy();
    if strategy == MergeStrategy::Replace {
        return Ok(new);
    }
    let Expr::List(new_list) = &new else {
        return Ok(new);
    };

    match union_into(new_list, existing, strategy) {
        Some(merged) => Ok(merged),
        None => {
            tracing::debug!(
                existing = %existing,
                "existing value has no list literal to merge into; keeping it"
            );
            Ok(existing.clone())
        }
    }
}

fn union_into(new: &ListExpr, existing: &Expr, strategy: MergeStrategy) -> Option<Expr> {
    match existing {
        Expr::List(old) => {
            let mut merged = merge_list(new, old);
            if strategy == MergeStrategy::SortedUnion {
                sort_expr_labels(&mut merged);
            }
            Some(Expr::List(merged))
        }
        Expr::Binary(bin) if bin.op == "+" => {
            if let Some(lhs) = union_into(new, &bin.lhs, strategy) {
                return Some(Expr::Binary(BinaryExpr {
                    lhs: Box::new(lhs),
                    op: bin.op.clone(),
                    rhs: bin.rhs.clone(),
                }));
            }
            let rhs = union_into(new, &bin.rhs, strategy)?;
            Some(Expr::Binary(BinaryExpr {
                lhs: bin.lhs.clone(),
                op: bin.op.clone(),
                rhs: Box::new(rhs),
            }))
        }
        _ => None,
    }
}

/// Union of two list literals.
///
/// Elements of `existing` come first in their original order, followed by
/// elements of `new` not already present. Repeated elements are kept once.
/// The result is multi-line if either input is.
pub fn merge_list(new: &ListExpr, existing: &ListExpr) -> ListExpr {
    let mut merged: Vec<Expr> = Vec::with_capacity(existing.list.len() + new.list.len());
    for elem in existing.list.iter().chain(&new.list) {
        if !merged.contains(elem) {
            merged.push(elem.clone());
        }
    }
    ListExpr {
        list: merged,
        force_multiline: existing.force_multiline || new.force_multiline,
    }
}
