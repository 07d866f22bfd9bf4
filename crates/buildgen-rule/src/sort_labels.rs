//! Canonical ordering for lists of labels and file names.
//!
//! Strings are grouped into phases, then compared by their `.`/`:` separated
//! parts, then by value:
//!
//! | phase | strings |
//! |---|---|
//! | 0 | everything else (file names, relative paths) |
//! | 1 | `:name` labels in the same package |
//! | 2 | `//pkg:name` labels in the same repository |
//! | 3 | `@repo//pkg:name` external labels |

use buildgen_syntax::ListExpr;
use std::cmp::Ordering;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct SortKey<'a> {
    phase: u8,
    split: Vec<&'a str>,
    value: &'a str,
    original: usize,
}

impl<'a> SortKey<'a> {
    fn new(original: usize, value: &'a str) -> Self {
        let phase = if value.starts_with(':') {
            1
        } else if value.starts_with("//") {
            2
        } else if value.starts_with('@') {
            3
        } else {
            0
        };
        SortKey {
            phase,
            split: value.split(['.', ':']).collect(),
            value,
            original,
        }
    }
}

/// Compare two strings the way [`sort_expr_labels`] orders them.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    SortKey::new(0, a).cmp(&SortKey::new(0, b))
}

/// Sort a list literal in label order.
///
/// Lists containing anything other than string literals are left untouched,
/// since their elements have no meaningful order to restore.
pub fn sort_expr_labels(list: &mut ListExpr) {
    let order: Vec<usize> = {
        let Some(values) = list.string_values() else {
            return;
        };
        let mut keys: Vec<SortKey<'_>> = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| SortKey::new(i, v))
            .collect();
        keys.sort();
        keys.into_iter().map(|k| k.original).collect()
    };

    let mut elems: Vec<_> = std::mem::take(&mut list.list).into_iter().map(Some).collect();
    list.list = order.into_iter().filter_map(|i| elems[i].take()).collect();
}
