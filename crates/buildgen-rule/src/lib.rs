//! Attribute values for generated build rules.
//!
//! This crate turns the values a generator computes into build-file
//! expressions and reconciles them with what is already written in an
//! existing build file.
//!
//! # Key Features
//!
//! - **Synthesis**: [`expr_from_value`] renders a [`Value`] as an [`Expr`]
//! - **Domain kinds**: [`GlobValue`], [`SelectStringListValue`],
//!   [`SortedStrings`], [`UnsortedStrings`]
//! - **Glob recovery**: [`parse_glob_expr`] reads `glob(...)` calls back
//! - **Merging**: [`merge`] with a per-value [`MergeStrategy`]; hand-written
//!   list elements are never dropped
//! - **Rules**: [`Rule`], [`File`], [`KindInfo`] and the [`Language`]
//!   interface, plus [`merge_file`] applying generated rules to a file
//!
//! Everything here is pure and synchronous; values and rules are owned data
//! and can be processed on any thread.
//!
//! # Example
//!
//! ```rust
//! use buildgen_rule::{SortedStrings, Value, merge};
//! use buildgen_syntax::Expr;
//!
//! let existing = Expr::list(vec![Expr::string("c")]);
//! let value = Value::Sorted(SortedStrings(vec!["b".into(), "a".into()]));
//! let merged = merge(&value, Some(&existing)).unwrap();
//! assert_eq!(merged.to_string(), r#"["a", "b", "c"]"#);
//! ```

mod error;
mod glob;
mod kinds;
mod language;
mod literal;
mod merge;
mod merger;
mod rule;
mod sort_labels;
mod value;

pub use error::{Result, ValueError};

pub use value::{ToExpr, Value, expr_from_json, expr_from_value};

pub use kinds::{DEFAULT_CONDITION, GlobValue, SelectStringListValue, SortedStrings, UnsortedStrings};

pub use glob::{GlobParse, parse_glob_expr, parse_glob_expr_detailed};

pub use literal::format_float;

pub use sort_labels::{compare_labels, sort_expr_labels};

pub use merge::{MergeStrategy, merge, merge_list};

pub use merger::{merge_attrs, merge_file};

pub use rule::{
    DIRECTIVE_PREFIX, Directive, File, KindInfo, LOAD_KIND, Rule, UNSTABLE_INSERT_INDEX_KEY,
    parse_directive, parse_directives,
};

pub use language::{GenerateResult, Language};

// Re-export for convenience
pub use buildgen_syntax::Expr;
