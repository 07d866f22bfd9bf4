//! Maintains the `package` rule of every build file.
//!
//! [`VisibilityLanguage`] is a [`buildgen_rule::Language`] that generates a
//! single `package` rule per build file carrying the configured
//! `default_visibility` (kept in label order) and `features` (kept in the
//! configured order). Hand-written entries already in the rule survive the
//! merge.

mod config;
mod lang;

pub use config::{ConfigError, DEFAULT_VISIBILITY_DIRECTIVE, FEATURES_DIRECTIVE, VisibilityConfig};
pub use lang::{PACKAGE_KIND, VisibilityLanguage};
