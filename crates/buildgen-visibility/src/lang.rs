//! The `package` rule generator.

use crate::config::{
    ConfigError, DEFAULT_VISIBILITY_DIRECTIVE, FEATURES_DIRECTIVE, VisibilityConfig,
};
use buildgen_rule::{
    File, GenerateResult, KindInfo, Language, Rule, SortedStrings, UNSTABLE_INSERT_INDEX_KEY,
    UnsortedStrings,
};
use std::collections::BTreeMap;

pub const PACKAGE_KIND: &str = "package";

/// Writes the configured `default_visibility` and `features` into each build
/// file's `package` rule, creating the rule when the file has none.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityLanguage;

impl VisibilityLanguage {
    pub fn new() -> Self {
        VisibilityLanguage
    }
}

impl Language for VisibilityLanguage {
    type Config = VisibilityConfig;
    type Error = ConfigError;

    fn name(&self) -> &'static str {
        "visibility"
    }

    /// A build file has at most one `package` rule, so any existing one
    /// matches.
    fn kinds(&self) -> BTreeMap<String, KindInfo> {
        BTreeMap::from([(
            PACKAGE_KIND.to_string(),
            KindInfo {
                match_any: true,
                mergeable_attrs: [DEFAULT_VISIBILITY_DIRECTIVE, FEATURES_DIRECTIVE]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            },
        )])
    }

    fn known_directives(&self) -> &'static [&'static str] {
        &[DEFAULT_VISIBILITY_DIRECTIVE, FEATURES_DIRECTIVE]
    }

    fn configure(
        &self,
        parent: &VisibilityConfig,
        rel: &str,
        file: Option<&File>,
    ) -> Result<VisibilityConfig, ConfigError> {
        let Some(file) = file else {
            return Ok(parent.clone());
        };
        let config = parent.configure(&file.directives)?;
        tracing::trace!(rel, ?config, "configured directory");
        Ok(config)
    }

    fn generate_rules(&self, config: &VisibilityConfig, file: Option<&File>) -> GenerateResult {
        let mut result = GenerateResult::default();
        if config.is_empty() {
            return result;
        }
        // Directories without a build file are not packages.
        let Some(file) = file else {
            return result;
        };

        let mut rule = Rule::new(PACKAGE_KIND, "");
        if let Some(existing) = file.rule_of_kind(PACKAGE_KIND) {
            for key in [DEFAULT_VISIBILITY_DIRECTIVE, FEATURES_DIRECTIVE] {
                if let Some(value) = existing.attr(key) {
                    rule.set_attr(key, value.clone());
                }
            }
        }
        if !config.default_visibility.is_empty() {
            rule.set_attr(
                DEFAULT_VISIBILITY_DIRECTIVE,
                SortedStrings(config.default_visibility.clone()),
            );
        }
        if !config.features.is_empty() {
            rule.set_attr(FEATURES_DIRECTIVE, UnsortedStrings(config.features.clone()));
        }

        let at = file
            .rules
            .iter()
            .find(|r| r.kind() != PACKAGE_KIND)
            .and_then(Rule::index)
            .unwrap_or(file.stmts.len());
        rule.set_private_attr(UNSTABLE_INSERT_INDEX_KEY, at);

        tracing::debug!(pkg = %file.pkg, insert_index = at, "generated package rule");
        result.push(rule, None);
        result
    }
}
