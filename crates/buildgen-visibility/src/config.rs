//! Visibility configuration: repository defaults from TOML, refined per
//! directory by build file directives.
//!
//! ```toml
//! [visibility]
//! default_visibility = ["//visibility:private"]
//! features = ["layering_check"]
//! ```
//!
//! A directory inherits its parent's configuration. The directives
//! `# buildgen:default_visibility` and `# buildgen:features` replace the
//! inherited list with a comma separated one; an empty value clears it.

use buildgen_pathtools::prefixes;
use buildgen_rule::Directive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_VISIBILITY_DIRECTIVE: &str = "default_visibility";
pub const FEATURES_DIRECTIVE: &str = "features";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse visibility configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("empty entry in `{key}` value {value:?}")]
    EmptyEntry { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibilityConfig {
    /// Labels for the `package` rule's `default_visibility`.
    #[serde(default)]
    pub default_visibility: Vec<String>,

    /// Entries for the `package` rule's `features`, order preserved.
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    visibility: VisibilityConfig,
}

impl VisibilityConfig {
    /// Parse repository defaults from the `[visibility]` table of a TOML
    /// document. A document without that table yields the empty config.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(s)?;
        file.visibility.validate()?;
        Ok(file.visibility)
    }

    /// Nothing to generate.
    pub fn is_empty(&self) -> bool {
        self.default_visibility.is_empty() && self.features.is_empty()
    }

    /// This configuration with a directory's directives applied in order.
    /// Directives with other keys are ignored.
    pub fn configure(&self, directives: &[Directive]) -> Result<Self, ConfigError> {
        let mut config = self.clone();
        for d in directives {
            match d.key.as_str() {
                DEFAULT_VISIBILITY_DIRECTIVE => {
                    config.default_visibility = split_entries(&d.key, &d.value)?;
                }
                FEATURES_DIRECTIVE => config.features = split_entries(&d.key, &d.value)?,
                _ => continue,
            }
            tracing::trace!(key = %d.key, value = %d.value, "applied directive");
        }
        Ok(config)
    }

    /// Configuration of directory `rel`, starting from `root` and applying
    /// the directives of every ancestor directory from the top down.
    ///
    /// `directives` is keyed by slash-separated directory path relative to
    /// the repository root, with `""` for the root itself.
    pub fn configure_for_path(
        root: &VisibilityConfig,
        rel: &str,
        directives: &BTreeMap<String, Vec<Directive>>,
    ) -> Result<Self, ConfigError> {
        prefixes(rel).try_fold(root.clone(), |config, dir| match directives.get(dir) {
            Some(ds) => config.configure(ds),
            None => Ok(config),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, entries) in [
            (DEFAULT_VISIBILITY_DIRECTIVE, &self.default_visibility),
            (FEATURES_DIRECTIVE, &self.features),
        ] {
            if entries.iter().any(|e| e.trim().is_empty()) {
                return Err(ConfigError::EmptyEntry {
                    key: key.to_string(),
                    value: entries.join(","),
                });
            }
        }
        Ok(())
    }
}

fn split_entries(key: &str, value: &str) -> Result<Vec<String>, ConfigError> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }
    value
        .split(',')
        .map(str::trim)
        .map(|entry| {
            if entry.is_empty() {
                Err(ConfigError::EmptyEntry {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            } else {
                Ok(entry.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_toml_str() {
        let config = VisibilityConfig::from_toml_str(
            r#"
            [visibility]
            default_visibility = ["//visibility:private"]
            features = ["layering_check", "-parse_headers"]
            "#,
        )
        .unwrap();
        assert_eq!(config.default_visibility, strings(&["//visibility:private"]));
        assert_eq!(config.features, strings(&["layering_check", "-parse_headers"]));
    }

    #[test]
    fn test_from_toml_str_without_table() {
        let config = VisibilityConfig::from_toml_str("[other]\nkey = 1\n").unwrap();
        assert!(config.is_empty());
        assert!(VisibilityConfig::from_toml_str("").unwrap().is_empty());
    }

    #[test]
    fn test_from_toml_str_errors() {
        let err = VisibilityConfig::from_toml_str("[visibility]\nfeatures = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err =
            VisibilityConfig::from_toml_str("[visibility]\nfeatures = [\"a\", \" \"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyEntry { ref key, .. } if key == "features"));
    }

    #[test]
    fn test_configure_replaces_and_clears() {
        let parent = VisibilityConfig {
            default_visibility: strings(&["//a:__pkg__"]),
            features: strings(&["x"]),
        };
        let config = parent
            .configure(&[
                Directive::new("default_visibility", "//b:__pkg__, //c:__subpackages__"),
                Directive::new("features", ""),
                Directive::new("go_prefix", "example.com/m"),
            ])
            .unwrap();
        assert_eq!(
            config.default_visibility,
            strings(&["//b:__pkg__", "//c:__subpackages__"])
        );
        assert!(config.features.is_empty());
    }

    #[test]
    fn test_configure_later_directive_wins() {
        let config = VisibilityConfig::default()
            .configure(&[Directive::new("features", "a"), Directive::new("features", "b,c")])
            .unwrap();
        assert_eq!(config.features, strings(&["b", "c"]));
    }

    #[test]
    fn test_configure_rejects_empty_entry() {
        let err = VisibilityConfig::default()
            .configure(&[Directive::new("default_visibility", "//a:__pkg__,,//b:__pkg__")])
            .unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @r#"empty entry in `default_visibility` value "//a:__pkg__,,//b:__pkg__""#
        );
    }

    #[test]
    fn test_configure_for_path_inherits() {
        let root = VisibilityConfig {
            default_visibility: strings(&["//visibility:public"]),
            features: Vec::new(),
        };
        let directives = BTreeMap::from([
            ("".to_string(), vec![Directive::new("features", "root_feature")]),
            (
                "a".to_string(),
                vec![Directive::new("default_visibility", "//a:__subpackages__")],
            ),
            ("a/b/c".to_string(), vec![Directive::new("features", "")]),
            ("other".to_string(), vec![Directive::new("features", "other")]),
        ]);

        let ab = VisibilityConfig::configure_for_path(&root, "a/b", &directives).unwrap();
        assert_eq!(ab.default_visibility, strings(&["//a:__subpackages__"]));
        assert_eq!(ab.features, strings(&["root_feature"]));

        let abc = VisibilityConfig::configure_for_path(&root, "a/b/c", &directives).unwrap();
        assert!(abc.features.is_empty());

        let top = VisibilityConfig::configure_for_path(&root, "", &directives).unwrap();
        assert_eq!(top.default_visibility, strings(&["//visibility:public"]));
        assert_eq!(top.features, strings(&["root_feature"]));
    }
}
