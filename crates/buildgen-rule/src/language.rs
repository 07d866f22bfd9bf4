//! The interface a language extension implements to generate rules.

use crate::rule::{File, KindInfo, Rule};
use std::collections::BTreeMap;

/// Rules generated for one directory.
///
/// `imports` holds one entry per generated rule, in the same order, with the
/// language-specific import data used later for dependency resolution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerateResult {
    pub generated: Vec<Rule>,
    pub imports: Vec<Option<serde_json::Value>>,
}

impl GenerateResult {
    pub fn push(&mut self, rule: Rule, imports: Option<serde_json::Value>) {
        self.generated.push(rule);
        self.imports.push(imports);
    }

    pub fn is_empty(&self) -> bool {
        self.generated.is_empty()
    }
}

pub trait Language {
    /// Per-directory configuration, inherited from the parent directory.
    type Config: Clone + Default;
    type Error: std::error::Error;

    fn name(&self) -> &'static str;

    /// Rule kinds this extension generates.
    fn kinds(&self) -> BTreeMap<String, KindInfo>;

    /// Directive keys this extension reads.
    fn known_directives(&self) -> &'static [&'static str];

    /// Derive the configuration of directory `rel` from its parent's.
    fn configure(
        &self,
        parent: &Self::Config,
        rel: &str,
        file: Option<&File>,
    ) -> Result<Self::Config, Self::Error>;

    fn generate_rules(&self, config: &Self::Config, file: Option<&File>) -> GenerateResult;

    /// Rewrite deprecated constructs in an existing file before generation.
    fn fix(&self, _config: &Self::Config, _file: &mut File) {}
}
