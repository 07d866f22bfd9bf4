//! Error types for attribute value synthesis.

use thiserror::Error;

/// Result type alias for value synthesis.
pub type Result<T> = std::result::Result<T, ValueError>;

/// A value was handed to the synthesizer in a shape it cannot render.
///
/// These are programming errors in the generator that built the value, not
/// problems with build file contents, so callers abort the generation pass
/// for the directory instead of trying to recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("type not supported: {type_name}")]
    UnsupportedType { type_name: &'static str },

    #[error("unexpected map key of type {key_type}: map keys must be strings")]
    UnsupportedMapKey { key_type: &'static str },
}
