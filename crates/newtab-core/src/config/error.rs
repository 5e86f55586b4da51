//! Errors produced while interpreting configuration documents.

use thiserror::Error;

/// Error type for parsing, merging and validating configuration JSON.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The document parsed, but its root is not a JSON object.
    #[error("configuration root must be a JSON object")]
    NotAnObject,

    /// A key that every configuration document must carry is absent or empty.
    #[error("Invalid config file format: missing \"{0}\"")]
    MissingKey(&'static str),

    /// A textual name (anchor, palette colour, setting, ...) is not recognised.
    #[error("unknown {kind}: \"{value}\"")]
    UnknownName { kind: &'static str, value: String },
}

impl ConfigError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownName {
            kind,
            value: value.to_string(),
        }
    }
}
