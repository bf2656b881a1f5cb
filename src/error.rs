//! Error types for plugin configuration validation.

use std::fmt;

/// Result type alias for configuration entry construction.
pub type Result<T> = std::result::Result<T, ConfError>;

/// Errors raised while building configuration entries.
///
/// Every variant is fatal at this layer: construction stops at the first
/// error and no partially built entry is returned.
#[derive(Debug, thiserror::Error)]
pub enum ConfError {
    /// A required field key is absent from a plugin record.
    #[error("{plugin} is missing {field} field")]
    MissingField { plugin: String, field: &'static str },

    /// A required field is present but its value is empty or falsy.
    #[error("{plugin}: {field} has no value set")]
    EmptyValue { plugin: String, field: &'static str },

    /// A field value cannot be read as the expected literal shape.
    #[error("{plugin}: {field} value has wrong format: {reason}")]
    MalformedLiteral {
        plugin: String,
        field: &'static str,
        reason: String,
    },

    /// The top-level section is absent from the configuration.
    #[error("configuration has no [{0}] section")]
    MissingSection(String),

    /// The top-level section is not a table of plugin records.
    #[error("[{section}] must be a table of plugin records, found {found}")]
    InvalidSection { section: String, found: &'static str },

    /// A plugin record is missing or is not a table.
    #[error("plugin record {plugin} is invalid: {reason}")]
    InvalidRecord { plugin: String, reason: String },
}

impl ConfError {
    pub(crate) fn malformed(plugin: &str, field: &'static str, reason: impl fmt::Display) -> Self {
        ConfError::MalformedLiteral {
            plugin: plugin.to_string(),
            field,
            reason: reason.to_string(),
        }
    }

    /// Field name the error refers to, if it is a per-field error.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfError::MissingField { field, .. }
            | ConfError::EmptyValue { field, .. }
            | ConfError::MalformedLiteral { field, .. } => Some(field),
            _ => None,
        }
    }
}
