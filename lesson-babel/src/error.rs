//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    Parse(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// A format option was given a value the format cannot use
    #[error("Invalid value '{value}' for option '{key}'")]
    InvalidOption { key: String, value: String },
}
