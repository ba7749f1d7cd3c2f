//! Error types for document parsing and path addressing.

use thiserror::Error;

/// Result type alias for sluice-doc operations.
pub type Result<T> = std::result::Result<T, DocError>;

/// Errors that can occur while parsing or emitting documents.
#[derive(Debug, Error)]
pub enum DocError {
    /// YAML syntax error from the underlying scanner.
    #[error("YAML parse error: {0}")]
    Scan(#[from] yaml_rust2::ScanError),

    /// Emission to text failed.
    #[error("YAML emit error: {0:?}")]
    Emit(yaml_rust2::EmitError),

    /// Input contained more than one YAML document.
    #[error("expected a single document, found {0}")]
    MultipleDocuments(usize),

    /// A dot-path string could not be parsed.
    #[error("invalid path `{path}`: {reason}")]
    InvalidPath {
        /// The offending path text
        path: String,
        /// Why it was rejected
        reason: String,
    },
}

impl From<yaml_rust2::EmitError> for DocError {
    fn from(e: yaml_rust2::EmitError) -> Self {
        DocError::Emit(e)
    }
}
