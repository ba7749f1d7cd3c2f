//! Error types for configuration override resolution.

use thiserror::Error;

/// Result type alias for sluice-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that abort configuration resolution.
///
/// Warning-level conditions (type changes, newly added fields) are not
/// errors; they travel in the ordered warning list alongside the result.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The merged document could not be decoded into the typed config, or
    /// the file-sourced document failed to decode at all.
    #[error("config document failed to decode: {0}")]
    Decode(String),

    /// An override string is missing the `=` separator.
    #[error("invalid override `{0}`: expected PATH=VALUE")]
    InvalidOverride(String),

    /// The literal part of an override could not be parsed.
    #[error("invalid literal for `{path}`: {reason}")]
    BadLiteral {
        /// The override's path
        path: String,
        /// Why the literal was rejected
        reason: String,
    },

    /// A non-terminal path segment does not exist in the document.
    #[error("path not found: `{missing}` does not exist under `{path}`")]
    PathNotFound {
        /// The full override path
        path: String,
        /// The remainder that could not be followed
        missing: String,
    },

    /// The path descends into a value that is not an object.
    #[error("malformed path `{path}`: `{at}` is not an object")]
    MalformedPath {
        /// The full override path
        path: String,
        /// The prefix whose value blocked the descent
        at: String,
    },

    /// The path text itself is not a valid dot-path.
    #[error(transparent)]
    Path(#[from] sluice_doc::DocError),
}
