//! Error types for resource tree operations.

use crate::spec::TypeTag;
use sluice_doc::DocPath;
use thiserror::Error;

/// Result type alias for sluice-tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors that can occur while building or resolving resource trees.
///
/// Type tag mismatches are fatal configuration errors: silently picking one
/// side would let two pipeline stages read the same path as different types.
#[derive(Debug, Clone, Error)]
pub enum TreeError {
    /// Two declarations at the same path disagree on their type tags.
    #[error(
        "incompatible resource types at `{path}`: \
         (read {left_read}, write {left_write}) vs (read {right_read}, write {right_write})"
    )]
    TypeTagMismatch {
        path: DocPath,
        left_read: TypeTag,
        left_write: TypeTag,
        right_read: TypeTag,
        right_write: TypeTag,
    },

    /// Two nodes at the same path are in different lifecycle states.
    #[error("cannot merge a {left} node with a {right} node at `{path}`")]
    StateMismatch {
        path: DocPath,
        left: &'static str,
        right: &'static str,
    },

    /// The `locations` section of the config document is not well-formed.
    #[error("malformed locations section: {reason}")]
    MalformedMapping { reason: String },
}
