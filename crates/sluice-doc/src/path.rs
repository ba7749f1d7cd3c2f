//! Dot-joined document paths.
//!
//! A [`DocPath`] addresses a position in a document tree: an ordered list of
//! named segments, written `a.b.c` on the command line and mirrored as nested
//! object keys in the document itself.

use crate::error::{DocError, Result};
use std::fmt;

/// An ordered sequence of named segments addressing a document node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DocPath {
    segments: Vec<String>,
}

impl DocPath {
    /// The empty path, addressing the document root.
    pub fn root() -> Self {
        DocPath::default()
    }

    /// Build a path from segments.
    pub fn from_segments(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        DocPath {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dot-joined path string.
    ///
    /// Rejects empty input and empty segments (`a..b`, leading or trailing
    /// dots) so that a typo never silently addresses the wrong node.
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(DocError::InvalidPath {
                path: text.to_string(),
                reason: "path is empty".to_string(),
            });
        }
        let mut segments = Vec::new();
        for segment in text.split('.') {
            if segment.is_empty() {
                return Err(DocError::InvalidPath {
                    path: text.to_string(),
                    reason: "empty path segment".to_string(),
                });
            }
            segments.push(segment.to_string());
        }
        Ok(DocPath { segments })
    }

    /// The path segments, root first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Append one segment.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// A new path with one more segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Concatenate two paths.
    pub fn join(&self, other: &DocPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        DocPath { segments }
    }

    /// Split off the first segment, returning it and the remainder.
    pub fn split_first(&self) -> Option<(&str, DocPath)> {
        let (first, rest) = self.segments.split_first()?;
        Some((
            first.as_str(),
            DocPath {
                segments: rest.to_vec(),
            },
        ))
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
