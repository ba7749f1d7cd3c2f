//! Core document value types.

use crate::path::DocPath;
use indexmap::IndexMap;
use std::fmt;
use yaml_rust2::Yaml;

/// Coarse type category of a document value.
///
/// This is the granularity at which the override engine reports type
/// changes: overriding a `Number` with a `String` warns, overriding one
/// number with another does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocKind::Null => "null",
            DocKind::Bool => "bool",
            DocKind::Number => "number",
            DocKind::String => "string",
            DocKind::Array => "array",
            DocKind::Object => "object",
        };
        write!(f, "{}", name)
    }
}

/// A document value: the shape configuration files, embedded pipeline data,
/// and override literals share.
///
/// Scalars reuse the YAML scalar model; maps are string-keyed and preserve
/// insertion order so that merged documents render deterministically.
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    /// Atomic values (string, number, bool, null).
    Scalar(Yaml),

    /// Ordered sequence of values.
    Array(Vec<DocValue>),

    /// Ordered string-keyed object.
    Map(IndexMap<String, DocValue>),
}

impl DocValue {
    /// The null value.
    pub fn null() -> Self {
        DocValue::Scalar(Yaml::Null)
    }

    /// A string scalar.
    pub fn string(s: impl Into<String>) -> Self {
        DocValue::Scalar(Yaml::String(s.into()))
    }

    /// An integer scalar.
    pub fn integer(i: i64) -> Self {
        DocValue::Scalar(Yaml::Integer(i))
    }

    /// A boolean scalar.
    pub fn boolean(b: bool) -> Self {
        DocValue::Scalar(Yaml::Boolean(b))
    }

    /// An empty object.
    pub fn empty_map() -> Self {
        DocValue::Map(IndexMap::new())
    }

    /// The coarse type category of this value.
    pub fn kind(&self) -> DocKind {
        match self {
            DocValue::Scalar(Yaml::Boolean(_)) => DocKind::Bool,
            DocValue::Scalar(Yaml::Integer(_) | Yaml::Real(_)) => DocKind::Number,
            DocValue::Scalar(Yaml::String(_)) => DocKind::String,
            // Aliases and bad values never survive conversion; anything else
            // scalar-shaped is treated as null.
            DocValue::Scalar(_) => DocKind::Null,
            DocValue::Array(_) => DocKind::Array,
            DocValue::Map(_) => DocKind::Object,
        }
    }

    /// Check if this is a scalar value.
    pub fn is_scalar(&self) -> bool {
        matches!(self, DocValue::Scalar(_))
    }

    /// Check if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, DocValue::Array(_))
    }

    /// Check if this is a map value.
    pub fn is_map(&self) -> bool {
        matches!(self, DocValue::Map(_))
    }

    /// Check if this is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DocValue::Scalar(Yaml::Null))
    }

    /// Get as a string slice if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocValue::Scalar(Yaml::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Get as an integer if this is an integer scalar.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DocValue::Scalar(Yaml::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// Get as a bool if this is a boolean scalar.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DocValue::Scalar(Yaml::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    /// Get as map entries if this is a map.
    pub fn as_map(&self) -> Option<&IndexMap<String, DocValue>> {
        match self {
            DocValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Get as array items if this is an array.
    pub fn as_array(&self) -> Option<&[DocValue]> {
        match self {
            DocValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a direct child by key.
    pub fn get(&self, key: &str) -> Option<&DocValue> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Look up a nested value by path. The empty path addresses `self`.
    pub fn get_path(&self, path: &DocPath) -> Option<&DocValue> {
        let mut current = self;
        for segment in path.segments() {
            current = current.get(segment)?;
        }
        Some(current)
    }
}
