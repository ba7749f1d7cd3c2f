//! Physical locations and layered fallback candidates.

use crate::spec::VirtualFileSpec;
use sluice_doc::DocPath;
use std::fmt;

/// A reference to a physical storage location.
///
/// Locations are opaque text with a round-trip representation; this core
/// never reads or writes bytes at one. Trailing slashes are normalized away
/// so that joining a path is unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    /// Create a location from its text form.
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        while text.len() > 1 && text.ends_with('/') {
            text.pop();
        }
        Location(text)
    }

    /// The location's text form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive a sub-location by suffixing a tree path, slash-separated.
    pub fn join(&self, path: &DocPath) -> Location {
        if path.is_empty() {
            return self.clone();
        }
        let suffix = path.segments().join("/");
        if self.0 == "/" {
            Location(format!("/{}", suffix))
        } else {
            Location(format!("{}/{}", self.0, suffix))
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One candidate physical location in a prioritized fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// Where the resource lives.
    pub location: Location,
    /// Extension override for this layer; when absent, the virtual spec's
    /// default serialization extension applies.
    pub ext: Option<String>,
}

impl Layer {
    /// A layer with no extension override.
    pub fn new(location: Location) -> Self {
        Layer {
            location,
            ext: None,
        }
    }

    /// Set an explicit extension for this layer.
    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    /// The extension this layer resolves to for a given spec: an explicit
    /// per-layer extension wins, otherwise the spec's default.
    pub fn resolved_ext<'a>(&'a self, spec: &'a VirtualFileSpec) -> Option<&'a str> {
        self.ext.as_deref().or(spec.default_ext.as_deref())
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ext {
            Some(ext) => write!(f, "{}.{}", self.location, ext),
            None => write!(f, "{}", self.location),
        }
    }
}
