//! Virtual resource declarations.

use sluice_doc::DocValue;
use std::fmt;

/// An opaque identifier for the type a resource is read or written as.
///
/// Compatibility between declarations is decided by comparing identifiers
/// explicitly, never by runtime casting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag(&'static str);

impl TypeTag {
    /// Create a tag from its identifier.
    pub const fn new(name: &'static str) -> Self {
        TypeTag(name)
    }

    /// The tag's identifier.
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a declared resource is meant to reach the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceIntent {
    /// Bound to one or more external physical locations.
    MapToLocation,
    /// Serialized literally into the configuration document.
    EmbedInConfig,
}

/// An abstract, typed resource requirement, not yet bound to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualFileSpec {
    /// Type the resource is read as.
    pub read_tag: TypeTag,
    /// Type the resource is written as.
    pub write_tag: TypeTag,
    /// Mapped externally or embedded in the config document.
    pub intent: ResourceIntent,
    /// Default serialization extension, used when a layer carries none.
    pub default_ext: Option<String>,
    /// Literal default value for embed-intent resources.
    pub embedded_default: Option<DocValue>,
    /// Whether the resource participates in root-derived mapping without an
    /// explicit entry. Some resources must be mapped deliberately.
    pub mapped_by_default: bool,
}

impl VirtualFileSpec {
    /// A location-mapped resource with the given read/write tags.
    pub fn new(read_tag: TypeTag, write_tag: TypeTag) -> Self {
        VirtualFileSpec {
            read_tag,
            write_tag,
            intent: ResourceIntent::MapToLocation,
            default_ext: None,
            embedded_default: None,
            mapped_by_default: true,
        }
    }

    /// Set the default serialization extension.
    pub fn with_default_ext(mut self, ext: impl Into<String>) -> Self {
        self.default_ext = Some(ext.into());
        self
    }

    /// Mark the resource as embedded in the configuration document.
    pub fn embed_in_config(mut self) -> Self {
        self.intent = ResourceIntent::EmbedInConfig;
        self
    }

    /// Mark as embedded with a literal default value.
    pub fn with_embedded_default(mut self, value: DocValue) -> Self {
        self.intent = ResourceIntent::EmbedInConfig;
        self.embedded_default = Some(value);
        self
    }

    /// Exclude from root-derived mapping; an explicit entry is required.
    pub fn require_explicit_mapping(mut self) -> Self {
        self.mapped_by_default = false;
        self
    }

    /// Whether two declarations may share a path.
    pub fn tags_compatible(&self, other: &VirtualFileSpec) -> bool {
        self.read_tag == other.read_tag && self.write_tag == other.write_tag
    }

    /// Human label for diagnostics rendering.
    pub fn label(&self) -> String {
        format!("read {}, write {}", self.read_tag, self.write_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: TypeTag = TypeTag::new("json");
    const CSV: TypeTag = TypeTag::new("csv");

    #[test]
    fn test_defaults() {
        let spec = VirtualFileSpec::new(JSON, JSON);
        assert_eq!(spec.intent, ResourceIntent::MapToLocation);
        assert!(spec.mapped_by_default);
        assert!(spec.default_ext.is_none());
    }

    #[test]
    fn test_builders() {
        let spec = VirtualFileSpec::new(JSON, JSON)
            .with_default_ext("json")
            .require_explicit_mapping();
        assert_eq!(spec.default_ext.as_deref(), Some("json"));
        assert!(!spec.mapped_by_default);
    }

    #[test]
    fn test_embedded_default_sets_intent() {
        let spec = VirtualFileSpec::new(JSON, JSON)
            .with_embedded_default(DocValue::integer(5));
        assert_eq!(spec.intent, ResourceIntent::EmbedInConfig);
        assert_eq!(spec.embedded_default.unwrap().as_i64(), Some(5));
    }

    #[test]
    fn test_tag_compatibility() {
        let a = VirtualFileSpec::new(JSON, JSON);
        let b = VirtualFileSpec::new(JSON, JSON).with_default_ext("json");
        let c = VirtualFileSpec::new(CSV, CSV);
        assert!(a.tags_compatible(&b));
        assert!(!a.tags_compatible(&c));
    }
}
