//! Binding declaration trees to physical location layers.

use crate::error::{Result, TreeError};
use crate::location::{Layer, Location};
use crate::node::{BoundFile, ResourceNode};
use crate::tree::ResourceTree;
use indexmap::IndexMap;
use sluice_doc::{DocPath, DocValue};
use tracing::debug;

/// How virtual paths map to physical layers: either one root location from
/// which every path's layer is derived by suffixing, or an explicit
/// per-path table of layer lists.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingSpec {
    /// Every participating path binds to `root/<path segments>`.
    RootLocation(Location),
    /// Explicit layer lists keyed by dot-joined path.
    Table(IndexMap<String, Vec<Layer>>),
}

impl MappingSpec {
    /// Parse the `locations` section of a configuration document.
    ///
    /// Accepts the single-root shorthand (`locations: /base`) or a table
    /// whose entries are a layer, or a list of layers, each written as a
    /// bare location string or as `{loc: ..., ext: ...}`.
    pub fn from_doc(doc: &DocValue) -> Result<MappingSpec> {
        if let Some(root) = doc.as_str() {
            return Ok(MappingSpec::RootLocation(Location::new(root)));
        }
        let Some(entries) = doc.as_map() else {
            return Err(TreeError::MalformedMapping {
                reason: format!(
                    "expected a root location string or a per-path table, found {}",
                    doc.kind()
                ),
            });
        };
        let mut table = IndexMap::new();
        for (key, value) in entries {
            // Keys must be addressable paths; catch typos here rather than
            // during resolution.
            DocPath::parse(key).map_err(|e| TreeError::MalformedMapping {
                reason: e.to_string(),
            })?;
            table.insert(key.clone(), parse_layers(key, value)?);
        }
        Ok(MappingSpec::Table(table))
    }

    /// The explicit layers for a path, when the table covers it.
    pub fn explicit_layers(&self, path: &DocPath) -> Option<&[Layer]> {
        match self {
            MappingSpec::RootLocation(_) => None,
            MappingSpec::Table(table) => table.get(&path.to_string()).map(Vec::as_slice),
        }
    }
}

fn parse_layers(key: &str, value: &DocValue) -> Result<Vec<Layer>> {
    match value {
        DocValue::Array(items) => items.iter().map(|item| parse_layer(key, item)).collect(),
        other => Ok(vec![parse_layer(key, other)?]),
    }
}

fn parse_layer(key: &str, value: &DocValue) -> Result<Layer> {
    if let Some(loc) = value.as_str() {
        return Ok(Layer::new(Location::new(loc)));
    }
    let malformed = |reason: String| TreeError::MalformedMapping { reason };
    let entries = value.as_map().ok_or_else(|| {
        malformed(format!(
            "entry for `{}` must be a location string or {{loc, ext}}, found {}",
            key,
            value.kind()
        ))
    })?;
    let loc = entries
        .get("loc")
        .and_then(DocValue::as_str)
        .ok_or_else(|| malformed(format!("entry for `{}` is missing a `loc` string", key)))?;
    let mut layer = Layer::new(Location::new(loc));
    if let Some(ext) = entries.get("ext") {
        let ext = ext
            .as_str()
            .ok_or_else(|| malformed(format!("`ext` for `{}` must be a string", key)))?;
        layer = layer.with_ext(ext);
    }
    Ok(layer)
}

/// Bind a declaration-state tree to physical layers.
///
/// Per path: an explicit table entry wins; otherwise, in root mode, one
/// layer is synthesized by suffixing the path onto the root location
/// (unless the node opted out of default mapping); otherwise the node is
/// left unbound and prunes itself from later stages.
///
/// Pure: identical inputs always produce structurally identical outputs, so
/// callers may resolve once for validation and again at run time.
pub fn resolve(tree: &ResourceTree, mapping: &MappingSpec) -> ResourceTree {
    tree.map_nodes(&|path, node| match node {
        ResourceNode::Declared(Some(spec)) => {
            let layers = match mapping.explicit_layers(path) {
                Some(layers) => Some(layers.to_vec()),
                None => match mapping {
                    MappingSpec::RootLocation(root) if node.mapped_by_default() => {
                        Some(vec![Layer::new(root.join(path))])
                    }
                    _ => None,
                },
            };
            match layers {
                Some(layers) => {
                    debug!(path = %path, layers = layers.len(), "bound resource");
                    ResourceNode::LocationBound(Some(BoundFile {
                        spec: spec.clone(),
                        layers,
                    }))
                }
                None => {
                    debug!(path = %path, "resource left unbound");
                    ResourceNode::LocationBound(None)
                }
            }
        }
        ResourceNode::Declared(None) => ResourceNode::LocationBound(None),
        bound => bound.clone(),
    })
}

/// Render a location-bound tree as the config document's `locations`
/// section: a table from dot-joined path to layer list, each layer carrying
/// its resolved extension.
pub fn mapping_section(tree: &ResourceTree) -> DocValue {
    let mut entries = IndexMap::new();
    for (path, subtree) in tree.paths() {
        if let ResourceNode::LocationBound(Some(bound)) = &subtree.node {
            let layers: Vec<DocValue> = bound
                .layers
                .iter()
                .map(|layer| match layer.resolved_ext(&bound.spec) {
                    Some(ext) => {
                        let mut entry = IndexMap::new();
                        entry.insert(
                            "loc".to_string(),
                            DocValue::string(layer.location.as_str()),
                        );
                        entry.insert("ext".to_string(), DocValue::string(ext));
                        DocValue::Map(entry)
                    }
                    None => DocValue::string(layer.location.as_str()),
                })
                .collect();
            entries.insert(path.to_string(), DocValue::Array(layers));
        }
    }
    DocValue::Map(entries)
}
