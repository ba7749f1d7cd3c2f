//! Partitioning declaration trees into mapped and embedded subsets.
//!
//! Before resolution, a declaration tree splits into two independent views:
//! the *mapping view* (everything that needs an external location) and the
//! *embedded view* (values serialized literally into the configuration
//! document under the `data` section).

use crate::node::ResourceNode;
use crate::spec::ResourceIntent;
use crate::tree::ResourceTree;
use indexmap::IndexMap;
use sluice_doc::DocValue;

/// Reserved field name under which an embedded leaf's literal default is
/// stored at its path's position in the `data` section. The `$` prefix
/// keeps it from colliding with tree path segments.
pub const EMBED_VALUE_KEY: &str = "$value";

fn intent(node: &ResourceNode) -> Option<ResourceIntent> {
    node.spec().map(|s| s.intent)
}

/// The mapping view: every node except embed-intent leaves. Grouping nodes
/// are always kept.
pub fn mapping_view(tree: &ResourceTree) -> ResourceTree {
    let mut out = ResourceTree::new(tree.node.clone());
    for (key, child) in tree.children() {
        if intent(&child.node) == Some(ResourceIntent::EmbedInConfig) && child.is_leaf() {
            continue;
        }
        out.attach_child(key.to_string(), mapping_view(child));
    }
    out
}

/// The embedded view: only embed-intent leaves survive, everything else is
/// discarded. Empty subtrees collapse to absence.
pub fn embedded_view(tree: &ResourceTree) -> Option<ResourceTree> {
    let keep_self = intent(&tree.node) == Some(ResourceIntent::EmbedInConfig);
    let node = if keep_self {
        tree.node.clone()
    } else {
        ResourceNode::group()
    };
    let mut out = ResourceTree::new(node);
    for (key, child) in tree.children() {
        if let Some(kept) = embedded_view(child) {
            out.attach_child(key.to_string(), kept);
        }
    }
    if keep_self || !out.is_leaf() {
        Some(out)
    } else {
        None
    }
}

/// Serialize the embedded view into the config document's `data` section: a
/// nested object mirroring tree-path structure, each embedded leaf
/// contributing its literal default (when it has one) under
/// [`EMBED_VALUE_KEY`].
pub fn embedded_section(tree: &ResourceTree) -> Option<DocValue> {
    embedded_view(tree).map(|view| render_embedded(&view))
}

fn render_embedded(tree: &ResourceTree) -> DocValue {
    let mut entries = IndexMap::new();
    if let Some(default) = tree.node.spec().and_then(|s| s.embedded_default.clone()) {
        entries.insert(EMBED_VALUE_KEY.to_string(), default);
    }
    for (key, child) in tree.children() {
        entries.insert(key.to_string(), render_embedded(child));
    }
    DocValue::Map(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{TypeTag, VirtualFileSpec};
    use sluice_doc::DocPath;

    const JSON: TypeTag = TypeTag::new("json");

    fn p(s: &str) -> DocPath {
        DocPath::parse(s).unwrap()
    }

    fn split_tree() -> ResourceTree {
        let mut tree = ResourceTree::root();
        tree.insert(
            &p("stage.input"),
            ResourceNode::declared(VirtualFileSpec::new(JSON, JSON)),
        )
        .unwrap();
        tree.insert(
            &p("stage.options"),
            ResourceNode::declared(
                VirtualFileSpec::new(JSON, JSON).with_embedded_default(DocValue::integer(10)),
            ),
        )
        .unwrap();
        tree
    }

    #[test]
    fn test_split_partitions_by_intent() {
        let tree = split_tree();

        let mapped = mapping_view(&tree);
        assert!(mapped.get(&p("stage.input")).is_some());
        assert!(mapped.get(&p("stage.options")).is_none());

        let embedded = embedded_view(&tree).unwrap();
        assert!(embedded.get(&p("stage.options")).is_some());
        assert!(embedded.get(&p("stage.input")).is_none());
    }

    #[test]
    fn test_embedded_view_collapses_empty_subtrees() {
        let mut tree = ResourceTree::root();
        tree.insert(
            &p("only.mapped"),
            ResourceNode::declared(VirtualFileSpec::new(JSON, JSON)),
        )
        .unwrap();
        assert!(embedded_view(&tree).is_none());
    }

    #[test]
    fn test_mapping_view_keeps_grouping_nodes() {
        let tree = split_tree();
        let mapped = mapping_view(&tree);
        // `stage` is a grouping node and survives even though one of its
        // leaves was split away.
        assert!(mapped.get(&p("stage")).is_some());
    }

    #[test]
    fn test_embedded_section_mirrors_paths() {
        let section = embedded_section(&split_tree()).unwrap();
        let options = section
            .get("stage")
            .and_then(|s| s.get("options"))
            .unwrap();
        assert_eq!(options.get(EMBED_VALUE_KEY).unwrap().as_i64(), Some(10));
    }

    #[test]
    fn test_embedded_leaf_without_default_contributes_empty_object() {
        let mut tree = ResourceTree::root();
        tree.insert(
            &p("opts"),
            ResourceNode::declared(VirtualFileSpec::new(JSON, JSON).embed_in_config()),
        )
        .unwrap();
        let section = embedded_section(&tree).unwrap();
        assert!(section.get("opts").unwrap().as_map().unwrap().is_empty());
    }
}
