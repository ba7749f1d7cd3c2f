//! The resource tree: per-path lookup, insertion, and merge.

use crate::error::Result;
use crate::node::ResourceNode;
use indexmap::IndexMap;
use sluice_doc::DocPath;

/// A tree of resource nodes addressed by named path segments.
///
/// Declaration trees are built once during pipeline construction and are
/// immutable thereafter; location-bound trees are derived on demand by the
/// resolver and are disposable.
#[derive(Debug, Clone)]
pub struct ResourceTree {
    /// The node at this position.
    pub node: ResourceNode,
    children: IndexMap<String, ResourceTree>,
}

impl ResourceTree {
    /// A tree with a single node and no children.
    pub fn new(node: ResourceNode) -> Self {
        ResourceTree {
            node,
            children: IndexMap::new(),
        }
    }

    /// An empty grouping root.
    pub fn root() -> Self {
        ResourceTree::new(ResourceNode::group())
    }

    /// The children, in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &ResourceTree)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True when this position has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Look up the subtree at a path. The empty path is `self`.
    pub fn get(&self, path: &DocPath) -> Option<&ResourceTree> {
        let mut current = self;
        for segment in path.segments() {
            current = current.children.get(segment)?;
        }
        Some(current)
    }

    /// Insert a node at a path, synthesizing grouping nodes for missing
    /// intermediate segments and merging with any node already there.
    pub fn insert(&mut self, path: &DocPath, node: ResourceNode) -> Result<()> {
        let mut current = &mut *self;
        for segment in path.segments() {
            current = current
                .children
                .entry(segment.clone())
                .or_insert_with(ResourceTree::root);
        }
        let existing = std::mem::replace(&mut current.node, ResourceNode::group());
        current.node = existing.merge(node, path)?;
        Ok(())
    }

    /// Combine two trees: nodes at shared paths merge, everything else is
    /// kept. Fails on the first incompatible pair, naming its path.
    pub fn merge(self, other: ResourceTree, at: &DocPath) -> Result<ResourceTree> {
        let node = self.node.merge(other.node, at)?;
        let mut children = self.children;
        for (key, right) in other.children {
            match children.shift_remove(&key) {
                Some(left) => {
                    let merged = left.merge(right, &at.child(key.clone()))?;
                    children.insert(key, merged);
                }
                None => {
                    children.insert(key, right);
                }
            }
        }
        Ok(ResourceTree { node, children })
    }

    /// All paths in the tree, depth-first in insertion order, root first.
    pub fn paths(&self) -> Vec<(DocPath, &ResourceTree)> {
        let mut out = Vec::new();
        self.collect_paths(DocPath::root(), &mut out);
        out
    }

    fn collect_paths<'a>(&'a self, at: DocPath, out: &mut Vec<(DocPath, &'a ResourceTree)>) {
        out.push((at.clone(), self));
        for (key, child) in &self.children {
            child.collect_paths(at.child(key.clone()), out);
        }
    }

    /// Attach a prebuilt subtree under a key, replacing any existing child.
    /// The splitter views rebuild structure rather than merge nodes.
    pub(crate) fn attach_child(&mut self, key: String, child: ResourceTree) {
        self.children.insert(key, child);
    }

    /// Map every node, preserving structure. Used by the resolver and the
    /// splitter views.
    pub(crate) fn map_nodes(&self, f: &impl Fn(&DocPath, &ResourceNode) -> ResourceNode) -> Self {
        self.map_nodes_at(DocPath::root(), f)
    }

    fn map_nodes_at(
        &self,
        at: DocPath,
        f: &impl Fn(&DocPath, &ResourceNode) -> ResourceNode,
    ) -> Self {
        let node = f(&at, &self.node);
        let children = self
            .children
            .iter()
            .map(|(key, child)| (key.clone(), child.map_nodes_at(at.child(key.clone()), f)))
            .collect();
        ResourceTree { node, children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{TypeTag, VirtualFileSpec};
    use crate::TreeError;

    const JSON: TypeTag = TypeTag::new("json");
    const CSV: TypeTag = TypeTag::new("csv");

    fn declared(tag: TypeTag) -> ResourceNode {
        ResourceNode::declared(VirtualFileSpec::new(tag, tag))
    }

    fn p(s: &str) -> DocPath {
        DocPath::parse(s).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let mut tree = ResourceTree::root();
        tree.insert(&p("stage.input"), declared(JSON)).unwrap();

        let node = &tree.get(&p("stage.input")).unwrap().node;
        assert!(matches!(node, ResourceNode::Declared(Some(_))));
        // Intermediate segment became a grouping node.
        let stage = &tree.get(&p("stage")).unwrap().node;
        assert!(matches!(stage, ResourceNode::Declared(None)));
        assert!(tree.get(&p("missing")).is_none());
    }

    #[test]
    fn test_insert_merges_on_collision() {
        let mut tree = ResourceTree::root();
        tree.insert(&p("x"), declared(JSON)).unwrap();
        tree.insert(&p("x"), declared(JSON)).unwrap();
        assert!(tree.get(&p("x")).is_some());

        let err = tree.insert(&p("x"), declared(CSV)).unwrap_err();
        assert!(matches!(err, TreeError::TypeTagMismatch { .. }));
    }

    #[test]
    fn test_paths_depth_first() {
        let mut tree = ResourceTree::root();
        tree.insert(&p("a.one"), declared(JSON)).unwrap();
        tree.insert(&p("a.two"), declared(JSON)).unwrap();
        tree.insert(&p("b"), declared(JSON)).unwrap();

        let listed: Vec<String> = tree.paths().iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(listed, vec!["", "a", "a.one", "a.two", "b"]);
    }

    #[test]
    fn test_merge_trees_is_order_independent_for_compatible_nodes() {
        let build = |first: &str, second: &str| {
            let mut tree = ResourceTree::root();
            tree.insert(&p(first), declared(JSON)).unwrap();
            tree.insert(&p(second), declared(CSV)).unwrap();
            tree
        };
        let left = build("a", "b");
        let mut right = ResourceTree::root();
        right.insert(&p("a"), declared(JSON)).unwrap();

        let merged = left.merge(right, &DocPath::root()).unwrap();
        assert!(merged.get(&p("a")).is_some());
        assert!(merged.get(&p("b")).is_some());
    }

    #[test]
    fn test_merge_trees_incompatible_fails_in_any_order() {
        let tree_with = |tag: TypeTag| {
            let mut tree = ResourceTree::root();
            tree.insert(&p("shared"), declared(tag)).unwrap();
            tree
        };

        let err = tree_with(JSON)
            .merge(tree_with(CSV), &DocPath::root())
            .unwrap_err();
        assert!(err.to_string().contains("shared"));

        let err = tree_with(CSV)
            .merge(tree_with(JSON), &DocPath::root())
            .unwrap_err();
        assert!(matches!(err, TreeError::TypeTagMismatch { .. }));
    }

    #[test]
    fn test_merge_associative_for_compatible_trees() {
        let tree_with = |path: &str| {
            let mut tree = ResourceTree::root();
            tree.insert(&p(path), declared(JSON)).unwrap();
            tree
        };
        let (a, b, c) = (tree_with("x"), tree_with("y"), tree_with("z"));
        let (a2, b2, c2) = (tree_with("x"), tree_with("y"), tree_with("z"));

        let left = a
            .merge(b, &DocPath::root())
            .unwrap()
            .merge(c, &DocPath::root())
            .unwrap();
        let right = a2
            .merge(b2.merge(c2, &DocPath::root()).unwrap(), &DocPath::root())
            .unwrap();

        let paths = |t: &ResourceTree| -> Vec<String> {
            t.paths().iter().map(|(p, _)| p.to_string()).collect()
        };
        assert_eq!(paths(&left), paths(&right));
    }
}
