//! Resource tree nodes across their three lifecycle states.

use crate::error::{Result, TreeError};
use crate::location::Layer;
use crate::spec::VirtualFileSpec;
use sluice_doc::{DocPath, DocValue};
use std::fmt;
use std::sync::Arc;

/// A virtual resource bound to an ordered chain of physical layers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundFile {
    /// The declaration this binding satisfies.
    pub spec: VirtualFileSpec,
    /// Fallback candidates, most-specific first.
    pub layers: Vec<Layer>,
}

impl fmt::Display for BoundFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain = self
            .layers
            .iter()
            .map(|layer| match layer.resolved_ext(&self.spec) {
                Some(ext) => format!("{}.{}", layer.location, ext),
                None => layer.location.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" | ");
        write!(f, "{} ({})", chain, self.spec.label())
    }
}

/// A concrete runtime access function for one resource.
///
/// Built by the external execution layer once a location-bound node is
/// handed to it; this core only carries the value through. Invoking the
/// accessor yields the output together with access-log entries.
#[derive(Clone)]
pub struct DataAccessor {
    tag: crate::spec::TypeTag,
    run: Arc<dyn Fn(DocValue) -> (DocValue, Vec<String>) + Send + Sync>,
}

impl DataAccessor {
    /// Wrap an access function under a type tag.
    pub fn new(
        tag: crate::spec::TypeTag,
        run: impl Fn(DocValue) -> (DocValue, Vec<String>) + Send + Sync + 'static,
    ) -> Self {
        DataAccessor {
            tag,
            run: Arc::new(run),
        }
    }

    /// The accessor's type tag.
    pub fn tag(&self) -> crate::spec::TypeTag {
        self.tag
    }

    /// Run the access function.
    pub fn call(&self, input: DocValue) -> (DocValue, Vec<String>) {
        (self.run)(input)
    }
}

impl fmt::Debug for DataAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataAccessor")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// A node in a resource tree: a closed variant over the three lifecycle
/// states. Transitions only move forward, declaration to location-bound to
/// access-bound, never backward.
#[derive(Debug, Clone)]
pub enum ResourceNode {
    /// Declaration state. Grouping nodes carry no spec.
    Declared(Option<VirtualFileSpec>),

    /// Location-bound state. `None` means the node could not be bound and
    /// is pruned from later stages.
    LocationBound(Option<BoundFile>),

    /// Access-bound state, carrying runtime accessors only.
    AccessBound(Vec<DataAccessor>),
}

impl ResourceNode {
    /// A grouping node with no resource attached.
    pub fn group() -> Self {
        ResourceNode::Declared(None)
    }

    /// A declaration leaf.
    pub fn declared(spec: VirtualFileSpec) -> Self {
        ResourceNode::Declared(Some(spec))
    }

    /// Short name of the lifecycle state, for error messages.
    pub fn state_name(&self) -> &'static str {
        match self {
            ResourceNode::Declared(_) => "declared",
            ResourceNode::LocationBound(_) => "location-bound",
            ResourceNode::AccessBound(_) => "access-bound",
        }
    }

    /// The virtual spec, if this node still carries one.
    pub fn spec(&self) -> Option<&VirtualFileSpec> {
        match self {
            ResourceNode::Declared(spec) => spec.as_ref(),
            ResourceNode::LocationBound(bound) => bound.as_ref().map(|b| &b.spec),
            ResourceNode::AccessBound(_) => None,
        }
    }

    /// Whether this node participates in root-derived mapping without an
    /// explicit entry. Grouping nodes always do; leaves defer to their
    /// spec's flag.
    pub fn mapped_by_default(&self) -> bool {
        self.spec().is_none_or(|s| s.mapped_by_default)
    }

    /// Combine two nodes declared at the same path.
    ///
    /// Declarations must agree on their `(read, write)` type tags; a
    /// mismatch is a fatal configuration error naming the path, never a
    /// silent pick of one side. Bound nodes combine by concatenating their
    /// layer or accessor lists, used when multiple mapping sources target
    /// one path.
    pub fn merge(self, other: ResourceNode, path: &DocPath) -> Result<ResourceNode> {
        match (self, other) {
            (ResourceNode::Declared(a), ResourceNode::Declared(b)) => match (a, b) {
                (None, b) => Ok(ResourceNode::Declared(b)),
                (a, None) => Ok(ResourceNode::Declared(a)),
                (Some(a), Some(b)) => {
                    check_tags(&a, &b, path)?;
                    Ok(ResourceNode::Declared(Some(a)))
                }
            },
            (ResourceNode::LocationBound(a), ResourceNode::LocationBound(b)) => match (a, b) {
                (None, b) => Ok(ResourceNode::LocationBound(b)),
                (a, None) => Ok(ResourceNode::LocationBound(a)),
                (Some(mut a), Some(b)) => {
                    check_tags(&a.spec, &b.spec, path)?;
                    a.layers.extend(b.layers);
                    Ok(ResourceNode::LocationBound(Some(a)))
                }
            },
            (ResourceNode::AccessBound(mut a), ResourceNode::AccessBound(b)) => {
                a.extend(b);
                Ok(ResourceNode::AccessBound(a))
            }
            (left, right) => Err(TreeError::StateMismatch {
                path: path.clone(),
                left: left.state_name(),
                right: right.state_name(),
            }),
        }
    }
}

fn check_tags(a: &VirtualFileSpec, b: &VirtualFileSpec, path: &DocPath) -> Result<()> {
    if a.tags_compatible(b) {
        Ok(())
    } else {
        Err(TreeError::TypeTagMismatch {
            path: path.clone(),
            left_read: a.read_tag,
            left_write: a.write_tag,
            right_read: b.read_tag,
            right_write: b.write_tag,
        })
    }
}

impl fmt::Display for ResourceNode {
    /// Diagnostics rendering: a location-bound node renders its layer chain
    /// and label; an unbound node renders the explicit `null` marker.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceNode::LocationBound(Some(bound)) => write!(f, "{}", bound),
            ResourceNode::LocationBound(None) => write!(f, "null"),
            ResourceNode::Declared(Some(spec)) => write!(f, "virtual ({})", spec.label()),
            ResourceNode::Declared(None) => write!(f, "null"),
            ResourceNode::AccessBound(accessors) => {
                write!(f, "access-bound ({} accessor(s))", accessors.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use crate::spec::TypeTag;

    const JSON: TypeTag = TypeTag::new("json");
    const CSV: TypeTag = TypeTag::new("csv");

    fn path() -> DocPath {
        DocPath::parse("a.b").unwrap()
    }

    fn layer(loc: &str) -> Layer {
        Layer::new(Location::new(loc))
    }

    #[test]
    fn test_merge_declared_compatible() {
        let a = ResourceNode::declared(VirtualFileSpec::new(JSON, JSON));
        let b = ResourceNode::declared(VirtualFileSpec::new(JSON, JSON));
        let merged = a.merge(b, &path()).unwrap();
        assert!(matches!(merged, ResourceNode::Declared(Some(_))));
    }

    #[test]
    fn test_merge_declared_incompatible_fails_both_orders() {
        let a = || ResourceNode::declared(VirtualFileSpec::new(JSON, JSON));
        let b = || ResourceNode::declared(VirtualFileSpec::new(CSV, CSV));

        let err = a().merge(b(), &path()).unwrap_err();
        assert!(matches!(err, TreeError::TypeTagMismatch { .. }));
        assert!(err.to_string().contains("a.b"));

        let err = b().merge(a(), &path()).unwrap_err();
        assert!(matches!(err, TreeError::TypeTagMismatch { .. }));
    }

    #[test]
    fn test_merge_grouping_yields_other_side() {
        let spec = VirtualFileSpec::new(JSON, JSON);
        let merged = ResourceNode::group()
            .merge(ResourceNode::declared(spec.clone()), &path())
            .unwrap();
        assert_eq!(merged.spec(), Some(&spec));
    }

    #[test]
    fn test_merge_bound_concatenates_layers() {
        let spec = VirtualFileSpec::new(JSON, JSON);
        let a = ResourceNode::LocationBound(Some(BoundFile {
            spec: spec.clone(),
            layers: vec![layer("/primary")],
        }));
        let b = ResourceNode::LocationBound(Some(BoundFile {
            spec,
            layers: vec![layer("/fallback")],
        }));
        match a.merge(b, &path()).unwrap() {
            ResourceNode::LocationBound(Some(bound)) => {
                assert_eq!(bound.layers.len(), 2);
                assert_eq!(bound.layers[0].location.as_str(), "/primary");
                assert_eq!(bound.layers[1].location.as_str(), "/fallback");
            }
            other => panic!("unexpected merge result: {:?}", other),
        }
    }

    #[test]
    fn test_merge_cross_state_fails() {
        let a = ResourceNode::declared(VirtualFileSpec::new(JSON, JSON));
        let b = ResourceNode::LocationBound(None);
        let err = a.merge(b, &path()).unwrap_err();
        assert!(matches!(err, TreeError::StateMismatch { .. }));
    }

    #[test]
    fn test_merge_access_bound_concatenates() {
        let acc = || DataAccessor::new(JSON, |input| (input, vec!["read".to_string()]));
        let merged = ResourceNode::AccessBound(vec![acc()])
            .merge(ResourceNode::AccessBound(vec![acc(), acc()]), &path())
            .unwrap();
        match merged {
            ResourceNode::AccessBound(accessors) => assert_eq!(accessors.len(), 3),
            other => panic!("unexpected merge result: {:?}", other),
        }
    }

    #[test]
    fn test_accessor_call() {
        let acc = DataAccessor::new(JSON, |input| (input, vec!["hit".to_string()]));
        let (out, log) = acc.call(DocValue::integer(1));
        assert_eq!(out.as_i64(), Some(1));
        assert_eq!(log, vec!["hit"]);
    }

    #[test]
    fn test_render_bound_node() {
        let spec = VirtualFileSpec::new(JSON, JSON).with_default_ext("json");
        let node = ResourceNode::LocationBound(Some(BoundFile {
            spec,
            layers: vec![layer("/primary/x"), layer("/fallback/x").with_ext("csv")],
        }));
        assert_eq!(
            node.to_string(),
            "/primary/x.json | /fallback/x.csv (read json, write json)"
        );
    }

    #[test]
    fn test_render_unbound_node() {
        assert_eq!(ResourceNode::LocationBound(None).to_string(), "null");
    }

    #[test]
    fn test_mapped_by_default() {
        assert!(ResourceNode::group().mapped_by_default());
        assert!(ResourceNode::declared(VirtualFileSpec::new(JSON, JSON)).mapped_by_default());
        assert!(
            !ResourceNode::declared(
                VirtualFileSpec::new(JSON, JSON).require_explicit_mapping()
            )
            .mapped_by_default()
        );
    }
}
