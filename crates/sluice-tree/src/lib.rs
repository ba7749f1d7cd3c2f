//! # sluice-tree
//!
//! Virtual resource trees and location mapping for Sluice pipelines.
//!
//! Pipeline stages declare abstract, typed resources (files or data) as a
//! tree of [`ResourceNode`]s. A node moves through three lifecycle states,
//! forward only:
//!
//! 1. **Declared**: an abstract requirement carrying a [`VirtualFileSpec`]
//!    (type tags, intent, serialization default), not yet bound to storage.
//! 2. **Location-bound**: the same spec plus an ordered list of [`Layer`]s,
//!    physical fallback candidates resolved by [`resolve`].
//! 3. **Access-bound**: a concrete runtime read/write function, built by the
//!    external execution layer.
//!
//! Two views partition a declaration tree before resolution: the *mapping
//! view* (resources bound to external locations) and the *embedded view*
//! (values serialized literally into the configuration document). See
//! [`mapping_view`], [`embedded_view`], and [`embedded_section`].
//!
//! All operations here are pure, synchronous tree transformations; reading
//! or writing bytes at a location belongs to the surrounding pipeline
//! runner.

mod error;
mod location;
mod node;
mod resolve;
mod split;
mod spec;
mod tree;

pub use error::{Result, TreeError};
pub use location::{Layer, Location};
pub use node::{BoundFile, DataAccessor, ResourceNode};
pub use resolve::{mapping_section, resolve, MappingSpec};
pub use spec::{ResourceIntent, TypeTag, VirtualFileSpec};
pub use split::{embedded_section, embedded_view, mapping_view, EMBED_VALUE_KEY};
pub use tree::ResourceTree;
