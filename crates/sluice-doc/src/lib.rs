//! # sluice-doc
//!
//! Literal document value model for Sluice.
//!
//! Configuration files, embedded pipeline data, and `--override` literals all
//! flow through one document representation: [`DocValue`], a string-keyed
//! ordered tree over YAML scalars. Every value exposes a coarse type category
//! ([`DocKind`]) used by the override engine to detect type changes, and every
//! position in a document is addressable by a dot-joined [`DocPath`].
//!
//! ## Example
//!
//! ```rust
//! use sluice_doc::{parse_document, parse_literal, DocKind, DocPath};
//!
//! let doc = parse_document("locations:\n  base: /data\n").unwrap();
//! let path = DocPath::parse("locations.base").unwrap();
//! let base = doc.get_path(&path).unwrap();
//! assert_eq!(base.kind(), DocKind::String);
//!
//! let lit = parse_literal("42").unwrap();
//! assert_eq!(lit.kind(), DocKind::Number);
//! ```

mod convert;
mod error;
mod literal;
mod path;
mod value;

pub use convert::{doc_value_from_yaml, doc_value_to_yaml, emit_yaml};
pub use error::{DocError, Result};
pub use literal::{parse_document, parse_literal};
pub use path::DocPath;
pub use value::{DocKind, DocValue};
