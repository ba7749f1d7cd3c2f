//! # sluice-config
//!
//! Configuration override resolution with source precedence.
//!
//! Pipeline settings are derived by layering three sources, in strict
//! precedence order: a typed default schema, a file-sourced configuration
//! document, and command-line overrides. Two interchangeable strategies
//! implement the shared [`OverrideScheme`] contract:
//!
//! - [`RecordScheme`]: a schema-typed priority merge. Every field of a
//!   default record carries documentation, derives one CLI flag, and tracks
//!   where its final value came from ([`Provenance`]).
//! - [`PatchScheme`]: a generic path-addressed document patch. Repeatable
//!   `--override PATH=VALUE` options (plus caller-declared shortcut flags)
//!   fold left-to-right over the file-sourced document before decoding into
//!   the typed config.
//!
//! Both strategies return an ordered list of human-readable warnings along
//! with the result; callers report warnings before proceeding and abort on
//! error.

mod engine;
mod error;
mod patch;
mod priority;

pub use engine::OverrideScheme;
pub use error::{ConfigError, Result};
pub use patch::{apply_override, parse_override, PatchScheme, Shortcut};
pub use priority::{Provenance, RecordScheme, SchemaField, Sourced};
