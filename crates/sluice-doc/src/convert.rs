//! Conversion between YAML trees and document values.

use crate::error::Result;
use crate::value::DocValue;
use indexmap::IndexMap;
use yaml_rust2::{Yaml, YamlEmitter};

/// Convert a parsed YAML tree to a [`DocValue`].
///
/// Map keys become strings: scalar keys are rendered through their text
/// form, container keys are dropped (a container key is never meaningful as
/// a config path segment). Aliases and bad values become null.
pub fn doc_value_from_yaml(yaml: Yaml) -> DocValue {
    match yaml {
        Yaml::Array(items) => DocValue::Array(items.into_iter().map(doc_value_from_yaml).collect()),
        Yaml::Hash(hash) => {
            let mut entries = IndexMap::new();
            for (key, value) in hash {
                if let Some(key) = scalar_key(&key) {
                    entries.insert(key, doc_value_from_yaml(value));
                }
            }
            DocValue::Map(entries)
        }
        Yaml::Alias(_) | Yaml::BadValue => DocValue::null(),
        scalar => DocValue::Scalar(scalar),
    }
}

fn scalar_key(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Real(r) => Some(r.clone()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Convert a [`DocValue`] back to a YAML tree for emission.
pub fn doc_value_to_yaml(value: &DocValue) -> Yaml {
    match value {
        DocValue::Scalar(scalar) => scalar.clone(),
        DocValue::Array(items) => Yaml::Array(items.iter().map(doc_value_to_yaml).collect()),
        DocValue::Map(entries) => {
            let mut hash = yaml_rust2::yaml::Hash::new();
            for (key, value) in entries {
                hash.insert(Yaml::String(key.clone()), doc_value_to_yaml(value));
            }
            Yaml::Hash(hash)
        }
    }
}

/// Render a document value as YAML text.
///
/// Used for operator-facing output of merged documents; never re-parsed by
/// this crate's callers.
pub fn emit_yaml(value: &DocValue) -> Result<String> {
    let yaml = doc_value_to_yaml(value);
    let mut out = String::new();
    YamlEmitter::new(&mut out).dump(&yaml)?;
    // The emitter prefixes every document with a `---` marker.
    let out = out.strip_prefix("---\n").unwrap_or(&out).to_string();
    Ok(out)
}
