//! Parsing of config files and override literals.

use crate::convert::doc_value_from_yaml;
use crate::error::{DocError, Result};
use crate::value::DocValue;
use yaml_rust2::YamlLoader;

/// Parse a whole configuration document.
///
/// Empty input yields an empty map: a config file with no keys is valid and
/// means "all defaults".
pub fn parse_document(text: &str) -> Result<DocValue> {
    let mut docs = YamlLoader::load_from_str(text)?;
    match docs.len() {
        0 => Ok(DocValue::empty_map()),
        1 => Ok(doc_value_from_yaml(docs.remove(0))),
        n => Err(DocError::MultipleDocuments(n)),
    }
}

/// Parse the literal text of one `PATH=VALUE` override.
///
/// The text is interpreted as a single small YAML document, so bare words
/// are strings, `1`/`1.5` are numbers, `true` is a bool, `null`/`~` is
/// null, and `{a: 1}` / `[1, 2]` are nested structures. Empty text is null.
pub fn parse_literal(text: &str) -> Result<DocValue> {
    if text.trim().is_empty() {
        return Ok(DocValue::null());
    }
    let mut docs = YamlLoader::load_from_str(text)?;
    match docs.len() {
        0 => Ok(DocValue::null()),
        1 => Ok(doc_value_from_yaml(docs.remove(0))),
        n => Err(DocError::MultipleDocuments(n)),
    }
}
