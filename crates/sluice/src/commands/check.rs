//! Check command implementation.
//!
//! `sluice check` loads a pipeline configuration file, folds the
//! command-line overrides over it, and prints the resolved document.
//! When the document carries a `locations` section it is additionally
//! decoded as a mapping spec and summarized, catching malformed mappings
//! before a pipeline would trip over them.

use anyhow::{Context, Result};
use clap::ArgMatches;
use sluice_config::{OverrideScheme, PatchScheme};
use sluice_doc::{emit_yaml, parse_document, DocValue};
use sluice_tree::MappingSpec;
use tracing::{debug, info, warn};

/// Execute the check command.
pub fn execute(scheme: &PatchScheme<DocValue>, matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<String>("config")
        .context("--config is required")?;

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file `{}`", path))?;
    let file = parse_document(&text)
        .with_context(|| format!("failed to parse config file `{}`", path))?;

    let overrides = scheme.overrides_from_matches(matches)?;
    if scheme.no_overrides(&overrides) {
        debug!("no overrides given");
    }

    let (warnings, result) = scheme.merge_with_file(&file, &overrides);
    for warning in &warnings {
        warn!("{warning}");
    }
    let resolved =
        result.with_context(|| format!("failed to resolve configuration from `{}`", path))?;

    print!("{}", emit_yaml(&resolved)?);

    if let Some(locations) = resolved.get("locations") {
        let mapping = MappingSpec::from_doc(locations)
            .context("the `locations` section is not a valid mapping")?;
        summarize_mapping(&mapping);
    }

    Ok(())
}

fn summarize_mapping(mapping: &MappingSpec) {
    match mapping {
        MappingSpec::RootLocation(root) => {
            info!(root = %root, "location mapping: derived from a single root");
        }
        MappingSpec::Table(table) => {
            info!(
                entries = table.len(),
                "location mapping: explicit per-path table"
            );
            for (path, layers) in table {
                let rendered: Vec<String> = layers.iter().map(ToString::to_string).collect();
                info!(path = %path, layers = %rendered.join(" | "), "mapping entry");
            }
        }
    }
}
