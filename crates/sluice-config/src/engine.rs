//! The contract both override strategies satisfy.

use crate::error::{ConfigError, Result};
use clap::{ArgMatches, Command};
use sluice_doc::DocValue;

/// A strategy for deriving typed pipeline settings from a file-sourced
/// document plus command-line overrides.
///
/// Implementations parse their overrides from CLI matches, can detect a
/// no-op override set, and merge against the file document. The merge
/// returns an ordered list of human-readable warnings together with the
/// result: callers must report the warnings before proceeding and abort on
/// error. Warning order is deterministic for a given override sequence.
pub trait OverrideScheme {
    /// Parsed representation of this strategy's CLI overrides.
    type Overrides;
    /// The typed configuration produced by a successful merge.
    type Config;

    /// Contribute this strategy's flags to a command.
    fn augment_command(&self, cmd: Command) -> Command;

    /// Extract overrides from parsed CLI matches.
    fn overrides_from_matches(&self, matches: &ArgMatches) -> Result<Self::Overrides>;

    /// True when the overrides change nothing.
    fn no_overrides(&self, overrides: &Self::Overrides) -> bool;

    /// Merge the file-sourced document with the overrides.
    fn merge_with_file(
        &self,
        file: &DocValue,
        overrides: &Self::Overrides,
    ) -> (Vec<String>, std::result::Result<Self::Config, ConfigError>);
}
