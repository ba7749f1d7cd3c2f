//! Generic path-addressed document patching.
//!
//! The CLI surface is a repeatable `--override PATH=VALUE` option plus
//! caller-declared shortcut flags that expand to fixed path prefixes.
//! Overrides fold left-to-right over the file-sourced document: each one
//! observes the effect of the previous ones, so repeating a path keeps the
//! last value. Warnings are appended at each step, making the final list
//! deterministic for a given override sequence.

use crate::engine::OverrideScheme;
use crate::error::{ConfigError, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use sluice_doc::{parse_literal, DocPath, DocValue};
use tracing::debug;

const OVERRIDE_ARG: &str = "override";

/// A named CLI flag expanding to a fixed path prefix.
///
/// `--<flag> SUB=V` is equivalent to `--override <prefix>.SUB=V`; with an
/// empty sub-path (`--<flag> =V`) the prefix itself is patched.
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// The long flag name.
    pub flag: &'static str,
    /// The path prefix the flag expands to.
    pub prefix: DocPath,
    /// Help text for the generated flag.
    pub help: &'static str,
}

impl Shortcut {
    /// Declare a shortcut flag.
    pub fn new(flag: &'static str, prefix: DocPath, help: &'static str) -> Self {
        Shortcut { flag, prefix, help }
    }

    fn expand(&self, text: &str) -> Result<(DocPath, DocValue)> {
        let Some((sub, literal)) = text.split_once('=') else {
            return Err(ConfigError::InvalidOverride(text.to_string()));
        };
        let path = if sub.is_empty() {
            self.prefix.clone()
        } else {
            self.prefix.join(&DocPath::parse(sub)?)
        };
        let value = parse_value(&path, literal)?;
        Ok((path, value))
    }
}

/// Parse one `PATH=VALUE` override string.
///
/// The string splits once on the first `=`; the left side must be a valid
/// dot-path and the right side is parsed independently as a small literal
/// document.
pub fn parse_override(text: &str) -> Result<(DocPath, DocValue)> {
    let Some((path_text, literal)) = text.split_once('=') else {
        return Err(ConfigError::InvalidOverride(text.to_string()));
    };
    let path = DocPath::parse(path_text)?;
    let value = parse_value(&path, literal)?;
    Ok((path, value))
}

fn parse_value(path: &DocPath, literal: &str) -> Result<DocValue> {
    parse_literal(literal).map_err(|e| ConfigError::BadLiteral {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Apply one override to a document, returning the patched document and
/// the warnings the application produced.
///
/// The input document is untouched on error: the patch either applies
/// fully or not at all.
pub fn apply_override(
    doc: &DocValue,
    path: &DocPath,
    value: DocValue,
) -> Result<(DocValue, Vec<String>)> {
    let mut warnings = Vec::new();
    let patched = apply(doc, path, path, value, &mut warnings)?;
    Ok((patched, warnings))
}

fn apply(
    current: &DocValue,
    full: &DocPath,
    remaining: &DocPath,
    value: DocValue,
    warnings: &mut Vec<String>,
) -> Result<DocValue> {
    // Path exhausted: replace the value here, warning when its coarse type
    // category changes.
    let Some((head, rest)) = remaining.split_first() else {
        if current.kind() != value.kind() {
            warnings.push(format!(
                "overriding a {} with a {} at `{}`",
                current.kind(),
                value.kind(),
                full
            ));
        }
        return Ok(value);
    };

    let Some(entries) = current.as_map() else {
        let consumed = full.len() - remaining.len();
        let at = DocPath::from_segments(full.segments()[..consumed].iter().cloned());
        return Err(ConfigError::MalformedPath {
            path: full.to_string(),
            at: at.to_string(),
        });
    };

    match entries.get(head) {
        Some(child) => {
            let patched = apply(child, full, &rest, value, warnings)?;
            let mut entries = entries.clone();
            entries.insert(head.to_string(), patched);
            Ok(DocValue::Map(entries))
        }
        None if rest.is_empty() => {
            warnings.push(format!("field `{}` did not previously exist", full));
            let mut entries = entries.clone();
            entries.insert(head.to_string(), value);
            Ok(DocValue::Map(entries))
        }
        None => Err(ConfigError::PathNotFound {
            path: full.to_string(),
            missing: remaining.to_string(),
        }),
    }
}

/// The generic path-patch strategy.
///
/// Parameterized by the decoder that turns the patched document into the
/// typed config; [`PatchScheme::raw`] keeps the document itself.
pub struct PatchScheme<C> {
    shortcuts: Vec<Shortcut>,
    decode: fn(&DocValue) -> std::result::Result<C, String>,
}

impl PatchScheme<DocValue> {
    /// A scheme whose config is the patched document itself.
    pub fn raw() -> Self {
        PatchScheme::new(|doc| Ok(doc.clone()))
    }
}

impl<C> PatchScheme<C> {
    /// Create a scheme with the given final decoder.
    pub fn new(decode: fn(&DocValue) -> std::result::Result<C, String>) -> Self {
        PatchScheme {
            shortcuts: Vec::new(),
            decode,
        }
    }

    /// Declare a shortcut flag.
    pub fn shortcut(mut self, shortcut: Shortcut) -> Self {
        self.shortcuts.push(shortcut);
        self
    }
}

impl<C> OverrideScheme for PatchScheme<C> {
    /// Parsed patches in command-line order.
    type Overrides = Vec<(DocPath, DocValue)>;
    type Config = C;

    fn augment_command(&self, mut cmd: Command) -> Command {
        cmd = cmd.arg(
            Arg::new(OVERRIDE_ARG)
                .short('o')
                .long(OVERRIDE_ARG)
                .value_name("PATH=VALUE")
                .help("Override a config value at a dot-joined path (repeatable)")
                .action(ArgAction::Append),
        );
        for shortcut in &self.shortcuts {
            cmd = cmd.arg(
                Arg::new(shortcut.flag)
                    .long(shortcut.flag)
                    .value_name("PATH=VALUE")
                    .help(shortcut.help)
                    .action(ArgAction::Append),
            );
        }
        cmd
    }

    /// Collect overrides from all patch flags, preserving their order of
    /// appearance on the command line across flags.
    fn overrides_from_matches(&self, matches: &ArgMatches) -> Result<Self::Overrides> {
        let mut raw: Vec<(usize, &String, Option<&Shortcut>)> = Vec::new();
        if let (Some(indices), Some(values)) = (
            matches.indices_of(OVERRIDE_ARG),
            matches.get_many::<String>(OVERRIDE_ARG),
        ) {
            raw.extend(indices.zip(values).map(|(i, v)| (i, v, None)));
        }
        for shortcut in &self.shortcuts {
            if let (Some(indices), Some(values)) = (
                matches.indices_of(shortcut.flag),
                matches.get_many::<String>(shortcut.flag),
            ) {
                raw.extend(indices.zip(values).map(|(i, v)| (i, v, Some(shortcut))));
            }
        }
        raw.sort_by_key(|(i, ..)| *i);

        raw.into_iter()
            .map(|(_, text, shortcut)| match shortcut {
                Some(shortcut) => shortcut.expand(text),
                None => parse_override(text),
            })
            .collect()
    }

    fn no_overrides(&self, overrides: &Self::Overrides) -> bool {
        overrides.is_empty()
    }

    /// Fold the overrides over the file-sourced document, then decode.
    /// Warnings already accumulated are returned even when a later
    /// override fails.
    fn merge_with_file(
        &self,
        file: &DocValue,
        overrides: &Self::Overrides,
    ) -> (Vec<String>, std::result::Result<C, ConfigError>) {
        let mut doc = file.clone();
        let mut warnings = Vec::new();
        for (path, value) in overrides {
            match apply_override(&doc, path, value.clone()) {
                Ok((patched, mut step_warnings)) => {
                    debug!(path = %path, "applied override");
                    doc = patched;
                    warnings.append(&mut step_warnings);
                }
                Err(e) => return (warnings, Err(e)),
            }
        }
        let result = (self.decode)(&doc).map_err(ConfigError::Decode);
        (warnings, result)
    }
}
