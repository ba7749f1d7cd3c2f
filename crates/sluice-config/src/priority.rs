//! Schema-typed priority merge.
//!
//! A default record where every field carries documentation derives one CLI
//! flag per field; merging keeps, per field, the value whose source has the
//! highest precedence: CLI over file over schema default. The field list is
//! an explicit builder constructed at setup time, never runtime reflection.

use crate::engine::OverrideScheme;
use crate::error::{ConfigError, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use sluice_doc::DocValue;
use tracing::debug;

/// Where a field's value came from. Precedence is the derive order:
/// `CliSource > FileSource > Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Provenance {
    /// Schema default.
    Default,
    /// The file-sourced configuration document.
    FileSource,
    /// A command-line override.
    CliSource,
}

/// A value paired with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sourced<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Sourced<T> {
    /// Tag a value with its source.
    pub fn new(value: T, provenance: Provenance) -> Self {
        Sourced { value, provenance }
    }

    /// Keep whichever side has higher precedence. On a tie the incoming
    /// (right) side wins, matching last-layer-wins resolution.
    pub fn prefer(self, incoming: Sourced<T>) -> Sourced<T> {
        if incoming.provenance >= self.provenance {
            incoming
        } else {
            self
        }
    }
}

/// One documented field of a schema record.
///
/// The setters are plain function pointers so a scheme stays `'static` and
/// cheap to share; each returns a human-readable reason on decode failure.
pub struct SchemaField<C> {
    name: &'static str,
    help: &'static str,
    set_from_str: fn(&mut C, &str) -> std::result::Result<(), String>,
    set_from_doc: fn(&mut C, &DocValue) -> std::result::Result<(), String>,
}

impl<C> SchemaField<C> {
    /// Describe a field: its flag/document key, help text, and setters for
    /// the CLI string form and the document form.
    pub fn new(
        name: &'static str,
        help: &'static str,
        set_from_str: fn(&mut C, &str) -> std::result::Result<(), String>,
        set_from_doc: fn(&mut C, &DocValue) -> std::result::Result<(), String>,
    ) -> Self {
        SchemaField {
            name,
            help,
            set_from_str,
            set_from_doc,
        }
    }

    /// The field's name (flag name and document key).
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// The schema-typed strategy: defaults plus an explicit field list.
pub struct RecordScheme<C> {
    defaults: C,
    fields: Vec<SchemaField<C>>,
}

impl<C: Clone> RecordScheme<C> {
    /// Start from the schema defaults.
    pub fn new(defaults: C) -> Self {
        RecordScheme {
            defaults,
            fields: Vec::new(),
        }
    }

    /// Add a field to the schema.
    pub fn field(mut self, field: SchemaField<C>) -> Self {
        self.fields.push(field);
        self
    }
}

impl<C: Clone> OverrideScheme for RecordScheme<C> {
    /// Sparse CLI values, parallel to the field list; unset fields stay
    /// absent and never shadow a file-sourced value.
    type Overrides = Vec<Option<String>>;
    type Config = C;

    fn augment_command(&self, mut cmd: Command) -> Command {
        for field in &self.fields {
            cmd = cmd.arg(
                Arg::new(field.name)
                    .long(field.name)
                    .value_name("VALUE")
                    .help(field.help)
                    .action(ArgAction::Set),
            );
        }
        cmd
    }

    fn overrides_from_matches(&self, matches: &ArgMatches) -> Result<Self::Overrides> {
        Ok(self
            .fields
            .iter()
            .map(|field| matches.get_one::<String>(field.name).cloned())
            .collect())
    }

    fn no_overrides(&self, overrides: &Self::Overrides) -> bool {
        overrides.iter().all(Option::is_none)
    }

    /// Decode the document field-by-field, zip against the CLI overrides,
    /// and keep the higher-precedence value per field. The only failure
    /// mode is a document that fails to decode; this strategy produces no
    /// warnings.
    fn merge_with_file(
        &self,
        file: &DocValue,
        overrides: &Self::Overrides,
    ) -> (Vec<String>, std::result::Result<C, ConfigError>) {
        let mut config = self.defaults.clone();
        let mut sources: Vec<Sourced<()>> = self
            .fields
            .iter()
            .map(|_| Sourced::new((), Provenance::Default))
            .collect();

        if !file.is_map() && !file.is_null() {
            return (
                Vec::new(),
                Err(ConfigError::Decode(format!(
                    "expected an object at the document root, found {}",
                    file.kind()
                ))),
            );
        }

        for (i, field) in self.fields.iter().enumerate() {
            if let Some(value) = file.get(field.name) {
                let incoming = Sourced::new((), Provenance::FileSource);
                if sources[i].prefer(incoming).provenance == Provenance::FileSource {
                    if let Err(reason) = (field.set_from_doc)(&mut config, value) {
                        return (
                            Vec::new(),
                            Err(ConfigError::Decode(format!(
                                "field `{}`: {}",
                                field.name, reason
                            ))),
                        );
                    }
                    sources[i] = incoming;
                }
            }
        }

        for (i, (field, value)) in self.fields.iter().zip(overrides).enumerate() {
            if let Some(text) = value {
                let incoming = Sourced::new((), Provenance::CliSource);
                if sources[i].prefer(incoming).provenance == Provenance::CliSource {
                    if let Err(reason) = (field.set_from_str)(&mut config, text) {
                        return (
                            Vec::new(),
                            Err(ConfigError::Decode(format!(
                                "field `{}`: {}",
                                field.name, reason
                            ))),
                        );
                    }
                    sources[i] = incoming;
                    debug!(field = field.name, "field overridden from the command line");
                }
            }
        }

        (Vec::new(), Ok(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sluice_doc::parse_document;

    #[derive(Debug, Clone, PartialEq)]
    struct Settings {
        threads: i64,
        label: String,
        verbose: bool,
    }

    fn scheme() -> RecordScheme<Settings> {
        RecordScheme::new(Settings {
            threads: 1,
            label: "run".to_string(),
            verbose: false,
        })
        .field(SchemaField::new(
            "threads",
            "Number of worker threads",
            |c, s| {
                c.threads = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
                Ok(())
            },
            |c, v| {
                c.threads = v.as_i64().ok_or("expected a number")?;
                Ok(())
            },
        ))
        .field(SchemaField::new(
            "label",
            "Run label attached to outputs",
            |c, s| {
                c.label = s.to_string();
                Ok(())
            },
            |c, v| {
                c.label = v.as_str().ok_or("expected a string")?.to_string();
                Ok(())
            },
        ))
        .field(SchemaField::new(
            "verbose",
            "Emit progress output",
            |c, s| {
                c.verbose = s.parse().map_err(|_| format!("`{}` is not a bool", s))?;
                Ok(())
            },
            |c, v| {
                c.verbose = v.as_bool().ok_or("expected a bool")?;
                Ok(())
            },
        ))
    }

    fn matches_for(args: &[&str]) -> ArgMatches {
        let scheme = scheme();
        let cmd = scheme.augment_command(Command::new("test"));
        cmd.try_get_matches_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_derived_flags_parse() {
        let scheme = scheme();
        let matches = matches_for(&["--threads", "8", "--verbose", "true"]);
        let overrides = scheme.overrides_from_matches(&matches).unwrap();
        assert_eq!(overrides, vec![Some("8".to_string()), None, Some("true".to_string())]);
        assert!(!scheme.no_overrides(&overrides));

        let empty = scheme.overrides_from_matches(&matches_for(&[])).unwrap();
        assert!(scheme.no_overrides(&empty));
    }

    #[test]
    fn test_priority_cli_over_file_over_default() {
        let scheme = scheme();
        let file = parse_document("threads: 4\nlabel: nightly\n").unwrap();
        let matches = matches_for(&["--threads", "8"]);
        let overrides = scheme.overrides_from_matches(&matches).unwrap();

        let (warnings, result) = scheme.merge_with_file(&file, &overrides);
        assert!(warnings.is_empty());
        let settings = result.unwrap();
        // Set in both: CLI wins.
        assert_eq!(settings.threads, 8);
        // Set only in the file: file wins.
        assert_eq!(settings.label, "nightly");
        // Set in neither: schema default.
        assert!(!settings.verbose);
    }

    #[test]
    fn test_unset_cli_field_never_shadows_file() {
        let scheme = scheme();
        let file = parse_document("verbose: true\n").unwrap();
        let overrides = scheme
            .overrides_from_matches(&matches_for(&["--label", "x"]))
            .unwrap();
        let (_, result) = scheme.merge_with_file(&file, &overrides);
        assert!(result.unwrap().verbose);
    }

    #[test]
    fn test_decode_failure_is_fatal() {
        let scheme = scheme();
        let file = parse_document("threads: lots\n").unwrap();
        let overrides = vec![None, None, None];
        let (warnings, result) = scheme.merge_with_file(&file, &overrides);
        assert!(warnings.is_empty());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Decode(_)));
        assert!(err.to_string().contains("threads"));
    }

    #[test]
    fn test_non_object_document_fails_to_decode() {
        let scheme = scheme();
        let file = parse_document("- 1\n- 2\n").unwrap();
        let (_, result) = scheme.merge_with_file(&file, &vec![None, None, None]);
        assert!(matches!(result.unwrap_err(), ConfigError::Decode(_)));
    }

    #[test]
    fn test_sourced_prefer_is_max_by_precedence() {
        let default = Sourced::new(0, Provenance::Default);
        let file = Sourced::new(1, Provenance::FileSource);
        let cli = Sourced::new(2, Provenance::CliSource);

        assert_eq!(default.prefer(file).value, 1);
        assert_eq!(file.prefer(cli).value, 2);
        assert_eq!(cli.prefer(file).value, 2);
        assert_eq!(cli.prefer(default).value, 2);
        // Ties keep the incoming layer.
        assert_eq!(file.prefer(Sourced::new(9, Provenance::FileSource)).value, 9);
    }
}
