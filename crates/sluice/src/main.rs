//! Sluice CLI - Main entry point

use anyhow::Result;
use clap::{crate_version, Arg, Command};
use sluice_config::{OverrideScheme, PatchScheme, Shortcut};
use sluice_doc::{DocPath, DocValue};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// The override strategy the CLI speaks. The config stays a raw document
/// because `check` reports it rather than running a pipeline from it.
fn scheme() -> PatchScheme<DocValue> {
    PatchScheme::raw().shortcut(Shortcut::new(
        "locations",
        DocPath::root().child("locations"),
        "Patch the location-mapping section (SUB=VALUE)",
    ))
}

fn cli(scheme: &PatchScheme<DocValue>) -> Command {
    // Built with the builder API because the override strategy contributes
    // its own flags to the subcommand.
    let check = scheme.augment_command(
        Command::new("check")
            .about("Resolve a pipeline configuration and report the result")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .required(true)
                    .help("Pipeline configuration file"),
            ),
    );

    Command::new("sluice")
        .version(crate_version!())
        .about("Data pipeline resource and configuration toolkit")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check)
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sluice=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let scheme = scheme();
    let matches = cli(&scheme).get_matches();

    match matches.subcommand() {
        Some(("check", sub)) => commands::check::execute(&scheme, sub),
        _ => unreachable!("subcommand is required"),
    }
}
