//! `SplitsMaker` CLI - Command-line interface for Subnautica split configs
//!
//! Converts configs between JSON, LiveSplit `.lss` documents and share
//! links, derives filenames and validates files.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use splitsmaker_core::tracing::{TracingLevel, init_tracing};

use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    if let Err(e) = run(cli) {
        if !quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_manager = util::create_config_manager(cli.config.as_deref())?;
    let settings = util::load_settings(&config_manager)?;

    let mut tracing_config = settings.logging.to_tracing_config();
    if cli.quiet {
        tracing_config = tracing_config.with_level(TracingLevel::Error);
    } else if cli.verbose > 0 {
        tracing_config = tracing_config.with_level(TracingLevel::from_verbosity(cli.verbose));
    }
    init_tracing(&tracing_config).map_err(|e| CliError::Config(e.to_string()))?;

    let context = util::Context {
        settings,
        catalog_dir: cli.catalog_dir,
        quiet: cli.quiet,
    };
    commands::dispatch(&context, cli.command)
}
