//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// `SplitsMaker` command-line interface for Subnautica split configs
#[derive(Parser)]
#[command(name = "splitsmaker-cli")]
#[command(author, version, about = "SplitsMaker command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the settings file
    #[arg(short, long, global = true, env = "SPLITSMAKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding generated catalog tables
    #[arg(long, global = true, env = "SPLITSMAKER_CATALOG_DIR")]
    pub catalog_dir: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Write a LiveSplit splits file from a config
    #[command(about = "Convert a JSON config into a LiveSplit .lss file")]
    ExportLss {
        /// Input config (JSON, or .lss to re-export)
        input: PathBuf,

        /// Output file; defaults to the suggested filename
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Filename to use instead of the suggested one
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Read a LiveSplit splits file into a config
    #[command(about = "Convert a LiveSplit .lss file into a JSON config")]
    ImportLss {
        /// Input .lss file
        input: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rewrite any config at the current version
    #[command(about = "Migrate a JSON or .lss config to current-version JSON")]
    ExportJson {
        /// Input config
        input: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Share link commands
    #[command(subcommand)]
    Share(ShareCommands),

    /// Print the suggested .lss filename for a config
    #[command(about = "Print the suggested .lss filename for a config")]
    Filename {
        /// Input config
        input: PathBuf,

        /// Custom name to resolve against the suggestion
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Validate a config file
    #[command(about = "Validate a JSON or .lss config and report warnings")]
    Validate {
        /// Input config
        input: PathBuf,
    },
}

/// Share link subcommands
#[derive(Subcommand)]
pub enum ShareCommands {
    /// Build a share link for a config
    #[command(about = "Build a share URL for a config")]
    Encode {
        /// Input config
        input: PathBuf,

        /// Page the link opens; overrides the settings file
        #[arg(long)]
        base_url: Option<String>,

        /// Maximum URL length; overrides the settings file
        #[arg(long)]
        max_length: Option<usize>,

        /// Print only the token
        #[arg(long)]
        token_only: bool,
    },

    /// Decode a share token or URL into a config
    #[command(about = "Decode a share token or URL into a JSON config")]
    Decode {
        /// Share token, or a URL carrying one
        token: String,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
