//! Command line argument parsing for the fieldbridge CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// fieldbridge - normalize domain records into search index documents
#[derive(Parser, Debug, Clone)]
#[command(name = "fieldbridge")]
#[command(about = "Normalize domain records into search index documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FieldBridgeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format for command results
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FieldBridgeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Turn a JSONL file of records into JSONL index documents
    Index(IndexArgs),

    /// Print the normalized text of a single JSON value
    Render(RenderArgs),
}

/// Arguments for indexing records
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// Record file path (JSONL)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Indexing configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "FIELDBRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write documents to this file instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Override the batch size from the configuration
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Override the thread pool size from the configuration
    #[arg(short, long)]
    pub threads: Option<usize>,
}

/// Arguments for rendering a value
#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// A JSON value, e.g. 42, '"Active"' or '[1, 2]'
    #[arg(value_name = "JSON_VALUE")]
    pub value: String,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
