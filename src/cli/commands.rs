//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Box score ingestion and CSV flattening
#[derive(Parser, Debug)]
#[command(name = "ffingest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML); environment variables override it
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Ingest one game and export every entity
    Ingest {
        /// Week number
        #[arg(long)]
        week: String,

        /// Season (e.g. 2023 or 2023REG)
        #[arg(long)]
        season: String,

        /// Home team key
        #[arg(long)]
        home: String,

        /// Away team key
        #[arg(long)]
        away: String,
    },

    /// Flatten a local JSON document to CSV
    Flatten {
        /// JSON file to read
        #[arg(short, long)]
        input: PathBuf,

        /// Member of the document to flatten (whole document when omitted)
        #[arg(short, long)]
        key: Option<String>,

        /// CSV file to write (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
