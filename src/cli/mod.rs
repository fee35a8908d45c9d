//! CLI module
//!
//! Command-line interface for ingesting games.
//!
//! # Commands
//!
//! - `serve` - Start HTTP server mode
//! - `ingest` - Ingest one game and export every entity
//! - `flatten` - Flatten a local JSON document to CSV

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{router, serve, INVALID_REQUEST_MESSAGE};
