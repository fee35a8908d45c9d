// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # ffingest
//!
//! Flattens aggregate game records into CSV objects in cloud storage.
//!
//! A box score is one nested document. Each configured member of it (the
//! score, the quarters, the player games, ...) becomes its own table: a header
//! row taken from the record's fields, one row per record, and a trailing
//! `date_processed` column. Tables are staged as CSV in a temporary file and
//! delivered to a blob store.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ffingest::shape::Input;
//! use ffingest::table::{to_csv_bytes, TableBuilder};
//!
//! ffingest::record! {
//!     pub struct Quarter {
//!         number: u32,
//!         home_score: u32,
//!     }
//! }
//!
//! let quarters = vec![Quarter { number: 1, home_score: 7 }];
//! let table = TableBuilder::new()
//!     .build(&[Input::Sequence(&quarters)])
//!     .into_result()?;
//! let csv = to_csv_bytes(&table)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────────┐   ┌──────────────┐
//! │    source    │ → │     shape     │ → │    table     │ → │    export    │
//! │ BoxScoreV3   │   │ inspect()     │   │ TableBuilder │   │ temp file    │
//! │ over HTTP    │   │ Record traits │   │ materialize  │   │ → BlobSink   │
//! └──────────────┘   └───────────────┘   └──────────────┘   └──────────────┘
//!                              ingest::Ingestor drives one game
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Shape inspection of records and sequences
pub mod shape;

/// Row materialization and table building
pub mod table;

/// CSV staging and blob delivery
pub mod export;

/// Remote record source
pub mod source;

/// Fetch, flatten and export pipeline
pub mod ingest;

/// Configuration loading
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

pub use config::{EntityConfig, IngestConfig};
pub use ingest::{Ingestor, IngestSummary};
pub use shape::{Input, Record};
pub use table::{Table, TableBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
