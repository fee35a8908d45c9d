//! Ingestion pipeline
//!
//! Fetches one aggregate game record, flattens each configured entity into
//! its own table and exports the tables concurrently. Entities fail
//! independently; the [`IngestSummary`] reports every outcome.

mod pipeline;
mod types;

pub use pipeline::Ingestor;
pub use types::{EntityOutcome, IngestSummary};

#[cfg(test)]
mod tests;
