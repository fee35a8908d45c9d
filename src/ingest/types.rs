//! Ingestion result types

use crate::error::Error;
use crate::export::ExportReceipt;
use crate::source::GameQuery;
use std::fmt;

/// Result of exporting one entity
#[derive(Debug)]
pub struct EntityOutcome {
    /// File name label
    pub label: String,
    /// Destination folder
    pub folder: String,
    /// Where the object landed, or why it did not
    pub result: Result<ExportReceipt, Error>,
}

impl EntityOutcome {
    /// Create an outcome
    pub fn new(
        label: impl Into<String>,
        folder: impl Into<String>,
        result: Result<ExportReceipt, Error>,
    ) -> Self {
        Self {
            label: label.into(),
            folder: folder.into(),
            result,
        }
    }

    /// Check if the entity was exported
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-entity report of one ingest request
#[derive(Debug)]
pub struct IngestSummary {
    /// The game that was ingested
    pub query: GameQuery,
    /// One outcome per configured entity, in configuration order
    pub outcomes: Vec<EntityOutcome>,
}

impl IngestSummary {
    /// Create a summary
    pub fn new(query: GameQuery, outcomes: Vec<EntityOutcome>) -> Self {
        Self { query, outcomes }
    }

    /// Receipts of exported entities
    pub fn succeeded(&self) -> impl Iterator<Item = &ExportReceipt> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Entities that failed, with their errors
    pub fn failed(&self) -> impl Iterator<Item = (&EntityOutcome, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o, e)))
    }

    /// Check if every entity was exported
    pub fn is_complete_success(&self) -> bool {
        self.outcomes.iter().all(EntityOutcome::is_success)
    }

    /// Check if at least one entity was exported
    pub fn any_success(&self) -> bool {
        self.outcomes.iter().any(EntityOutcome::is_success)
    }
}

impl fmt::Display for IngestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: exported {} of {} entities",
            self.query,
            self.succeeded().count(),
            self.outcomes.len()
        )?;

        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(receipt) => writeln!(f, "  ok     {} -> {}", outcome.label, receipt)?,
                Err(error) => writeln!(f, "  failed {}: {}", outcome.label, error)?,
            }
        }
        Ok(())
    }
}
