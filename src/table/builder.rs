//! Table assembly

use super::clock::{Clock, SystemClock};
use super::materialize::{header_row, materialize};
use super::types::{Row, Table};
use crate::error::{Error, Result};
use crate::shape::{inspect, Input, Shape};
use std::sync::Arc;
use tracing::{debug, warn};

/// An input that could not be flattened
#[derive(Debug)]
pub struct RejectedInput {
    /// Position of the input in the flatten call
    pub index: usize,
    /// Why it was rejected
    pub error: Error,
}

/// Result of one flatten call
#[derive(Debug, Default)]
pub struct TableBuild {
    /// Sections for every accepted input, in input order
    pub table: Table,
    /// Inputs that contributed nothing because they failed inspection
    pub rejected: Vec<RejectedInput>,
}

impl TableBuild {
    /// Check if every input was accepted
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// The table, or the first rejection
    pub fn into_result(self) -> Result<Table> {
        match self.rejected.into_iter().next() {
            Some(rejected) => Err(rejected.error),
            None => Ok(self.table),
        }
    }
}

/// Builds one table from the inputs of a single flatten call
#[derive(Clone)]
pub struct TableBuilder {
    clock: Arc<dyn Clock>,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TableBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableBuilder").finish_non_exhaustive()
    }
}

impl TableBuilder {
    /// Create a builder stamping rows with UTC wall-clock time
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::utc()))
    }

    /// Create a builder with a custom clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Flatten `inputs` into one table.
    ///
    /// All inputs of one call should describe a single logical entity. Each
    /// composite or sequence appends its own header followed by its rows;
    /// scalars append nothing. An input that fails inspection is recorded in
    /// [`TableBuild::rejected`] and leaves the rows of other inputs intact.
    ///
    /// Object naming is not an input here; the label, folder, week, season
    /// and teams live in [`crate::config::EntityConfig::target`] and
    /// [`crate::export::ExportTarget::for_entity`].
    pub fn build(&self, inputs: &[Input<'_>]) -> TableBuild {
        let mut build = TableBuild::default();

        for (index, input) in inputs.iter().enumerate() {
            match self.section(input) {
                Ok(Some((header, rows))) => {
                    debug!(
                        "Appending section {} with {} columns and {} rows",
                        build.table.section_count(),
                        header.len(),
                        rows.len()
                    );
                    build.table.push_section(header, rows);
                }
                Ok(None) => {}
                Err(error) => {
                    warn!("Rejected {} input {}: {}", input.kind(), index, error);
                    build.rejected.push(RejectedInput { index, error });
                }
            }
        }

        build
    }

    /// Header and rows for one input; `None` for scalars
    fn section(&self, input: &Input<'_>) -> Result<Option<(Row, Vec<Row>)>> {
        let shape = inspect(input)?;

        match (shape, input) {
            (Shape::Scalar(value), _) => {
                debug!("Skipping scalar input '{}'", value);
                Ok(None)
            }
            (Shape::Composite { fields }, Input::Composite(record)) => {
                let row = materialize(*record, &fields, self.clock.now());
                Ok(Some((header_row(&fields), vec![row])))
            }
            (Shape::SequenceOfComposite { fields, len }, Input::Sequence(sequence)) => {
                let mut rows = Vec::with_capacity(len);
                for i in 0..len {
                    let element = sequence.element(i).ok_or_else(|| {
                        Error::shape(format!("sequence element {i} is not a record"))
                    })?;
                    rows.push(materialize(element, &fields, self.clock.now()));
                }
                Ok(Some((header_row(&fields), rows)))
            }
            (shape, input) => Err(Error::shape(format!(
                "{} input inspected as {shape}",
                input.kind()
            ))),
        }
    }
}
