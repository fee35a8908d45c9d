//! Fetch, flatten and export one game

use super::types::{EntityOutcome, IngestSummary};
use crate::config::{EntityConfig, IngestConfig};
use crate::error::{Error, Result};
use crate::export::{BlobSink, CloudDestination, ExportSession};
use crate::shape::{DeclaredSequence, Input};
use crate::source::{GameQuery, RecordSource, SportsDataSource};
use crate::table::{Clock, SystemClock, Table, TableBuilder};
use futures::future::join_all;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Turns one aggregate record into one CSV object per configured entity
pub struct Ingestor {
    source: Arc<dyn RecordSource>,
    sink: Arc<dyn BlobSink>,
    entities: Vec<EntityConfig>,
    builder: TableBuilder,
    staging_dir: Option<PathBuf>,
}

impl std::fmt::Debug for Ingestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ingestor")
            .field("entities", &self.entities.len())
            .field("staging_dir", &self.staging_dir)
            .finish_non_exhaustive()
    }
}

impl Ingestor {
    /// Create an ingestor stamping rows with UTC wall-clock time
    pub fn new(
        source: Arc<dyn RecordSource>,
        sink: Arc<dyn BlobSink>,
        entities: Vec<EntityConfig>,
    ) -> Self {
        Self {
            source,
            sink,
            entities,
            builder: TableBuilder::new(),
            staging_dir: None,
        }
    }

    /// Build the stats API source and destination described by `config`
    pub fn from_config(config: &IngestConfig) -> Result<Self> {
        config.validate()?;

        let source = SportsDataSource::new(
            &config.base_url,
            &config.format,
            config.credential_key.as_deref(),
            config.timeout(),
        )?;
        let sink = CloudDestination::parse(&config.bucket)?;

        let mut ingestor = Self::new(Arc::new(source), Arc::new(sink), config.entities.clone())
            .with_clock(Arc::new(SystemClock::new(config.timestamp_zone)));
        if let Some(dir) = &config.staging_dir {
            ingestor = ingestor.with_staging_dir(dir);
        }
        Ok(ingestor)
    }

    /// Use a custom clock for `date_processed`
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.builder = TableBuilder::with_clock(clock);
        self
    }

    /// Stage CSV files in `dir`
    #[must_use]
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    /// Configured entities
    pub fn entities(&self) -> &[EntityConfig] {
        &self.entities
    }

    /// Ingest one game.
    ///
    /// A failed fetch fails the request. After that each entity succeeds or
    /// fails on its own and the summary reports both.
    pub async fn run(&self, query: &GameQuery) -> Result<IngestSummary> {
        info!("Starting ingest for {}", query);
        let record = self.source.fetch(query).await?;

        // Tables borrow the record only while building.
        let planned: Vec<_> = self
            .entities
            .iter()
            .map(|entity| (entity, self.flatten_entity(&record, entity)))
            .collect();

        let exports = planned.into_iter().map(|(entity, table)| async move {
            let result = match table {
                Ok(table) => {
                    self.session()
                        .export_to(&table, &entity.target(query))
                        .await
                }
                Err(e) => Err(e),
            };
            if let Err(e) = &result {
                error!("Failed to export {}: {}", entity.label(), e);
            }
            EntityOutcome::new(entity.label(), &entity.folder, result)
        });

        let summary = IngestSummary::new(query.clone(), join_all(exports).await);
        info!(
            "Finished ingest for {}: {} of {} entities exported",
            query,
            summary.succeeded().count(),
            summary.outcomes.len()
        );
        Ok(summary)
    }

    /// Flatten one member of an aggregate record.
    ///
    /// Any rejected input fails the whole entity.
    pub fn flatten_entity(&self, record: &Value, entity: &EntityConfig) -> Result<Table> {
        let member = record.get(&entity.source_key).ok_or_else(|| {
            Error::shape(format!("record has no member '{}'", entity.source_key))
        })?;

        let declared;
        let mut inputs = Vec::with_capacity(2);
        let columns = match member {
            Value::Array(items) if items.is_empty() => {
                entity.columns.as_ref().or(entity.empty_columns.as_ref())
            }
            _ => entity.columns.as_ref(),
        };
        match (member, columns) {
            (Value::Array(items), Some(columns)) => {
                declared = DeclaredSequence::new(items, columns);
                inputs.push(Input::Sequence(&declared));
            }
            _ => inputs.push(Input::try_from(member)?),
        }
        if let Some(key) = &entity.scalar_key {
            inputs.push(Input::scalar(key.as_str()));
        }

        self.builder.build(&inputs).into_result()
    }

    fn session(&self) -> ExportSession {
        let session = ExportSession::new(self.sink.clone());
        match &self.staging_dir {
            Some(dir) => session.with_staging_dir(dir),
            None => session,
        }
    }
}
