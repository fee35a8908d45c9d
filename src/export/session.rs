//! Export sessions

use super::sink::BlobSink;
use super::target::{join_object_path, ExportReceipt, ExportTarget};
use crate::error::{Error, Result};
use crate::table::{write_csv, Table};
use bytes::Bytes;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Serializes one table, stages it on disk and hands it to a sink.
///
/// Every export stages into its own temporary file. The file is removed on
/// every exit path, before any error is returned.
#[derive(Clone)]
pub struct ExportSession {
    sink: Arc<dyn BlobSink>,
    staging_dir: Option<PathBuf>,
}

impl std::fmt::Debug for ExportSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportSession")
            .field("staging_dir", &self.staging_dir)
            .finish_non_exhaustive()
    }
}

impl ExportSession {
    /// Create a session staging into the system temp directory
    pub fn new(sink: Arc<dyn BlobSink>) -> Self {
        Self {
            sink,
            staging_dir: None,
        }
    }

    /// Stage into `dir` instead of the system temp directory
    #[must_use]
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    /// Export to a named target
    pub async fn export_to(&self, table: &Table, target: &ExportTarget) -> Result<ExportReceipt> {
        self.export(table, &target.directory, &target.file_name)
            .await
    }

    /// Write `table` as CSV to `directory/file_name` and return the same pair.
    pub async fn export(
        &self,
        table: &Table,
        directory: &str,
        file_name: &str,
    ) -> Result<ExportReceipt> {
        let object_path = join_object_path(directory, file_name);
        let staged = self.stage(table)?;

        let data = tokio::fs::read(staged.path()).await.map_err(|e| {
            Error::staging(format!(
                "Cannot read staged file {}: {e}",
                staged.path().display()
            ))
        })?;
        debug!(
            "Staged {} rows ({} bytes) for {}",
            table.len(),
            data.len(),
            object_path
        );

        let delivered = self.sink.put(&object_path, Bytes::from(data)).await;
        let cleanup = staged.close();

        let location = delivered?;
        cleanup.map_err(|e| Error::staging(format!("Cannot remove staged file: {e}")))?;

        info!("Exported {} rows to {}", table.len(), location);
        Ok(ExportReceipt::new(directory, file_name))
    }

    /// Serialize the table into a fresh temporary file
    fn stage(&self, table: &Table) -> Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("ffingest-").suffix(".csv");

        let created = match &self.staging_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };
        let mut staged =
            created.map_err(|e| Error::staging(format!("Cannot create temporary file: {e}")))?;

        write_csv(table, staged.as_file_mut()).map_err(|e| {
            Error::staging(format!("Cannot write {}: {e}", staged.path().display()))
        })?;

        Ok(staged)
    }
}
