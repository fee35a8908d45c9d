//! Export module
//!
//! Persists finished tables as CSV objects.
//!
//! # Overview
//!
//! This module provides:
//! - `ExportTarget` - the `{season}/{week}/{folder}/{label}_...csv` naming convention
//! - `ExportSession` - serialize, stage to a temp file, deliver, clean up
//! - `BlobSink` / `CloudDestination` - object storage (GCS, S3, R2, Azure, memory, local)

mod session;
mod sink;
mod target;

pub use session::ExportSession;
pub use sink::{BlobSink, CloudDestination};
pub use target::{join_object_path, sanitize_component, ExportReceipt, ExportTarget};
