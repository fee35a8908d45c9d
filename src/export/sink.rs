//! Blob sinks (GCS, S3, R2, Azure, memory, local)

use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;

/// Durable storage for finished tables
#[async_trait]
pub trait BlobSink: Send + Sync {
    /// Store `data` under `object_path`; returns the full location written
    async fn put(&self, object_path: &str, data: Bytes) -> Result<String>;
}

/// Object store destination parsed from a URL
#[derive(Debug, Clone)]
pub struct CloudDestination {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket/container
    prefix: String,
    /// Original URL scheme for logging
    scheme: String,
}

impl CloudDestination {
    /// Parse a destination URL and create the matching object store
    ///
    /// Supported formats:
    /// - `gs://bucket/path/` - Google Cloud Storage
    /// - `s3://bucket/path/` - AWS S3
    /// - `r2://bucket/path/` - Cloudflare R2 (S3-compatible)
    /// - `az://container/path/` - Azure Blob Storage
    /// - `memory://path/` - in-process store
    /// - `/local/path/` or `./path/` - Local filesystem
    pub fn parse(url: &str) -> Result<Self> {
        if url.starts_with("gs://") {
            Self::parse_gcs(url)
        } else if url.starts_with("s3://") {
            Self::parse_s3(url, false)
        } else if url.starts_with("r2://") {
            Self::parse_s3(url, true)
        } else if url.starts_with("az://") {
            Self::parse_azure(url)
        } else if let Some(prefix) = url.strip_prefix("memory://") {
            Ok(Self::in_memory(prefix))
        } else {
            Self::parse_local(url)
        }
    }

    /// In-process destination, mostly useful for tests and dry runs
    pub fn in_memory(prefix: &str) -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            prefix: prefix.trim_matches('/').to_string(),
            scheme: "memory".to_string(),
        }
    }

    /// Parse GCS URL
    fn parse_gcs(url: &str) -> Result<Self> {
        let (bucket, prefix) = split_bucket(url, "gs")?;

        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "gs".to_string(),
        })
    }

    /// Parse S3 or R2 URL
    fn parse_s3(url: &str, is_r2: bool) -> Result<Self> {
        let scheme = if is_r2 { "r2" } else { "s3" };
        let (bucket, prefix) = split_bucket(url, scheme)?;

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        // AWS_ENDPOINT is read by from_env(); R2 may name its endpoint separately
        if is_r2 {
            if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                builder = builder.with_endpoint(endpoint);
            }
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create {scheme} client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: scheme.to_string(),
        })
    }

    /// Parse Azure Blob URL
    fn parse_azure(url: &str) -> Result<Self> {
        let (container, prefix) = split_bucket(url, "az")?;

        let store = MicrosoftAzureBuilder::from_env()
            .with_container_name(container)
            .build()
            .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "az".to_string(),
        })
    }

    /// Parse local filesystem path
    fn parse_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);

        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: String::new(),
            scheme: "file".to_string(),
        })
    }

    /// Check if this is a cloud destination (not local or memory)
    pub fn is_cloud(&self) -> bool {
        !matches!(self.scheme.as_str(), "file" | "memory")
    }

    /// Get the scheme (gs, s3, r2, az, memory, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Get the path prefix inside the bucket
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn object_path(&self, filename: &str) -> ObjectPath {
        if self.prefix.is_empty() {
            ObjectPath::from(filename)
        } else {
            ObjectPath::from(format!("{}/{filename}", self.prefix.trim_end_matches('/')))
        }
    }

    /// Write bytes to a file in the destination
    pub async fn write(&self, filename: &str, data: Bytes) -> Result<String> {
        let path = self.object_path(filename);

        self.store
            .put(&path, data.into())
            .await
            .map_err(|e| Error::transport(path.to_string(), e.to_string()))?;

        Ok(format!("{}://{path}", self.scheme))
    }

    /// Read a file back from the destination
    pub async fn read(&self, filename: &str) -> Result<Bytes> {
        let path = self.object_path(filename);

        let result = self
            .store
            .get(&path)
            .await
            .map_err(|e| Error::transport(path.to_string(), e.to_string()))?;

        result
            .bytes()
            .await
            .map_err(|e| Error::transport(path.to_string(), e.to_string()))
    }
}

#[async_trait]
impl BlobSink for CloudDestination {
    async fn put(&self, object_path: &str, data: Bytes) -> Result<String> {
        self.write(object_path, data).await
    }
}

/// Split `scheme://bucket/prefix` into bucket and prefix
fn split_bucket<'a>(url: &'a str, scheme: &str) -> Result<(&'a str, String)> {
    let without_scheme = url
        .strip_prefix(&format!("{scheme}://"))
        .ok_or_else(|| Error::config(format!("Invalid {scheme} URL: {url}")))?;

    let (bucket, prefix) = match without_scheme.find('/') {
        Some(idx) => (
            &without_scheme[..idx],
            without_scheme[idx + 1..].trim_end_matches('/').to_string(),
        ),
        None => (without_scheme, String::new()),
    };

    if bucket.is_empty() {
        return Err(Error::config(format!("Missing bucket name in {url}")));
    }

    Ok((bucket, prefix))
}
