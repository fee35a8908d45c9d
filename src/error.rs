//! Error types for ffingest
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for ffingest
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Remote Record Source Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Flattening Errors
    // ============================================================================
    #[error("Shape error: {message}")]
    Shape { message: String },

    #[error("Cannot render field '{field}': {message}")]
    Serialization { field: String, message: String },

    // ============================================================================
    // Export Errors
    // ============================================================================
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Staging error: {message}")]
    Staging { message: String },

    #[error("Failed to deliver {path}: {message}")]
    Transport { path: String, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a shape error
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }

    /// Create a serialization error for one field
    pub fn serialization(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a staging error
    pub fn staging(message: impl Into<String>) -> Self {
        Self::Staging {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this is a shape error
    pub fn is_shape(&self) -> bool {
        matches!(self, Error::Shape { .. })
    }

    /// Check if this error is retryable.
    ///
    /// Nothing in this crate retries; callers use this to decide.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Timeout { .. } | Error::Transport { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for ffingest
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
