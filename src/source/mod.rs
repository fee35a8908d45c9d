//! Remote record source module
//!
//! Fetches the aggregate game record that the ingestion pipeline flattens.
//!
//! # Features
//!
//! - **RecordSource**: the seam the pipeline depends on
//! - **SportsDataSource**: `BoxScoreV3` over HTTP with a subscription key header
//! - **HttpClient**: single-attempt reqwest wrapper with status classification

pub mod boxscore;
mod client;
mod sportsdata;
mod types;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use sportsdata::{RecordSource, SportsDataSource, DEFAULT_BASE_URL, SUBSCRIPTION_KEY_HEADER};
pub use types::GameQuery;
