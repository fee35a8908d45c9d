//! Box score record source

use super::client::{HttpClient, HttpClientConfig};
use super::types::GameQuery;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Header carrying the API subscription key
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Default stats API root
pub const DEFAULT_BASE_URL: &str = "https://api.sportsdata.io/v3/nfl/stats";

/// Returns one aggregate record per game
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the aggregate record for `query`
    async fn fetch(&self, query: &GameQuery) -> Result<Value>;
}

/// Fetches `BoxScoreV3` documents from the stats API
#[derive(Debug)]
pub struct SportsDataSource {
    client: HttpClient,
    base_url: Url,
    format: String,
}

impl SportsDataSource {
    /// Create a source.
    ///
    /// `credential_key` is sent as the subscription key header when present.
    pub fn new(
        base_url: &str,
        format: &str,
        credential_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_value(
                "base_url",
                format!("{base_url} cannot be used as a base URL"),
            ));
        }

        let mut config = HttpClientConfig::builder().timeout(timeout);
        if let Some(key) = credential_key {
            config = config.header(SUBSCRIPTION_KEY_HEADER, key);
        }

        Ok(Self {
            client: HttpClient::with_config(config.build())?,
            base_url,
            format: format.to_string(),
        })
    }

    /// URL of the box score for one game
    pub fn box_score_url(&self, query: &GameQuery) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                self.format.as_str(),
                "BoxScoreV3",
                query.season.as_str(),
                query.week.as_str(),
                query.home_team.as_str(),
            ]);
        }
        url
    }
}

#[async_trait]
impl RecordSource for SportsDataSource {
    async fn fetch(&self, query: &GameQuery) -> Result<Value> {
        query.validate()?;
        let url = self.box_score_url(query);
        info!("Fetching box score for {}", query);

        let record: Value = self.client.get_json(url.as_str()).await?;
        if !record.is_object() {
            return Err(Error::shape(format!(
                "box score for {query} is {}, not an object",
                crate::shape::json_kind(&record)
            )));
        }
        Ok(record)
    }
}
