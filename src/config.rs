//! Ingestion configuration
//!
//! Configuration is loaded from YAML, then overlaid with environment
//! variables. Every field has a default except the destination bucket.
//!
//! ```yaml
//! bucket: gs://my-bucket/fantasydata
//! format: JSON
//! timeout_secs: 30
//! timestamp_zone: utc
//! entities:
//!   - source_key: Score
//!     folder: boxscore_score
//!   - source_key: ScoringPlays
//!     folder: boxscore_scoringplays
//!     scalar_key: ScoringPlayID
//!   - source_key: ScoringDetails
//!     folder: boxscore_scoringdetails
//!     empty_columns: [ScoringDetailID, PlayerID, Length]
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::export::ExportTarget;
use crate::source::{boxscore, GameQuery, DEFAULT_BASE_URL};
use crate::table::TimestampZone;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Credential for the stats API
pub const ENV_CREDENTIAL_KEY: &str = "OCPKEY";

/// Destination bucket name or URL
pub const ENV_BUCKET: &str = "GOOG_BUCKET";

/// Overrides the stats API root
pub const ENV_BASE_URL: &str = "FFINGEST_BASE_URL";

/// Overrides the response format segment
pub const ENV_FORMAT: &str = "FFINGEST_FORMAT";

/// Prefix under a bare bucket name
const DEFAULT_BUCKET_PREFIX: &str = "fantasydata";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete ingestion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Destination URL (`gs://bucket/prefix`, `s3://...`, `memory://...` or a local path)
    pub bucket: String,

    /// Response format segment of the API path
    pub format: String,

    /// Subscription key for the stats API
    pub credential_key: Option<String>,

    /// Stats API root
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Zone of the `date_processed` column
    pub timestamp_zone: TimestampZone,

    /// Directory for staged CSV files (system temp dir when unset)
    pub staging_dir: Option<PathBuf>,

    /// Entities extracted from each aggregate record, in export order
    pub entities: Vec<EntityConfig>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            format: "JSON".to_string(),
            credential_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            timestamp_zone: TimestampZone::Utc,
            staging_dir: None,
            entities: default_entities(),
        }
    }
}

impl IngestConfig {
    /// Load and validate a YAML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Parse a YAML config without validating it
    ///
    /// Call [`IngestConfig::validate`] once environment overrides are applied.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Defaults overlaid with the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with variables from `lookup`
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_with(lookup);
        if config.bucket.trim().is_empty() {
            return Err(Error::missing_field(ENV_BUCKET));
        }
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment variables onto this config
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(ENV_CREDENTIAL_KEY) {
            self.credential_key = Some(key);
        }
        if let Some(bucket) = lookup(ENV_BUCKET) {
            self.bucket = bucket_url(bucket.trim());
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = format;
        }
    }

    /// Check the config for values that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            return Err(Error::missing_field("bucket"));
        }

        if !self.format.eq_ignore_ascii_case("JSON") {
            return Err(Error::invalid_value(
                "format",
                format!("'{}' is not supported, only JSON", self.format),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be greater than 0"));
        }

        if self.entities.is_empty() {
            return Err(Error::config("At least one entity must be configured"));
        }

        let mut folders = HashSet::new();
        for (i, entity) in self.entities.iter().enumerate() {
            if entity.source_key.trim().is_empty() {
                return Err(Error::missing_field(format!("entities[{i}].source_key")));
            }
            if entity.folder.trim().is_empty() {
                return Err(Error::missing_field(format!("entities[{i}].folder")));
            }
            if !folders.insert(entity.folder.as_str()) {
                return Err(Error::invalid_value(
                    format!("entities[{i}].folder"),
                    format!("duplicate folder '{}'", entity.folder),
                ));
            }
            for (name, columns) in [
                ("columns", &entity.columns),
                ("empty_columns", &entity.empty_columns),
            ] {
                if let Some(columns) = columns {
                    if columns.iter().any(|c| c.is_empty()) {
                        return Err(Error::invalid_value(
                            format!("entities[{i}].{name}"),
                            "column names cannot be empty",
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `GOOG_BUCKET` may be a bare bucket name or a full destination
fn bucket_url(value: &str) -> String {
    if value.contains("://") || value.contains('/') {
        value.to_string()
    } else {
        format!("gs://{value}/{DEFAULT_BUCKET_PREFIX}")
    }
}

// ============================================================================
// Entity Config
// ============================================================================

/// One member of the aggregate record that becomes its own CSV object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Member name in the aggregate record (e.g. `PlayerGames`)
    #[serde(alias = "key")]
    pub source_key: String,

    /// Destination folder under `{season}/{week}/`
    pub folder: String,

    /// File name label (defaults to the folder)
    #[serde(default)]
    pub label: Option<String>,

    /// Auxiliary scalar passed alongside the member; skipped when flattening
    #[serde(default)]
    pub scalar_key: Option<String>,

    /// Declared columns; always used as the header of the member
    #[serde(default)]
    pub columns: Option<Vec<String>>,

    /// Header for an empty array; non-empty arrays keep their own members
    #[serde(default)]
    pub empty_columns: Option<Vec<String>>,
}

impl EntityConfig {
    /// Create an entity with no label, scalar or declared columns
    pub fn new(source_key: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            source_key: source_key.into(),
            folder: folder.into(),
            label: None,
            scalar_key: None,
            columns: None,
            empty_columns: None,
        }
    }

    /// Set the auxiliary scalar
    #[must_use]
    pub fn with_scalar_key(mut self, key: impl Into<String>) -> Self {
        self.scalar_key = Some(key.into());
        self
    }

    /// Declare columns for the member
    #[must_use]
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Header to use when the member arrives as an empty array
    #[must_use]
    pub fn with_empty_columns(mut self, columns: &[&str]) -> Self {
        self.empty_columns = Some(columns.iter().map(|c| (*c).to_string()).collect());
        self
    }

    /// Label used in file names
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.folder)
    }

    /// Export target of this entity for one game
    pub fn target(&self, query: &GameQuery) -> ExportTarget {
        ExportTarget::for_entity(
            &query.season,
            &query.week,
            &self.folder,
            self.label(),
            &query.home_team,
            &query.away_team,
        )
    }
}

/// Box score members exported by default
pub fn default_entities() -> Vec<EntityConfig> {
    vec![
        EntityConfig::new("Score", "boxscore_score"),
        EntityConfig::new("Quarters", "boxscore_quarters")
            .with_empty_columns(boxscore::QUARTER_FIELDS),
        EntityConfig::new("TeamGames", "boxscore_teamgames")
            .with_empty_columns(boxscore::TEAM_GAME_FIELDS),
        EntityConfig::new("PlayerGames", "boxscore_playergames")
            .with_empty_columns(boxscore::PLAYER_GAME_FIELDS),
        EntityConfig::new("FantasyDefenseGames", "boxscore_fantasydefensegames")
            .with_empty_columns(boxscore::FANTASY_DEFENSE_GAME_FIELDS),
        EntityConfig::new("ScoringPlays", "boxscore_scoringplays")
            .with_scalar_key("ScoringPlayID")
            .with_empty_columns(boxscore::SCORING_PLAY_FIELDS),
        EntityConfig::new("ScoringDetails", "boxscore_scoringdetails")
            .with_empty_columns(boxscore::SCORING_DETAIL_FIELDS),
    ]
}
