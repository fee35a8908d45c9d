//! Record source types

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifies one game to ingest
///
/// Field names match the inbound request body:
/// `{"week": "1", "season": "2023", "hometeam": "NE", "awayteam": "PHI"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameQuery {
    /// Week number within the season
    #[serde(deserialize_with = "string_or_number")]
    pub week: String,
    /// Season, e.g. `2023` or `2023REG`
    #[serde(deserialize_with = "string_or_number")]
    pub season: String,
    /// Home team key
    #[serde(rename = "hometeam")]
    pub home_team: String,
    /// Away team key
    #[serde(rename = "awayteam")]
    pub away_team: String,
}

impl GameQuery {
    /// Create a new query
    pub fn new(
        week: impl Into<String>,
        season: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
    ) -> Self {
        Self {
            week: week.into(),
            season: season.into(),
            home_team: home_team.into(),
            away_team: away_team.into(),
        }
    }

    /// Check that every member is present
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("week", &self.week),
            ("season", &self.season),
            ("hometeam", &self.home_team),
            ("awayteam", &self.away_team),
        ] {
            if value.trim().is_empty() {
                return Err(Error::missing_field(field));
            }
        }
        Ok(())
    }
}

impl fmt::Display for GameQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}, season {} week {}",
            self.away_team, self.home_team, self.season, self.week
        )
    }
}

/// Accept `"1"` as well as `1`
fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
