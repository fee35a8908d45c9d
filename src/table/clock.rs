//! Processing timestamps

use chrono::{Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column name of the trailing timestamp cell
pub const DATE_PROCESSED: &str = "date_processed";

/// Format of the trailing timestamp cell
pub const DATE_PROCESSED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Time zone used for `date_processed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampZone {
    /// Coordinated Universal Time
    #[default]
    Utc,
    /// The host's local time zone
    Local,
}

/// Source of processing timestamps
pub trait Clock: Send + Sync {
    /// Current time, without zone
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time, read once per materialized row
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    zone: TimestampZone,
}

impl SystemClock {
    /// Create a clock for the given zone
    pub fn new(zone: TimestampZone) -> Self {
        Self { zone }
    }

    /// UTC clock
    pub fn utc() -> Self {
        Self::new(TimestampZone::Utc)
    }

    /// Zone this clock reports in
    pub fn zone(&self) -> TimestampZone {
        self.zone
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.zone {
            TimestampZone::Utc => Utc::now().naive_utc(),
            TimestampZone::Local => Local::now().naive_local(),
        }
    }
}

/// A clock that always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Format a timestamp as a `date_processed` cell
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(DATE_PROCESSED_FORMAT).to_string()
}
