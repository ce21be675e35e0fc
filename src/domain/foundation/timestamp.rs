//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Immutable point in time, always UTC.
///
/// Serializes as RFC 3339. Deserializing also accepts ISO 8601 without an
/// offset (`2024-05-01T12:00:00.123456`), read as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Creates a timestamp from Unix seconds. Out-of-range input maps to the epoch.
    pub fn from_unix_secs(secs: u64) -> Self {
        Self(DateTime::from_timestamp(secs as i64, 0).unwrap_or_default())
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> u64 {
        self.0.timestamp().max(0) as u64
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + Duration::seconds(secs as i64))
    }

    /// Parses RFC 3339, falling back to a naive ISO 8601 date-time taken as UTC.
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        let raw = raw.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|naive| Self(naive.and_utc()))
            })
    }

    /// Human-readable form used in reports (`YYYY-MM-DD HH:MM:SS`).
    pub fn display_local(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(|e| de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
