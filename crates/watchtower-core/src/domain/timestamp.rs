//! Timestamp: the canonical string form stored in every count point.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WatchtowerError;

/// An ISO-8601 timestamp as it appears in `task_counts.json`.
///
/// Structured values are rendered once, here, so the counter only ever sees
/// the final string. The rendering has no zone suffix and only carries a
/// fractional part when there are sub-second microseconds:
/// - `2020-01-01T00:00:00`
/// - `2020-01-01T00:00:00.250000`
///
/// Persisted files may contain other shapes (e.g. plain dates); those are kept
/// verbatim through `from_raw` / deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Render a naive date-time in canonical form.
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        let micros = datetime.nanosecond() / 1_000;
        let rendered = if micros == 0 {
            datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
        } else {
            format!("{}.{micros:06}", datetime.format("%Y-%m-%dT%H:%M:%S"))
        };
        Self(rendered)
    }

    /// Keep a literal string as-is.
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse user input (CLI override) into canonical form.
    ///
    /// Accepts RFC 3339 (converted to UTC), a naive date-time with or without
    /// fractional seconds, or a bare date (midnight).
    pub fn parse(input: &str) -> Result<Self, WatchtowerError> {
        let input = input.trim();
        if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self::from(datetime.with_timezone(&Utc)));
        }
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self::from_datetime(datetime));
        }
        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            && let Some(midnight) = date.and_hms_opt(0, 0, 0)
        {
            return Ok(Self::from_datetime(midnight));
        }
        Err(WatchtowerError::InvalidTimestamp(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::from_datetime(datetime)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_datetime(datetime.naive_utc())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
