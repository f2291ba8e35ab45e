//! Time handling for plot requests.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// Request timestamp format, e.g. `2020-06-21/12:00:00`.
pub const TIME_FORMAT: &str = "%Y-%m-%d/%H:%M:%S";

/// Compact form used in output file names.
pub const COMPACT_FORMAT: &str = "%Y%m%d%H%M%S";

/// A single UTC time point of interest.
///
/// All times are treated as UTC; no timezone conversion is ever applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint(DateTime<Utc>);

impl TimePoint {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Parse from the `YYYY-MM-DD/HH:MM:SS` request format.
    pub fn parse(s: &str) -> Result<Self, TimeParseError> {
        let ndt = NaiveDateTime::parse_from_str(s.trim(), TIME_FORMAT)
            .map_err(|_| TimeParseError::InvalidFormat(s.to_string()))?;
        Ok(Self(Utc.from_utc_datetime(&ndt)))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// 12:00:00 on the same calendar day.
    pub fn noon_anchor(&self) -> Self {
        let noon = self.0.date_naive().and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
        Self(Utc.from_utc_datetime(&noon))
    }

    /// Signed hours from this time to the same-day noon anchor.
    ///
    /// Positive before noon, negative after; always within [-12, 12].
    pub fn hours_until_noon(&self) -> f64 {
        let diff: Duration = self.noon_anchor().0 - self.0;
        diff.num_seconds() as f64 / 3600.0
    }

    /// `YYYYMMDDHHMMSS`, the key used in output file names.
    pub fn compact(&self) -> String {
        self.0.format(COMPACT_FORMAT).to_string()
    }

    /// Seconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn from_timestamp(secs: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(secs, 0).map(Self)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl FromStr for TimePoint {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time format (expected YYYY-MM-DD/HH:MM:SS): {0}")]
    InvalidFormat(String),
}
