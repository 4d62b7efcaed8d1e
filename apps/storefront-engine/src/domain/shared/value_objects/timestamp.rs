//! Timestamp value object for temporal data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp for domain events and lifecycle tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a new Timestamp from a `DateTime<Utc>`.
    #[must_use]
    pub const fn new(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the current timestamp.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse from an ISO 8601 string.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not a valid ISO 8601 timestamp.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        let dt = DateTime::parse_from_rfc3339(s)?;
        Ok(Self(dt.with_timezone(&Utc)))
    }

    /// Get the inner `DateTime<Utc>`.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Format as ISO 8601 / RFC 3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Calculate duration since another timestamp.
    ///
    /// Anchors the cancellation-window check.
    #[must_use]
    pub fn duration_since(&self, other: Self) -> chrono::Duration {
        self.0 - other.0
    }

    /// Shift this timestamp by a signed duration.
    #[must_use]
    pub fn offset(&self, delta: chrono::Duration) -> Self {
        Self(self.0 + delta)
    }

    /// Calendar year (UTC).
    #[must_use]
    pub fn year(&self) -> i32 {
        use chrono::Datelike;
        self.0.year()
    }

    /// Calendar month 1-12 (UTC).
    #[must_use]
    pub fn month(&self) -> u32 {
        use chrono::Datelike;
        self.0.month()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_parse_and_display() {
        let ts = Timestamp::parse("2026-03-01T12:00:00Z").unwrap();
        assert_eq!(format!("{ts}"), "2026-03-01T12:00:00+00:00");
    }

    #[test]
    fn timestamp_parse_invalid() {
        assert!(Timestamp::parse("not-a-date").is_err());
    }

    #[test]
    fn timestamp_duration_since() {
        let earlier = Timestamp::parse("2026-03-01T00:00:00Z").unwrap();
        let later = Timestamp::parse("2026-03-02T01:00:00Z").unwrap();
        assert_eq!(later.duration_since(earlier), chrono::Duration::hours(25));
    }

    #[test]
    fn timestamp_offset() {
        let ts = Timestamp::parse("2026-03-01T00:00:00Z").unwrap();
        let shifted = ts.offset(chrono::Duration::hours(24));
        assert_eq!(shifted.duration_since(ts), chrono::Duration::hours(24));
    }

    #[test]
    fn timestamp_calendar_parts() {
        let ts = Timestamp::parse("2026-03-15T09:30:00Z").unwrap();
        assert_eq!(ts.year(), 2026);
        assert_eq!(ts.month(), 3);
    }

    #[test]
    fn timestamp_ordering() {
        let a = Timestamp::parse("2026-03-01T00:00:00Z").unwrap();
        let b = Timestamp::parse("2026-03-02T00:00:00Z").unwrap();
        assert!(a < b);
    }
}
