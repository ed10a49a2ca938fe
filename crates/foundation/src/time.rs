use chrono::{DateTime, NaiveDateTime, Utc};

/// Instant an event occurred, UTC.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct EventTime(DateTime<Utc>);

impl EventTime {
    /// Milliseconds since the Unix epoch. `None` when out of chrono's range.
    pub fn from_epoch_millis(ms: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(ms).map(Self)
    }

    /// ISO-8601 timestamp, e.g. `2024-01-01T12:00:00Z`. Without an offset the
    /// time is read as UTC.
    pub fn parse_iso8601(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(t) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(t.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|t| Self(t.and_utc()))
    }

    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Human-readable form used in popups: `Mon Jan 01 2024 12:00:00 UTC`.
    pub fn to_human(&self) -> String {
        self.0.format("%a %b %d %Y %H:%M:%S UTC").to_string()
    }
}

impl std::fmt::Display for EventTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_human())
    }
}
