//! Rows as read from SQLite, kept apart from the mood-types API models.

use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDateTime, Utc};
use mood_types::Emotion;

/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" UTC text.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct EntryRow {
    pub id: i64,
    pub text: String,
    pub emotion: String,
    pub confidence: f64,
    pub emoji_feedback: String,
    pub created_at: String,
}

pub struct EmotionCountRow {
    pub emotion: String,
    pub emoji_feedback: String,
    pub count: i64,
}

pub struct RecentEntryRow {
    pub emotion: String,
    pub emoji_feedback: String,
    pub created_at: String,
}

/// Values for an insert. The emoji is not a field: it is always derived
/// from `emotion` at write time.
pub struct NewEntry<'a> {
    pub text: &'a str,
    pub emotion: Emotion,
    pub confidence: f64,
    pub created_at: &'a str,
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Accepts the native column format (with or without fractional seconds)
/// as well as RFC 3339.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = raw.parse::<DateTime<Utc>>() {
        return Ok(ts);
    }

    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|ndt| ndt.and_utc())
        .map_err(|e| anyhow!("Invalid timestamp '{}': {}", raw, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 9, 1, 17, 30, 0).unwrap();

        assert_eq!(parse_timestamp("2025-09-01 17:30:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-09-01T17:30:00Z").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2025-09-01 17:30:00.250").unwrap(),
            expected + chrono::Duration::milliseconds(250)
        );
        assert!(parse_timestamp("yesterday").is_err());

        assert_eq!(format_timestamp(expected), "2025-09-01 17:30:00");
    }
}
