use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Emotion, Entry};

// -- Entries --

/// `text` stays optional so a missing field surfaces as a validation
/// error rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Body returned by `POST /api/entries`. The confidence is reported as
/// `emotion_score` here, while listings use `confidence`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedEntryResponse {
    pub id: i64,
    pub text: String,
    pub emotion: Emotion,
    pub emotion_score: f64,
    pub emoji_feedback: String,
    pub created_at: DateTime<Utc>,
}

impl From<Entry> for CreatedEntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            text: entry.text,
            emotion: entry.emotion,
            emotion_score: entry.confidence,
            emoji_feedback: entry.emoji_feedback,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// -- Stats --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: Emotion,
    pub emoji_feedback: String,
    pub count: u64,
}

/// Trend point: an entry stripped of its text and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub emotion: Emotion,
    pub emoji_feedback: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub emotion_stats: Vec<EmotionCount>,
    pub recent_entries: Vec<RecentEntry>,
}

// -- Health --

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: bool,
    pub classifier: String,
}
