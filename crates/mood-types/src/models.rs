use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three-way sentiment label attached to every journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Positive,
    Neutral,
    Negative,
}

impl Emotion {
    pub const ALL: [Emotion; 3] = [Emotion::Positive, Emotion::Neutral, Emotion::Negative];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Canonical emoji feedback for this label.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Positive => "😊",
            Self::Neutral => "😐",
            Self::Negative => "😢",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emotion label '{0}'")]
pub struct UnknownEmotion(pub String);

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    /// Strict parse of a canonical label. Upstream vocabularies
    /// (`LABEL_2`, `pos`, ...) are normalized in the sentiment crate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            other => Err(UnknownEmotion(other.to_string())),
        }
    }
}

/// A persisted journal entry with its derived sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub text: String,
    pub emotion: Emotion,
    pub confidence: f64,
    pub emoji_feedback: String,
    pub created_at: DateTime<Utc>,
}
