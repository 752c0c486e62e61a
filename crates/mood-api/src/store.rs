use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;
use tracing::{info, warn};

use mood_db::Database;
use mood_db::models::{EntryRow, NewEntry, format_timestamp, parse_timestamp};
use mood_sentiment::SentimentClassifier;
use mood_types::api::{EmotionCount, RecentEntry, StatsResponse};
use mood_types::{Emotion, Entry};

/// How many entries the stats trend covers.
pub const RECENT_LIMIT: u32 = 20;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Text is required")]
    EmptyText,

    #[error("Entry not found")]
    NotFound(i64),

    #[error("Database unavailable")]
    Unavailable,

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Journal operations: classification on create, persistence, and
/// aggregation. Blocking SQLite calls run off the async runtime.
///
/// `db` is `None` when the database could not be opened at startup; every
/// operation then fails with [`StoreError::Unavailable`].
pub struct EntryStore {
    db: Option<Arc<Database>>,
    classifier: Arc<SentimentClassifier>,
}

impl EntryStore {
    pub fn new(db: Option<Arc<Database>>, classifier: Arc<SentimentClassifier>) -> Self {
        Self { db, classifier }
    }

    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }

    pub async fn create(&self, text: &str) -> Result<Entry, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }

        let db = self.db()?;
        let sentiment = self.classifier.classify(text).await;
        let created_at = Utc::now().trunc_subsecs(0);

        let owned_text = text.to_string();
        let id = tokio::task::spawn_blocking(move || {
            db.insert_entry(&NewEntry {
                text: &owned_text,
                emotion: sentiment.label,
                confidence: sentiment.score,
                created_at: &format_timestamp(created_at),
            })
        })
        .await??;

        info!("Created entry {} ({}, {:.2})", id, sentiment.label, sentiment.score);

        Ok(Entry {
            id,
            text: text.to_string(),
            emotion: sentiment.label,
            confidence: sentiment.score,
            emoji_feedback: sentiment.emoji.to_string(),
            created_at,
        })
    }

    /// All entries, most recent first.
    pub async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let rows = self.run(|db| db.list_entries()).await?;
        Ok(rows.into_iter().map(row_to_entry).collect())
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let removed = self.run(move |db| db.delete_entry(id)).await?;
        if !removed {
            return Err(StoreError::NotFound(id));
        }

        info!("Deleted entry {}", id);
        Ok(())
    }

    pub async fn stats(&self) -> Result<StatsResponse, StoreError> {
        let (counts, recent) = self
            .run(|db| Ok((db.emotion_counts()?, db.recent_entries(RECENT_LIMIT)?)))
            .await?;

        let emotion_stats = counts
            .into_iter()
            .map(|row| EmotionCount {
                emotion: parse_emotion(&row.emotion),
                emoji_feedback: row.emoji_feedback,
                count: row.count.max(0) as u64,
            })
            .collect();

        let recent_entries = recent
            .into_iter()
            .map(|row| RecentEntry {
                emotion: parse_emotion(&row.emotion),
                emoji_feedback: row.emoji_feedback,
                created_at: parse_created_at(&row.created_at),
            })
            .collect();

        Ok(StatsResponse {
            emotion_stats,
            recent_entries,
        })
    }

    /// Round-trips a trivial query to confirm the database answers.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.run(|db| db.count_entries()).await.map(|_| ())
    }

    fn db(&self) -> Result<Arc<Database>, StoreError> {
        self.db.clone().ok_or(StoreError::Unavailable)
    }

    async fn run<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db()?;
        let out = tokio::task::spawn_blocking(move || f(&db)).await??;
        Ok(out)
    }
}

fn row_to_entry(row: EntryRow) -> Entry {
    Entry {
        emotion: parse_emotion(&row.emotion),
        created_at: parse_created_at(&row.created_at),
        id: row.id,
        text: row.text,
        confidence: row.confidence,
        emoji_feedback: row.emoji_feedback,
    }
}

fn parse_emotion(raw: &str) -> Emotion {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt emotion on stored entry: {}", e);
        Emotion::Neutral
    })
}

fn parse_created_at(raw: &str) -> DateTime<Utc> {
    parse_timestamp(raw).unwrap_or_else(|e| {
        warn!("Corrupt created_at on stored entry: {}", e);
        DateTime::default()
    })
}
