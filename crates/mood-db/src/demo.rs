use anyhow::Result;
use mood_types::Emotion;
use rusqlite::TransactionBehavior;
use tracing::info;

use crate::Database;
use crate::models::NewEntry;
use crate::queries::{count_entries, insert_entry};

/// Demonstration entries: text, label, confidence, timestamp.
pub const DEMO_ENTRIES: &[(&str, Emotion, f64, &str)] = &[
    ("I'm feeling really happy today! The weather is perfect.", Emotion::Positive, 0.95, "2025-08-25 10:00:00"),
    ("Feeling a bit down today. Work was stressful.", Emotion::Negative, 0.87, "2025-08-26 14:00:00"),
    ("Just a regular day, nothing special happened.", Emotion::Neutral, 0.72, "2025-08-27 18:00:00"),
    ("Amazing news! I got the promotion I wanted!", Emotion::Positive, 0.98, "2025-08-28 09:00:00"),
    ("Feeling anxious about tomorrow's presentation.", Emotion::Negative, 0.89, "2025-08-29 13:00:00"),
    ("Had a nice lunch with colleagues.", Emotion::Positive, 0.76, "2025-08-30 17:00:00"),
    ("Feeling overwhelmed with all the tasks.", Emotion::Negative, 0.91, "2025-08-31 11:00:00"),
    ("Productive day at work, completed several projects.", Emotion::Positive, 0.83, "2025-09-01 09:00:00"),
    ("Feeling neutral about today's events.", Emotion::Neutral, 0.68, "2025-09-01 10:00:00"),
    ("Great workout session, feeling energized!", Emotion::Positive, 0.94, "2025-09-01 11:00:00"),
    ("Feeling sad about missing the family dinner.", Emotion::Negative, 0.85, "2025-09-01 12:00:00"),
    ("Regular day at home, nothing out of the ordinary.", Emotion::Neutral, 0.71, "2025-09-01 13:00:00"),
    ("Excited about the weekend plans!", Emotion::Positive, 0.92, "2025-09-01 14:00:00"),
    ("Feeling frustrated with technical issues.", Emotion::Negative, 0.88, "2025-09-01 14:30:00"),
    ("Peaceful evening reading a book.", Emotion::Neutral, 0.75, "2025-09-01 15:00:00"),
    ("Wonderful surprise from my partner!", Emotion::Positive, 0.96, "2025-09-01 15:30:00"),
    ("Feeling lonely today.", Emotion::Negative, 0.86, "2025-09-01 16:00:00"),
    ("Good conversation with an old friend.", Emotion::Positive, 0.79, "2025-09-01 16:30:00"),
    ("Feeling indifferent about current events.", Emotion::Neutral, 0.69, "2025-09-01 17:00:00"),
    ("Achieved a personal goal today!", Emotion::Positive, 0.93, "2025-09-01 17:30:00"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded {
        positive: usize,
        negative: usize,
        neutral: usize,
    },
    /// The table already held entries; nothing was written.
    Skipped { existing: i64 },
}

/// Inserts [`DEMO_ENTRIES`] if and only if the table is empty.
///
/// The emptiness check and the inserts share one immediate transaction,
/// so two concurrent callers cannot both seed.
pub fn seed_demo_entries(db: &Database) -> Result<SeedOutcome> {
    let outcome = db.with_conn_mut(|conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = count_entries(&tx)?;
        if existing > 0 {
            return Ok(SeedOutcome::Skipped { existing });
        }

        for (text, emotion, confidence, created_at) in DEMO_ENTRIES {
            insert_entry(
                &tx,
                &NewEntry {
                    text,
                    emotion: *emotion,
                    confidence: *confidence,
                    created_at,
                },
            )?;
        }

        tx.commit()?;

        let tally = |wanted: Emotion| DEMO_ENTRIES.iter().filter(|e| e.1 == wanted).count();
        Ok(SeedOutcome::Seeded {
            positive: tally(Emotion::Positive),
            negative: tally(Emotion::Negative),
            neutral: tally(Emotion::Neutral),
        })
    })?;

    match outcome {
        SeedOutcome::Seeded {
            positive,
            negative,
            neutral,
        } => info!(
            "Seeded {} demo entries (positive: {}, negative: {}, neutral: {})",
            DEMO_ENTRIES.len(),
            positive,
            negative,
            neutral
        ),
        SeedOutcome::Skipped { existing } => info!(
            "Database already holds {} entries, skipping demo data",
            existing
        ),
    }

    Ok(outcome)
}
