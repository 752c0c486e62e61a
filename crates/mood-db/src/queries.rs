use crate::Database;
use crate::models::{EmotionCountRow, EntryRow, NewEntry, RecentEntryRow};
use anyhow::Result;
use rusqlite::{Connection, Row};

const ENTRY_COLUMNS: &str = "id, text, emotion, confidence, emoji_feedback, created_at";

impl Database {
    // -- Entries --

    /// Inserts an entry and returns its assigned id.
    pub fn insert_entry(&self, entry: &NewEntry<'_>) -> Result<i64> {
        self.with_conn(|conn| insert_entry(conn, entry))
    }

    /// All entries, most recent first.
    pub fn list_entries(&self) -> Result<Vec<EntryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM entries ORDER BY created_at DESC, id DESC",
                ENTRY_COLUMNS
            ))?;

            let rows = stmt
                .query_map([], map_entry)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Returns `false` when no entry had this id.
    pub fn delete_entry(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM entries WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }

    pub fn count_entries(&self) -> Result<i64> {
        self.with_conn(count_entries)
    }

    // -- Stats --

    pub fn emotion_counts(&self) -> Result<Vec<EmotionCountRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT emotion, emoji_feedback, COUNT(*)
                 FROM entries
                 GROUP BY emotion, emoji_feedback
                 ORDER BY COUNT(*) DESC, emotion",
            )?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(EmotionCountRow {
                        emotion: row.get(0)?,
                        emoji_feedback: row.get(1)?,
                        count: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn recent_entries(&self, limit: u32) -> Result<Vec<RecentEntryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT emotion, emoji_feedback, created_at
                 FROM entries
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?1",
            )?;

            let rows = stmt
                .query_map([limit], |row| {
                    Ok(RecentEntryRow {
                        emotion: row.get(0)?,
                        emoji_feedback: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

pub(crate) fn insert_entry(conn: &Connection, entry: &NewEntry<'_>) -> Result<i64> {
    conn.execute(
        "INSERT INTO entries (text, emotion, confidence, emoji_feedback, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            entry.text,
            entry.emotion.as_str(),
            entry.confidence,
            entry.emotion.emoji(),
            entry.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn count_entries(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
    Ok(count)
}

fn map_entry(row: &Row<'_>) -> rusqlite::Result<EntryRow> {
    Ok(EntryRow {
        id: row.get(0)?,
        text: row.get(1)?,
        emotion: row.get(2)?,
        confidence: row.get(3)?,
        emoji_feedback: row.get(4)?,
        created_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mood_types::Emotion;

    fn new_entry<'a>(text: &'a str, emotion: Emotion, created_at: &'a str) -> NewEntry<'a> {
        NewEntry {
            text,
            emotion,
            confidence: 0.75,
            created_at,
        }
    }

    #[test]
    fn insert_then_list() {
        let db = Database::open_in_memory().unwrap();

        let first = db
            .insert_entry(&new_entry("older", Emotion::Negative, "2025-08-01 09:00:00"))
            .unwrap();
        let second = db
            .insert_entry(&new_entry("newer", Emotion::Positive, "2025-08-02 09:00:00"))
            .unwrap();
        assert_ne!(first, second);

        let rows = db.list_entries().unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second, first]);

        let row = &rows[1];
        assert_eq!(row.text, "older");
        assert_eq!(row.emotion, "negative");
        assert_eq!(row.emoji_feedback, "😢");
        assert_eq!(row.confidence, 0.75);
    }

    #[test]
    fn same_second_orders_by_id() {
        let db = Database::open_in_memory().unwrap();
        let ts = "2025-08-02 09:00:00";
        let a = db.insert_entry(&new_entry("a", Emotion::Neutral, ts)).unwrap();
        let b = db.insert_entry(&new_entry("b", Emotion::Neutral, ts)).unwrap();

        let ids: Vec<i64> = db.list_entries().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[test]
    fn delete_reports_missing() {
        let db = Database::open_in_memory().unwrap();
        let id = db
            .insert_entry(&new_entry("bye", Emotion::Neutral, "2025-08-01 09:00:00"))
            .unwrap();

        assert!(db.delete_entry(id).unwrap());
        assert!(!db.delete_entry(id).unwrap());
        assert!(!db.delete_entry(9999).unwrap());
        assert!(db.list_entries().unwrap().is_empty());
    }

    #[test]
    fn stats_group_and_limit() {
        let db = Database::open_in_memory().unwrap();
        for i in 0..25 {
            let emotion = if i % 2 == 0 { Emotion::Positive } else { Emotion::Negative };
            let ts = format!("2025-08-{:02} 10:00:00", i + 1);
            db.insert_entry(&new_entry("x", emotion, &ts)).unwrap();
        }

        let counts = db.emotion_counts().unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].emotion, "positive");
        assert_eq!(counts[0].emoji_feedback, "😊");
        assert_eq!(counts[0].count, 13);
        assert_eq!(counts[1].count, 12);

        let recent = db.recent_entries(20).unwrap();
        assert_eq!(recent.len(), 20);
        assert_eq!(recent[0].created_at, "2025-08-25 10:00:00");
        assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(db.count_entries().unwrap(), 25);
    }
}
