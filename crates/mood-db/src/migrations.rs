use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

use mood_types::Emotion;

/// Columns that older databases may lack, with the DDL used to add them.
/// `ALTER TABLE` cannot add a column with a non-constant default, so
/// `created_at` is added nullable and backfilled.
const ADDITIVE_COLUMNS: &[(&str, &str)] = &[
    ("emotion", "emotion TEXT"),
    ("confidence", "confidence REAL"),
    ("emoji_feedback", "emoji_feedback TEXT"),
    ("created_at", "created_at TEXT"),
];

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS entries (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            text            TEXT NOT NULL,
            emotion         TEXT,
            confidence      REAL,
            emoji_feedback  TEXT,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;

    let existing = column_names(conn, "entries")?;
    for (name, ddl) in ADDITIVE_COLUMNS {
        if !existing.iter().any(|c| c == name) {
            info!("Adding missing column entries.{}", name);
            conn.execute_batch(&format!("ALTER TABLE entries ADD COLUMN {};", ddl))?;
        }
    }

    let repaired = backfill(conn)?;
    if repaired > 0 {
        info!("Backfilled {} legacy entry fields", repaired);
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_entries_created_at ON entries(created_at);",
    )?;

    info!("Database migrations complete");
    Ok(())
}

fn column_names(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(names)
}

/// Brings rows written by older schemas up to the entry invariants:
/// a canonical label, a confidence, the matching emoji and a timestamp.
fn backfill(conn: &Connection) -> Result<usize> {
    let mut changed = conn.execute(
        "UPDATE entries SET emotion = 'neutral'
         WHERE emotion IS NULL OR emotion NOT IN ('positive', 'neutral', 'negative')",
        [],
    )?;

    changed += conn.execute(
        "UPDATE entries SET confidence = 0.5 WHERE confidence IS NULL",
        [],
    )?;

    changed += conn.execute(
        "UPDATE entries SET confidence = MIN(MAX(confidence, 0.0), 1.0)
         WHERE confidence < 0.0 OR confidence > 1.0",
        [],
    )?;

    changed += conn.execute(
        "UPDATE entries
         SET emoji_feedback = CASE emotion WHEN 'positive' THEN ?1 WHEN 'negative' THEN ?2 ELSE ?3 END
         WHERE emoji_feedback IS NOT
               (CASE emotion WHEN 'positive' THEN ?1 WHEN 'negative' THEN ?2 ELSE ?3 END)",
        (
            Emotion::Positive.emoji(),
            Emotion::Negative.emoji(),
            Emotion::Neutral.emoji(),
        ),
    )?;

    changed += conn.execute(
        "UPDATE entries SET created_at = datetime('now') WHERE created_at IS NULL",
        [],
    )?;

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();

        let cols = column_names(&conn, "entries").unwrap();
        assert_eq!(
            cols,
            vec!["id", "text", "emotion", "confidence", "emoji_feedback", "created_at"]
        );
    }

    #[test]
    fn legacy_table_gains_columns_and_backfill() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                emotion TEXT,
                confidence REAL
            );
            INSERT INTO entries (text, emotion, confidence) VALUES ('old happy', 'positive', 0.9);
            INSERT INTO entries (text, emotion, confidence) VALUES ('old unknown', 'LABEL_1', NULL);
            ",
        )
        .unwrap();

        run(&conn).unwrap();

        let cols = column_names(&conn, "entries").unwrap();
        assert!(cols.iter().any(|c| c == "emoji_feedback"));
        assert!(cols.iter().any(|c| c == "created_at"));

        let rows: Vec<(String, f64, String, Option<String>)> = conn
            .prepare("SELECT emotion, confidence, emoji_feedback, created_at FROM entries ORDER BY id")
            .unwrap()
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert_eq!(rows[0].0, "positive");
        assert_eq!(rows[0].2, "😊");
        assert_eq!(rows[1].0, "neutral");
        assert_eq!(rows[1].1, 0.5);
        assert_eq!(rows[1].2, "😐");
        assert!(rows.iter().all(|r| r.3.is_some()));
    }
}
