pub mod demo;
pub mod migrations;
pub mod models;
pub mod queries;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use tracing::info;

/// Wait this long on a locked database before failing a write.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// The journal store: one SQLite connection shared behind a lock.
///
/// Callers on the async side go through `spawn_blocking`; every method here
/// blocks.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Opens the journal file, creating it if needed, and brings the schema
    /// up to date.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open journal at {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        let db = Self::prepare(conn)?;
        info!("Journal database ready at {}", path.display());
        Ok(db)
    }

    /// A private, empty journal. Used by tests and nothing persists.
    pub fn open_in_memory() -> Result<Self> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self> {
        migrations::run(&conn).context("Failed to migrate entries table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Journal connection lock poisoned"))
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.lock()?;
        f(&conn)
    }

    /// Mutable access for work that needs a transaction.
    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.lock()?;
        f(&mut conn)
    }
}
