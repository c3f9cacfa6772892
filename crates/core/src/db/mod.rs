//! SQLite persistence for collection documents

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::errors::Result;

pub mod schema;

const UPSERT: &str = "INSERT INTO collections (name, data, updated_at) VALUES (?1, ?2, ?3)
     ON CONFLICT(name) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at";

/// Handle to the durable key/value document table
pub struct Db {
    conn: Connection,
}

impl Db {
    /// Open (or create) the database file and apply the schema
    pub fn open(path: &Path) -> Result<Self> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(path = %path.display(), journal_mode = %mode, "database opened");
        Self::init(conn)
    }

    /// Private in-memory database, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(schema::SCHEMA)?;
        Ok(Self { conn })
    }

    /// Stored document for `key`, if any
    pub fn load(&self, key: &str) -> Result<Option<String>> {
        let data = self
            .conn
            .query_row(
                "SELECT data FROM collections WHERE name = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(data)
    }

    /// Insert or replace the document for `key`
    pub fn save(&self, key: &str, data: &str) -> Result<()> {
        let now = Utc::now().timestamp_millis();
        self.conn.execute(UPSERT, params![key, data, now])?;
        Ok(())
    }

    /// Save several documents in one transaction; all or none are written
    pub fn save_many(&self, entries: &[(&str, String)]) -> Result<()> {
        self.write_batch(false, entries)
    }

    /// Remove every stored document and save `entries`, in one transaction
    pub fn replace_all(&self, entries: &[(&str, String)]) -> Result<()> {
        self.write_batch(true, entries)
    }

    fn write_batch(&self, clear: bool, entries: &[(&str, String)]) -> Result<()> {
        // Dropping the transaction without commit rolls it back
        let tx = self.conn.unchecked_transaction()?;
        if clear {
            tx.execute("DELETE FROM collections", [])?;
        }
        let now = Utc::now().timestamp_millis();
        for (key, data) in entries {
            tx.execute(UPSERT, params![*key, data.as_str(), now])?;
        }
        tx.commit()?;
        debug!(documents = entries.len(), clear, "batch written");
        Ok(())
    }
}
