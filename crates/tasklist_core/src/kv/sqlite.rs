//! SQLite-backed key-value store over the `kv_entries` table.
//!
//! # Invariants
//! - The connection must be migrated (see [`crate::db::open_db`]) before use.
//! - Writes are upserts; a key never has more than one row.

use super::{KvStore, StorageError, StorageResult};
use crate::db::migrations::{current_user_version, latest_version, verify_required_tables};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

/// Key-value store borrowing a migrated SQLite connection.
#[derive(Clone, Copy)]
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a ready connection.
    ///
    /// # Errors
    /// - `Unavailable` when the schema version is behind this build.
    /// - `Db(MissingTable)` when the `kv_entries` table is gone.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let actual = current_user_version(conn)?;
        let expected = latest_version();
        if actual < expected {
            return Err(StorageError::Unavailable(format!(
                "connection schema version {actual} is behind {expected}; open it with open_db"
            )));
        }

        verify_required_tables(conn)?;

        Ok(Self { conn })
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(text) if !text.is_empty() => Ok(Some(serde_json::from_str(&text)?)),
            _ => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, raw],
        )?;
        Ok(())
    }
}
