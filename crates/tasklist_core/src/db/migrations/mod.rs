//! Schema migrations for the key-value table.
//!
//! # Invariants
//! - Migration versions are strictly increasing.
//! - The applied version is mirrored to `PRAGMA user_version` inside the same
//!   transaction as the schema change.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(version, sql)` pairs, oldest first.
const MIGRATIONS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Tables that must exist once all migrations are applied.
pub const REQUIRED_TABLES: &[&str] = &["kv_entries"];

/// Returns the newest schema version this build understands.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = current_user_version(conn)?;
    let to = latest_version();
    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }

    let pending: Vec<_> = MIGRATIONS
        .iter()
        .filter(|(version, _)| *version > from)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        info!("event=db_migrate module=db status=ok version={version}");
    }
    tx.commit()?;
    Ok(())
}

/// Checks that every table in [`REQUIRED_TABLES`] exists on `conn`.
///
/// # Errors
/// - `MissingTable` naming the first absent table.
pub fn verify_required_tables(conn: &Connection) -> DbResult<()> {
    for table in REQUIRED_TABLES {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(DbError::MissingTable { table: *table });
        }
    }
    Ok(())
}

/// Reads the schema version recorded on `conn`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}
