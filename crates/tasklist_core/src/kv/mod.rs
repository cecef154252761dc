//! Key-value persistence boundary.
//!
//! # Responsibility
//! - Define the get/set contract the stores persist through.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Values are JSON documents; a key holds exactly one document.
//! - Backends report failures as [`StorageError`]; callers decide the fallback.

use crate::db::DbError;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

/// Default key holding the task array.
pub const TASKS_KEY: &str = "todo-app-todos";
/// Default key holding the settings object.
pub const SETTINGS_KEY: &str = "todo-app-settings";

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reading or writing the key-value backend.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Stored text is not valid JSON, or a value could not be encoded.
    Serialization(serde_json::Error),
    /// Backend cannot serve requests (quota, missing schema, ...).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "invalid stored json: {err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Names of the two keys used by the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub tasks: String,
    pub settings: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            tasks: TASKS_KEY.to_string(),
            settings: SETTINGS_KEY.to_string(),
        }
    }
}

/// External key-value collaborator.
///
/// Methods take `&self` so one backend can be shared by both stores.
pub trait KvStore {
    /// Reads and decodes the document under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<Value>>;
    /// Replaces the document under `key`.
    fn set(&self, key: &str, value: &Value) -> StorageResult<()>;
}

impl<K: KvStore + ?Sized> KvStore for &K {
    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &Value) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

impl<K: KvStore + ?Sized> KvStore for Rc<K> {
    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &Value) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
