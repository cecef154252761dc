//! In-process key-value backend holding raw JSON text per key.

use super::{KvStore, StorageResult};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Map of key to serialized JSON text, the shape browser local storage uses.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw text without validating it as JSON.
    pub fn insert_raw(&self, key: impl Into<String>, raw: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), raw.into());
    }

    /// Returns the raw text under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        match self.entries.borrow().get(key) {
            Some(raw) if !raw.is_empty() => Ok(Some(serde_json::from_str(raw)?)),
            _ => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        self.entries.borrow_mut().insert(key.to_string(), raw);
        Ok(())
    }
}
