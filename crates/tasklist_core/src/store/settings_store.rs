//! Settings singleton store.
//!
//! # Invariants
//! - Loading never fails; absent or corrupt fields fall back individually.
//! - Every mutation that changes settings persists the full object.

use crate::kv::{KvStore, StorageError, StorageResult, SETTINGS_KEY};
use crate::model::settings::{parse_alert_days, Settings};
use log::{error, info, warn};

/// Owns [`Settings`] and persists them through a [`KvStore`] key.
pub struct SettingsStore<K: KvStore> {
    kv: K,
    key: String,
    settings: Settings,
    needs_flush: bool,
}

impl<K: KvStore> SettingsStore<K> {
    pub fn load(kv: K) -> Self {
        Self::load_from_key(kv, SETTINGS_KEY)
    }

    /// Loads settings from `key`, merging stored fields over defaults.
    pub fn load_from_key(kv: K, key: impl Into<String>) -> Self {
        let key = key.into();
        let settings = match kv.get(&key) {
            Ok(Some(value)) => {
                let resolved = Settings::resolve(&value);
                if !resolved.unknown_keys.is_empty() {
                    warn!(
                        "event=settings_load module=store status=ignored_keys keys={}",
                        resolved.unknown_keys.join(",")
                    );
                }
                if !resolved.defaulted_fields.is_empty() {
                    info!(
                        "event=settings_load module=store status=defaulted fields={}",
                        resolved.defaulted_fields.join(",")
                    );
                }
                resolved.settings
            }
            Ok(None) => Settings::default(),
            Err(err) => {
                warn!("event=settings_load module=store status=fallback key={key} error={err}");
                Settings::default()
            }
        };

        Self {
            kv,
            key,
            settings,
            needs_flush: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn needs_flush(&self) -> bool {
        self.needs_flush
    }

    /// Appends a category; no-op when blank or already present.
    ///
    /// Returns whether the vocabulary changed.
    pub fn add_category(&mut self, name: &str) -> bool {
        let changed = self.settings.add_category(name);
        if changed {
            info!(
                "event=category_add module=store status=ok count={}",
                self.settings.categories.len()
            );
            self.persist();
        }
        changed
    }

    /// Removes the first exact match; no-op when absent.
    ///
    /// Tasks already carrying the name keep it.
    pub fn remove_category(&mut self, name: &str) -> bool {
        let changed = self.settings.remove_category(name);
        if changed {
            info!(
                "event=category_remove module=store status=ok count={}",
                self.settings.categories.len()
            );
            self.persist();
        }
        changed
    }

    /// Saves the alert configuration from raw form input.
    ///
    /// `alert_days` falls back to the default when it is not a non-negative
    /// integer.
    pub fn save(&mut self, alert_days: &str, alert_enabled: bool) -> &Settings {
        self.settings.alert_days = parse_alert_days(alert_days);
        self.settings.alert_enabled = alert_enabled;
        info!(
            "event=settings_save module=store status=ok alert_days={} alert_enabled={}",
            self.settings.alert_days, self.settings.alert_enabled
        );
        self.persist();
        &self.settings
    }

    /// Writes the current settings, surfacing any storage error.
    pub fn flush(&mut self) -> StorageResult<()> {
        self.write_snapshot()?;
        self.needs_flush = false;
        Ok(())
    }

    fn persist(&mut self) {
        match self.write_snapshot() {
            Ok(()) => self.needs_flush = false,
            Err(err) => {
                error!(
                    "event=settings_persist module=store status=error key={} error={err}",
                    self.key
                );
                self.needs_flush = true;
            }
        }
    }

    fn write_snapshot(&self) -> StorageResult<()> {
        let value = serde_json::to_value(&self.settings).map_err(StorageError::Serialization)?;
        self.kv.set(&self.key, &value)
    }
}
