//! Task-list use-case service.
//!
//! # Invariants
//! - Service APIs never bypass store validation or persistence.
//! - Derived views (`visible_tasks`, `alerts`, `stats`) are recomputed from
//!   the current snapshots on every call.

use crate::alert::{due_badge, evaluate, AlertSummary, DueBadge};
use crate::clock::Clock;
use crate::kv::{KvStore, StorageKeys, StorageResult};
use crate::model::settings::Settings;
use crate::model::task::{Task, TaskInput};
use crate::query::{visible_tasks, TaskQuery};
use crate::stats::TaskStats;
use crate::store::settings_store::SettingsStore;
use crate::store::task_store::TaskStore;
use crate::store::StoreResult;

/// Facade owning both stores.
pub struct TodoService<K: KvStore + Clone, C: Clock> {
    tasks: TaskStore<K, C>,
    settings: SettingsStore<K>,
}

impl<K: KvStore + Clone, C: Clock> TodoService<K, C> {
    /// Loads both stores from the default keys.
    pub fn load(kv: K, clock: C) -> Self {
        Self::load_with_keys(kv, clock, &StorageKeys::default())
    }

    pub fn load_with_keys(kv: K, clock: C, keys: &StorageKeys) -> Self {
        Self {
            settings: SettingsStore::load_from_key(kv.clone(), keys.settings.as_str()),
            tasks: TaskStore::load_from_key(kv, clock, keys.tasks.as_str()),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn settings(&self) -> &Settings {
        self.settings.settings()
    }

    /// Creates a task; an unset category takes the first configured one.
    pub fn create_task(&mut self, input: TaskInput) -> StoreResult<Task> {
        let fallback = self.settings.settings().default_category().to_string();
        self.tasks.create(input, &fallback)
    }

    pub fn update_task(&mut self, id: &str, input: TaskInput) -> StoreResult<Task> {
        self.tasks.update(id, input)
    }

    pub fn toggle_task(&mut self, id: &str) -> StoreResult<Task> {
        self.tasks.toggle_complete(id)
    }

    pub fn delete_task(&mut self, id: &str) -> StoreResult<Task> {
        self.tasks.delete(id)
    }

    pub fn add_category(&mut self, name: &str) -> bool {
        self.settings.add_category(name)
    }

    pub fn remove_category(&mut self, name: &str) -> bool {
        self.settings.remove_category(name)
    }

    pub fn save_settings(&mut self, alert_days: &str, alert_enabled: bool) -> &Settings {
        self.settings.save(alert_days, alert_enabled)
    }

    pub fn visible_tasks(&self, query: &TaskQuery) -> Vec<&Task> {
        visible_tasks(self.tasks.tasks(), query)
    }

    /// `None` when alerts are disabled.
    pub fn alerts(&self) -> Option<AlertSummary> {
        evaluate(
            self.tasks.tasks(),
            self.settings.settings(),
            self.tasks.clock().now_ms(),
        )
    }

    pub fn due_badge(&self, task: &Task) -> Option<DueBadge> {
        due_badge(task, self.settings.settings(), self.tasks.clock().now_ms())
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(self.tasks.tasks())
    }

    /// Whether either store holds changes that failed to persist.
    pub fn needs_flush(&self) -> bool {
        self.tasks.needs_flush() || self.settings.needs_flush()
    }

    /// Retries persistence of both stores.
    ///
    /// Both stores are always attempted; the first failure is returned.
    pub fn flush(&mut self) -> StorageResult<()> {
        let tasks = self.tasks.flush();
        let settings = self.settings.flush();
        tasks.and(settings)
    }
}
