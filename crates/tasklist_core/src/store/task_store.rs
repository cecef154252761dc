//! Task collection store.
//!
//! # Responsibility
//! - Own the ordered task collection and be its only mutator.
//! - Persist the whole collection as one JSON array after every mutation.
//!
//! # Invariants
//! - Ids are unique within the collection.
//! - New tasks are inserted at the front (most recent first).
//! - `updated_at` never moves backwards, even if the clock does.

use super::{StoreError, StoreResult};
use crate::clock::Clock;
use crate::kv::{KvStore, StorageError, StorageResult, TASKS_KEY};
use crate::model::task::{Task, TaskInput};
use log::{error, info, warn};
use serde_json::Value;
use std::collections::HashSet;

/// In-memory task collection backed by a [`KvStore`] key.
pub struct TaskStore<K: KvStore, C: Clock> {
    kv: K,
    clock: C,
    key: String,
    tasks: Vec<Task>,
    needs_flush: bool,
}

impl<K: KvStore, C: Clock> TaskStore<K, C> {
    /// Loads the collection from the default tasks key.
    pub fn load(kv: K, clock: C) -> Self {
        Self::load_from_key(kv, clock, TASKS_KEY)
    }

    /// Loads the collection from `key`.
    ///
    /// Never fails: a missing, unreadable or non-array value yields an empty
    /// collection, and individual undecodable or invalid entries are skipped.
    pub fn load_from_key(kv: K, clock: C, key: impl Into<String>) -> Self {
        let key = key.into();
        let tasks = match kv.get(&key) {
            Ok(Some(value)) => decode_tasks(value),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("event=tasks_load module=store status=fallback key={key} error={err}");
                Vec::new()
            }
        };
        info!(
            "event=tasks_load module=store status=ok key={key} count={}",
            tasks.len()
        );

        Self {
            kv,
            clock,
            key,
            tasks,
            needs_flush: false,
        }
    }

    /// Full collection in base order (most recently created first).
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Whether the last persist failed and memory is ahead of storage.
    pub fn needs_flush(&self) -> bool {
        self.needs_flush
    }

    /// Creates a task at the front of the collection.
    ///
    /// `fallback_category` is used when the input names no category.
    ///
    /// # Errors
    /// - `Validation(EmptyTitle)` when the title is blank; nothing changes.
    pub fn create(&mut self, input: TaskInput, fallback_category: &str) -> StoreResult<Task> {
        let normalized = input.normalize()?;
        let category = normalized
            .category
            .clone()
            .unwrap_or_else(|| fallback_category.to_string());

        let mut task = Task::from_input(normalized, category, self.clock.now_ms());
        while self.get(&task.id).is_some() {
            task.id = uuid::Uuid::new_v4().to_string();
        }

        self.tasks.insert(0, task.clone());
        info!(
            "event=task_create module=store status=ok task_id={}",
            task.id
        );
        self.persist();
        Ok(task)
    }

    /// Overwrites the editable fields of an existing task.
    ///
    /// `id`, `created_at` and `completed` are preserved. A missing category
    /// becomes the empty string.
    ///
    /// # Errors
    /// - `NotFound` when no task has `id`.
    /// - `Validation(EmptyTitle)` when the title is blank.
    pub fn update(&mut self, id: &str, input: TaskInput) -> StoreResult<Task> {
        let index = self.index_of(id)?;
        let normalized = input.normalize()?;
        let now_ms = self.clock.now_ms();

        let task = &mut self.tasks[index];
        task.title = normalized.title;
        task.description = normalized.description;
        task.category = normalized.category.unwrap_or_default();
        task.priority = normalized.priority;
        task.due_date = normalized.due_date;
        task.updated_at = task.updated_at.max(now_ms);
        let updated = task.clone();

        info!("event=task_update module=store status=ok task_id={id}");
        self.persist();
        Ok(updated)
    }

    /// Flips the completion flag.
    ///
    /// # Errors
    /// - `NotFound` when no task has `id`.
    pub fn toggle_complete(&mut self, id: &str) -> StoreResult<Task> {
        let index = self.index_of(id)?;
        let now_ms = self.clock.now_ms();

        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        task.updated_at = task.updated_at.max(now_ms);
        let toggled = task.clone();

        info!(
            "event=task_toggle module=store status=ok task_id={id} completed={}",
            toggled.completed
        );
        self.persist();
        Ok(toggled)
    }

    /// Removes a task permanently and returns it.
    ///
    /// # Errors
    /// - `NotFound` when no task has `id`; the collection is untouched and
    ///   nothing is persisted.
    pub fn delete(&mut self, id: &str) -> StoreResult<Task> {
        let index = self.index_of(id)?;
        let removed = self.tasks.remove(index);
        info!("event=task_delete module=store status=ok task_id={id}");
        self.persist();
        Ok(removed)
    }

    /// Writes the current collection, surfacing any storage error.
    pub fn flush(&mut self) -> StorageResult<()> {
        self.write_snapshot()?;
        self.needs_flush = false;
        Ok(())
    }

    fn index_of(&self, id: &str) -> StoreResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn persist(&mut self) {
        match self.write_snapshot() {
            Ok(()) => self.needs_flush = false,
            Err(err) => {
                error!(
                    "event=tasks_persist module=store status=error key={} error={err}",
                    self.key
                );
                self.needs_flush = true;
            }
        }
    }

    fn write_snapshot(&self) -> StorageResult<()> {
        let value = serde_json::to_value(&self.tasks).map_err(StorageError::Serialization)?;
        self.kv.set(&self.key, &value)
    }
}

fn decode_tasks(value: Value) -> Vec<Task> {
    let Value::Array(items) = value else {
        warn!("event=tasks_load module=store status=fallback reason=not_an_array");
        return Vec::new();
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut tasks = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        let task = match serde_json::from_value::<Task>(item) {
            Ok(task) => task,
            Err(err) => {
                warn!(
                    "event=task_decode module=store status=skipped position={position} error={err}"
                );
                continue;
            }
        };
        if let Err(err) = task.validate() {
            warn!(
                "event=task_decode module=store status=skipped position={position} error={err}"
            );
            continue;
        }
        if !seen.insert(task.id.clone()) {
            warn!(
                "event=task_decode module=store status=skipped position={position} reason=duplicate_id"
            );
            continue;
        }
        tasks.push(task);
    }
    tasks
}
