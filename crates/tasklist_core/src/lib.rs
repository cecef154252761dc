//! Core domain logic for the task-list manager.
//! This crate owns task/settings invariants, filtering, ordering and
//! due-date alerts; rendering and input wiring live in callers.

pub mod alert;
pub mod clock;
pub mod date_math;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod stats;
pub mod store;

pub use alert::{due_badge, evaluate, AlertSummary, DueBadge};
pub use clock::{Clock, FixedClock, SystemClock};
pub use date_math::{days_until, days_until_in, parse_due_date};
pub use kv::{
    KvStore, MemoryKvStore, SqliteKvStore, StorageError, StorageKeys, StorageResult,
    SETTINGS_KEY, TASKS_KEY,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::settings::{parse_alert_days, Settings, DEFAULT_ALERT_DAYS, DEFAULT_CATEGORIES};
pub use model::task::{Priority, Task, TaskId, TaskInput, TaskValidationError};
pub use query::{
    visible_tasks, CategoryFilter, PriorityFilter, SortKey, StatusFilter, TaskQuery,
};
pub use service::todo_service::TodoService;
pub use stats::TaskStats;
pub use store::settings_store::SettingsStore;
pub use store::task_store::TaskStore;
pub use store::{StoreError, StoreResult};
