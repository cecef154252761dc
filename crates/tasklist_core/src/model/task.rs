//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record persisted through the KV boundary.
//! - Provide input normalization and validation shared by create/update.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is never empty after trimming.
//! - `updated_at >= created_at`.
//!
//! # Wire shape
//! Tasks serialize as camelCase JSON objects. `dueDate` is `YYYY-MM-DD` or
//! `""` when absent; unknown priorities decode as `medium`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque stable task identifier.
///
/// Kept as a string so records written by other builds (which used
/// non-UUID ids) still load.
pub type TaskId = String;

/// Task urgency with an explicit ordinal used for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort weight: lower sorts first.
    pub fn weight(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Stable wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "高",
            Self::Medium => "中",
            Self::Low => "低",
        }
    }

    /// Parses a wire value. Returns `None` for unknown input.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .and_then(Priority::parse)
            .unwrap_or_default())
    }
}

/// Validation errors for task records and task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// `updated_at` is earlier than `created_at`.
    TimestampOrder { created_at: i64, updated_at: i64 },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be blank"),
            Self::TimestampOrder {
                created_at,
                updated_at,
            } => write!(
                f,
                "updatedAt ({updated_at}) must be >= createdAt ({created_at})"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical persisted to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TaskRecord")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Expected to be one of the configured categories, but not enforced.
    pub category: String,
    pub priority: Priority,
    #[serde(serialize_with = "due_date_format::serialize")]
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Never earlier than `created_at`.
    pub updated_at: i64,
}

/// Stored shape as read back: every field but `id` and `title` may be
/// absent or `null`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    priority: Priority,
    #[serde(default, deserialize_with = "due_date_format::deserialize")]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    completed: Option<bool>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    updated_at: Option<i64>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let created_at = record.created_at.unwrap_or_default();
        Self {
            id: record.id,
            title: record.title,
            description: record.description.unwrap_or_default(),
            category: record.category.unwrap_or_default(),
            priority: record.priority,
            due_date: record.due_date,
            completed: record.completed.unwrap_or_default(),
            created_at,
            // Records written before edits were tracked only carry `createdAt`.
            updated_at: record.updated_at.unwrap_or(created_at),
        }
    }
}

impl Task {
    /// Builds a fresh incomplete task from normalized input.
    ///
    /// # Invariants
    /// - `id` is a new v4 UUID string.
    /// - `created_at == updated_at == now_ms`.
    pub(crate) fn from_input(input: NormalizedInput, category: String, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            category,
            priority: input.priority,
            due_date: input.due_date,
            completed: false,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Validates record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.updated_at < self.created_at {
            return Err(TaskValidationError::TimestampOrder {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// Returns whether `text` (already lowercased) occurs in title or description.
    pub(crate) fn contains_text(&self, lowered: &str) -> bool {
        self.title.to_lowercase().contains(lowered)
            || self.description.to_lowercase().contains(lowered)
    }
}

/// Caller-supplied fields for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
}

impl TaskInput {
    /// Creates input with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Trims text fields and applies defaults.
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is blank after trimming.
    pub(crate) fn normalize(self) -> Result<NormalizedInput, TaskValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }

        Ok(NormalizedInput {
            title,
            description: self
                .description
                .map(|value| value.trim().to_string())
                .unwrap_or_default(),
            category: self.category.filter(|value| !value.is_empty()),
            priority: self.priority.unwrap_or_default(),
            due_date: self.due_date,
        })
    }
}

/// Input after trimming and defaulting; only built by [`TaskInput::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NormalizedInput {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

mod due_date_format {
    use crate::date_math::{format_iso_date, parse_due_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&format_iso_date(*date)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().and_then(parse_due_date))
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, TaskInput, TaskValidationError};

    #[test]
    fn normalize_trims_and_defaults() {
        let normalized = TaskInput::new("  buy milk ")
            .with_description("  two bottles  ")
            .with_category("")
            .normalize()
            .unwrap();

        assert_eq!(normalized.title, "buy milk");
        assert_eq!(normalized.description, "two bottles");
        assert_eq!(normalized.category, None);
        assert_eq!(normalized.priority, Priority::Medium);
        assert_eq!(normalized.due_date, None);
    }

    #[test]
    fn normalize_rejects_blank_title() {
        let err = TaskInput::new(" \t\n").normalize().unwrap_err();
        assert_eq!(err, TaskValidationError::EmptyTitle);
    }

    #[test]
    fn priority_weights_order_high_first() {
        assert!(Priority::High.weight() < Priority::Medium.weight());
        assert!(Priority::Medium.weight() < Priority::Low.weight());
    }
}
