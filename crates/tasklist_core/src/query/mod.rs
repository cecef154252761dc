//! Visible-task query engine.
//!
//! # Responsibility
//! - Filter a task snapshot by free text, category, priority and status.
//! - Order the result with a fixed "incomplete first" key plus one
//!   user-selected key.
//!
//! # Invariants
//! - Pure: same snapshot and query always give the same ordered output.
//! - Sorting is stable; ties keep base collection order.
//! - Completed tasks always follow incomplete ones.

use crate::model::task::{Priority, Task};
use std::cmp::Ordering;

pub mod collation;

use collation::compare_titles;

/// Wire value meaning "no filter".
pub const FILTER_ALL: &str = "all";

/// Category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// `"all"` selects everything; any other value is an exact category name.
    pub fn parse(value: &str) -> Self {
        if value == FILTER_ALL {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => task.category == *name,
        }
    }
}

/// Priority filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    /// Unknown values are treated as `"all"`.
    pub fn parse(value: &str) -> Self {
        Priority::parse(value).map_or(Self::All, Self::Only)
    }

    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(priority) => task.priority == priority,
        }
    }
}

/// Completion status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn parse(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            "completed" => Self::Completed,
            _ => Self::All,
        }
    }

    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// User-selected secondary ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Base collection order.
    #[default]
    Unsorted,
    /// Earliest due date first; undated tasks last.
    DueDate,
    /// High, medium, low.
    Priority,
    /// Newest first.
    CreatedAt,
    /// Locale-aware title order.
    Title,
}

impl SortKey {
    /// Unknown values keep base order.
    pub fn parse(value: &str) -> Self {
        match value {
            "dueDate" => Self::DueDate,
            "priority" => Self::Priority,
            "createdAt" => Self::CreatedAt,
            "title" => Self::Title,
            _ => Self::Unsorted,
        }
    }

    fn compare(self, left: &Task, right: &Task) -> Ordering {
        match self {
            Self::Unsorted => Ordering::Equal,
            Self::DueDate => match (left.due_date, right.due_date) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::Priority => left.priority.weight().cmp(&right.priority.weight()),
            Self::CreatedAt => right.created_at.cmp(&left.created_at),
            Self::Title => compare_titles(&left.title, &right.title),
        }
    }
}

/// Filter and sort parameters for [`visible_tasks`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Case-insensitive substring matched against title or description.
    pub search_text: String,
    pub category: CategoryFilter,
    pub priority: PriorityFilter,
    pub status: StatusFilter,
    pub sort_key: SortKey,
}

impl TaskQuery {
    /// Builds a query from raw control values (`"all"`, `"pending"`, ...).
    pub fn from_controls(
        search_text: &str,
        category: &str,
        priority: &str,
        status: &str,
        sort_key: &str,
    ) -> Self {
        Self {
            search_text: search_text.to_string(),
            category: CategoryFilter::parse(category),
            priority: PriorityFilter::parse(priority),
            status: StatusFilter::parse(status),
            sort_key: SortKey::parse(sort_key),
        }
    }
}

/// Returns the filtered, ordered subset of `tasks` to display.
pub fn visible_tasks<'a>(tasks: &'a [Task], query: &TaskQuery) -> Vec<&'a Task> {
    let needle = query.search_text.trim().to_lowercase();

    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|task| needle.is_empty() || task.contains_text(&needle))
        .filter(|task| query.category.matches(task))
        .filter(|task| query.priority.matches(task))
        .filter(|task| query.status.matches(task))
        .collect();

    visible.sort_by(|left, right| {
        left.completed
            .cmp(&right.completed)
            .then_with(|| query.sort_key.compare(left, right))
    });
    visible
}
