//! Due-date alert evaluation.
//!
//! # Responsibility
//! - Classify incomplete tasks into overdue and due-soon buckets.
//! - Classify a single task's due date for per-item badges.
//!
//! # Invariants
//! - Disabled alerts never report, whatever the task state.
//! - A task is selected when `days_until(due) <= alert_days`; negative
//!   values are overdue, the rest are due soon.

use crate::date_math::{days_until, format_month_day};
use crate::model::settings::Settings;
use crate::model::task::{Task, TaskId};
use chrono::NaiveDate;

/// Overdue / due-soon partition of alerting tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertSummary {
    /// Ids of incomplete tasks whose due date is before today.
    pub overdue: Vec<TaskId>,
    /// Ids of incomplete tasks due today or within the threshold.
    pub due_soon: Vec<TaskId>,
}

impl AlertSummary {
    pub fn overdue_count(&self) -> usize {
        self.overdue.len()
    }

    pub fn due_soon_count(&self) -> usize {
        self.due_soon.len()
    }

    /// No task is alerting; callers render "no alert".
    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty() && self.due_soon.is_empty()
    }

    /// Banner text such as `2件が期日超過、1件が期日間近`.
    ///
    /// Zero-count parts are omitted; empty summaries give an empty string.
    pub fn message(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if !self.overdue.is_empty() {
            parts.push(format!("{}件が期日超過", self.overdue.len()));
        }
        if !self.due_soon.is_empty() {
            parts.push(format!("{}件が期日間近", self.due_soon.len()));
        }
        parts.join("、")
    }
}

/// Evaluates alerts over a task snapshot.
///
/// Returns `None` when alerts are disabled. Otherwise returns the summary,
/// which may be empty.
pub fn evaluate(tasks: &[Task], settings: &Settings, now_ms: i64) -> Option<AlertSummary> {
    if !settings.alert_enabled {
        return None;
    }

    let threshold = i64::from(settings.alert_days);
    let mut summary = AlertSummary::default();
    for task in tasks.iter().filter(|task| !task.completed) {
        let Some(days) = days_until(task.due_date, now_ms) else {
            continue;
        };
        if days > threshold {
            continue;
        }
        if days < 0 {
            summary.overdue.push(task.id.clone());
        } else {
            summary.due_soon.push(task.id.clone());
        }
    }
    Some(summary)
}

/// Per-task due-date classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBadge {
    /// Due date passed `days` days ago.
    Overdue { days: i64 },
    /// Due today.
    Today,
    /// Due in `days` days, within the alert threshold.
    DueSoon { days: i64 },
    /// Due later than the threshold.
    Scheduled { date: NaiveDate },
}

impl DueBadge {
    /// Short badge text.
    pub fn label(&self) -> String {
        match self {
            Self::Overdue { days } => format!("{days}日超過"),
            Self::Today => "今日".to_string(),
            Self::DueSoon { days } => format!("あと{days}日"),
            Self::Scheduled { date } => format_month_day(*date),
        }
    }

    /// Whether a task with this badge should be highlighted.
    ///
    /// Completed tasks are never highlighted.
    pub fn needs_attention(&self, completed: bool) -> bool {
        !completed && !matches!(self, Self::Scheduled { .. })
    }
}

/// Classifies one task's due date; `None` when it has none.
///
/// Completion does not change the badge, only [`DueBadge::needs_attention`].
pub fn due_badge(task: &Task, settings: &Settings, now_ms: i64) -> Option<DueBadge> {
    let date = task.due_date?;
    let days = days_until(Some(date), now_ms)?;
    Some(match days {
        d if d < 0 => DueBadge::Overdue { days: -d },
        0 => DueBadge::Today,
        d if d <= i64::from(settings.alert_days) => DueBadge::DueSoon { days: d },
        _ => DueBadge::Scheduled { date },
    })
}
