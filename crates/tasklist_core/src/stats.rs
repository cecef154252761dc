//! Collection progress counters.

use crate::model::task::Task;

/// Totals shown in the progress header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// `completed / total` as a percentage, rounded half up; 0 when empty.
    pub completion_percent: u8,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        let completion_percent = if total == 0 {
            0
        } else {
            ((completed * 200 + total) / (total * 2)) as u8
        };

        Self {
            total,
            completed,
            pending: total - completed,
            completion_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStats;
    use crate::model::task::Task;

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            category: String::new(),
            priority: Default::default(),
            due_date: None,
            completed,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn empty_collection_is_zero_percent() {
        assert_eq!(TaskStats::from_tasks(&[]), TaskStats::default());
    }

    #[test]
    fn percent_rounds_half_up() {
        let tasks = vec![task("a", true), task("b", false), task("c", false)];
        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.completion_percent, 33);

        let half = vec![task("a", true), task("b", true), task("c", false)];
        assert_eq!(TaskStats::from_tasks(&half).completion_percent, 67);

        let eighth = (0..8).map(|i| task(&i.to_string(), i == 0)).collect::<Vec<_>>();
        // 12.5% rounds up to 13.
        assert_eq!(TaskStats::from_tasks(&eighth).completion_percent, 13);
    }
}
