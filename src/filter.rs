// Query filtering for tasks

use crate::task::{Priority, Status, Task};

/// Equality filters for listing tasks
///
/// Each `None` field matches every task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    /// Filter that matches everything
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|s| task.status == s) && self.priority.is_none_or(|p| task.priority == p)
    }
}

impl std::fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.status, self.priority) {
            (None, None) => write!(f, "all"),
            (Some(s), None) => write!(f, "status={}", s),
            (None, Some(p)) => write!(f, "priority={}", p),
            (Some(s), Some(p)) => write!(f, "status={}, priority={}", s, p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_creation() {
        let filter = TaskFilter::all().with_status(Status::Completed);

        assert_eq!(filter.status, Some(Status::Completed));
        assert_eq!(filter.priority, None);
        assert_eq!(TaskFilter::all(), TaskFilter::default());
    }

    #[test]
    fn test_filter_matches() {
        let mut task = Task::new(1, "Buy milk", Some(Priority::High), None);

        assert!(TaskFilter::all().matches(&task));
        assert!(TaskFilter::all().with_priority(Priority::High).matches(&task));
        assert!(!TaskFilter::all().with_priority(Priority::Low).matches(&task));
        assert!(!TaskFilter::all().with_status(Status::Completed).matches(&task));

        task.status = Status::Completed;
        let both = TaskFilter::all()
            .with_status(Status::Completed)
            .with_priority(Priority::High);
        assert!(both.matches(&task));
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(TaskFilter::all().to_string(), "all");
        assert_eq!(
            TaskFilter::all()
                .with_status(Status::Pending)
                .with_priority(Priority::Low)
                .to_string(),
            "status=Pending, priority=Low"
        );
    }
}
