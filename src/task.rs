// Task record and its field types

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};

/// Separator between fields of a persisted record
pub const FIELD_SEPARATOR: &str = " | ";

/// Deadline text used when a task has no date
pub const NO_DEADLINE: &str = "No deadline";

/// Sort stand-in for `NO_DEADLINE`, later than any real date
const FAR_FUTURE: &str = "9999-12-31";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Pending,
    Completed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Pending => write!(f, "Pending"),
            Status::Completed => write!(f, "Completed"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "completed" => Ok(Status::Completed),
            _ => Err(StoreError::Validation(format!(
                "Status must be 'pending' or 'completed', got '{}'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Display rank, lower sorts first
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    /// Lenient parse: anything outside the enumeration becomes Medium
    pub fn normalize(token: &str) -> Self {
        token.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(StoreError::Validation(format!(
                "Priority must be 'high', 'medium', or 'low', got '{}'",
                s
            ))),
        }
    }
}

/// A single tracked task
///
/// Field order matches both the persisted record and the export documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub status: Status,
    pub priority: Priority,
    pub deadline: String,
}

impl Task {
    /// Build a task from a partial field set, applying the field defaults
    pub fn new(id: u64, title: impl Into<String>, priority: Option<Priority>, deadline: Option<&str>) -> Self {
        Self {
            id,
            title: title.into(),
            status: Status::default(),
            priority: priority.unwrap_or_default(),
            deadline: normalize_deadline(deadline),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    pub fn has_deadline(&self) -> bool {
        self.deadline != NO_DEADLINE
    }

    /// Deadline as compared for display ordering; never stored
    pub fn deadline_sort_key(&self) -> &str {
        if self.has_deadline() { &self.deadline } else { FAR_FUTURE }
    }
}

/// Empty or missing deadlines collapse to the sentinel
pub fn normalize_deadline(deadline: Option<&str>) -> String {
    match deadline.map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => NO_DEADLINE.to_string(),
    }
}

/// Reject titles the line-based record format cannot hold
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation("Task title cannot be empty".to_string()));
    }
    check_record_safe("title", title)
}

/// Deadlines are free text, but must still fit on one record line
pub fn validate_deadline(deadline: &str) -> Result<()> {
    check_record_safe("deadline", deadline)
}

fn check_record_safe(field: &str, value: &str) -> Result<()> {
    if value.contains('\n') || value.contains('\r') {
        return Err(StoreError::Validation(format!("Task {} cannot contain a line break", field)));
    }
    // A trailing " |" would merge with the following separator
    if value.contains(FIELD_SEPARATOR) || value.ends_with(" |") {
        return Err(StoreError::Validation(format!(
            "Task {} cannot contain the sequence '{}'",
            field,
            FIELD_SEPARATOR.trim_end()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_defaults() {
        let task = Task::new(1, "Buy milk", None, None);
        assert_eq!(task.status, Status::Pending);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.deadline, NO_DEADLINE);
        assert!(!task.has_deadline());
    }

    #[test]
    fn test_empty_deadline_becomes_sentinel() {
        let task = Task::new(1, "Buy milk", Some(Priority::High), Some("  "));
        assert_eq!(task.deadline, NO_DEADLINE);

        let task = Task::new(2, "Pay rent", None, Some("2024-02-01"));
        assert_eq!(task.deadline, "2024-02-01");
    }

    #[test]
    fn test_priority_parse_and_normalize() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());

        assert_eq!(Priority::normalize("high"), Priority::High);
        assert_eq!(Priority::normalize("urgent"), Priority::Medium);
        assert_eq!(Priority::normalize(""), Priority::Medium);
    }

    #[test]
    fn test_priority_rank() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("completed".parse::<Status>().unwrap(), Status::Completed);
        assert_eq!("Pending".parse::<Status>().unwrap(), Status::Pending);
        assert!(matches!("done".parse::<Status>(), Err(StoreError::Validation(_))));
        assert_eq!(Status::Completed.to_string(), "Completed");
    }

    #[test]
    fn test_deadline_sort_key() {
        let dated = Task::new(1, "a", None, Some("2024-06-01"));
        let undated = Task::new(2, "b", None, None);
        assert_eq!(dated.deadline_sort_key(), "2024-06-01");
        assert_eq!(undated.deadline_sort_key(), "9999-12-31");
        assert_eq!(undated.deadline, NO_DEADLINE);
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Buy milk").is_ok());
        assert!(validate_title("a|b").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title("one | two").is_err());
        assert!(validate_title("line\nbreak").is_err());
        assert!(validate_title("dangling |").is_err());
        assert!(validate_title("| leading").is_ok());
    }

    #[test]
    fn test_validate_deadline() {
        assert!(validate_deadline("2024-01-15").is_ok());
        assert!(validate_deadline("next week").is_ok());
        assert!(validate_deadline("2024 | 01").is_err());
        assert!(validate_deadline("2024-01-15\n").is_err());
    }

    #[test]
    fn test_task_serialization() {
        let task = Task::new(3, "Write report", Some(Priority::Low), Some("2024-03-01"));
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            r#"{"id":3,"title":"Write report","status":"Pending","priority":"Low","deadline":"2024-03-01"}"#
        );
    }
}
