// Console rendering of tasks

use crate::task::{Priority, Task};
use colored::Colorize;

const RULE_WIDTH: usize = 80;
const TITLE_WIDTH: usize = 25;

/// Fixed-width table of tasks, in the order given
///
/// Callers print their own message for an empty list. With `color` set,
/// completed rows are green and High priorities red.
pub fn task_table(tasks: &[Task], color: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "{:<4} {:<25} {:<12} {:<10} {:<15}",
        "ID", "Title", "Status", "Priority", "Deadline"
    ));
    out.truncate(out.trim_end().len());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for task in tasks {
        out.push_str(&task_row(task, color));
        out.push('\n');
    }

    out.push_str(&rule);
    out.push('\n');
    out
}

fn task_row(task: &Task, color: bool) -> String {
    let marker = if task.is_completed() { "✓" } else { "○" };
    let status = format!("{} {:<10}", marker, task.status.to_string());
    let priority = format!("{:<10}", task.priority.to_string());

    let (status, priority) = if color {
        let status = if task.is_completed() {
            status.green().to_string()
        } else {
            status
        };
        let priority = if task.priority == Priority::High {
            priority.red().bold().to_string()
        } else {
            priority
        };
        (status, priority)
    } else {
        (status, priority)
    };

    let row = format!(
        "{:<4} {:<25} {} {} {}",
        task.id,
        truncate_title(&task.title),
        status,
        priority,
        task.deadline
    );
    row.trim_end().to_string()
}

/// Titles wider than the column keep 23 characters and end in "..."
///
/// The result is one character wider than the column, so long titles
/// push the rest of their row right by one.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_WIDTH {
        return title.to_string();
    }
    let kept: String = title.chars().take(TITLE_WIDTH - 2).collect();
    format!("{}...", kept)
}

/// Multi-line description of one task
pub fn task_summary(task: &Task) -> String {
    format!(
        "  ID: {}\n  Title: {}\n  Priority: {}\n  Deadline: {}\n",
        task.id, task.title, task.priority, task.deadline
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Status;

    #[test]
    fn test_table_rows() {
        let mut done = Task::new(2, "Pay rent", Some(Priority::High), Some("2024-02-01"));
        done.status = Status::Completed;
        let tasks = vec![done, Task::new(10, "Buy milk", None, None)];

        let table = task_table(&tasks, false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "=".repeat(80));
        assert!(lines[1].starts_with("ID   Title"));
        assert_eq!(
            lines[3],
            "2    Pay rent                  ✓ Completed  High       2024-02-01"
        );
        assert_eq!(
            lines[4],
            "10   Buy milk                  ○ Pending    Medium     No deadline"
        );
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("short"), "short");
        assert_eq!(truncate_title(&"x".repeat(25)), "x".repeat(25));

        let long = "Prepare the quarterly budget review slides";
        let truncated = truncate_title(long);
        assert_eq!(truncated, "Prepare the quarterly b...");
        assert_eq!(truncated.chars().count(), 26);

        // One past the column width is the first length that gets cut
        assert_eq!(truncate_title(&"y".repeat(26)), format!("{}...", "y".repeat(23)));
    }

    #[test]
    fn test_table_row_with_long_title() {
        let tasks = vec![Task::new(1, "Prepare the quarterly budget review slides", None, None)];
        let table = task_table(&tasks, false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(
            lines[3],
            "1    Prepare the quarterly b... ○ Pending    Medium     No deadline"
        );
    }

    #[test]
    fn test_task_summary() {
        let task = Task::new(4, "Call mom", Some(Priority::Low), None);
        let summary = task_summary(&task);
        assert!(summary.contains("ID: 4"));
        assert!(summary.contains("Priority: Low"));
        assert!(summary.contains("Deadline: No deadline"));
    }
}
