// Data models for the task list

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task, assigned at creation and never reused.
pub type TaskId = Uuid;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub created_at: i64,
    pub done: bool,
}

impl Task {
    /// Create a task with a fresh id and the current timestamp.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
            created_at: now_ms(),
            done: false,
        }
    }
}

/// Helper function to get current timestamp in milliseconds
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time before Unix epoch")
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms() {
        let ts = now_ms();
        assert!(ts > 0);
        // Should be reasonable timestamp (after year 2020)
        assert!(ts > 1_600_000_000_000);
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("Water the plants");
        assert_eq!(task.title, "Water the plants");
        assert!(!task.done);
        assert!(task.created_at > 1_600_000_000_000);
    }

    #[test]
    fn test_new_task_ids_are_unique() {
        let a = Task::new("one");
        let b = Task::new("two");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_task_serialization() {
        let task = Task::new("Round trip");
        let json = serde_json::to_string(&task).unwrap();
        let deserialized: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, task);
    }
}
