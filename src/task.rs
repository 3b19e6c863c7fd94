//! Core task types.
//!
//! A [`Task`] is a single to-do record. Its lifecycle stage is a
//! [`TaskStatus`]; no transition order is enforced - any status may follow
//! any other. [`TaskFilter`] selects a view over the list and never alters
//! stored data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// The serialized literal for this status (`todo`, `in_progress`, `done`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

/// View selector over the task list: everything, or one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    #[default]
    All,
    Todo,
    InProgress,
    Done,
}

impl TaskFilter {
    /// Whether a task with the given status is visible under this filter.
    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Todo => status == TaskStatus::Todo,
            TaskFilter::InProgress => status == TaskStatus::InProgress,
            TaskFilter::Done => status == TaskStatus::Done,
        }
    }
}

/// A single to-do record.
///
/// `id` and `created_at` are assigned at creation and never change.
/// `title` and `description` satisfy the schema constraints in
/// [`crate::schema`] at the moment any mutation commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Per-status totals over the full task list.
///
/// `todo + in_progress + done == all` holds for every list state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub all: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl TaskCounts {
    /// Tally the statuses of `tasks`.
    pub fn tally(tasks: &[Task]) -> Self {
        let mut counts = TaskCounts {
            all: tasks.len(),
            ..TaskCounts::default()
        };
        for task in tasks {
            match task.status {
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Done => counts.done += 1,
            }
        }
        counts
    }
}
