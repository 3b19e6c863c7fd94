//! Validation schema for tasks.
//!
//! Single source of truth for what a structurally valid task looks like,
//! and for the two input shapes derived from it: [`CreateTask`] (task minus
//! the store-assigned `id` and `created_at`) and [`UpdateTask`] (every
//! create field optional).
//!
//! Each shape has one entry point that takes an untyped draft and returns
//! either the normalized (trimmed) value or the full list of field-level
//! violations. Trimming happens here, not as a separate step, and the
//! schema performs no side effects.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::task::{Task, TaskStatus};

/// Maximum title length in characters, counted after trimming.
pub const TITLE_MAX_LEN: usize = 100;

/// Maximum description length in characters, counted after trimming.
pub const DESCRIPTION_MAX_LEN: usize = 200;

/// Field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationField {
    Id,
    Title,
    Description,
    Status,
    CreatedAt,
}

impl ViolationField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationField::Id => "id",
            ViolationField::Title => "title",
            ViolationField::Description => "description",
            ViolationField::Status => "status",
            ViolationField::CreatedAt => "createdAt",
        }
    }
}

/// Constraint a field failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Field is required and was missing or empty after trimming.
    Required,
    /// Field exceeded its maximum length (in characters, after trimming).
    MaxLength(usize),
    /// Value is not one of the accepted status literals.
    InvalidStatus(String),
}

/// One field-level constraint failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: ViolationField,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: ViolationField, kind: ViolationKind) -> Self {
        Self { field, kind }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Required => write!(f, "{} is required", self.field.as_str()),
            ViolationKind::MaxLength(max) => write!(
                f,
                "{} must be at most {} characters",
                self.field.as_str(),
                max
            ),
            ViolationKind::InvalidStatus(raw) => {
                write!(f, "{} has invalid value {:?}", self.field.as_str(), raw)
            }
        }
    }
}

/// Untyped candidate for the full task shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            id: Some(task.id.clone()),
            title: Some(task.title.clone()),
            description: task.description.clone(),
            status: Some(task.status.as_str().to_string()),
            created_at: Some(task.created_at),
        }
    }
}

/// Untyped candidate for the create input shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Untyped candidate for the partial update shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Normalized create input: a task minus `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

impl CreateTask {
    /// Convenience constructor that validates through the schema.
    pub fn new(
        title: &str,
        description: Option<&str>,
        status: TaskStatus,
    ) -> Result<Self, Vec<Violation>> {
        validate_create(&CreateTaskDraft {
            title: Some(title.to_string()),
            description: description.map(str::to_string),
            status: Some(status.as_str().to_string()),
        })
    }
}

/// Normalized partial update: only supplied fields change.
///
/// `description` is doubly optional: the outer `Option` records whether the
/// field was supplied at all, the inner one carries the normalized value
/// (an empty string normalizes to `None`, clearing the description).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
}

impl UpdateTask {
    /// An update that changes only the status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Validate the full task shape, returning the normalized task.
///
/// Used when re-hydrating untrusted snapshots; the store itself assigns
/// `id` and `created_at` on create and never accepts them from input.
pub fn validate_task(draft: &TaskDraft) -> Result<Task, Vec<Violation>> {
    let mut violations = Vec::new();

    let id = match draft.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Some(id.to_string()),
        _ => {
            violations.push(Violation::new(ViolationField::Id, ViolationKind::Required));
            None
        }
    };

    let title = check_title(draft.title.as_deref(), &mut violations);
    let description = check_description(draft.description.as_deref(), &mut violations);
    let status = check_status(draft.status.as_deref(), true, &mut violations);

    let created_at = draft.created_at;
    if created_at.is_none() {
        violations.push(Violation::new(
            ViolationField::CreatedAt,
            ViolationKind::Required,
        ));
    }

    if violations.is_empty() {
        // No violations means every component produced a value; the
        // fallbacks are unreachable.
        Ok(Task {
            id: id.unwrap_or_default(),
            title: title.unwrap_or_default(),
            description: description.flatten(),
            status: status.unwrap_or(TaskStatus::Todo),
            created_at: created_at.unwrap_or_else(Utc::now),
        })
    } else {
        Err(violations)
    }
}

/// Validate the create input shape, returning the normalized input.
pub fn validate_create(draft: &CreateTaskDraft) -> Result<CreateTask, Vec<Violation>> {
    let mut violations = Vec::new();

    let title = check_title(draft.title.as_deref(), &mut violations);
    let description = check_description(draft.description.as_deref(), &mut violations);
    let status = check_status(draft.status.as_deref(), true, &mut violations);

    if violations.is_empty() {
        Ok(CreateTask {
            title: title.unwrap_or_default(),
            description: description.flatten(),
            status: status.unwrap_or(TaskStatus::Todo),
        })
    } else {
        Err(violations)
    }
}

/// Validate the partial update shape; absent fields stay absent.
pub fn validate_update(draft: &UpdateTaskDraft) -> Result<UpdateTask, Vec<Violation>> {
    let mut violations = Vec::new();

    let title = if draft.title.is_some() {
        check_title(draft.title.as_deref(), &mut violations)
    } else {
        None
    };
    let description = if draft.description.is_some() {
        check_description(draft.description.as_deref(), &mut violations)
    } else {
        None
    };
    let status = check_status(draft.status.as_deref(), false, &mut violations);

    if violations.is_empty() {
        Ok(UpdateTask {
            title,
            description,
            status,
        })
    } else {
        Err(violations)
    }
}

fn check_title(raw: Option<&str>, violations: &mut Vec<Violation>) -> Option<String> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        violations.push(Violation::new(
            ViolationField::Title,
            ViolationKind::Required,
        ));
        return None;
    }
    if trimmed.chars().count() > TITLE_MAX_LEN {
        violations.push(Violation::new(
            ViolationField::Title,
            ViolationKind::MaxLength(TITLE_MAX_LEN),
        ));
        return None;
    }
    Some(trimmed.to_string())
}

/// Outer `Option` = field produced a value, inner = normalized description.
/// An empty or whitespace-only description normalizes to absent.
fn check_description(
    raw: Option<&str>,
    violations: &mut Vec<Violation>,
) -> Option<Option<String>> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    if trimmed.chars().count() > DESCRIPTION_MAX_LEN {
        violations.push(Violation::new(
            ViolationField::Description,
            ViolationKind::MaxLength(DESCRIPTION_MAX_LEN),
        ));
        return None;
    }
    Some(Some(trimmed.to_string()))
}

fn check_status(
    raw: Option<&str>,
    required: bool,
    violations: &mut Vec<Violation>,
) -> Option<TaskStatus> {
    match raw {
        Some(raw) => match raw.trim() {
            "todo" => Some(TaskStatus::Todo),
            "in_progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            other => {
                violations.push(Violation::new(
                    ViolationField::Status,
                    ViolationKind::InvalidStatus(other.to_string()),
                ));
                None
            }
        },
        None => {
            if required {
                violations.push(Violation::new(
                    ViolationField::Status,
                    ViolationKind::Required,
                ));
            }
            None
        }
    }
}
