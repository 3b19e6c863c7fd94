//! The task store: canonical task list, derived views, and mutations.
//!
//! A [`TaskStore`] owns the ordered task list plus two transient fields:
//! the active filter and a single most-recent-error slot. All changes go
//! through its operations; callers treat returned records as read-only
//! snapshots. Execution is fully synchronous - every operation runs to
//! completion before the next, and each one is atomic against the list.
//!
//! After every mutation the full state (tasks plus filter, not the error
//! slot) is written through the injected [`StateStore`]. A failed save
//! leaves the in-memory change in place, lands in the error slot, and
//! propagates to the caller; the store never retries.

use chrono::{Duration, Utc};

use crate::error::{Error, Result};
use crate::idgen::{IdSource, UuidIdSource};
use crate::schema::{self, CreateTask, TaskDraft, UpdateTask};
use crate::storage::{JsonFileStore, PersistedState, StateStore};
use crate::task::{Task, TaskCounts, TaskFilter, TaskStatus};

/// Message recorded in the error slot when `update`/`delete` miss.
pub const NOT_FOUND_MESSAGE: &str = "Task not found";

/// Single-user task repository with injected id and persistence capabilities.
///
/// There is no implicit global instance; construct one and pass it to
/// consumers. Per-test isolation falls out of constructing a fresh store
/// over a [`crate::storage::MemoryStore`].
#[derive(Debug)]
pub struct TaskStore<I = UuidIdSource, S = JsonFileStore> {
    tasks: Vec<Task>,
    filter: TaskFilter,
    last_error: Option<String>,
    ids: I,
    store: S,
}

impl TaskStore<UuidIdSource, JsonFileStore> {
    /// Open a store over a JSON snapshot file with UUID ids.
    ///
    /// Starts empty with filter `all` when no snapshot exists yet.
    pub fn open_file(path: impl Into<std::path::PathBuf>) -> Result<Self> {
        Self::open(UuidIdSource, JsonFileStore::new(path))
    }
}

impl<I: IdSource, S: StateStore> TaskStore<I, S> {
    /// Open a store, re-hydrating from the slot's snapshot if one exists.
    ///
    /// Every snapshot record is re-validated through the schema; a record
    /// that no longer satisfies it fails the open with
    /// [`Error::CorruptSnapshot`] rather than silently dropping data.
    pub fn open(ids: I, store: S) -> Result<Self> {
        let state = store.load()?.unwrap_or_default();
        for task in &state.tasks {
            if let Err(violations) = schema::validate_task(&TaskDraft::from(task)) {
                let detail = violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(Error::CorruptSnapshot(format!(
                    "task {}: {detail}",
                    task.id
                )));
            }
        }
        Ok(Self {
            tasks: state.tasks,
            filter: state.filter,
            last_error: None,
            ids,
            store,
        })
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a task from validated input and insert it at the front of
    /// the list (most-recent-first). Returns the new record.
    ///
    /// Never fails for schema-valid input; the only failure path is the
    /// persistence write, which is recorded in the error slot and
    /// propagated.
    pub fn create(&mut self, input: CreateTask) -> Result<Task> {
        self.last_error = None;

        let task = Task {
            id: self.ids.next_id(),
            title: input.title,
            description: input.description,
            status: input.status,
            created_at: Utc::now(),
        };
        self.tasks.insert(0, task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Merge the supplied fields of `patch` over the task with `id`.
    ///
    /// Returns `Ok(None)` and records a not-found message when the id is
    /// absent; the list is left unmodified. `id` and `created_at` are not
    /// part of [`UpdateTask`] and can never be overwritten. The record
    /// keeps its position in the list.
    pub fn update(&mut self, id: &str, patch: UpdateTask) -> Result<Option<Task>> {
        self.last_error = None;

        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            self.last_error = Some(NOT_FOUND_MESSAGE.to_string());
            return Ok(None);
        };

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        let updated = task.clone();
        self.persist()?;
        Ok(Some(updated))
    }

    /// Remove the task with `id`. Returns `false` (and records a
    /// not-found message) when the id is absent. Remaining tasks keep
    /// their relative order.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        self.last_error = None;

        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            self.last_error = Some(NOT_FOUND_MESSAGE.to_string());
            return Ok(false);
        };
        self.tasks.remove(index);
        self.persist()?;
        Ok(true)
    }

    /// Remove every `done` task, returning how many were removed.
    pub fn delete_completed_tasks(&mut self) -> Result<usize> {
        self.last_error = None;

        let before = self.tasks.len();
        self.tasks.retain(|task| task.status != TaskStatus::Done);
        let removed = before - self.tasks.len();
        self.persist()?;
        Ok(removed)
    }

    /// Set `status = done` on every task not already done. Idempotent.
    pub fn mark_all_as_completed(&mut self) -> Result<()> {
        self.last_error = None;

        for task in &mut self.tasks {
            if task.status != TaskStatus::Done {
                task.status = TaskStatus::Done;
            }
        }
        self.persist()
    }

    /// Replace the active filter and persist the full state, so the
    /// choice survives a reopen. No effect on the task list.
    pub fn set_filter(&mut self, filter: TaskFilter) -> Result<()> {
        self.filter = filter;
        self.persist()
    }

    /// Reset the error slot; consumers call this after displaying it.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Populate four representative tasks when the list is empty.
    /// No-op on a non-empty list.
    pub fn seed_sample_data(&mut self) -> Result<()> {
        if !self.tasks.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let samples = [
            (
                "Take a walk",
                "We walk the talk not only talk the talk.",
                TaskStatus::Done,
                now - Duration::hours(24),
            ),
            (
                "Buy groceries",
                "Lets buy some groceries in supermarket.",
                TaskStatus::InProgress,
                now - Duration::hours(12),
            ),
            (
                "Play acoustic guitar",
                "Do not forget to train for the upcoming gigs.",
                TaskStatus::Todo,
                now - Duration::hours(6),
            ),
            (
                "Write unit tests",
                "We postpone writing unit tests for now.",
                TaskStatus::Todo,
                now,
            ),
        ];
        self.tasks = samples
            .into_iter()
            .map(|(title, description, status, created_at)| Task {
                id: self.ids.next_id(),
                title: title.to_string(),
                description: Some(description.to_string()),
                status,
                created_at,
            })
            .collect();
        self.persist()
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// The full list in its current order, newest creations first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The subsequence visible under the active filter, in list order.
    /// Under `all` this is the full list.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task.status))
            .collect()
    }

    /// First task with a matching id, if any.
    pub fn task_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Total and per-status counts over the full list.
    pub fn task_counts(&self) -> TaskCounts {
        TaskCounts::tally(&self.tasks)
    }

    /// The active filter.
    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    /// The most recent operation error, if it has not been cleared.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Write the full state through the state store. On failure the
    /// message lands in the error slot and the error propagates.
    fn persist(&mut self) -> Result<()> {
        let state = PersistedState::new(self.tasks.clone(), self.filter);
        match self.store.save(&state) {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(error = %err, "failed to persist task state");
                self.last_error = Some(format!("Failed to save tasks: {err}"));
                Err(err)
            }
        }
    }
}
