//! Storage layer for taskdeck
//!
//! The store mirrors its full state (task list plus active filter) to a
//! durable slot after every mutation. The slot is modeled by the
//! [`StateStore`] trait so persistence is an injected capability:
//! [`JsonFileStore`] keeps one JSON snapshot file on disk,
//! [`MemoryStore`] keeps the snapshot in memory for tests and embedding.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::task::{Task, TaskFilter};

/// Snapshot schema version; bumped when the layout changes.
pub const STATE_SCHEMA_VERSION: &str = "taskdeck.state.v1";

/// Full durable state of a task store.
///
/// Field names and value literals match the task table: status as one of
/// `todo`/`in_progress`/`done`, timestamps as ISO-8601 text. The transient
/// error slot is deliberately not part of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: String,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub filter: TaskFilter,
}

impl PersistedState {
    /// Snapshot of the given list and filter under the current schema version.
    pub fn new(tasks: Vec<Task>, filter: TaskFilter) -> Self {
        Self {
            version: STATE_SCHEMA_VERSION.to_string(),
            tasks,
            filter,
        }
    }
}

impl Default for PersistedState {
    fn default() -> Self {
        Self::new(Vec::new(), TaskFilter::All)
    }
}

/// Durable slot holding a single [`PersistedState`] snapshot.
pub trait StateStore {
    /// Replace the stored snapshot. Best-effort; a failure leaves the
    /// previous snapshot (if any) intact.
    fn save(&mut self, state: &PersistedState) -> Result<()>;

    /// Read the stored snapshot, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<PersistedState>>;
}

/// File-backed store: one JSON snapshot at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store snapshots at `path`. Parent directories are created on save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write data atomically using temp file + rename, so readers never
    /// see a partial snapshot.
    fn write_atomic(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl StateStore for JsonFileStore {
    fn save(&mut self, state: &PersistedState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        self.write_atomic(json.as_bytes())?;
        tracing::debug!(path = %self.path.display(), tasks = state.tasks.len(), "state saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let state: PersistedState = serde_json::from_str(&content)?;
        tracing::debug!(path = %self.path.display(), tasks = state.tasks.len(), "state loaded");
        Ok(Some(state))
    }
}

/// In-memory store for tests and embedding.
///
/// `fail_saves` flips every subsequent [`StateStore::save`] into an error,
/// to exercise the persistence-failure path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Option<PersistedState>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot.
    pub fn with_state(state: PersistedState) -> Self {
        Self {
            state: Some(state),
            fail_saves: false,
        }
    }

    /// Make every subsequent save fail with an IO error.
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// The last snapshot saved, if any.
    pub fn snapshot(&self) -> Option<PersistedState> {
        self.state.clone()
    }
}

impl StateStore for MemoryStore {
    fn save(&mut self, state: &PersistedState) -> Result<()> {
        if self.fail_saves {
            return Err(std::io::Error::other("simulated save failure").into());
        }
        self.state = Some(state.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedState>> {
        Ok(self.state.clone())
    }
}
