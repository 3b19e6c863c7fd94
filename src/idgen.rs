//! Id generation for tasks.
//!
//! The store takes its id source as an injected capability so tests can
//! substitute a deterministic generator. Uniqueness is the only contract;
//! the ids are opaque and carry no ordering.

use uuid::Uuid;

/// Source of fresh opaque task ids.
pub trait IdSource {
    /// Produce a new id. Two consecutive calls never return equal values.
    fn next_id(&mut self) -> String;
}

/// Default id source backed by random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic counter-based source for tests (`task-1`, `task-2`, ...).
#[derive(Debug, Clone, Default)]
pub struct SequenceIdSource {
    next: u64,
}

impl IdSource for SequenceIdSource {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("task-{}", self.next)
    }
}
