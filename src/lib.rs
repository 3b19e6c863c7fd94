//! taskdeck - Single-User Task List Core
//!
//! This library provides the core of a task list manager: short text
//! records ("tasks") held in process memory, validated against a schema,
//! and mirrored to durable storage after every mutation. Consumers (forms,
//! lists, tests) call the store's operations and read its derived views;
//! they never mutate task records directly.
//!
//! # Core Concepts
//!
//! - **Tasks**: title, optional description, status, creation time, unique id
//! - **Schema**: single source of truth for valid task shapes and their
//!   derived create/update input shapes
//! - **Store**: canonical ordered task list with atomic mutations, filter
//!   and error slot, persisted through an injected state store
//! - **Capabilities**: id generation and persistence are injected traits,
//!   so tests can substitute deterministic implementations
//!
//! # Module Organization
//!
//! - `task`: task record, status, filter, and count types
//! - `schema`: validation of task/create/update shapes
//! - `store`: the task store and its operations
//! - `storage`: durable state snapshots and state-store implementations
//! - `idgen`: id-generation capability
//! - `error`: error types and result alias

pub mod error;
pub mod idgen;
pub mod schema;
pub mod storage;
pub mod store;
pub mod task;

pub use error::{Error, Result};
pub use store::TaskStore;
pub use task::{Task, TaskCounts, TaskFilter, TaskStatus};
