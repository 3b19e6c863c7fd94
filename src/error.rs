//! Error types for taskdeck
//!
//! Hard failures only: validation rejections surfaced before a mutation,
//! and persistence faults surfaced after one. A missing task id is a soft
//! condition signaled through return values and the store's error slot,
//! not through this enum.

use thiserror::Error;

use crate::schema::Violation;

/// Main error type for taskdeck operations
#[derive(Error, Debug)]
pub enum Error {
    /// A candidate task or input failed the validation schema.
    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<Violation>),

    /// A persisted snapshot did not survive schema re-validation on load.
    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<Vec<Violation>> for Error {
    fn from(violations: Vec<Violation>) -> Self {
        Error::Validation(violations)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for taskdeck operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ViolationField, ViolationKind};

    #[test]
    fn validation_error_lists_every_violation() {
        let err = Error::Validation(vec![
            Violation::new(ViolationField::Title, ViolationKind::Required),
            Violation::new(ViolationField::Description, ViolationKind::MaxLength(200)),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("title"));
        assert!(msg.contains("description"));
        assert!(msg.contains("; "));
    }
}
