//! Store error model.

use thiserror::Error;

/// Result type used across the storage layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-level error.
///
/// Lookups never panic or throw; a missing id is reported as `NotFound` and the
/// boundary layer decides which protocol response it maps to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with the given id exists in the store.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// A query parameter failed validation (e.g. a zero page size).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: impl Into<u64>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
