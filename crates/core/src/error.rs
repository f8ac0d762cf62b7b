//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Deterministic business failures only (validation, invariants, conflicts).
/// Storage and data-source failures live in `kitchen-infra`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a stock row without a name, or a
    /// quantity that is not a finite number).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated (e.g. quantity would go negative).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A stock identifier failed to parse (e.g. a row id that is not a UUID).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The stock item has not been recorded (intake never happened).
    #[error("not found")]
    NotFound,

    /// The command clashes with current state (e.g. duplicate intake,
    /// deactivating an item twice).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
