//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid requirement change: {0}")]
    InvalidChange(String),

    #[error("Unknown change type: {0}")]
    UnknownChangeType(String),

    #[error("Unknown EDRR phase: {0}")]
    UnknownPhase(String),

    #[error("Unknown agreement rule: {0}")]
    UnknownRule(String),
}

impl DomainError {
    /// Check if this error came from parsing a user-supplied label
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownChangeType(_)
                | DomainError::UnknownPhase(_)
                | DomainError::UnknownRule(_)
        )
    }
}
