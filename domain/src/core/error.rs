//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("num_generations must be either 1 or 3, got {0}")]
    InvalidRepeatCount(usize),

    #[error("Unknown crystal system: {0}")]
    UnknownCrystalSystem(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl DomainError {
    /// Check if this error is a configuration problem rather than bad input
    pub fn is_configuration(&self) -> bool {
        matches!(self, DomainError::InvalidRepeatCount(_))
    }
}
