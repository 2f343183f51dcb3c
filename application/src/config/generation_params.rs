//! Generation parameters: consensus loop control.
//!
//! [`GenerationParams`] groups the static parameters that control the
//! fan-out and retry loops in
//! [`GenerateParamsUseCase`](crate::use_cases::generate_params::GenerateParamsUseCase).

use serde::{Deserialize, Serialize};

/// Consensus loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Independent generations per round (1 or 3).
    pub repeats: usize,
    /// Attempts per generation before giving up, including the first.
    pub max_attempts: usize,
    /// Fan-out rounds before reporting a consensus failure.
    pub max_rounds: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            repeats: 3,
            max_attempts: 3,
            max_rounds: 3,
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats;
        self
    }

    pub fn with_max_attempts(mut self, max: usize) -> Self {
        self.max_attempts = max;
        self
    }

    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }
}
