//! Generation configuration from TOML (`[generation]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [generation]
//! repeats = 3        # 1 = single generation, 3 = majority vote
//! max_attempts = 3   # tries per generation, each retry sees the previous error
//! max_rounds = 3     # fan-out rounds before giving up on consensus
//! ```

use mindat_query_application::GenerationParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub repeats: usize,
    pub max_attempts: usize,
    pub max_rounds: usize,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            repeats: params.repeats,
            max_attempts: params.max_attempts,
            max_rounds: params.max_rounds,
        }
    }
}

impl FileGenerationConfig {
    pub fn to_generation_params(&self) -> GenerationParams {
        GenerationParams::default()
            .with_repeats(self.repeats)
            .with_max_attempts(self.max_attempts)
            .with_max_rounds(self.max_rounds)
    }
}
