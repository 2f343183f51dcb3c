//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod generation;
mod output;
mod providers;
mod schema;

pub use generation::FileGenerationConfig;
pub use output::FileOutputConfig;
pub use providers::FileProviderConfig;
pub use schema::{DEFAULT_SCHEMA_URL, FileSchemaConfig};

use mindat_query_domain::RepeatCount;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid configuration value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("generation.repeats must be 1 or 3, got {0}")]
    InvalidRepeats(usize),

    #[error("{0} cannot be 0")]
    ZeroLimit(&'static str),

    #[error("{0} timeout_seconds cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("provider.temperature must be between 0 and 2, got {0}")]
    InvalidTemperature(f32),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Consensus generation settings
    pub generation: FileGenerationConfig,
    /// Remote schema document settings
    pub schema: FileSchemaConfig,
    /// Structured-output provider settings
    pub provider: FileProviderConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected errors.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if RepeatCount::try_from(self.generation.repeats).is_err() {
            errors.push(ConfigValidationError::InvalidRepeats(self.generation.repeats));
        }
        if self.generation.max_attempts == 0 {
            errors.push(ConfigValidationError::ZeroLimit("generation.max_attempts"));
        }
        if self.generation.max_rounds == 0 {
            errors.push(ConfigValidationError::ZeroLimit("generation.max_rounds"));
        }

        if self.schema.timeout_seconds == 0 {
            errors.push(ConfigValidationError::InvalidTimeout("schema"));
        }
        if let Some(0) = self.provider.timeout_seconds {
            errors.push(ConfigValidationError::InvalidTimeout("provider"));
        }

        if self.provider.model.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyModelName);
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            errors.push(ConfigValidationError::InvalidTemperature(
                self.provider.temperature,
            ));
        }

        errors
    }
}
