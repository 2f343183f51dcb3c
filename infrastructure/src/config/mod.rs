//! Configuration file loading for mindat-query
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MINDAT_QUERY_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./mindat-query.toml` or `./.mindat-query.toml`
//! 4. Global config: `$XDG_CONFIG_HOME/mindat-query/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_SCHEMA_URL, FileConfig, FileGenerationConfig,
    FileOutputConfig, FileProviderConfig, FileSchemaConfig,
};
pub use loader::ConfigLoader;
