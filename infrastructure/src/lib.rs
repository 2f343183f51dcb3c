//! Infrastructure layer for mindat-query
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod providers;
pub mod schema;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileGenerationConfig, FileOutputConfig,
    FileProviderConfig, FileSchemaConfig,
};
pub use providers::OpenAiGateway;
pub use schema::HttpSchemaSource;
