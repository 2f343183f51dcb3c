//! Application layer for mindat-query
//!
//! This crate contains use cases, port definitions, the schema registry and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod schema_registry;
pub mod use_cases;

// Re-export commonly used types
pub use config::GenerationParams;
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway, StructuredRequest},
    progress::{NoProgress, ProgressNotifier},
    schema_source::{SchemaSource, SchemaSourceError},
};
pub use schema_registry::SchemaRegistry;
pub use use_cases::generate_params::{
    GenerateParamsError, GenerateParamsInput, GenerateParamsUseCase, GenerationError,
};
pub use use_cases::validate_params::{SemanticValidator, ValidationPipeline};
