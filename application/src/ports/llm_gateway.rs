//! LLM Gateway port
//!
//! Defines the interface for structured generation by an LLM provider.
//! The provider is an opaque capability: given a prompt pair and a target
//! schema it returns a conforming JSON value or a failure.

use async_trait::async_trait;
use mindat_query_domain::OutputSchema;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Stable name of the error kind, fed back into retry prompts
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::ConnectionError(_) => "ConnectionError",
            GatewayError::RequestFailed(_) => "RequestFailed",
            GatewayError::InvalidResponse(_) => "InvalidResponse",
            GatewayError::MissingApiKey(_) => "MissingApiKey",
            GatewayError::Timeout => "Timeout",
            GatewayError::Other(_) => "Other",
        }
    }
}

/// One structured-generation request
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Schema the returned value must conform to
    pub schema: OutputSchema,
}

impl StructuredRequest {
    pub fn new(
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        schema: OutputSchema,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            schema,
        }
    }
}

/// Gateway for structured LLM output
///
/// This port defines how the application layer obtains schema-conforming
/// values. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate a value conforming to `request.schema`
    async fn generate_structured(&self, request: &StructuredRequest)
    -> Result<Value, GatewayError>;
}
