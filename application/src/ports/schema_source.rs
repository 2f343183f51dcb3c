//! Schema source port
//!
//! Defines where the remote API schema document comes from.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while loading the schema document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaSourceError {
    #[error("Failed to fetch schema: {0}")]
    Fetch(String),

    #[error("Failed to parse schema: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Source of the API schema document
///
/// The document is an OpenAPI-style tree with a `paths` map keyed by
/// endpoint path.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Load the document, using any local copy the source keeps
    async fn load(&self) -> Result<Value, SchemaSourceError>;

    /// Load the document from its origin, replacing any local copy
    async fn refresh(&self) -> Result<Value, SchemaSourceError> {
        self.load().await
    }
}
