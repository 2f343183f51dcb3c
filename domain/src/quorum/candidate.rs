//! Generation candidates: the outcome of one structured-generation attempt

use crate::query::QueryParameters;
use serde::{Deserialize, Serialize};

/// Failure descriptor of an attempt that exhausted its retries
///
/// Serialized as `{"error message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationFailure {
    #[serde(rename = "error message")]
    pub message: String,
}

impl GenerationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of one generation attempt (including its internal retries)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationCandidate {
    Failed(GenerationFailure),
    Generated(QueryParameters),
}

impl GenerationCandidate {
    pub fn generated(params: QueryParameters) -> Self {
        GenerationCandidate::Generated(params)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        GenerationCandidate::Failed(GenerationFailure::new(message))
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, GenerationCandidate::Generated(_))
    }

    /// The generated parameters, if this attempt succeeded
    pub fn params(&self) -> Option<&QueryParameters> {
        match self {
            GenerationCandidate::Generated(params) => Some(params),
            GenerationCandidate::Failed(_) => None,
        }
    }

    /// The failure message, if this attempt failed
    pub fn error_message(&self) -> Option<&str> {
        match self {
            GenerationCandidate::Failed(failure) => Some(&failure.message),
            GenerationCandidate::Generated(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_serialization() {
        let candidate = GenerationCandidate::failed("Error after 3 attempts: timeout");
        assert_eq!(
            serde_json::to_value(&candidate).unwrap(),
            json!({"error message": "Error after 3 attempts: timeout"})
        );
    }

    #[test]
    fn test_generated_serialization_is_bare_params() {
        let candidate = GenerationCandidate::generated(QueryParameters::new().with_ima(true));
        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["ima"], json!(true));
        assert!(value.get("error message").is_none());
    }

    #[test]
    fn test_deserialize_distinguishes_shapes() {
        let failed: GenerationCandidate =
            serde_json::from_value(json!({"error message": "boom"})).unwrap();
        assert_eq!(failed.error_message(), Some("boom"));

        let generated: GenerationCandidate =
            serde_json::from_value(json!({"el_inc": "Fe"})).unwrap();
        assert_eq!(generated.params().unwrap().el_inc.as_deref(), Some("Fe"));
    }
}
