//! JSON schemas handed to the structured-output capability

use super::vocabulary::CrystalSystem;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A named JSON schema that a structured generation must conform to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSchema {
    /// Schema name (`[a-zA-Z0-9_-]`, as required by most providers)
    pub name: String,
    /// Short description of the expected object
    pub description: String,
    /// JSON Schema document
    pub schema: Value,
}

impl OutputSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
        }
    }

    /// Schema for [`QueryParameters`](super::QueryParameters)
    pub fn query_parameters() -> Self {
        Self::new(
            "MindatQueryDict",
            "Structured search parameters for the mindat geomaterials endpoint",
            json!({
                "type": "object",
                "properties": {
                    "ima": {
                        "type": ["boolean", "null"],
                        "description": "Only IMA-approved names, should be True by default"
                    },
                    "hardness_min": {
                        "type": ["number", "null"],
                        "description": "Mohs hardness from"
                    },
                    "hardness_max": {
                        "type": ["number", "null"],
                        "description": "Mohs hardness to"
                    },
                    "crystal_system": {
                        "type": ["array", "null"],
                        "items": { "type": "string", "enum": CrystalSystem::names() },
                        "description": "Crystal system (csystem): multiple choice (OR)"
                    },
                    "el_inc": {
                        "type": ["string", "null"],
                        "description": "Chemical elements must include, e.g., 'Fe,Cu'"
                    },
                    "el_exc": {
                        "type": ["string", "null"],
                        "description": "Chemical elements must exclude, e.g., 'Fe,Cu'"
                    }
                },
                "required": super::QueryParameters::FIELDS,
                "additionalProperties": false
            }),
        )
    }
}
