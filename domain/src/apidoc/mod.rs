//! Parameter documentation extracted from the remote API schema
//!
//! The schema document is an OpenAPI-style tree with a `paths` map keyed by
//! endpoint path. Each path's `get.parameters` list documents one query
//! parameter per entry (`name`, `description`, `schema`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Default endpoint for mineral species search
pub const GEOMATERIALS_ENDPOINT: &str = "/v1/geomaterials/";

/// Parameter documentation table of one endpoint, keyed by parameter name
pub type EndpointDocs = BTreeMap<String, ParameterDoc>;

/// Documentation of a single query parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDoc {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Constraint schema (enum, items, ...) with `type` keys removed
    #[serde(default)]
    pub schema: Value,
}

impl ParameterDoc {
    /// Build from one `parameters[]` entry; `None` when it has no name
    pub fn from_parameter(parameter: &Value) -> Option<Self> {
        let name = parameter.get("name")?.as_str()?;
        if name.is_empty() {
            return None;
        }
        let description = parameter
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let schema = parameter
            .get("schema")
            .and_then(Value::as_object)
            .map(constraint_schema)
            .unwrap_or_else(|| Value::Object(Map::new()));

        Some(Self {
            name: name.to_string(),
            description: description.to_string(),
            schema,
        })
    }
}

/// Drop `type` from a parameter schema and from its `items`.
///
/// Type correctness is enforced elsewhere; leaving types in the documentation
/// invites the semantic layer to judge them.
fn constraint_schema(schema: &Map<String, Value>) -> Value {
    let mut filtered: Map<String, Value> = schema
        .iter()
        .filter(|(key, _)| key.as_str() != "type")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    if let Some(Value::Object(items)) = filtered.get_mut("items") {
        items.remove("type");
    }
    Value::Object(filtered)
}

/// Extract the parameter documentation of `endpoint` from a schema document.
///
/// Missing paths, methods or parameter lists yield an empty table.
pub fn extract_endpoint_docs(document: &Value, endpoint: &str) -> EndpointDocs {
    document
        .get("paths")
        .and_then(|paths| paths.get(endpoint))
        .and_then(|path| path.get("get"))
        .and_then(|get| get.get("parameters"))
        .and_then(Value::as_array)
        .map(|parameters| {
            parameters
                .iter()
                .filter_map(ParameterDoc::from_parameter)
                .map(|doc| (doc.name.clone(), doc))
                .collect()
        })
        .unwrap_or_default()
}
