//! Structured search parameters for the mindat geomaterials endpoint

use super::vocabulary::split_symbols;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Search parameters for querying mineral species (Value Object)
///
/// Every field is optional. Keys outside the declared field set are kept in
/// [`unknown`](Self::unknown) so the schema rule can report them instead of
/// them being silently dropped during deserialization.
///
/// # Example
///
/// ```
/// use mindat_query_domain::QueryParameters;
///
/// let params: QueryParameters = serde_json::from_str(
///     r#"{"ima": true, "hardness_min": 3, "el_inc": "Fe,Cu"}"#,
/// ).unwrap();
/// assert_eq!(params.ima, Some(true));
/// assert_eq!(params.hardness_min, Some(3.0));
/// assert!(params.unknown.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParameters {
    /// Only IMA-approved species
    pub ima: Option<bool>,
    /// Mohs hardness from
    pub hardness_min: Option<f64>,
    /// Mohs hardness to
    pub hardness_max: Option<f64>,
    /// Crystal systems (OR)
    pub crystal_system: Option<Vec<String>>,
    /// Comma-joined symbols that must be included, e.g. "Fe,Cu"
    pub el_inc: Option<String>,
    /// Comma-joined symbols that must be excluded
    pub el_exc: Option<String>,
    /// Keys that are not part of the declared field set
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

impl QueryParameters {
    /// Declared field names, in wire order
    pub const FIELDS: [&'static str; 6] = [
        "ima",
        "hardness_min",
        "hardness_max",
        "crystal_system",
        "el_inc",
        "el_exc",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ima(mut self, ima: bool) -> Self {
        self.ima = Some(ima);
        self
    }

    pub fn with_hardness(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.hardness_min = min;
        self.hardness_max = max;
        self
    }

    pub fn with_crystal_systems<I, S>(mut self, systems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.crystal_system = Some(systems.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_el_inc(mut self, elements: impl Into<String>) -> Self {
        self.el_inc = Some(elements.into());
        self
    }

    pub fn with_el_exc(mut self, elements: impl Into<String>) -> Self {
        self.el_exc = Some(elements.into());
        self
    }

    pub fn with_unknown(mut self, key: impl Into<String>, value: Value) -> Self {
        self.unknown.insert(key.into(), value);
        self
    }

    /// Keys carried by this record: every declared field (set or null)
    /// followed by any unknown keys.
    pub fn keys(&self) -> Vec<String> {
        Self::FIELDS
            .iter()
            .map(|f| f.to_string())
            .chain(self.unknown.keys().cloned())
            .collect()
    }

    /// Whether the declared field `name` holds a value
    pub fn is_set(&self, name: &str) -> bool {
        match name {
            "ima" => self.ima.is_some(),
            "hardness_min" => self.hardness_min.is_some(),
            "hardness_max" => self.hardness_max.is_some(),
            "crystal_system" => self.crystal_system.is_some(),
            "el_inc" => self.el_inc.is_some(),
            "el_exc" => self.el_exc.is_some(),
            _ => false,
        }
    }

    /// JSON value of a field (declared or unknown); `Null` when absent
    pub fn field_value(&self, name: &str) -> Value {
        let value = match name {
            "ima" => serde_json::to_value(self.ima),
            "hardness_min" => serde_json::to_value(self.hardness_min),
            "hardness_max" => serde_json::to_value(self.hardness_max),
            "crystal_system" => serde_json::to_value(&self.crystal_system),
            "el_inc" => serde_json::to_value(&self.el_inc),
            "el_exc" => serde_json::to_value(&self.el_exc),
            other => return self.unknown.get(other).cloned().unwrap_or(Value::Null),
        };
        value.unwrap_or(Value::Null)
    }

    /// Canonical form used for consensus comparison.
    ///
    /// Multi-valued fields are trimmed, sorted and deduplicated so that two
    /// candidates that differ only in ordering compare equal. Symbol case is
    /// left untouched; case folding belongs to the rule corrections.
    pub fn canonicalize(&self) -> Self {
        let mut canonical = self.clone();

        if let Some(systems) = canonical.crystal_system.as_mut() {
            for system in systems.iter_mut() {
                *system = system.trim().to_string();
            }
            systems.sort();
            systems.dedup();
        }

        canonical.el_inc = self.el_inc.as_deref().map(canonical_symbol_list);
        canonical.el_exc = self.el_exc.as_deref().map(canonical_symbol_list);
        canonical
    }
}

fn canonical_symbol_list(list: &str) -> String {
    let mut tokens: Vec<&str> = split_symbols(list).collect();
    tokens.sort_unstable();
    tokens.dedup();
    tokens.join(",")
}
