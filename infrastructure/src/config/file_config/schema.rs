//! Schema document configuration from TOML (`[schema]` section)

use mindat_query_domain::GEOMATERIALS_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SCHEMA_URL: &str = "https://api.mindat.org/v1/schema/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSchemaConfig {
    /// Where the schema document is downloaded from
    pub url: String,
    /// On-disk copy of the document; `None` keeps it in memory only
    pub cache_path: Option<PathBuf>,
    /// Endpoint whose parameters are documented to the semantic validator
    pub endpoint: String,
    /// Download timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileSchemaConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SCHEMA_URL.to_string(),
            cache_path: Some(PathBuf::from("./data/Mindat_API.yaml")),
            endpoint: GEOMATERIALS_ENDPOINT.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl FileSchemaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_config_default() {
        let config = FileSchemaConfig::default();
        assert_eq!(config.url, DEFAULT_SCHEMA_URL);
        assert_eq!(config.endpoint, "/v1/geomaterials/");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_schema_config_override() {
        let toml_str = r#"
[schema]
url = "http://localhost:8080/schema.yaml"
cache_path = "/tmp/schema.yaml"
timeout_seconds = 5
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.schema.url, "http://localhost:8080/schema.yaml");
        assert_eq!(config.schema.cache_path, Some(PathBuf::from("/tmp/schema.yaml")));
        assert_eq!(config.schema.endpoint, GEOMATERIALS_ENDPOINT);
    }
}
