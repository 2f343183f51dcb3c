//! Provider configuration from TOML (`[provider]` section)
//!
//! The provider is any OpenAI-compatible chat-completions API that supports
//! `response_format = json_schema`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the API (default: "https://api.openai.com").
    pub base_url: String,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Model name sent with every request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            model: "gpt-4o".to_string(),
            temperature: 0.3,
            timeout_seconds: None,
        }
    }
}

impl FileProviderConfig {
    /// Resolve the API key: the direct value wins over the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_default() {
        let config = FileProviderConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
        assert!((config.temperature - 0.3).abs() < f32::EPSILON);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_direct_api_key_wins() {
        let config = FileProviderConfig {
            api_key: Some("sk-direct".to_string()),
            api_key_env: "MINDAT_QUERY_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), Some("sk-direct".to_string()));
    }

    #[test]
    fn test_missing_api_key() {
        let config = FileProviderConfig {
            api_key_env: "MINDAT_QUERY_TEST_SURELY_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_none());
    }

    #[test]
    fn test_provider_section() {
        let toml_str = r#"
[provider]
base_url = "http://localhost:11434"
model = "llama3.1"
temperature = 0.0
timeout_seconds = 60
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.base_url, "http://localhost:11434");
        assert_eq!(config.provider.model, "llama3.1");
        assert_eq!(config.provider.timeout(), Some(Duration::from_secs(60)));
    }
}
