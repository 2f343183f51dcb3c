//! Remote schema document source
//!
//! Downloads the API schema over HTTP and keeps an optional copy on disk.
//! The document is YAML; JSON documents parse as well.

use crate::config::FileSchemaConfig;
use async_trait::async_trait;
use mindat_query_application::ports::schema_source::{SchemaSource, SchemaSourceError};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Schema source backed by an HTTP endpoint and an optional disk copy
pub struct HttpSchemaSource {
    client: reqwest::Client,
    url: String,
    cache_path: Option<PathBuf>,
}

impl HttpSchemaSource {
    pub fn new(
        url: impl Into<String>,
        cache_path: Option<PathBuf>,
        timeout: Duration,
    ) -> Result<Self, SchemaSourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SchemaSourceError::Fetch(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            cache_path: cache_path.filter(|path| !path.as_os_str().is_empty()),
        })
    }

    /// Create from the `[schema]` configuration section
    pub fn from_config(config: &FileSchemaConfig) -> Result<Self, SchemaSourceError> {
        Self::new(&config.url, config.cache_path.clone(), config.timeout())
    }

    pub fn cache_path(&self) -> Option<&Path> {
        self.cache_path.as_deref()
    }

    async fn download(&self) -> Result<String, SchemaSourceError> {
        info!("Downloading API schema from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SchemaSourceError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SchemaSourceError::Fetch(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SchemaSourceError::Fetch(e.to_string()))
    }

    /// Read the disk copy; a missing file is not an error
    async fn read_cached(&self) -> Result<Option<String>, SchemaSourceError> {
        let Some(path) = self.cache_path.as_ref() else {
            return Ok(None);
        };
        match tokio::fs::read_to_string(path).await {
            Ok(text) => {
                debug!("Using cached schema at {}", path.display());
                Ok(Some(text))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SchemaSourceError::Io(format!(
                "cannot read cached schema {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Write the disk copy, logging failures
    async fn store(&self, text: &str) {
        let Some(path) = &self.cache_path else {
            return;
        };
        if let Err(e) = write_file(path, text).await {
            warn!("Cannot write schema cache {}: {}", path.display(), e);
        } else {
            debug!("Saved schema to {}", path.display());
        }
    }

    async fn download_and_store(&self) -> Result<Value, SchemaSourceError> {
        let text = self.download().await?;
        let document = parse_document(&text)?;
        self.store(&text).await;
        Ok(document)
    }
}

#[async_trait]
impl SchemaSource for HttpSchemaSource {
    async fn load(&self) -> Result<Value, SchemaSourceError> {
        if let Some(text) = self.read_cached().await? {
            match parse_document(&text) {
                Ok(document) => return Ok(document),
                Err(e) => warn!("Cached schema is unreadable, downloading again: {}", e),
            }
        }
        self.download_and_store().await
    }

    async fn refresh(&self) -> Result<Value, SchemaSourceError> {
        self.download_and_store().await
    }
}

async fn write_file(path: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, text).await
}

/// Parse a YAML (or JSON) schema document into a JSON tree.
///
/// The document must be a mapping.
pub fn parse_document(text: &str) -> Result<Value, SchemaSourceError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| SchemaSourceError::Parse(e.to_string()))?;
    let document =
        serde_json::to_value(yaml).map_err(|e| SchemaSourceError::Parse(e.to_string()))?;

    if document.is_object() {
        Ok(document)
    } else {
        Err(SchemaSourceError::Parse(
            "schema document is not a mapping".to_string(),
        ))
    }
}
