//! Schema registry
//!
//! Process-scoped cache of parameter documentation. The schema document is
//! loaded lazily on first use; each endpoint's table is extracted once and
//! kept until [`SchemaRegistry::invalidate`] or [`SchemaRegistry::reload`].

use crate::ports::schema_source::{SchemaSource, SchemaSourceError};
use mindat_query_domain::{EndpointDocs, ParameterDoc, extract_endpoint_docs};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Lazily populated parameter documentation cache
pub struct SchemaRegistry {
    source: Arc<dyn SchemaSource>,
    document: RwLock<Option<Arc<Value>>>,
    endpoints: RwLock<HashMap<String, Arc<EndpointDocs>>>,
}

impl SchemaRegistry {
    pub fn new(source: Arc<dyn SchemaSource>) -> Self {
        Self {
            source,
            document: RwLock::new(None),
            endpoints: RwLock::new(HashMap::new()),
        }
    }

    /// Documentation table of `endpoint`.
    ///
    /// A failed load yields an empty table and is not cached, so a later
    /// call retries.
    pub async fn endpoint_docs(&self, endpoint: &str) -> Arc<EndpointDocs> {
        if let Some(docs) = self.endpoints.read().await.get(endpoint) {
            return Arc::clone(docs);
        }

        let document = match self.document().await {
            Ok(document) => document,
            Err(e) => {
                warn!("Schema unavailable, no documentation for {}: {}", endpoint, e);
                return Arc::new(EndpointDocs::new());
            }
        };

        let docs = Arc::new(extract_endpoint_docs(&document, endpoint));
        info!("Cached {} parameter docs for {}", docs.len(), endpoint);

        // Concurrent first lookups may both get here; the overwrite is identical.
        self.endpoints
            .write()
            .await
            .insert(endpoint.to_string(), Arc::clone(&docs));
        docs
    }

    /// Documentation for each of `names` that the endpoint documents.
    ///
    /// Undocumented names are omitted.
    pub async fn get_params_info<S: AsRef<str>>(
        &self,
        names: &[S],
        endpoint: &str,
    ) -> EndpointDocs {
        let docs = self.endpoint_docs(endpoint).await;
        names
            .iter()
            .filter_map(|name| docs.get(name.as_ref()))
            .map(|doc| (doc.name.clone(), doc.clone()))
            .collect()
    }

    /// Documentation for a single parameter
    pub async fn get_param_info(&self, name: &str, endpoint: &str) -> Option<ParameterDoc> {
        self.endpoint_docs(endpoint).await.get(name).cloned()
    }

    /// Drop the cached document and every endpoint table
    pub async fn invalidate(&self) {
        *self.document.write().await = None;
        self.endpoints.write().await.clear();
        debug!("Schema cache invalidated");
    }

    /// Fetch the document from its origin and rebuild `endpoint`'s table.
    ///
    /// On failure the previous cache is left untouched.
    pub async fn reload(&self, endpoint: &str) -> Result<Arc<EndpointDocs>, SchemaSourceError> {
        let document = Arc::new(self.source.refresh().await?);
        let docs = Arc::new(extract_endpoint_docs(&document, endpoint));

        *self.document.write().await = Some(document);
        let mut endpoints = self.endpoints.write().await;
        endpoints.clear();
        endpoints.insert(endpoint.to_string(), Arc::clone(&docs));

        info!("Reloaded schema, {} parameter docs for {}", docs.len(), endpoint);
        Ok(docs)
    }

    async fn document(&self) -> Result<Arc<Value>, SchemaSourceError> {
        if let Some(document) = self.document.read().await.as_ref() {
            return Ok(Arc::clone(document));
        }

        let document = Arc::new(self.source.load().await?);
        *self.document.write().await = Some(Arc::clone(&document));
        Ok(document)
    }
}
