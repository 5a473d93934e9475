//! # HTTP Catalog
//!
//! Catalog source backed by two read-only GET endpoints:
//! `{base}/api/models` and `{base}/api/templates`. Each returns the
//! `{success, data}` envelope described in `types.rs`. Neither endpoint
//! takes parameters; latency is whatever the server imposes.

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;

use super::provider::{CatalogError, CatalogProvider};
use super::types::{Envelope, ModelDescriptor, PromptTemplate};

pub struct HttpCatalogProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching catalog: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        if !envelope.success {
            return Err(CatalogError::Rejected);
        }
        Ok(envelope.data)
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalogProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_models(&self) -> Result<Vec<ModelDescriptor>, CatalogError> {
        self.fetch("/api/models").await
    }

    async fn fetch_templates(&self) -> Result<Vec<PromptTemplate>, CatalogError> {
        self.fetch("/api/templates").await
    }
}
