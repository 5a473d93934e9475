use std::fmt;

use async_trait::async_trait;

use super::types::{ModelDescriptor, PromptTemplate};

/// Errors that can occur while fetching a catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The endpoint answered but the envelope said `success: false`.
    Rejected,
    /// Failed to parse the response body.
    Parse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Network(msg) => write!(f, "network error: {msg}"),
            CatalogError::Rejected => write!(f, "catalog endpoint reported failure"),
            CatalogError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// A read-only source of the model and template catalogs.
///
/// Both fetches are one-shot: the shell requests each catalog exactly once at
/// startup. Providers simulate or incur real latency; callers must tolerate
/// either fetch failing independently (a failed catalog is logged and left
/// empty, never fatal).
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Returns the name of the provider (for logging).
    fn name(&self) -> &str;

    async fn fetch_models(&self) -> Result<Vec<ModelDescriptor>, CatalogError>;

    async fn fetch_templates(&self) -> Result<Vec<PromptTemplate>, CatalogError>;
}
