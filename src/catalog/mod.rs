//! # Catalog
//!
//! Read-only reference data: the model list and the prompt template list.
//! Sourced from either the built-in fixed catalogs (default) or an HTTP
//! server speaking the `{success, data}` envelope protocol.

pub mod builtin;
pub mod http;
mod provider;
mod types;

pub use builtin::BuiltinCatalogProvider;
pub use http::HttpCatalogProvider;
pub use provider::{CatalogError, CatalogProvider};
pub use types::{Envelope, GenerationDefaults, ModelDescriptor, PromptTemplate};
