//! Data-access backends.
//!
//! One `Backend` trait, two implementations: an in-memory store over the JSON
//! seed document and an HTTP delegate to an upstream AlumniConnect API. The
//! implementation is chosen once at startup from configuration; there is no
//! per-call switching and no fallback from one to the other.

mod http;
mod memory;

pub use http::HttpBackend;
pub use memory::MemoryBackend;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::Config;
use crate::errors::AppError;
use crate::store::query::{ListQuery, Page};
use crate::store::JsonStore;

/// Generic collection operations shared by every feature endpoint.
///
/// Absent records are reported as `None`/`false`, never as errors; the API
/// layer decides how to surface a 404.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Page, AppError>;
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, AppError>;
    async fn create(&self, collection: &str, record: Value) -> Result<Value, AppError>;
    async fn replace(
        &self,
        collection: &str,
        id: &str,
        record: Value,
    ) -> Result<Option<Value>, AppError>;
    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<Value>, AppError>;
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError>;
}

/// Select and construct the backend from configuration.
pub async fn from_config(config: &Config) -> Result<Arc<dyn Backend>, AppError> {
    match &config.api_base_url {
        Some(base_url) => {
            tracing::info!("Using upstream API backend at {}", base_url);
            Ok(Arc::new(HttpBackend::new(base_url.clone())))
        }
        None => {
            tracing::info!("Using in-memory backend from {:?}", config.seed_file);
            let store = JsonStore::load(&config.seed_file, config.persist_seed).await?;
            Ok(Arc::new(MemoryBackend::new(store, config.mock_delay)))
        }
    }
}
