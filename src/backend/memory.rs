//! In-memory backend over the JSON document store.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::Backend;
use crate::errors::AppError;
use crate::store::query::{run_query, ListQuery, Page};
use crate::store::JsonStore;

/// Serves every operation from the owned [`JsonStore`], with an optional
/// artificial latency to mimic a remote API during development.
pub struct MemoryBackend {
    store: JsonStore,
    delay: Duration,
}

impl MemoryBackend {
    pub fn new(store: JsonStore, delay: Duration) -> Self {
        Self { store, delay }
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Page, AppError> {
        self.simulate_latency().await;
        let items = self.store.collection(collection).await;
        Ok(run_query(&items, query))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, AppError> {
        self.simulate_latency().await;
        Ok(self.store.find_by_id(collection, id).await)
    }

    async fn create(&self, collection: &str, record: Value) -> Result<Value, AppError> {
        self.simulate_latency().await;
        self.store.insert(collection, record).await
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        record: Value,
    ) -> Result<Option<Value>, AppError> {
        self.simulate_latency().await;
        self.store.replace(collection, id, record).await
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<Value>, AppError> {
        self.simulate_latency().await;
        self.store.merge(collection, id, patch).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        self.simulate_latency().await;
        self.store.remove(collection, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::query::FilterSpec;
    use crate::store::Document;
    use serde_json::json;

    fn backend() -> MemoryBackend {
        let mut doc = Document::new();
        doc.insert(
            "opportunities".to_string(),
            vec![
                json!({"id": "op-1", "title": "Backend engineer", "status": "open"}),
                json!({"id": "op-2", "title": "Data analyst", "status": "closed"}),
            ],
        );
        MemoryBackend::new(JsonStore::from_document(doc), Duration::ZERO)
    }

    #[tokio::test]
    async fn test_list_applies_filter_and_pagination() {
        let backend = backend();
        let query = ListQuery {
            filter: FilterSpec::new().exact("status", Some("open")),
            ..Default::default()
        };

        let page = backend.list("opportunities", &query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0]["id"], "op-1");
    }

    #[tokio::test]
    async fn test_get_absent_record_is_none() {
        let backend = backend();
        assert!(backend.get("opportunities", "op-9").await.unwrap().is_none());
    }
}
