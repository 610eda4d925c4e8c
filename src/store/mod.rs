//! JSON document store.
//!
//! The whole dataset is one JSON object keyed by collection name, each value
//! a flat array of records with a string `id`. The document is loaded from
//! the seed file once and held in memory; mutations optionally rewrite the
//! file as pretty-printed JSON.

pub mod query;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::sync::RwLock;

use crate::errors::AppError;

/// The in-memory document: collection name -> records.
pub type Document = BTreeMap<String, Vec<Value>>;

/// Owned, lock-protected document store. Reads take snapshots; writes hold
/// the lock for the duration of the mutation (and the persist, when enabled).
pub struct JsonStore {
    doc: RwLock<Document>,
    seed_file: Option<PathBuf>,
    persist: bool,
}

impl JsonStore {
    /// Load the document from the seed file. A missing file starts an empty
    /// store; a malformed one is an error.
    pub async fn load(seed_file: &Path, persist: bool) -> Result<Self, AppError> {
        let doc = match tokio::fs::read_to_string(seed_file).await {
            Ok(raw) => serde_json::from_str::<Document>(&raw).map_err(|e| {
                AppError::Store(format!(
                    "Seed file {} is not an object of record arrays: {}",
                    seed_file.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Seed file {} not found, starting empty", seed_file.display());
                Document::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            doc: RwLock::new(doc),
            seed_file: Some(seed_file.to_path_buf()),
            persist,
        })
    }

    /// Build a store from an already-parsed document. Never persists.
    pub fn from_document(doc: Document) -> Self {
        Self {
            doc: RwLock::new(doc),
            seed_file: None,
            persist: false,
        }
    }

    /// Snapshot of a named collection. Unknown names read as empty.
    pub async fn collection(&self, name: &str) -> Vec<Value> {
        self.doc
            .read()
            .await
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// First record whose `id` equals the argument, or `None`.
    pub async fn find_by_id(&self, collection: &str, id: &str) -> Option<Value> {
        self.doc
            .read()
            .await
            .get(collection)
            .and_then(|items| items.iter().find(|item| record_id_is(item, id)))
            .cloned()
    }

    /// Append a record. The collection is created on first write.
    pub async fn insert(&self, collection: &str, record: Value) -> Result<Value, AppError> {
        let mut doc = self.doc.write().await;
        doc.entry(collection.to_string())
            .or_default()
            .push(record.clone());
        self.persist_locked(&doc).await?;
        Ok(record)
    }

    /// Replace the record with the given id. Returns `None` when absent.
    pub async fn replace(
        &self,
        collection: &str,
        id: &str,
        record: Value,
    ) -> Result<Option<Value>, AppError> {
        let mut doc = self.doc.write().await;
        let Some(slot) = doc
            .get_mut(collection)
            .and_then(|items| items.iter_mut().find(|item| record_id_is(item, id)))
        else {
            return Ok(None);
        };

        *slot = record.clone();
        self.persist_locked(&doc).await?;
        Ok(Some(record))
    }

    /// Shallow-merge the patch object into the record with the given id.
    /// The `id` field is immutable; a patch value for it is ignored.
    pub async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<Value>, AppError> {
        let Value::Object(patch) = patch else {
            return Err(AppError::BadRequest(
                "Patch body must be a JSON object".to_string(),
            ));
        };

        let mut doc = self.doc.write().await;
        let Some(slot) = doc
            .get_mut(collection)
            .and_then(|items| items.iter_mut().find(|item| record_id_is(item, id)))
        else {
            return Ok(None);
        };

        if let Value::Object(target) = slot {
            for (key, value) in patch {
                if key == "id" {
                    continue;
                }
                target.insert(key, value);
            }
        }
        let merged = slot.clone();
        self.persist_locked(&doc).await?;
        Ok(Some(merged))
    }

    /// Remove the record with the given id. Returns whether one was removed.
    pub async fn remove(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        let mut doc = self.doc.write().await;
        let Some(items) = doc.get_mut(collection) else {
            return Ok(false);
        };

        let before = items.len();
        items.retain(|item| !record_id_is(item, id));
        let removed = items.len() < before;

        if removed {
            self.persist_locked(&doc).await?;
        }
        Ok(removed)
    }

    /// Rewrite the whole document to the seed file as pretty-printed JSON.
    /// No-op unless persistence is enabled.
    async fn persist_locked(&self, doc: &Document) -> Result<(), AppError> {
        if !self.persist {
            return Ok(());
        }
        let Some(path) = &self.seed_file else {
            return Ok(());
        };

        let pretty = serde_json::to_string_pretty(doc)
            .map_err(|e| AppError::Store(format!("Failed to serialize document: {}", e)))?;
        tokio::fs::write(path, pretty).await?;
        Ok(())
    }
}

fn record_id_is(record: &Value, id: &str) -> bool {
    record.get("id").and_then(Value::as_str) == Some(id)
}
