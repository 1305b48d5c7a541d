//! In-memory collection store.
//!
//! Collections must be declared up front; reads against an undeclared name
//! fail with `collection not found` the same way the host does.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::{
    ApiError, CollectionStore, Error, ModifiedResource, Outcome, ReadOutcome, WriteOutcome,
};

pub(crate) const DEFAULT_NAMESPACE: &str = "local";
pub(crate) const DEFAULT_SCHEMA_VERSION: &str = "v1.0";

/// A collection store backed by in-process maps.
///
/// # Example
///
/// ```rust,ignore
/// use alloy_collection_store::{CollectionStore, InMemoryCollectionStore};
///
/// let store = InMemoryCollectionStore::new().with_collection("config");
/// store.write("config", "default", serde_json::json!({"a": 1})).await?;
/// ```
pub struct InMemoryCollectionStore {
    namespace: String,
    schema_version: String,
    collections: Mutex<HashMap<String, BTreeMap<String, Value>>>,
}

impl InMemoryCollectionStore {
    /// Create a store with no collections.
    pub fn new() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
            collections: Mutex::new(HashMap::new()),
        }
    }

    /// Declare an empty collection.
    pub fn with_collection(self, name: impl Into<String>) -> Self {
        self.lock().entry(name.into()).or_default();
        self
    }

    /// Seed an object, declaring its collection if needed.
    pub fn with_object(self, collection: impl Into<String>, key: impl Into<String>, value: Value) -> Self {
        self.lock()
            .entry(collection.into())
            .or_default()
            .insert(key.into(), value);
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_schema_version(mut self, schema_version: impl Into<String>) -> Self {
        self.schema_version = schema_version.into();
        self
    }

    /// Snapshot of one stored object.
    pub fn get(&self, collection: &str, key: &str) -> Option<Value> {
        self.lock()
            .get(collection)
            .and_then(|objects| objects.get(key))
            .cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, BTreeMap<String, Value>>> {
        // A poisoned map is still structurally valid.
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn modified(&self, collection: &str, key: &str) -> ModifiedResource {
        ModifiedResource {
            namespace: self.namespace.clone(),
            collection_name: collection.to_string(),
            object_key: key.to_string(),
            last_modified_time: Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
            schema_version: self.schema_version.clone(),
        }
    }
}

impl Default for InMemoryCollectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CollectionStore for InMemoryCollectionStore {
    async fn read(&self, collection: &str, key: &str) -> Result<ReadOutcome, Error> {
        tracing::debug!(collection, key, "in-memory read");
        let collections = self.lock();
        let Some(objects) = collections.get(collection) else {
            return Ok(Outcome::failure(ApiError::collection_not_found()));
        };
        Ok(match objects.get(key) {
            Some(value) => Outcome::Success(value.clone()),
            None => Outcome::failure(ApiError::object_not_found()),
        })
    }

    async fn write(
        &self,
        collection: &str,
        key: &str,
        value: Value,
    ) -> Result<WriteOutcome, Error> {
        tracing::debug!(collection, key, "in-memory write");
        let mut collections = self.lock();
        let Some(objects) = collections.get_mut(collection) else {
            return Ok(Outcome::failure(ApiError::collection_not_found()));
        };
        objects.insert(key.to_string(), value);
        Ok(Outcome::Success(vec![self.modified(collection, key)]))
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<WriteOutcome, Error> {
        tracing::debug!(collection, key, "in-memory delete");
        let mut collections = self.lock();
        let Some(objects) = collections.get_mut(collection) else {
            return Ok(Outcome::failure(ApiError::collection_not_found()));
        };
        Ok(match objects.remove(key) {
            Some(_) => Outcome::Success(vec![self.modified(collection, key)]),
            None => Outcome::failure(ApiError::object_not_found()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn write_then_read() {
        let store = InMemoryCollectionStore::new().with_collection("col");
        let outcome = store.write("col", "obj", json!({"value": "x"})).await.unwrap();
        let resources = outcome.success().unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].collection_name, "col");
        assert_eq!(resources[0].object_key, "obj");
        assert_eq!(resources[0].namespace, "local");
        assert_eq!(resources[0].schema_version, "v1.0");
        assert!(resources[0].last_modified_time.ends_with('Z'));

        let read = store.read("col", "obj").await.unwrap();
        assert_eq!(read, Outcome::Success(json!({"value": "x"})));
    }

    #[tokio::test]
    async fn missing_object() {
        let store = InMemoryCollectionStore::new().with_collection("col");
        let read = store.read("col", "nope").await.unwrap();
        assert!(read.errors().unwrap().first().is_object_not_found());

        let delete = store.delete("col", "nope").await.unwrap();
        assert!(delete.errors().unwrap().first().is_object_not_found());
    }

    #[tokio::test]
    async fn undeclared_collection() {
        let store = InMemoryCollectionStore::new();
        for outcome in [
            store.read("ghost", "k").await.unwrap().map(|_| ()),
            store.write("ghost", "k", json!({})).await.unwrap().map(|_| ()),
            store.delete("ghost", "k").await.unwrap().map(|_| ()),
        ] {
            assert!(outcome.errors().unwrap().first().is_collection_not_found());
        }
    }

    #[tokio::test]
    async fn delete_removes_object() {
        let store = InMemoryCollectionStore::new()
            .with_namespace("abc123")
            .with_object("col", "obj", json!({"a": 1}));
        let outcome = store.delete("col", "obj").await.unwrap();
        assert_eq!(outcome.success().unwrap()[0].namespace, "abc123");
        assert!(store.get("col", "obj").is_none());
    }
}
