//! The facade trait every collection backend implements.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{Error, ReadOutcome, WriteOutcome};

/// Read, write and delete JSON objects in named collections.
///
/// Each call resolves to exactly one [`Outcome`](crate::Outcome). `Err` is
/// reserved for transport failures; callers never retry either kind.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Arc<dyn CollectionStore>`.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Read the object stored under `key`.
    ///
    /// The success payload is the raw object with its schema fields at the
    /// top level.
    async fn read(&self, collection: &str, key: &str) -> Result<ReadOutcome, Error>;

    /// Create or replace the object stored under `key`.
    ///
    /// The success payload is a single-element list of modification records.
    async fn write(&self, collection: &str, key: &str, value: Value)
        -> Result<WriteOutcome, Error>;

    /// Delete the object stored under `key`.
    async fn delete(&self, collection: &str, key: &str) -> Result<WriteOutcome, Error>;
}

#[async_trait]
impl<T: CollectionStore + ?Sized> CollectionStore for &T {
    async fn read(&self, collection: &str, key: &str) -> Result<ReadOutcome, Error> {
        (**self).read(collection, key).await
    }

    async fn write(
        &self,
        collection: &str,
        key: &str,
        value: Value,
    ) -> Result<WriteOutcome, Error> {
        (**self).write(collection, key, value).await
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<WriteOutcome, Error> {
        (**self).delete(collection, key).await
    }
}

#[async_trait]
impl<T: CollectionStore + ?Sized> CollectionStore for Box<T> {
    async fn read(&self, collection: &str, key: &str) -> Result<ReadOutcome, Error> {
        self.as_ref().read(collection, key).await
    }

    async fn write(
        &self,
        collection: &str,
        key: &str,
        value: Value,
    ) -> Result<WriteOutcome, Error> {
        self.as_ref().write(collection, key, value).await
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<WriteOutcome, Error> {
        self.as_ref().delete(collection, key).await
    }
}

#[async_trait]
impl<T: CollectionStore + ?Sized> CollectionStore for Arc<T> {
    async fn read(&self, collection: &str, key: &str) -> Result<ReadOutcome, Error> {
        self.as_ref().read(collection, key).await
    }

    async fn write(
        &self,
        collection: &str,
        key: &str,
        value: Value,
    ) -> Result<WriteOutcome, Error> {
        self.as_ref().write(collection, key, value).await
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<WriteOutcome, Error> {
        self.as_ref().delete(collection, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryCollectionStore, Outcome};
    use serde_json::json;

    #[tokio::test]
    async fn object_safety_works() {
        let store: Arc<dyn CollectionStore> =
            Arc::new(InMemoryCollectionStore::new().with_collection("things"));

        store
            .write("things", "a", json!({"n": 1}))
            .await
            .unwrap();
        let outcome = store.read("things", "a").await.unwrap();
        assert_eq!(outcome, Outcome::Success(json!({"n": 1})));
    }

    #[tokio::test]
    async fn boxed_and_borrowed_delegate() {
        let inner = InMemoryCollectionStore::new().with_collection("things");
        let borrowed: &dyn CollectionStore = &inner;
        borrowed.write("things", "a", json!(1)).await.unwrap();

        let boxed: Box<dyn CollectionStore> = Box::new(inner);
        assert!(boxed.delete("things", "a").await.unwrap().is_success());
        assert!(!boxed.read("things", "a").await.unwrap().is_success());
    }
}
