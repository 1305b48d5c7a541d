//! Read-once lookup of a collection object.
//!
//! Useful for a well-known value a component needs when it starts, such as
//! its configuration:
//!
//! ```rust,ignore
//! let config = query_collection_object(&*session.store(), &session.readiness(), "config", "default").await;
//! if let Some(error) = &config.error {
//!     tracing::warn!(%error, "no stored config");
//! }
//! ```

use alloy_collection_store::{CollectionStore, Outcome};
use alloy_host::Readiness;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectQuery {
    /// The object, when it was read successfully.
    pub value: Option<Value>,
    /// Set once the read finished, whatever its result.
    pub complete: bool,
    /// The first error message, if any.
    pub error: Option<String>,
}

/// Wait for the host, then read `key` from `collection` exactly once.
///
/// If the session closes before it becomes ready the query stays incomplete.
pub async fn query_collection_object(
    store: &dyn CollectionStore,
    readiness: &Readiness,
    collection: &str,
    key: &str,
) -> ObjectQuery {
    if let Err(error) = readiness.wait_ready().await {
        tracing::debug!(%error, collection, key, "query abandoned");
        return ObjectQuery::default();
    }

    match store.read(collection, key).await {
        Ok(Outcome::Success(value)) => ObjectQuery {
            value: Some(value),
            complete: true,
            error: None,
        },
        Ok(Outcome::Failure(errors)) => ObjectQuery {
            value: None,
            complete: true,
            error: Some(errors.first().message.clone()),
        },
        Err(error) => ObjectQuery {
            value: None,
            complete: true,
            error: Some(error.to_string()),
        },
    }
}
