//! # alloy-collection-store
//!
//! The narrow facade an extension uses to reach its collections: a named
//! bucket of JSON objects addressed by key.
//!
//! Every operation resolves to an [`Outcome`], which is either the success
//! payload or a non-empty list of structured [`ApiError`]s. Transport-level
//! failures (I/O, HTTP, an undecodable body) are reported separately through
//! [`Error`].
//!
//! ## Store Types
//!
//! - [`InMemoryCollectionStore`]: declared collections held in memory.
//! - [`LocalDiskCollectionStore`]: one directory per collection, one
//!   `<key>.json` file per object.
//! - [`HttpCollectionStore`]: the host's custom objects REST API.
//!
//! ```rust,ignore
//! use alloy_collection_store::{CollectionStore, InMemoryCollectionStore, Outcome};
//! use serde_json::json;
//!
//! let store = InMemoryCollectionStore::new().with_collection("config");
//! store.write("config", "default", json!({"enabled": true})).await?;
//!
//! match store.read("config", "default").await? {
//!     Outcome::Success(value) => assert_eq!(value["enabled"], true),
//!     Outcome::Failure(errors) => eprintln!("{}", errors.first().message),
//! }
//! ```

pub mod error;
pub mod http;
pub mod in_memory;
pub mod local_disk;
mod traits;
pub mod types;

pub use error::Error;
pub use http::HttpCollectionStore;
pub use in_memory::InMemoryCollectionStore;
pub use local_disk::LocalDiskCollectionStore;
pub use traits::CollectionStore;
pub use types::{
    ApiError, ErrorList, ModifiedResource, ModifyResponse, Outcome, ReadOutcome, WriteOutcome,
    COLLECTION_NOT_FOUND, OBJECT_NOT_FOUND,
};
