//! Collection store rooted in a local directory.
//!
//! Layout: `<root>/<collection>/<key>.json`. A collection exists when its
//! directory does.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::in_memory::{DEFAULT_NAMESPACE, DEFAULT_SCHEMA_VERSION};
use crate::{
    ApiError, CollectionStore, Error, ModifiedResource, Outcome, ReadOutcome, WriteOutcome,
};

const OBJECT_EXTENSION: &str = "json";

pub struct LocalDiskCollectionStore {
    root: PathBuf,
    namespace: String,
    schema_version: String,
}

impl LocalDiskCollectionStore {
    /// Open a store rooted at an existing, writable directory.
    pub fn new(root: PathBuf) -> Result<Self, Error> {
        let attr = std::fs::metadata(&root).map_err(|error| Error::RootPathInvalid {
            path: root.clone(),
            error,
        })?;

        if !attr.is_dir() {
            return Err(Error::RootPathInvalid {
                path: root,
                error: io::Error::other("Root path must be a directory."),
            });
        }

        if attr.permissions().readonly() {
            return Err(Error::RootPathInvalid {
                path: root,
                error: io::Error::other("Root directory must be writable"),
            });
        }

        match root.canonicalize() {
            Ok(root) => Ok(Self {
                root,
                namespace: DEFAULT_NAMESPACE.to_string(),
                schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
            }),
            Err(error) => Err(Error::RootPathInvalid { path: root, error }),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory backing `collection` if it is missing.
    pub async fn create_collection(&self, collection: &str) -> Result<(), Error> {
        if let Some(invalid) = check_name("collection name", collection) {
            return Err(Error::InvalidName {
                message: invalid.message,
            });
        }
        let dir = self.root.join(collection);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|error| Error::Io { path: dir, error })
    }

    /// Resolve the collection directory and object file, or the error entry
    /// the host would report for them.
    async fn locate(&self, collection: &str, key: &str) -> Result<Result<PathBuf, ApiError>, Error> {
        if let Some(invalid) = check_name("collection name", collection)
            .or_else(|| check_name("object key", key))
        {
            return Ok(Err(invalid));
        }

        let dir = self.root.join(collection);
        match tokio::fs::metadata(&dir).await {
            Ok(attr) if attr.is_dir() => {}
            Ok(_) => return Ok(Err(ApiError::collection_not_found())),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(Err(ApiError::collection_not_found()))
            }
            Err(error) => return Err(Error::Io { path: dir, error }),
        }

        Ok(Ok(dir.join(format!("{key}.{OBJECT_EXTENSION}"))))
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

/// Names map to a single path component.
fn check_name(what: &str, name: &str) -> Option<ApiError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    invalid.then(|| ApiError::new(400, format!("invalid {what}: {name:?}")))
}

#[async_trait]
impl CollectionStore for LocalDiskCollectionStore {
    async fn read(&self, collection: &str, key: &str) -> Result<ReadOutcome, Error> {
        let file_path = match self.locate(collection, key).await? {
            Ok(file_path) => file_path,
            Err(api_error) => return Ok(Outcome::failure(api_error)),
        };
        tracing::debug!("Reading {}...", file_path.display());

        let text = match tokio::fs::read_to_string(&file_path).await {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(Outcome::failure(ApiError::object_not_found()))
            }
            Err(error) => {
                return Err(Error::Io {
                    path: file_path,
                    error,
                })
            }
        };

        Ok(Outcome::Success(serde_json::from_str(&text)?))
    }

    async fn write(
        &self,
        collection: &str,
        key: &str,
        value: Value,
    ) -> Result<WriteOutcome, Error> {
        let file_path = match self.locate(collection, key).await? {
            Ok(file_path) => file_path,
            Err(api_error) => return Ok(Outcome::failure(api_error)),
        };
        tracing::debug!("Writing {}...", file_path.display());

        let text = serde_json::to_string_pretty(&value)?;
        tokio::fs::write(&file_path, text)
            .await
            .map_err(|error| Error::Io {
                path: file_path,
                error,
            })?;

        Ok(Outcome::Success(vec![self.modified(collection, key)]))
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<WriteOutcome, Error> {
        let file_path = match self.locate(collection, key).await? {
            Ok(file_path) => file_path,
            Err(api_error) => return Ok(Outcome::failure(api_error)),
        };
        tracing::debug!("Deleting {}...", file_path.display());

        match tokio::fs::remove_file(&file_path).await {
            Ok(()) => Ok(Outcome::Success(vec![self.modified(collection, key)])),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                Ok(Outcome::failure(ApiError::object_not_found()))
            }
            Err(error) => Err(Error::Io {
                path: file_path,
                error,
            }),
        }
    }
}
