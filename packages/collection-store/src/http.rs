//! Collection store backed by the host's custom objects REST API.
//!
//! ```text
//! GET    {base}/customobjects/v1/collections/{collection}/objects/{key}
//! PUT    {base}/customobjects/v1/collections/{collection}/objects/{key}
//! DELETE {base}/customobjects/v1/collections/{collection}/objects/{key}
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

use crate::{
    ApiError, CollectionStore, Error, ModifyResponse, Outcome, ReadOutcome, WriteOutcome,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An async HTTP client for one host endpoint.
///
/// # Example
///
/// ```ignore
/// use alloy_collection_store::{CollectionStore, HttpCollectionStore};
///
/// let store = HttpCollectionStore::new("https://api.example.com")?.with_token("secret");
/// let outcome = store.read("config", "default").await?;
/// ```
pub struct HttpCollectionStore {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpCollectionStore {
    /// Create a store with the default 30 second timeout.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                message: format!("{base_url} cannot be used as a base URL"),
            });
        }
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn object_url(&self, collection: &str, key: &str) -> Url {
        let mut url = self.base_url.clone();
        // Checked in the constructor.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "customobjects",
                "v1",
                "collections",
                collection,
                "objects",
                key,
            ]);
        }
        url
    }

    fn request(&self, method: reqwest::Method, collection: &str, key: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.object_url(collection, key))
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<(reqwest::StatusCode, String), Error> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(status = status.as_u16(), "collection API responded");
        Ok((status, text))
    }

    async fn modify(&self, builder: RequestBuilder) -> Result<WriteOutcome, Error> {
        let (status, text) = self.send(builder).await?;

        let parsed = if text.trim().is_empty() {
            Ok(ModifyResponse::default())
        } else {
            serde_json::from_str::<ModifyResponse>(&text)
        };

        match parsed {
            Ok(response) if !response.errors.is_empty() || status.is_success() => {
                Ok(response.into_outcome())
            }
            Ok(_) => Ok(status_failure(status, &text)),
            Err(_) if !status.is_success() => Ok(status_failure(status, &text)),
            Err(error) => Err(error.into()),
        }
    }
}

/// An error entry for a non-2xx response that carried no `errors` envelope.
fn status_failure<T>(status: reqwest::StatusCode, text: &str) -> Outcome<T> {
    let message = if text.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        text.trim().to_string()
    };
    Outcome::failure(ApiError::new(i64::from(status.as_u16()), message))
}

#[async_trait]
impl CollectionStore for HttpCollectionStore {
    async fn read(&self, collection: &str, key: &str) -> Result<ReadOutcome, Error> {
        tracing::debug!(collection, key, "GET collection object");
        let (status, text) = self
            .send(self.request(reqwest::Method::GET, collection, key))
            .await?;

        let body = if text.trim().is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_str::<Value>(&text)
        };

        match body {
            Ok(body) => {
                let outcome = ReadOutcome::from_read_body(body);
                if outcome.is_success() && !status.is_success() {
                    Ok(status_failure(status, &text))
                } else {
                    Ok(outcome)
                }
            }
            Err(_) if !status.is_success() => Ok(status_failure(status, &text)),
            Err(error) => Err(error.into()),
        }
    }

    async fn write(
        &self,
        collection: &str,
        key: &str,
        value: Value,
    ) -> Result<WriteOutcome, Error> {
        tracing::debug!(collection, key, "PUT collection object");
        self.modify(self.request(reqwest::Method::PUT, collection, key).json(&value))
            .await
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<WriteOutcome, Error> {
        tracing::debug!(collection, key, "DELETE collection object");
        self.modify(self.request(reqwest::Method::DELETE, collection, key))
            .await
    }
}
