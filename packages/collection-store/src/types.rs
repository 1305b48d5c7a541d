//! Wire types exchanged with the host's collection API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message fragment the host uses when the object key does not exist.
pub const OBJECT_NOT_FOUND: &str = "object not found";

/// Message fragment the host uses when the collection name is unknown.
pub const COLLECTION_NOT_FOUND: &str = "collection not found";

/// A structured error entry returned by the collection API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

impl ApiError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn object_not_found() -> Self {
        Self::new(404, OBJECT_NOT_FOUND)
    }

    pub fn collection_not_found() -> Self {
        Self::new(404, COLLECTION_NOT_FOUND)
    }

    pub fn is_object_not_found(&self) -> bool {
        self.message.contains(OBJECT_NOT_FOUND)
    }

    pub fn is_collection_not_found(&self) -> bool {
        self.message.contains(COLLECTION_NOT_FOUND)
    }

    /// Lenient decoding of one entry of an `errors` array.
    ///
    /// Missing or mistyped fields fall back to `0` and the empty string so a
    /// malformed entry still counts as an error.
    fn from_value(value: &Value) -> Self {
        Self {
            code: value.get("code").and_then(Value::as_i64).unwrap_or(0),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// A non-empty, ordered list of [`ApiError`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ApiError>", into = "Vec<ApiError>")]
pub struct ErrorList(Vec<ApiError>);

impl ErrorList {
    /// Returns `None` when `errors` is empty.
    pub fn new(errors: Vec<ApiError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn single(error: ApiError) -> Self {
        Self(vec![error])
    }

    /// The first error; the one callers classify on.
    pub fn first(&self) -> &ApiError {
        &self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ApiError> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<ApiError> {
        self.0
    }
}

impl TryFrom<Vec<ApiError>> for ErrorList {
    type Error = &'static str;

    fn try_from(errors: Vec<ApiError>) -> Result<Self, Self::Error> {
        Self::new(errors).ok_or("error list must not be empty")
    }
}

impl From<ErrorList> for Vec<ApiError> {
    fn from(list: ErrorList) -> Self {
        list.0
    }
}

impl From<ApiError> for ErrorList {
    fn from(error: ApiError) -> Self {
        Self::single(error)
    }
}

/// Result of one facade call: exactly one of a payload or an error list.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(ErrorList),
}

/// Outcome of a read: the raw object.
pub type ReadOutcome = Outcome<Value>;

/// Outcome of a write or delete: the modification records.
pub type WriteOutcome = Outcome<Vec<ModifiedResource>>;

impl<T> Outcome<T> {
    pub fn failure(error: ApiError) -> Self {
        Outcome::Failure(ErrorList::single(error))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn errors(&self) -> Option<&ErrorList> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(errors) => Some(errors),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(errors) => Outcome::Failure(errors),
        }
    }
}

impl ReadOutcome {
    /// Decode a read response body.
    ///
    /// A successful read carries only the object's own fields, so anything
    /// without a non-empty `errors` array is the payload itself.
    pub fn from_read_body(body: Value) -> Self {
        let errors = body
            .get("errors")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(ApiError::from_value).collect())
            .and_then(ErrorList::new);

        match errors {
            Some(errors) => Outcome::Failure(errors),
            None => Outcome::Success(body),
        }
    }
}

/// Metadata describing an object after a write or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedResource {
    /// Container of the app ID.
    pub namespace: String,
    pub collection_name: String,
    pub object_key: String,
    /// e.g. `2025-03-25T13:49:16.146417292Z`
    pub last_modified_time: String,
    /// e.g. `v2.0`
    pub schema_version: String,
}

/// Body of a write or delete response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifyResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default)]
    pub resources: Vec<ModifiedResource>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "lenient_errors"
    )]
    pub errors: Vec<ApiError>,
}

/// Error entries decoded the same way a read decodes them.
fn lenient_errors<'de, D>(deserializer: D) -> Result<Vec<ApiError>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .iter()
        .map(ApiError::from_value)
        .collect())
}

impl ModifyResponse {
    pub fn into_outcome(self) -> WriteOutcome {
        match ErrorList::new(self.errors) {
            Some(errors) => Outcome::Failure(errors),
            None => Outcome::Success(self.resources),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_body_without_errors_is_payload() {
        let body = json!({"special_key": "special_value"});
        let outcome = ReadOutcome::from_read_body(body.clone());
        assert_eq!(outcome, Outcome::Success(body));
    }

    #[test]
    fn read_body_with_empty_errors_is_payload() {
        let body = json!({"errors": [], "name": "x"});
        assert!(ReadOutcome::from_read_body(body).is_success());
    }

    #[test]
    fn read_body_with_errors_is_failure() {
        let body = json!({
            "meta": {"query_time": 0.01, "powered_by": "custom-storage", "trace_id": "abc"},
            "errors": [{"code": 404, "message": "object not found"}, {"code": 500, "message": "x"}]
        });
        let outcome = ReadOutcome::from_read_body(body);
        let errors = outcome.errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.first().is_object_not_found());
    }

    #[test]
    fn malformed_error_entry_still_fails() {
        let outcome = ReadOutcome::from_read_body(json!({"errors": [{"oops": true}]}));
        let errors = outcome.errors().unwrap();
        assert_eq!(errors.first(), &ApiError::new(0, ""));
    }

    #[test]
    fn error_list_rejects_empty() {
        assert!(ErrorList::new(vec![]).is_none());
        let parsed: Result<ErrorList, _> = serde_json::from_value(json!([]));
        assert!(parsed.is_err());
    }

    #[test]
    fn modify_response_outcome() {
        let response: ModifyResponse = serde_json::from_value(json!({
            "resources": [{
                "namespace": "abc123",
                "collection_name": "col-name",
                "object_key": "key-name",
                "last_modified_time": "2021-01-01T00:00:00Z",
                "schema_version": "v1.0"
            }]
        }))
        .unwrap();
        match response.into_outcome() {
            Outcome::Success(resources) => {
                assert_eq!(resources.len(), 1);
                assert_eq!(resources[0].last_modified_time, "2021-01-01T00:00:00Z");
            }
            Outcome::Failure(errors) => panic!("unexpected failure: {}", errors.first()),
        }
    }

    #[test]
    fn modify_response_errors_win() {
        let response: ModifyResponse = serde_json::from_value(json!({
            "resources": [],
            "errors": [{"code": 403, "message": "forbidden"}]
        }))
        .unwrap();
        let outcome = response.into_outcome();
        assert_eq!(outcome.errors().unwrap().first().code, 403);
    }

    #[test]
    fn modify_response_decodes_partial_errors() {
        let response: ModifyResponse = serde_json::from_value(json!({
            "errors": [{"code": 500}, {"message": "collection not found"}]
        }))
        .unwrap();
        let outcome = response.into_outcome();
        let errors = outcome.errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first(), &ApiError::new(500, ""));
        assert!(errors.iter().nth(1).unwrap().is_collection_not_found());

        let response: ModifyResponse =
            serde_json::from_value(json!({"resources": [], "errors": null})).unwrap();
        assert!(response.into_outcome().is_success());
    }

    #[test]
    fn message_matching_is_substring() {
        let e = ApiError::new(404, "lookup failed: collection not found (my-col)");
        assert!(e.is_collection_not_found());
        assert!(!e.is_object_not_found());
    }
}
