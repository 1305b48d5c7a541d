//! Pure reduction of facade outcomes into editor state changes.
//!
//! Nothing here touches the editor; each function maps one outcome to the
//! buffer change and the notification it implies.

use alloy_collection_store::{Error as StoreError, Outcome, ReadOutcome, WriteOutcome};
use serde_json::Value;

use crate::{Notification, Severity};

pub const OBJECT_NOT_FOUND_TITLE: &str = "Object not found";
pub const OBJECT_NOT_FOUND_BODY: &str =
    "No object by that name exists, but you can still save a new object with that name";
pub const COLLECTION_NOT_FOUND_TITLE: &str = "Collection not found";
pub const COLLECTION_NOT_FOUND_BODY: &str =
    "No collection exists with that name, check your spelling and app configuration";
pub const ERROR_TITLE: &str = "Error occurred";
pub const LOADED_TITLE: &str = "Object loaded";
pub const LOADED_BODY: &str = "You can make changes and save it, or you can delete it";
pub const SAVED_TITLE: &str = "Object saved";
pub const DELETED_TITLE: &str = "Object deleted";
pub const INVALID_VALUE_TITLE: &str = "Invalid object value";

/// What happens to the object value buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferUpdate {
    Keep,
    /// Replace the whole buffer; never merged.
    Replace(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    pub buffer: BufferUpdate,
    pub notification: Notification,
}

impl Reduction {
    fn keep(notification: Notification) -> Self {
        Self {
            buffer: BufferUpdate::Keep,
            notification,
        }
    }

    fn replace(text: String, notification: Notification) -> Self {
        Self {
            buffer: BufferUpdate::Replace(text),
            notification,
        }
    }
}

/// Two-space indented JSON, the buffer's canonical form.
///
/// Numbers keep their parsed type: a float with no fraction prints as `1.0`,
/// not `1`. Parsing the text back yields an equal value either way.
pub fn pretty(value: &Value) -> String {
    // Serializing a `Value` cannot fail: all map keys are strings.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Parse the buffer before it is sent to the facade.
pub fn parse_buffer(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

pub fn read(outcome: &ReadOutcome, default_object: &Value) -> Reduction {
    match outcome {
        Outcome::Failure(errors) => {
            let first = errors.first();
            if first.is_object_not_found() {
                Reduction::replace(
                    pretty(default_object),
                    Notification::new(
                        Severity::Info,
                        OBJECT_NOT_FOUND_TITLE,
                        Some(OBJECT_NOT_FOUND_BODY.to_string()),
                    ),
                )
            } else if first.is_collection_not_found() {
                Reduction::keep(Notification::new(
                    Severity::Warning,
                    COLLECTION_NOT_FOUND_TITLE,
                    Some(COLLECTION_NOT_FOUND_BODY.to_string()),
                ))
            } else {
                Reduction::keep(error_notification(&first.message))
            }
        }
        Outcome::Success(object) => Reduction::replace(
            pretty(object),
            Notification::new(Severity::Success, LOADED_TITLE, Some(LOADED_BODY.to_string())),
        ),
    }
}

pub fn write(outcome: &WriteOutcome) -> Reduction {
    match outcome {
        Outcome::Failure(errors) => Reduction::keep(error_notification(&errors.first().message)),
        Outcome::Success(resources) => {
            let body = resources
                .first()
                .map(|resource| format!("Saved at {}", resource.last_modified_time));
            Reduction::keep(Notification::new(Severity::Success, SAVED_TITLE, body))
        }
    }
}

pub fn delete(outcome: &WriteOutcome) -> Reduction {
    match outcome {
        Outcome::Failure(errors) => Reduction::keep(error_notification(&errors.first().message)),
        Outcome::Success(_) => {
            Reduction::keep(Notification::new(Severity::Success, DELETED_TITLE, None))
        }
    }
}

/// The facade call itself failed.
pub fn transport(error: &StoreError) -> Reduction {
    Reduction::keep(error_notification(&error.to_string()))
}

/// The buffer did not parse as JSON.
pub fn invalid_value(error: &serde_json::Error) -> Reduction {
    Reduction::keep(Notification::new(
        Severity::Danger,
        INVALID_VALUE_TITLE,
        Some(error.to_string()),
    ))
}

fn error_notification(message: &str) -> Notification {
    Notification::new(Severity::Danger, ERROR_TITLE, Some(message.to_string()))
}
