//! # alloy-editor
//!
//! A small JSON editor for collection objects.
//!
//! The editor keeps the collection name, object key and a text buffer with
//! the pretty-printed object, and drives load, save and delete against a
//! [`CollectionStore`](alloy_collection_store::CollectionStore). At most one
//! operation is in flight per editor; its outcome is reduced by the pure
//! functions in [`classify`] into a buffer update and a single
//! [`Notification`].
//!
//! ```rust,ignore
//! use alloy_editor::{CollectionEditor, EditorConfig};
//!
//! let editor = CollectionEditor::new(session.store(), session.readiness(), EditorConfig::default());
//! editor.set_collection_name("config");
//! editor.set_object_key("default");
//! editor.load().await;
//! println!("{}", editor.object_value());
//! ```
//!
//! [`query_collection_object`] covers the read-once case where a component
//! only needs a well-known value such as its configuration.

pub mod classify;
pub mod config;
mod editor;
mod notification;
pub mod query;
pub mod view;

pub use classify::{BufferUpdate, Reduction};
pub use config::{ConfigError, EditorConfig};
pub use editor::{Action, CollectionEditor, Dispatch, Phase, Suppressed};
pub use notification::{Notification, Severity};
pub use query::{query_collection_object, ObjectQuery};
pub use view::{ButtonView, EditorView, FieldView};
