//! Alloy: building blocks for extensions hosted inside a console application.
//!
//! - [`store`]: the collection object facade and its backends
//! - [`host`]: the host session and its readiness gate
//! - [`editor`]: the collection object editor and the read-once query
//! - [`console`]: page layout, extension panel and theme shim

pub use alloy_collection_store as store;
pub use alloy_console as console;
pub use alloy_editor as editor;
pub use alloy_host as host;

pub use alloy_collection_store::{CollectionStore, Outcome};
pub use alloy_console::{ConsoleExtension, ConsolePage, ThemeShim};
pub use alloy_editor::{query_collection_object, CollectionEditor, EditorConfig};
pub use alloy_host::{HostSession, Readiness};
