use std::sync::{Arc, Mutex, MutexGuard};

use alloy_collection_store::CollectionStore;
use alloy_host::Readiness;
use serde_json::Value;

use crate::classify::{self, BufferUpdate, Reduction};
use crate::{EditorConfig, EditorView, Notification, Severity};

/// A user-triggered operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Load,
    Save,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// One facade call is in flight.
    Busy(Action),
}

/// Why a trigger issued no facade call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppressed {
    Busy,
    NotReady,
}

/// What became of one trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The facade was called and its result applied.
    Completed,
    /// The buffer did not parse; nothing was sent.
    Rejected,
    Suppressed(Suppressed),
    /// The editor was disposed; the result was dropped.
    Discarded,
}

struct EditorState {
    collection_name: String,
    object_key: String,
    object_value: String,
    notification: Option<Notification>,
    phase: Phase,
    disposed: bool,
}

struct Inner {
    store: Arc<dyn CollectionStore>,
    readiness: Readiness,
    config: EditorConfig,
    state: Mutex<EditorState>,
}

/// Fields a dispatched operation carries to the facade.
struct Request<T> {
    collection: String,
    key: String,
    payload: T,
}

/// Editor for one collection object.
///
/// Clones share state, so an operation may run on a spawned task while the
/// original handle keeps serving the presentation layer. The state lock is
/// never held across a facade call.
#[derive(Clone)]
pub struct CollectionEditor {
    inner: Arc<Inner>,
}

impl CollectionEditor {
    pub fn new(
        store: Arc<dyn CollectionStore>,
        readiness: Readiness,
        config: EditorConfig,
    ) -> Self {
        let state = EditorState {
            collection_name: config.collection_name_default.clone(),
            object_key: config.object_key_default.clone(),
            object_value: String::new(),
            notification: None,
            phase: Phase::Idle,
            disposed: false,
        };

        Self {
            inner: Arc::new(Inner {
                store,
                readiness,
                config,
                state: Mutex::new(state),
            }),
        }
    }

    /// Construct the editor and run the initial load when configured to.
    ///
    /// The initial load waits for the readiness gate. It is decided once,
    /// here; later identifier edits never trigger it again.
    pub async fn mount(
        store: Arc<dyn CollectionStore>,
        readiness: Readiness,
        config: EditorConfig,
    ) -> Self {
        let editor = Self::new(store, readiness, config);
        if editor.inner.config.should_auto_load() {
            match editor.inner.readiness.wait_ready().await {
                Ok(()) => {
                    editor.load().await;
                }
                Err(error) => tracing::warn!(%error, "skipping initial load"),
            }
        }
        editor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.inner.config
    }

    pub fn collection_name(&self) -> String {
        self.lock().collection_name.clone()
    }

    pub fn object_key(&self) -> String {
        self.lock().object_key.clone()
    }

    /// The object value buffer.
    pub fn object_value(&self) -> String {
        self.lock().object_value.clone()
    }

    pub fn notification(&self) -> Option<Notification> {
        self.lock().notification.clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase(), Phase::Busy(_))
    }

    /// Returns `false` when the field is locked by configuration.
    pub fn set_collection_name(&self, name: impl Into<String>) -> bool {
        if !self.inner.config.collection_name_editable {
            return false;
        }
        self.lock().collection_name = name.into();
        true
    }

    /// Returns `false` when the field is locked by configuration.
    pub fn set_object_key(&self, key: impl Into<String>) -> bool {
        if !self.inner.config.object_key_editable {
            return false;
        }
        self.lock().object_key = key.into();
        true
    }

    pub fn set_object_value(&self, text: impl Into<String>) {
        self.lock().object_value = text.into();
    }

    pub fn dismiss_notification(&self) {
        self.lock().notification = None;
    }

    /// Tear the editor down. Operations still in flight complete against the
    /// facade but their results are dropped.
    pub fn dispose(&self) {
        self.lock().disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }

    pub fn view(&self) -> EditorView {
        let state = self.lock();
        EditorView::build(
            &self.inner.config,
            &state.collection_name,
            &state.object_key,
            &state.object_value,
            state.notification.as_ref(),
            matches!(state.phase, Phase::Busy(_)),
        )
    }

    pub async fn trigger(&self, action: Action) -> Dispatch {
        match action {
            Action::Load => self.load().await,
            Action::Save => self.save().await,
            Action::Delete => self.delete().await,
        }
    }

    /// Read the object and replace the buffer with it.
    pub async fn load(&self) -> Dispatch {
        let request = match self.begin(Action::Load, |_| Ok(())) {
            Ok(request) => request,
            Err(dispatch) => return dispatch,
        };

        let reduction = match self
            .inner
            .store
            .read(&request.collection, &request.key)
            .await
        {
            Ok(outcome) => classify::read(&outcome, &self.inner.config.object_value_default),
            Err(error) => classify::transport(&error),
        };
        self.finish(Action::Load, reduction)
    }

    /// Parse the buffer and write it under the current key.
    pub async fn save(&self) -> Dispatch {
        let request = match self.begin(Action::Save, parse_buffer) {
            Ok(request) => request,
            Err(dispatch) => return dispatch,
        };

        let reduction = match self
            .inner
            .store
            .write(&request.collection, &request.key, request.payload)
            .await
        {
            Ok(outcome) => classify::write(&outcome),
            Err(error) => classify::transport(&error),
        };
        self.finish(Action::Save, reduction)
    }

    /// Delete the object under the current key. The buffer is left as is.
    pub async fn delete(&self) -> Dispatch {
        let request = match self.begin(Action::Delete, |_| Ok(())) {
            Ok(request) => request,
            Err(dispatch) => return dispatch,
        };

        let reduction = match self
            .inner
            .store
            .delete(&request.collection, &request.key)
            .await
        {
            Ok(outcome) => classify::delete(&outcome),
            Err(error) => classify::transport(&error),
        };
        self.finish(Action::Delete, reduction)
    }

    /// Idle -> Busy, or the reason the trigger goes nowhere.
    ///
    /// `prepare` builds the operation's payload from the state while the gate
    /// is still closed; an error leaves the editor idle.
    fn begin<T>(
        &self,
        action: Action,
        prepare: impl FnOnce(&mut EditorState) -> Result<T, Dispatch>,
    ) -> Result<Request<T>, Dispatch> {
        let mut state = self.lock();

        if state.disposed {
            return Err(Dispatch::Discarded);
        }
        if let Phase::Busy(running) = state.phase {
            tracing::debug!(?action, ?running, "trigger suppressed while busy");
            return Err(Dispatch::Suppressed(Suppressed::Busy));
        }
        if !self.inner.readiness.is_ready() {
            tracing::debug!(?action, "trigger suppressed, host not ready");
            return Err(Dispatch::Suppressed(Suppressed::NotReady));
        }

        let payload = prepare(&mut *state)?;

        state.phase = Phase::Busy(action);
        tracing::debug!(
            ?action,
            collection = %state.collection_name,
            key = %state.object_key,
            "dispatching"
        );

        Ok(Request {
            collection: state.collection_name.clone(),
            key: state.object_key.clone(),
            payload,
        })
    }

    /// Busy -> Idle, applying the reduction unless the editor is gone.
    fn finish(&self, action: Action, reduction: Reduction) -> Dispatch {
        let mut state = self.lock();
        state.phase = Phase::Idle;

        if state.disposed {
            tracing::debug!(?action, "editor disposed, dropping result");
            return Dispatch::Discarded;
        }

        let notification = reduction.notification;
        match notification.severity {
            Severity::Danger | Severity::Warning => {
                tracing::warn!(?action, %notification, "operation failed")
            }
            _ => tracing::debug!(?action, %notification, "operation finished"),
        }

        if let BufferUpdate::Replace(text) = reduction.buffer {
            state.object_value = text;
        }
        state.notification = Some(notification);
        Dispatch::Completed
    }

    fn lock(&self) -> MutexGuard<'_, EditorState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// The buffer as a value, or a rejection with the parser's message shown.
fn parse_buffer(state: &mut EditorState) -> Result<Value, Dispatch> {
    classify::parse_buffer(&state.object_value).map_err(|error| {
        tracing::warn!(%error, "object value is not valid JSON");
        state.notification = Some(classify::invalid_value(&error).notification);
        Dispatch::Rejected
    })
}

impl std::fmt::Debug for CollectionEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("CollectionEditor")
            .field("collection_name", &state.collection_name)
            .field("object_key", &state.object_key)
            .field("phase", &state.phase)
            .field("disposed", &state.disposed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::pretty;
    use alloy_collection_store::InMemoryCollectionStore;
    use serde_json::json;

    fn editor_over(store: InMemoryCollectionStore, config: EditorConfig) -> CollectionEditor {
        CollectionEditor::new(Arc::new(store), Readiness::fixed(true), config)
    }

    #[test]
    fn starts_from_config_defaults() {
        let editor = editor_over(
            InMemoryCollectionStore::new(),
            EditorConfig::pinned("config", "default"),
        );
        assert_eq!(editor.collection_name(), "config");
        assert_eq!(editor.object_key(), "default");
        assert_eq!(editor.object_value(), "");
        assert!(editor.notification().is_none());
        assert_eq!(editor.phase(), Phase::Idle);
    }

    #[test]
    fn locked_fields_reject_edits() {
        let editor = editor_over(
            InMemoryCollectionStore::new(),
            EditorConfig::pinned("config", "default"),
        );
        assert!(!editor.set_collection_name("other"));
        assert!(!editor.set_object_key("other"));
        assert_eq!(editor.collection_name(), "config");
        assert_eq!(editor.object_key(), "default");
    }

    #[tokio::test]
    async fn load_save_delete_round() {
        let store = InMemoryCollectionStore::new().with_object("col", "obj", json!({"a": 1}));
        let editor = editor_over(store, EditorConfig::default());
        editor.set_collection_name("col");
        editor.set_object_key("obj");

        assert_eq!(editor.load().await, Dispatch::Completed);
        assert_eq!(editor.object_value(), pretty(&json!({"a": 1})));
        assert_eq!(editor.notification().unwrap().severity, Severity::Success);

        editor.set_object_value(r#"{"a": 2}"#);
        assert_eq!(editor.save().await, Dispatch::Completed);
        let saved = editor.notification().unwrap();
        assert_eq!(saved.title, classify::SAVED_TITLE);
        assert!(saved.body.unwrap().starts_with("Saved at "));

        assert_eq!(editor.delete().await, Dispatch::Completed);
        assert_eq!(editor.notification().unwrap().title, classify::DELETED_TITLE);
        assert_eq!(editor.object_value(), r#"{"a": 2}"#);

        assert_eq!(editor.load().await, Dispatch::Completed);
        assert_eq!(editor.notification().unwrap().severity, Severity::Info);
        assert_eq!(editor.object_value(), "{}");
    }

    #[tokio::test]
    async fn malformed_buffer_is_rejected_locally() {
        let editor = editor_over(
            InMemoryCollectionStore::new().with_collection("col"),
            EditorConfig::pinned("col", "obj"),
        );
        editor.set_object_value("{not json");

        assert_eq!(editor.save().await, Dispatch::Rejected);
        assert_eq!(editor.phase(), Phase::Idle);
        let n = editor.notification().unwrap();
        assert_eq!(n.severity, Severity::Danger);
        assert_eq!(n.title, classify::INVALID_VALUE_TITLE);
    }

    #[tokio::test]
    async fn save_writes_the_parsed_buffer() {
        let store = Arc::new(InMemoryCollectionStore::new().with_collection("col"));
        let editor = CollectionEditor::new(
            store.clone(),
            Readiness::fixed(true),
            EditorConfig::pinned("col", "obj"),
        );
        editor.set_object_value(r#"{"b": [1, null], "a": "x"}"#);

        assert_eq!(editor.save().await, Dispatch::Completed);
        assert_eq!(
            store.get("col", "obj"),
            Some(json!({"b": [1, null], "a": "x"}))
        );
    }

    #[tokio::test]
    async fn empty_buffer_is_rejected() {
        let editor = editor_over(
            InMemoryCollectionStore::new().with_collection("col"),
            EditorConfig::pinned("col", "obj"),
        );
        assert_eq!(editor.save().await, Dispatch::Rejected);
    }

    #[tokio::test]
    async fn not_ready_suppresses() {
        let editor = CollectionEditor::new(
            Arc::new(InMemoryCollectionStore::new()),
            Readiness::fixed(false),
            EditorConfig::pinned("col", "obj"),
        );
        assert_eq!(
            editor.load().await,
            Dispatch::Suppressed(Suppressed::NotReady)
        );
        assert!(editor.notification().is_none());
    }

    #[tokio::test]
    async fn dismiss_clears_notification() {
        let editor = editor_over(
            InMemoryCollectionStore::new(),
            EditorConfig::pinned("missing", "obj"),
        );
        editor.load().await;
        assert_eq!(editor.notification().unwrap().severity, Severity::Warning);
        editor.dismiss_notification();
        assert!(editor.notification().is_none());
    }

    #[tokio::test]
    async fn trigger_routes_actions() {
        let editor = editor_over(
            InMemoryCollectionStore::new().with_collection("col"),
            EditorConfig::pinned("col", "obj"),
        );
        editor.set_object_value("[1, 2]");
        assert_eq!(editor.trigger(Action::Save).await, Dispatch::Completed);
        assert_eq!(editor.trigger(Action::Load).await, Dispatch::Completed);
        assert_eq!(editor.object_value(), pretty(&json!([1, 2])));
    }

    #[tokio::test]
    async fn disposed_editor_ignores_triggers() {
        let editor = editor_over(
            InMemoryCollectionStore::new().with_collection("col"),
            EditorConfig::pinned("col", "obj"),
        );
        editor.dispose();
        assert!(editor.is_disposed());
        assert_eq!(editor.load().await, Dispatch::Discarded);
        assert!(editor.notification().is_none());
    }
}
