//! What the presentation layer draws for an editor.
//!
//! A banner for the current notification, three labelled fields, and the
//! visible buttons. Rendering itself belongs to the host's UI toolkit.

use serde::Serialize;

use crate::{Action, EditorConfig, Notification};

pub const COLLECTION_NAME_FIELD: &str = "collection-name";
pub const OBJECT_KEY_FIELD: &str = "object-name";
pub const OBJECT_VALUE_FIELD: &str = "object-value";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub id: &'static str,
    pub label: &'static str,
    pub value: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    #[serde(skip)]
    pub action: Action,
    pub label: &'static str,
    pub enabled: bool,
    pub danger: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorView {
    /// Dismissible; shown above the form.
    pub banner: Option<Notification>,
    pub fields: Vec<FieldView>,
    pub buttons: Vec<ButtonView>,
    pub spinner: bool,
}

impl EditorView {
    pub(crate) fn build(
        config: &EditorConfig,
        collection_name: &str,
        object_key: &str,
        object_value: &str,
        notification: Option<&Notification>,
        busy: bool,
    ) -> Self {
        let fields = vec![
            FieldView {
                id: COLLECTION_NAME_FIELD,
                label: "Collection name",
                value: collection_name.to_string(),
                enabled: !busy && config.collection_name_editable,
            },
            FieldView {
                id: OBJECT_KEY_FIELD,
                label: "Object name",
                value: object_key.to_string(),
                enabled: !busy && config.object_key_editable,
            },
            FieldView {
                id: OBJECT_VALUE_FIELD,
                label: "Object value",
                value: object_value.to_string(),
                enabled: !busy,
            },
        ];

        let buttons = [
            (Action::Load, "Load Object", config.load_button_visible),
            (Action::Save, "Save", config.save_button_visible),
            (Action::Delete, "Delete", config.delete_button_visible),
        ]
        .into_iter()
        .filter(|(_, _, visible)| *visible)
        .map(|(action, label, _)| ButtonView {
            action,
            label,
            enabled: !busy,
            danger: action == Action::Delete,
        })
        .collect();

        Self {
            banner: notification.cloned(),
            fields,
            buttons,
            spinner: busy,
        }
    }

    pub fn field(&self, id: &str) -> Option<&FieldView> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn field_by_label(&self, label: &str) -> Option<&FieldView> {
        self.fields.iter().find(|field| field.label == label)
    }

    pub fn button(&self, action: Action) -> Option<&ButtonView> {
        self.buttons.iter().find(|button| button.action == action)
    }
}
