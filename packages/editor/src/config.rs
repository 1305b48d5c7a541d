//! Construction-time options for [`CollectionEditor`](crate::CollectionEditor).
//!
//! Every field is optional when deserialized. Field names follow the
//! camelCase properties hosts already use to configure the editor, and the
//! older `objectName*` / `loadObjectValue` spellings are accepted as aliases.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Invalid editor config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub collection_name_default: String,
    pub collection_name_editable: bool,
    #[serde(alias = "objectNameDefault")]
    pub object_key_default: String,
    #[serde(alias = "objectNameEditable")]
    pub object_key_editable: bool,
    /// Load once on construction; needs both name defaults.
    #[serde(alias = "loadObjectValue")]
    pub auto_load_on_mount: bool,
    /// Shown when a load finds no object under the key.
    pub object_value_default: Value,
    pub load_button_visible: bool,
    pub save_button_visible: bool,
    pub delete_button_visible: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            collection_name_default: String::new(),
            collection_name_editable: true,
            object_key_default: String::new(),
            object_key_editable: true,
            auto_load_on_mount: false,
            object_value_default: Value::Object(Default::default()),
            load_button_visible: true,
            save_button_visible: true,
            delete_button_visible: true,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_json_str(&text)
    }

    /// Preset both identifiers and lock them.
    pub fn pinned(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            collection_name_default: collection.into(),
            collection_name_editable: false,
            object_key_default: key.into(),
            object_key_editable: false,
            ..Self::default()
        }
    }

    /// Whether construction should trigger the initial load.
    pub fn should_auto_load(&self) -> bool {
        self.auto_load_on_mount
            && !self.collection_name_default.is_empty()
            && !self.object_key_default.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.collection_name_default, "");
        assert!(config.collection_name_editable);
        assert!(config.object_key_editable);
        assert!(!config.auto_load_on_mount);
        assert_eq!(config.object_value_default, json!({}));
        assert!(config.load_button_visible && config.save_button_visible);
        assert!(config.delete_button_visible);
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(
            EditorConfig::from_json_str("{}").unwrap(),
            EditorConfig::default()
        );
    }

    #[test]
    fn camel_case_and_aliases() {
        let config = EditorConfig::from_json_str(
            r#"{
                "collectionNameDefault": "config",
                "collectionNameEditable": false,
                "objectNameDefault": "default",
                "loadObjectValue": true,
                "objectValueDefault": {"enabled": false},
                "deleteButtonVisible": false
            }"#,
        )
        .unwrap();
        assert_eq!(config.collection_name_default, "config");
        assert!(!config.collection_name_editable);
        assert_eq!(config.object_key_default, "default");
        assert!(config.object_key_editable);
        assert!(config.auto_load_on_mount);
        assert_eq!(config.object_value_default, json!({"enabled": false}));
        assert!(!config.delete_button_visible);
        assert!(config.load_button_visible);
    }

    #[test]
    fn auto_load_needs_both_names() {
        let mut config = EditorConfig {
            auto_load_on_mount: true,
            collection_name_default: "c".into(),
            ..Default::default()
        };
        assert!(!config.should_auto_load());
        config.object_key_default = "k".into();
        assert!(config.should_auto_load());
        config.auto_load_on_mount = false;
        assert!(!config.should_auto_load());
    }

    #[test]
    fn from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("editor.json");
        let err = EditorConfig::from_file(&missing).unwrap_err();
        assert!(err.to_string().contains("editor.json"));

        std::fs::write(&missing, r#"{"saveButtonVisible": false}"#).unwrap();
        let config = EditorConfig::from_file(&missing).unwrap();
        assert!(!config.save_button_visible);
    }

    #[test]
    fn malformed_json_is_error() {
        assert!(matches!(
            EditorConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
    }
}
