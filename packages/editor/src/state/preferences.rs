//! Per-user editor preferences

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Visual,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportType {
    #[default]
    Desktop,
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub editor_mode: EditorMode,

    /// Sidebar panel open flags keyed by panel name
    pub panels: IndexMap<String, bool>,

    pub active_general_sidebar: Option<String>,

    pub active_sidebar_panel: Option<String>,

    /// Persisted viewport preference. Layout decisions read
    /// `EditorState::mobile`, the live viewport.
    pub viewport_type: ViewportType,

    pub features: IndexMap<String, bool>,

    /// Insert counts per block type, in first-use order
    pub block_usage: IndexMap<String, u64>,

    /// Most recent first
    pub recently_used_blocks: Vec<String>,

    /// Keys this crate does not model
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Default for Preferences {
    fn default() -> Self {
        let mut panels = IndexMap::new();
        panels.insert("post-status".to_string(), true);

        let mut features = IndexMap::new();
        features.insert("fixedToolbar".to_string(), false);

        Self {
            editor_mode: EditorMode::Visual,
            panels,
            active_general_sidebar: Some("editor".to_string()),
            active_sidebar_panel: Some("document".to_string()),
            viewport_type: ViewportType::Desktop,
            features,
            block_usage: IndexMap::new(),
            recently_used_blocks: Vec::new(),
            extra: IndexMap::new(),
        }
    }
}

impl Preferences {
    /// A preference by its wire (camelCase) name
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.extra.get(name) {
            return Some(value.clone());
        }

        match serde_json::to_value(self) {
            Ok(Value::Object(mut map)) => map.remove(name).filter(|value| !value.is_null()),
            _ => None,
        }
    }

    pub fn is_feature_active(&self, feature: &str) -> bool {
        self.features.get(feature).copied().unwrap_or(false)
    }

    pub fn with_feature(mut self, feature: impl Into<String>, active: bool) -> Self {
        self.features.insert(feature.into(), active);
        self
    }

    pub fn with_block_usage(mut self, name: impl Into<String>, count: u64) -> Self {
        self.block_usage.insert(name.into(), count);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shipped_defaults() {
        let preferences = Preferences::default();

        assert_eq!(preferences.editor_mode, EditorMode::Visual);
        assert_eq!(preferences.active_general_sidebar.as_deref(), Some("editor"));
        assert_eq!(preferences.panels.get("post-status"), Some(&true));
        assert!(!preferences.is_feature_active("fixedToolbar"));
    }

    #[test]
    fn test_get_by_wire_name() {
        let preferences: Preferences = serde_json::from_value(json!({
            "editorMode": "text",
            "chickenStyle": "roasted"
        }))
        .unwrap();

        assert_eq!(preferences.get("editorMode"), Some(json!("text")));
        assert_eq!(preferences.get("chickenStyle"), Some(json!("roasted")));
        assert_eq!(preferences.get("viewportType"), Some(json!("desktop")));
        assert_eq!(preferences.get("missing"), None);
    }
}
