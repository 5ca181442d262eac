//! Editor configuration, loaded from `scribe.config.json` in a project directory

use crate::errors::ConfigError;
use crate::state::{EditorState, Preferences, DEFAULT_HISTORY_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "scribe.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Undo levels kept by the document history (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default)]
    pub labels: Labels,

    /// Length of the "most used" inserter list
    #[serde(default = "default_max_frequent_blocks")]
    pub max_frequent_blocks: usize,

    /// Block types appended to the "most used" list when usage is sparse
    #[serde(default = "default_frequent_blocks")]
    pub default_frequent_blocks: Vec<String>,

    /// Preferences a new user starts with
    #[serde(default)]
    pub preference_defaults: Preferences,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_max_frequent_blocks() -> usize {
    3
}

fn default_frequent_blocks() -> Vec<String> {
    vec!["core/paragraph".to_string(), "core/image".to_string()]
}

/// User-facing strings produced by selectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Labels {
    pub new_post: String,
    pub untitled: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            new_post: "New post".to_string(),
            untitled: "(Untitled)".to_string(),
        }
    }
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Empty editor state honoring this configuration
    pub fn initial_state(&self) -> EditorState {
        EditorState::new(self.history_limit, self.preference_defaults.clone())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            labels: Labels::default(),
            max_frequent_blocks: default_max_frequent_blocks(),
            default_frequent_blocks: default_frequent_blocks(),
            preference_defaults: Preferences::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EditorMode;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "historyLimit": 10,
            "labels": { "untitled": "No title" },
            "preferenceDefaults": { "editorMode": "text" }
        }"#;

        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.labels.untitled, "No title");
        assert_eq!(config.labels.new_post, "New post");
        assert_eq!(config.max_frequent_blocks, 3);
        assert_eq!(config.preference_defaults.editor_mode, EditorMode::Text);
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.default_frequent_blocks, vec!["core/paragraph", "core/image"]);
    }

    #[test]
    fn test_invalid_config() {
        let result = EditorConfig::from_json(r#"{ "historyLimit": "lots" }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_initial_state_uses_limits() {
        let config = EditorConfig {
            history_limit: 7,
            ..EditorConfig::default()
        };

        assert_eq!(config.initial_state().editor.max_levels(), 7);
    }
}
