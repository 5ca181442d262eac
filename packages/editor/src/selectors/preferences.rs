//! Preference and sidebar queries

use crate::state::{EditorMode, EditorState};
use serde_json::Value;

pub fn get_editor_mode(state: &EditorState) -> EditorMode {
    state.preferences.editor_mode
}

pub fn get_preference(state: &EditorState, name: &str) -> Option<Value> {
    state.preferences.get(name)
}

pub fn get_preference_or(state: &EditorState, name: &str, default: Value) -> Value {
    get_preference(state, name).unwrap_or(default)
}

/// The general sidebar shows `sidebar` with `panel` active
pub fn is_general_sidebar_panel_opened(state: &EditorState, sidebar: &str, panel: &str) -> bool {
    let preferences = &state.preferences;
    preferences.active_general_sidebar.as_deref() == Some(sidebar)
        && preferences.active_sidebar_panel.as_deref() == Some(panel)
}

pub fn has_open_sidebar(state: &EditorState) -> bool {
    state.preferences.active_general_sidebar.is_some() || state.publish_sidebar_active
}

pub fn is_editor_sidebar_panel_opened(state: &EditorState, panel: &str) -> bool {
    state.preferences.panels.get(panel).copied().unwrap_or(false)
}

pub fn is_feature_active(state: &EditorState, feature: &str) -> bool {
    state.preferences.is_feature_active(feature)
}

/// Fixed toolbar, never on mobile viewports
pub fn has_fixed_toolbar(state: &EditorState) -> bool {
    !state.mobile && is_feature_active(state, "fixedToolbar")
}

/// Live viewport size, independent of the persisted `viewportType` preference
pub fn is_mobile(state: &EditorState) -> bool {
    state.mobile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ViewportType;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let state = EditorState::default();

        assert_eq!(get_editor_mode(&state), EditorMode::Visual);
        assert!(is_general_sidebar_panel_opened(&state, "editor", "document"));
        assert!(!is_general_sidebar_panel_opened(&state, "editor", "block"));
        assert!(has_open_sidebar(&state));
        assert!(is_editor_sidebar_panel_opened(&state, "post-status"));
        assert!(!is_editor_sidebar_panel_opened(&state, "post-taxonomies"));
    }

    #[test]
    fn test_open_sidebar() {
        let mut state = EditorState::default();
        state.preferences.active_general_sidebar = None;
        assert!(!has_open_sidebar(&state));

        state.publish_sidebar_active = true;
        assert!(has_open_sidebar(&state));
    }

    #[test]
    fn test_preference_lookup() {
        let mut state = EditorState::default();
        state.preferences.extra.insert("chicken".to_string(), json!(true));

        assert_eq!(get_preference(&state, "chicken"), Some(json!(true)));
        assert_eq!(get_preference_or(&state, "ribs", json!(false)), json!(false));
    }

    #[test]
    fn test_fixed_toolbar() {
        let mut state = EditorState::default();
        assert!(!has_fixed_toolbar(&state));

        state.preferences.features.insert("fixedToolbar".to_string(), true);
        assert!(has_fixed_toolbar(&state));
        assert!(is_feature_active(&state, "fixedToolbar"));

        state.mobile = true;
        assert!(!has_fixed_toolbar(&state));
        assert!(is_mobile(&state));
    }

    #[test]
    fn test_viewport_preference_does_not_drive_layout() {
        let mut state = EditorState::default();
        state.preferences.features.insert("fixedToolbar".to_string(), true);
        state.preferences.viewport_type = ViewportType::Mobile;

        assert!(!is_mobile(&state));
        assert!(has_fixed_toolbar(&state));
        assert_eq!(get_preference(&state, "viewportType"), Some(json!("mobile")));
    }
}
