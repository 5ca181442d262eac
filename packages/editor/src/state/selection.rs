//! Selection, hover and insertion point bookkeeping

use scribe_blocks::Uid;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Selection range over the block order.
///
/// `start == end` is a single selected block; different endpoints are a
/// multi-selection spanning both (in document order, whichever comes first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockSelection {
    pub start: Option<Uid>,

    pub end: Option<Uid>,

    /// Opaque caret/focus descriptor owned by the UI
    pub focus: Option<Value>,

    pub is_enabled: bool,
}

impl Default for BlockSelection {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            focus: None,
            is_enabled: true,
        }
    }
}

impl BlockSelection {
    pub fn single(uid: impl Into<Uid>) -> Self {
        let uid = uid.into();
        Self {
            start: Some(uid.clone()),
            end: Some(uid),
            ..Self::default()
        }
    }

    pub fn range(start: impl Into<Uid>, end: impl Into<Uid>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
            ..Self::default()
        }
    }

    pub fn with_focus(mut self, focus: Value) -> Self {
        self.focus = Some(focus);
        self
    }

    /// Both endpoints set and distinct
    pub fn is_multi(&self) -> bool {
        matches!((&self.start, &self.end), (Some(start), Some(end)) if start != end)
    }
}

/// Explicit insertion point set by the sibling inserter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertionPointOverride {
    pub position: Option<usize>,

    pub visible: bool,
}

/// Per-block editing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockMode {
    #[default]
    Visual,
    Html,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_is_not_multi() {
        let selection = BlockSelection::single("1");
        assert!(!selection.is_multi());
        assert!(selection.is_enabled);
    }

    #[test]
    fn test_range_is_multi() {
        assert!(BlockSelection::range("1", "2").is_multi());
        assert!(!BlockSelection::default().is_multi());
    }
}
