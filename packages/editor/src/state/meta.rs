//! Reusable blocks, meta boxes, save status and notices

use indexmap::IndexMap;
use scribe_blocks::Attributes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// A block stored server-side and referenced from posts by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReusableBlock {
    pub id: String,

    pub title: String,

    /// Name of the block type it wraps
    #[serde(rename = "type")]
    pub block_type: String,

    #[serde(default)]
    pub attributes: Attributes,
}

impl ReusableBlock {
    pub fn new(id: impl Into<String>, title: impl Into<String>, block_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            block_type: block_type.into(),
            attributes: Attributes::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReusableBlocksState {
    pub data: IndexMap<String, Arc<ReusableBlock>>,

    pub is_saving: HashMap<String, bool>,
}

impl ReusableBlocksState {
    pub fn insert(&mut self, block: ReusableBlock) {
        self.data.insert(block.id.clone(), Arc::new(block));
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaBoxState {
    pub is_active: bool,
}

/// Meta box locations (`normal`, `side`, ...) in registration order
pub type MetaBoxes = IndexMap<String, MetaBoxState>;

/// Status of the last post save request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavingState {
    pub requesting: bool,

    pub successful: bool,

    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,

    #[serde(default)]
    pub status: NoticeStatus,

    pub content: String,

    #[serde(default = "default_dismissible")]
    pub is_dismissible: bool,
}

fn default_dismissible() -> bool {
    true
}

impl Notice {
    pub fn new(id: impl Into<String>, status: NoticeStatus, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status,
            content: content.into(),
            is_dismissible: true,
        }
    }
}
