//! # Inserter Queries
//!
//! Items offered by the block inserter: regular block types, reusable
//! blocks, and the "recent" and "most used" shortlists.

use crate::state::EditorState;
use scribe_blocks::{BlockRegistry, BlockType, REUSABLE_BLOCK_NAME};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;

/// Category reusable-block items are listed under
pub const REUSABLE_BLOCKS_CATEGORY: &str = "reusable-blocks";

/// Block types an editing context allows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AllowedBlockTypes {
    #[default]
    All,
    None,
    Only(Vec<String>),
}

impl AllowedBlockTypes {
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AllowedBlockTypes::Only(names.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, name: &str) -> bool {
        match self {
            AllowedBlockTypes::All => true,
            AllowedBlockTypes::None => false,
            AllowedBlockTypes::Only(names) => names.iter().any(|allowed| allowed == name),
        }
    }
}

impl From<bool> for AllowedBlockTypes {
    fn from(allowed: bool) -> Self {
        if allowed {
            AllowedBlockTypes::All
        } else {
            AllowedBlockTypes::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InserterItem {
    pub id: String,
    pub name: String,
    pub initial_attributes: Map<String, Value>,
    pub title: String,
    pub icon: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub is_disabled: bool,
}

impl InserterItem {
    fn from_block_type(block_type: &BlockType, is_disabled: bool) -> Self {
        Self {
            id: block_type.name.clone(),
            name: block_type.name.clone(),
            initial_attributes: Map::new(),
            title: block_type.title.clone(),
            icon: block_type.icon.clone(),
            category: block_type.category.clone(),
            keywords: block_type.keywords.clone(),
            is_disabled,
        }
    }
}

/// Names of block types present in the current document
fn used_block_names(state: &EditorState) -> HashSet<&str> {
    state
        .present()
        .blocks_by_uid()
        .values()
        .map(|block| block.name.as_str())
        .collect()
}

fn is_disabled(block_type: &BlockType, used: &HashSet<&str>) -> bool {
    block_type.use_once && used.contains(block_type.name.as_str())
}

/// Every item the inserter offers under `allowed`
pub fn get_inserter_items(state: &EditorState, registry: &BlockRegistry, allowed: &AllowedBlockTypes) -> Vec<InserterItem> {
    if *allowed == AllowedBlockTypes::None {
        return Vec::new();
    }

    let used = used_block_names(state);
    let mut items: Vec<InserterItem> = registry
        .iter()
        .filter(|block_type| !block_type.is_private && allowed.allows(&block_type.name))
        .map(|block_type| InserterItem::from_block_type(block_type, is_disabled(block_type, &used)))
        .collect();

    if allowed.allows(REUSABLE_BLOCK_NAME) {
        items.extend(state.reusable_blocks.data.values().filter_map(|reusable| {
            let referenced = registry.get(&reusable.block_type)?;

            let mut initial_attributes = Map::new();
            initial_attributes.insert("ref".to_string(), Value::String(reusable.id.clone()));

            Some(InserterItem {
                id: format!("{}/{}", REUSABLE_BLOCK_NAME, reusable.id),
                name: REUSABLE_BLOCK_NAME.to_string(),
                initial_attributes,
                title: reusable.title.clone(),
                icon: referenced.icon.clone(),
                category: REUSABLE_BLOCKS_CATEGORY.to_string(),
                keywords: Vec::new(),
                is_disabled: false,
            })
        }));
    }

    items
}

/// Recently inserted block types, most recent first
pub fn get_recent_inserter_items(
    state: &EditorState,
    registry: &BlockRegistry,
    allowed: &AllowedBlockTypes,
) -> Vec<InserterItem> {
    let used = used_block_names(state);

    state
        .preferences
        .recently_used_blocks
        .iter()
        .filter_map(|name| registry.get(name))
        .filter(|block_type| !block_type.is_private && allowed.allows(&block_type.name))
        .map(|block_type| InserterItem::from_block_type(block_type, is_disabled(block_type, &used)))
        .collect()
}

/// Block types ranked by usage, topped up with `defaults`.
///
/// Ties keep first-use order. Unregistered names are dropped before the
/// list is cut to `limit`.
pub fn get_most_frequently_used_blocks(
    state: &EditorState,
    registry: &BlockRegistry,
    defaults: &[String],
    limit: usize,
) -> Vec<Arc<BlockType>> {
    let mut names: Vec<(&str, u64)> = state
        .preferences
        .block_usage
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    names.sort_by(|a, b| b.1.cmp(&a.1));

    let mut ranked: Vec<&str> = names.into_iter().map(|(name, _)| name).collect();
    for name in defaults {
        if !ranked.contains(&name.as_str()) {
            ranked.push(name.as_str());
        }
    }

    ranked
        .into_iter()
        .filter_map(|name| registry.get(name).cloned())
        .take(limit)
        .collect()
}
