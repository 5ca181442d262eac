//! # Selectors
//!
//! Pure queries over [`EditorState`].
//!
//! Most selectors are plain functions of the state and re-exported here.
//! Selectors that need the block registry, the clock, configured labels, or
//! that return derived collections worth caching are methods on the
//! [`Selectors`] context, which owns those collaborators and the memo caches.
//!
//! Memoized selectors return `Arc`s: as long as their inputs keep their
//! identity, callers get back the very same allocation.

mod document;
mod inserter;
mod meta;
mod post;
mod preferences;
mod saving;
mod selection;

pub use document::*;
pub use inserter::{
    get_inserter_items, get_most_frequently_used_blocks, get_recent_inserter_items, AllowedBlockTypes, InserterItem,
    REUSABLE_BLOCKS_CATEGORY,
};
pub use meta::*;
pub use post::*;
pub use preferences::*;
pub use saving::*;
pub use selection::*;

use crate::clock::{Clock, SystemClock};
use crate::config::{EditorConfig, Labels};
use crate::memo::{KeyedMemo, Memo};
use crate::state::{BlockMap, EditorState, Edits, Post};
use chrono::NaiveDateTime;
use scribe_blocks::{Block, BlockRegistry, BlockType, Serializer, Uid};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

type BlockDeps = (Option<Arc<Block>>, Arc<Edits>, Arc<Post>);
type BlocksDeps = (Arc<BlockMap>, Arc<Vec<Uid>>, Arc<Edits>, Arc<Post>);
type SelectionDeps = (Arc<Vec<Uid>>, Option<Uid>, Option<Uid>);
type SelectedBlocksDeps = (Arc<Vec<Uid>>, Arc<BlockMap>, Arc<Edits>, Arc<Post>);

/// Query context: collaborators plus memo caches
#[derive(Debug)]
pub struct Selectors {
    registry: Arc<BlockRegistry>,
    clock: Arc<dyn Clock>,
    labels: Labels,
    default_frequent_blocks: Vec<String>,
    max_frequent_blocks: usize,

    block: KeyedMemo<Uid, BlockDeps, Option<Arc<Block>>>,
    blocks: Memo<BlocksDeps, Arc<Vec<Arc<Block>>>>,
    content: Memo<BlocksDeps, Arc<str>>,
    multi_selected_uids: Memo<SelectionDeps, Arc<Vec<Uid>>>,
    multi_selected_blocks: Memo<SelectedBlocksDeps, Arc<Vec<Arc<Block>>>>,
}

impl Selectors {
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        Self::from_config(registry, &EditorConfig::default())
    }

    pub fn from_config(registry: Arc<BlockRegistry>, config: &EditorConfig) -> Self {
        Self {
            registry,
            clock: Arc::new(SystemClock),
            labels: config.labels.clone(),
            default_frequent_blocks: config.default_frequent_blocks.clone(),
            max_frequent_blocks: config.max_frequent_blocks,
            block: KeyedMemo::new("get_block"),
            blocks: Memo::new("get_blocks"),
            content: Memo::new("get_edited_post_content"),
            multi_selected_uids: Memo::new("get_multi_selected_block_uids"),
            multi_selected_blocks: Memo::new("get_multi_selected_blocks"),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.registry
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Drop every cached value
    pub fn clear_caches(&self) {
        self.block.clear();
        self.blocks.clear();
        self.content.clear();
        self.multi_selected_uids.clear();
        self.multi_selected_blocks.clear();
    }

    fn blocks_deps(state: &EditorState) -> BlocksDeps {
        let doc = state.present();
        (
            Arc::clone(doc.blocks_by_uid()),
            Arc::clone(doc.block_order()),
            Arc::clone(doc.edits()),
            Arc::clone(&state.current_post),
        )
    }

    /// Block with its meta-sourced attributes filled in from the post.
    ///
    /// Edited meta wins over saved meta. A block without meta attributes is
    /// returned as stored.
    pub fn get_block(&self, state: &EditorState, uid: &Uid) -> Option<Arc<Block>> {
        let doc = state.present();
        let stored = doc.block(uid).cloned();
        let deps = (
            stored.clone(),
            Arc::clone(doc.edits()),
            Arc::clone(&state.current_post),
        );

        self.block
            .get_or_compute(uid, deps, || stored.map(|block| self.with_meta_attributes(state, block)))
    }

    fn with_meta_attributes(&self, state: &EditorState, block: Arc<Block>) -> Arc<Block> {
        let Some(block_type) = self.registry.get(&block.name) else {
            return block;
        };

        let edited_meta = state.present().edits().get("meta");
        let mut merged: Option<Block> = None;

        for (attribute, key) in block_type.meta_attributes() {
            let value = edited_meta
                .and_then(|meta| meta.get(key))
                .or_else(|| state.current_post.meta.get(key));

            if let Some(value) = value {
                merged
                    .get_or_insert_with(|| block.as_ref().clone())
                    .attributes
                    .insert(attribute.to_string(), value.clone());
            }
        }

        merged.map(Arc::new).unwrap_or(block)
    }

    /// Blocks in document order.
    ///
    /// Recomputing also drops `get_block` slots for uids that left the document.
    pub fn get_blocks(&self, state: &EditorState) -> Arc<Vec<Arc<Block>>> {
        self.blocks.get_or_compute(Self::blocks_deps(state), || {
            let doc = state.present();
            let blocks = doc
                .block_order()
                .iter()
                .filter_map(|uid| self.get_block(state, uid))
                .collect();

            let present = doc.blocks_by_uid();
            self.block.retain(|uid| present.contains_key(uid));
            Arc::new(blocks)
        })
    }

    /// Block before `uid` in document order
    pub fn get_previous_block(&self, state: &EditorState, uid: &Uid) -> Option<Arc<Block>> {
        get_previous_block_uid(state, uid).and_then(|previous| self.get_block(state, previous))
    }

    /// Block after `uid` in document order
    pub fn get_next_block(&self, state: &EditorState, uid: &Uid) -> Option<Arc<Block>> {
        get_next_block_uid(state, uid).and_then(|next| self.get_block(state, next))
    }

    /// Post content as it would be saved: the edited raw content if any,
    /// otherwise the serialized blocks
    #[instrument(skip_all)]
    pub fn get_edited_post_content(&self, state: &EditorState) -> Arc<str> {
        self.content.get_or_compute(Self::blocks_deps(state), || {
            if let Some(Value::String(content)) = state.present().edits().get("content") {
                return Arc::from(content.as_str());
            }

            let blocks = self.get_blocks(state);
            let serializer = Serializer::new(&self.registry);
            Arc::from(serializer.serialize(blocks.iter().map(|block| block.as_ref())))
        })
    }

    pub fn get_selected_block(&self, state: &EditorState) -> Option<Arc<Block>> {
        get_selected_block_uid(state).and_then(|uid| self.get_block(state, uid))
    }

    /// Uids covered by the multi-selection, in document order
    pub fn get_multi_selected_block_uids(&self, state: &EditorState) -> Arc<Vec<Uid>> {
        let selection = &state.block_selection;
        let deps = (
            Arc::clone(state.present().block_order()),
            selection.start.clone(),
            selection.end.clone(),
        );

        self.multi_selected_uids
            .get_or_compute(deps, || Arc::new(multi_selected_span(state).to_vec()))
    }

    pub fn get_multi_selected_blocks(&self, state: &EditorState) -> Arc<Vec<Arc<Block>>> {
        let uids = self.get_multi_selected_block_uids(state);
        let doc = state.present();
        let deps = (
            Arc::clone(&uids),
            Arc::clone(doc.blocks_by_uid()),
            Arc::clone(doc.edits()),
            Arc::clone(&state.current_post),
        );

        self.multi_selected_blocks.get_or_compute(deps, || {
            let blocks = uids.iter().filter_map(|uid| self.get_block(state, uid)).collect();
            Arc::new(blocks)
        })
    }

    pub fn get_document_title(&self, state: &EditorState) -> String {
        get_document_title(state, &self.labels)
    }

    pub fn is_current_post_published(&self, state: &EditorState) -> bool {
        is_current_post_published(state, self.now())
    }

    pub fn is_edited_post_being_scheduled(&self, state: &EditorState) -> bool {
        is_edited_post_being_scheduled(state, self.now())
    }

    pub fn is_publishing_post(&self, state: &EditorState) -> bool {
        is_publishing_post(state, self.now())
    }

    pub fn get_most_frequently_used_blocks(&self, state: &EditorState) -> Vec<Arc<BlockType>> {
        get_most_frequently_used_blocks(
            state,
            &self.registry,
            &self.default_frequent_blocks,
            self.max_frequent_blocks,
        )
    }

    #[instrument(skip_all)]
    pub fn get_inserter_items(&self, state: &EditorState, allowed: &AllowedBlockTypes) -> Vec<InserterItem> {
        get_inserter_items(state, &self.registry, allowed)
    }

    pub fn get_recent_inserter_items(&self, state: &EditorState, allowed: &AllowedBlockTypes) -> Vec<InserterItem> {
        get_recent_inserter_items(state, &self.registry, allowed)
    }
}
