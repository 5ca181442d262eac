//! Reusable blocks, meta boxes and notices

use crate::state::{EditorState, MetaBoxState, MetaBoxes, Notice, ReusableBlock};
use std::sync::Arc;

pub fn get_reusable_block<'s>(state: &'s EditorState, id: &str) -> Option<&'s Arc<ReusableBlock>> {
    state.reusable_blocks.data.get(id)
}

/// Reusable blocks in the order they were received
pub fn get_reusable_blocks(state: &EditorState) -> Vec<Arc<ReusableBlock>> {
    state.reusable_blocks.data.values().cloned().collect()
}

pub fn is_saving_reusable_block(state: &EditorState, id: &str) -> bool {
    state.reusable_blocks.is_saving.get(id).copied().unwrap_or(false)
}

/// Any meta box location is active
pub fn has_meta_boxes(state: &EditorState) -> bool {
    state.meta_boxes.values().any(|meta_box| meta_box.is_active)
}

pub fn get_meta_boxes(state: &EditorState) -> &MetaBoxes {
    &state.meta_boxes
}

pub fn get_meta_box<'s>(state: &'s EditorState, location: &str) -> Option<&'s MetaBoxState> {
    state.meta_boxes.get(location)
}

pub fn is_saving_meta_boxes(state: &EditorState) -> bool {
    state.is_saving_meta_boxes
}

pub fn get_notices(state: &EditorState) -> &[Notice] {
    &state.notices
}
