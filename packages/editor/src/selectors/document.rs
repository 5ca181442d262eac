//! Document, history and current-post queries

use crate::state::{EditorState, Edits, Post, PostStatus};
use scribe_blocks::Uid;
use serde_json::Value;
use std::sync::Arc;

pub fn has_editor_undo(state: &EditorState) -> bool {
    state.editor.can_undo()
}

pub fn has_editor_redo(state: &EditorState) -> bool {
    state.editor.can_redo()
}

pub fn get_block_count(state: &EditorState) -> usize {
    state.present().len()
}

/// Uids in document order
pub fn get_block_uids(state: &EditorState) -> &[Uid] {
    state.present().block_order().as_slice()
}

pub fn get_block_index(state: &EditorState, uid: &Uid) -> Option<usize> {
    get_block_uids(state).iter().position(|candidate| candidate == uid)
}

pub fn is_first_block(state: &EditorState, uid: &Uid) -> bool {
    get_block_uids(state).first() == Some(uid)
}

pub fn is_last_block(state: &EditorState, uid: &Uid) -> bool {
    get_block_uids(state).last() == Some(uid)
}

/// Uid of the block before `uid`, if any
pub fn get_previous_block_uid<'s>(state: &'s EditorState, uid: &Uid) -> Option<&'s Uid> {
    let index = get_block_index(state, uid)?;
    index.checked_sub(1).and_then(|previous| get_block_uids(state).get(previous))
}

/// Uid of the block after `uid`, if any
pub fn get_next_block_uid<'s>(state: &'s EditorState, uid: &Uid) -> Option<&'s Uid> {
    let index = get_block_index(state, uid)?;
    get_block_uids(state).get(index + 1)
}

pub fn is_edited_post_dirty(state: &EditorState) -> bool {
    state.editor.is_dirty()
}

/// The post has never been saved by the user
pub fn is_edited_post_new(state: &EditorState) -> bool {
    state.current_post.status == PostStatus::AutoDraft
}

/// A fresh post the user has not touched yet
pub fn is_clean_new_post(state: &EditorState) -> bool {
    !is_edited_post_dirty(state) && is_edited_post_new(state) && !super::has_meta_boxes(state)
}

pub fn get_post_edits(state: &EditorState) -> &Edits {
    state.present().edits()
}

/// Edited value of a post field, falling back to the saved value.
///
/// An edit of `null` wins over the saved value and reads as `Some(Null)`.
pub fn get_edited_post_attribute(state: &EditorState, name: &str) -> Option<Value> {
    match get_post_edits(state).get(name) {
        Some(edit) => Some(edit.clone()),
        None => state.current_post.attribute(name),
    }
}

pub fn get_current_post(state: &EditorState) -> &Arc<Post> {
    &state.current_post
}

pub fn get_current_post_id(state: &EditorState) -> Option<u64> {
    state.current_post.id
}

pub fn get_current_post_last_revision_id(state: &EditorState) -> Option<u64> {
    state.current_post.revisions.as_ref().and_then(|revisions| revisions.last_id)
}

pub fn get_current_post_revisions_count(state: &EditorState) -> u64 {
    state
        .current_post
        .revisions
        .as_ref()
        .map(|revisions| revisions.count)
        .unwrap_or(0)
}

pub fn get_current_post_type(state: &EditorState) -> Option<&str> {
    state.current_post.post_type.as_deref()
}
