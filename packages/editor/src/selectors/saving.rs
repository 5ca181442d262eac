//! Save status and optimistic publish detection

use super::post::{is_current_post_published, is_post_published};
use crate::state::{EditorState, TransactionId, POST_UPDATE_TRANSACTION_ID};
use chrono::NaiveDateTime;
use std::sync::Arc;

pub fn is_saving_post(state: &EditorState) -> bool {
    state.saving.requesting || state.is_saving_meta_boxes
}

pub fn did_post_save_request_succeed(state: &EditorState) -> bool {
    state.saving.successful
}

pub fn did_post_save_request_fail(state: &EditorState) -> bool {
    state.saving.error.is_some()
}

/// State captured when a still-pending optimistic transaction began
pub fn get_state_before_optimistic_transaction<'s>(
    state: &'s EditorState,
    id: &TransactionId,
) -> Option<&'s Arc<EditorState>> {
    state.optimist.before_state(id)
}

/// A save is turning an unpublished post into a published one.
///
/// The current post already reads as published because the save was applied
/// optimistically; the state before the `post-update` transaction tells
/// whether it was published before.
pub fn is_publishing_post(state: &EditorState, now: NaiveDateTime) -> bool {
    if !is_saving_post(state) || !is_current_post_published(state, now) {
        return false;
    }

    let id = TransactionId::from(POST_UPDATE_TRANSACTION_ID);
    match get_state_before_optimistic_transaction(state, &id) {
        Some(before) => !is_post_published(&before.current_post, now),
        None => false,
    }
}
