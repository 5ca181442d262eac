//! Selection, hover, typing and insertion point queries

use super::document::get_block_index;
use super::preferences::get_editor_mode;
use crate::state::{BlockMode, EditorMode, EditorState};
use scribe_blocks::Uid;
use serde_json::Value;

/// Uid of the single selected block, when it exists in the document
pub fn get_selected_block_uid(state: &EditorState) -> Option<&Uid> {
    let selection = &state.block_selection;
    match (&selection.start, &selection.end) {
        (Some(start), Some(end)) if start == end && state.present().block(start).is_some() => Some(start),
        _ => None,
    }
}

/// Slice of the block order covered by a multi-selection, in document order.
///
/// Empty unless both endpoints are set, distinct and present in the order.
pub fn multi_selected_span(state: &EditorState) -> &[Uid] {
    let selection = &state.block_selection;
    let (Some(start), Some(end)) = (&selection.start, &selection.end) else {
        return &[];
    };
    if start == end {
        return &[];
    }

    let order = state.present().block_order().as_slice();
    let (Some(start_index), Some(end_index)) = (
        order.iter().position(|uid| uid == start),
        order.iter().position(|uid| uid == end),
    ) else {
        return &[];
    };

    let (from, to) = if start_index <= end_index {
        (start_index, end_index)
    } else {
        (end_index, start_index)
    };
    &order[from..=to]
}

pub fn get_first_multi_selected_block_uid(state: &EditorState) -> Option<&Uid> {
    multi_selected_span(state).first()
}

pub fn get_last_multi_selected_block_uid(state: &EditorState) -> Option<&Uid> {
    multi_selected_span(state).last()
}

/// Where the multi-selection started (the anchor), regardless of order
pub fn get_multi_selected_blocks_start_uid(state: &EditorState) -> Option<&Uid> {
    let selection = &state.block_selection;
    if selection.is_multi() {
        selection.start.as_ref()
    } else {
        None
    }
}

/// Where the multi-selection ended (the extent), regardless of order
pub fn get_multi_selected_blocks_end_uid(state: &EditorState) -> Option<&Uid> {
    let selection = &state.block_selection;
    if selection.is_multi() {
        selection.end.as_ref()
    } else {
        None
    }
}

/// Sole selected block
pub fn is_block_selected(state: &EditorState, uid: &Uid) -> bool {
    let selection = &state.block_selection;
    selection.start.as_ref() == Some(uid) && selection.end.as_ref() == Some(uid)
}

/// In the multi-selection span, excluding its last position
pub fn is_block_within_selection(state: &EditorState, uid: &Uid) -> bool {
    let span = multi_selected_span(state);
    match span.iter().position(|candidate| candidate == uid) {
        Some(index) => index + 1 < span.len(),
        None => false,
    }
}

pub fn is_block_multi_selected(state: &EditorState, uid: &Uid) -> bool {
    multi_selected_span(state).contains(uid)
}

pub fn is_first_multi_selected_block(state: &EditorState, uid: &Uid) -> bool {
    get_first_multi_selected_block_uid(state) == Some(uid)
}

/// Focus descriptor of a block, if it holds the selection or its start
pub fn get_block_focus<'s>(state: &'s EditorState, uid: &Uid) -> Option<&'s Value> {
    let selection = &state.block_selection;
    if is_block_selected(state, uid) || selection.start.as_ref() == Some(uid) {
        selection.focus.as_ref()
    } else {
        None
    }
}

pub fn is_block_hovered(state: &EditorState, uid: &Uid) -> bool {
    state.hovered_block.as_ref() == Some(uid)
}

pub fn get_block_mode(state: &EditorState, uid: &Uid) -> BlockMode {
    state.blocks_mode.get(uid).copied().unwrap_or_default()
}

pub fn is_typing(state: &EditorState) -> bool {
    state.is_typing
}

pub fn is_selection_enabled(state: &EditorState) -> bool {
    state.block_selection.is_enabled
}

/// Explicit insertion position set by the sibling inserter
pub fn get_block_sibling_inserter_position(state: &EditorState) -> Option<usize> {
    state.block_insertion_point.position
}

pub fn is_block_insertion_point_visible(state: &EditorState) -> bool {
    state.block_insertion_point.visible
}

/// Index at which a newly inserted block lands.
///
/// Text mode always appends. Otherwise an explicit position wins, then the
/// slot after the multi-selection, then the slot after the selected block.
pub fn get_block_insertion_point(state: &EditorState) -> usize {
    let len = state.present().len();
    if get_editor_mode(state) != EditorMode::Visual {
        return len;
    }

    if let Some(position) = get_block_sibling_inserter_position(state) {
        return position;
    }

    let after = get_last_multi_selected_block_uid(state).or_else(|| get_selected_block_uid(state));
    after
        .and_then(|uid| get_block_index(state, uid))
        .map(|index| index + 1)
        .unwrap_or(len)
}
