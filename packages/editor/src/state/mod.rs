//! # Editor State
//!
//! The root state tree the selectors read. Reducers live outside this crate;
//! what is here is the shape plus the few transitions that must keep
//! invariants (history pushes, optimistic transactions).

mod document;
mod history;
mod meta;
mod optimist;
mod post;
mod preferences;
mod selection;

pub use document::{BlockMap, DocumentSnapshot, Edits};
pub use history::{History, DEFAULT_HISTORY_LIMIT};
pub use meta::{MetaBoxState, MetaBoxes, Notice, NoticeStatus, ReusableBlock, ReusableBlocksState, SavingState};
pub use optimist::{
    EntryState, LedgerEntry, OptimisticLedger, Resolution, TransactionId, POST_UPDATE_TRANSACTION_ID,
};
pub use post::{parse_post_date, Post, PostStatus, Revisions};
pub use preferences::{EditorMode, Preferences, ViewportType};
pub use selection::{BlockMode, BlockSelection, InsertionPointOverride};

use crate::errors::DocumentError;
use scribe_blocks::{Block, Uid};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct EditorState {
    /// Document snapshots with undo/redo
    pub editor: History<DocumentSnapshot>,

    /// Post as last saved on the server
    pub current_post: Arc<Post>,

    pub block_selection: BlockSelection,

    pub hovered_block: Option<Uid>,

    pub blocks_mode: HashMap<Uid, BlockMode>,

    pub is_typing: bool,

    pub block_insertion_point: InsertionPointOverride,

    pub preferences: Preferences,

    pub saving: SavingState,

    pub notices: Vec<Notice>,

    pub meta_boxes: MetaBoxes,

    pub is_saving_meta_boxes: bool,

    pub reusable_blocks: ReusableBlocksState,

    /// Whether the live viewport is mobile-sized
    pub mobile: bool,

    pub publish_sidebar_active: bool,

    pub optimist: OptimisticLedger,
}

impl EditorState {
    pub fn new(history_limit: usize, preferences: Preferences) -> Self {
        Self {
            editor: History::with_max_levels(DocumentSnapshot::new(), history_limit),
            preferences,
            ..Self::default()
        }
    }

    /// Current document snapshot
    pub fn present(&self) -> &DocumentSnapshot {
        self.editor.present()
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.current_post = Arc::new(post);
        self
    }

    /// Replace the document without an undo step, e.g. on initial load
    pub fn reset_blocks<I>(&mut self, blocks: I) -> Result<(), DocumentError>
    where
        I: IntoIterator<Item = Block>,
    {
        let snapshot = DocumentSnapshot::from_blocks(blocks)?;
        self.editor = History::with_max_levels(snapshot, self.editor_history_limit());
        Ok(())
    }

    /// Record a new document snapshot as an undoable step
    pub fn push_document(&mut self, snapshot: DocumentSnapshot) {
        self.editor.push(snapshot);
    }

    /// Apply a fallible snapshot transformation as an undoable step
    pub fn edit_document<F>(&mut self, edit: F) -> Result<(), DocumentError>
    where
        F: FnOnce(&DocumentSnapshot) -> Result<DocumentSnapshot, DocumentError>,
    {
        let next = edit(self.present())?;
        self.editor.push(next);
        Ok(())
    }

    fn editor_history_limit(&self) -> usize {
        self.editor.max_levels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_document_is_undoable() {
        let mut state = EditorState::default();
        state.reset_blocks(vec![Block::new("1", "core/paragraph")]).unwrap();
        assert!(!state.editor.can_undo());

        state
            .edit_document(|doc| doc.with_block_inserted(Block::new("2", "core/image"), None))
            .unwrap();

        assert_eq!(state.present().len(), 2);
        assert!(state.editor.can_undo());
        assert!(state.editor.is_dirty());
    }

    #[test]
    fn test_failed_edit_leaves_history_alone() {
        let mut state = EditorState::default();
        let result = state.edit_document(|doc| doc.with_block_removed(&Uid::from("nope")));

        assert!(result.is_err());
        assert!(!state.editor.can_undo());
    }

    #[test]
    fn test_reset_keeps_history_limit() {
        let mut state = EditorState::new(5, Preferences::default());
        state.reset_blocks(Vec::<Block>::new()).unwrap();

        assert_eq!(state.editor.max_levels(), 5);
    }
}
