//! # Document Snapshot
//!
//! One immutable version of the document: blocks by uid, their order, and
//! the edits overlay on post-level fields.
//!
//! Every slice sits behind an `Arc`. Cloning a snapshot is O(1), and a new
//! snapshot produced by an edit shares every slice it did not touch with its
//! predecessor. Memoized selectors rely on this: a slice that was not
//! replaced keeps its pointer identity.
//!
//! ## Invariants
//!
//! - `block_order` and `blocks_by_uid` hold exactly the same uids
//! - `block_order` has no duplicates and is the only source of sequencing

use crate::errors::DocumentError;
use indexmap::IndexMap;
use scribe_blocks::{Attributes, Block, Uid};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Blocks keyed by uid (unordered)
pub type BlockMap = HashMap<Uid, Arc<Block>>;

/// Unsaved post-level edits keyed by field name
pub type Edits = IndexMap<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct DocumentSnapshot {
    blocks_by_uid: Arc<BlockMap>,
    block_order: Arc<Vec<Uid>>,
    edits: Arc<Edits>,
}

impl DocumentSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot holding the given blocks in order
    pub fn from_blocks<I>(blocks: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = Block>,
    {
        let mut blocks_by_uid = BlockMap::new();
        let mut block_order = Vec::new();

        for block in blocks {
            if blocks_by_uid.contains_key(&block.uid) {
                return Err(DocumentError::DuplicateUid(block.uid));
            }
            block_order.push(block.uid.clone());
            blocks_by_uid.insert(block.uid.clone(), Arc::new(block));
        }

        Ok(Self {
            blocks_by_uid: Arc::new(blocks_by_uid),
            block_order: Arc::new(block_order),
            edits: Arc::new(Edits::new()),
        })
    }

    pub fn blocks_by_uid(&self) -> &Arc<BlockMap> {
        &self.blocks_by_uid
    }

    pub fn block_order(&self) -> &Arc<Vec<Uid>> {
        &self.block_order
    }

    pub fn edits(&self) -> &Arc<Edits> {
        &self.edits
    }

    pub fn block(&self, uid: &Uid) -> Option<&Arc<Block>> {
        self.blocks_by_uid.get(uid)
    }

    pub fn len(&self) -> usize {
        self.block_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block_order.is_empty()
    }

    /// Insert a block at `index`, or at the end when `None`
    pub fn with_block_inserted(&self, block: Block, index: Option<usize>) -> Result<Self, DocumentError> {
        if self.blocks_by_uid.contains_key(&block.uid) {
            return Err(DocumentError::DuplicateUid(block.uid));
        }
        let len = self.block_order.len();
        let index = index.unwrap_or(len);
        if index > len {
            return Err(DocumentError::IndexOutOfBounds { index, len });
        }

        let mut order = self.block_order.as_ref().clone();
        order.insert(index, block.uid.clone());

        let mut blocks = self.blocks_by_uid.as_ref().clone();
        blocks.insert(block.uid.clone(), Arc::new(block));

        Ok(Self {
            blocks_by_uid: Arc::new(blocks),
            block_order: Arc::new(order),
            edits: Arc::clone(&self.edits),
        })
    }

    /// Merge attributes into an existing block. Order is untouched.
    pub fn with_attributes_updated(&self, uid: &Uid, attributes: Attributes) -> Result<Self, DocumentError> {
        let current = self
            .blocks_by_uid
            .get(uid)
            .ok_or_else(|| DocumentError::BlockNotFound(uid.clone()))?;

        let mut block = current.as_ref().clone();
        block.attributes.extend(attributes);

        let mut blocks = self.blocks_by_uid.as_ref().clone();
        blocks.insert(uid.clone(), Arc::new(block));

        Ok(Self {
            blocks_by_uid: Arc::new(blocks),
            block_order: Arc::clone(&self.block_order),
            edits: Arc::clone(&self.edits),
        })
    }

    pub fn with_block_removed(&self, uid: &Uid) -> Result<Self, DocumentError> {
        if !self.blocks_by_uid.contains_key(uid) {
            return Err(DocumentError::BlockNotFound(uid.clone()));
        }

        let mut blocks = self.blocks_by_uid.as_ref().clone();
        blocks.remove(uid);
        let order: Vec<Uid> = self.block_order.iter().filter(|u| *u != uid).cloned().collect();

        Ok(Self {
            blocks_by_uid: Arc::new(blocks),
            block_order: Arc::new(order),
            edits: Arc::clone(&self.edits),
        })
    }

    /// Move a block to `index` in the final order. Blocks are untouched.
    pub fn with_block_moved(&self, uid: &Uid, index: usize) -> Result<Self, DocumentError> {
        let from = self
            .block_order
            .iter()
            .position(|u| u == uid)
            .ok_or_else(|| DocumentError::BlockNotFound(uid.clone()))?;
        let len = self.block_order.len();
        if index >= len {
            return Err(DocumentError::IndexOutOfBounds { index, len });
        }

        let mut order = self.block_order.as_ref().clone();
        let moved = order.remove(from);
        order.insert(index, moved);

        Ok(Self {
            blocks_by_uid: Arc::clone(&self.blocks_by_uid),
            block_order: Arc::new(order),
            edits: Arc::clone(&self.edits),
        })
    }

    /// Record an edit to a post-level field
    pub fn with_edit(&self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut edits = self.edits.as_ref().clone();
        edits.insert(field.into(), value.into());

        Self {
            blocks_by_uid: Arc::clone(&self.blocks_by_uid),
            block_order: Arc::clone(&self.block_order),
            edits: Arc::new(edits),
        }
    }

    /// Drop all edits, e.g. once they were saved
    pub fn without_edits(&self) -> Self {
        Self {
            blocks_by_uid: Arc::clone(&self.blocks_by_uid),
            block_order: Arc::clone(&self.block_order),
            edits: Arc::new(Edits::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paragraphs(uids: &[&str]) -> DocumentSnapshot {
        DocumentSnapshot::from_blocks(uids.iter().map(|uid| Block::new(*uid, "core/paragraph"))).unwrap()
    }

    #[test]
    fn test_from_blocks_keeps_order() {
        let doc = paragraphs(&["123", "23"]);

        assert_eq!(doc.block_order().as_slice(), &[Uid::from("123"), Uid::from("23")]);
        assert_eq!(doc.blocks_by_uid().len(), 2);
    }

    #[test]
    fn test_from_blocks_rejects_duplicates() {
        let result = DocumentSnapshot::from_blocks(vec![
            Block::new("1", "core/paragraph"),
            Block::new("1", "core/image"),
        ]);

        assert_eq!(result.unwrap_err(), DocumentError::DuplicateUid(Uid::from("1")));
    }

    #[test]
    fn test_edit_shares_block_slices() {
        let doc = paragraphs(&["1", "2"]);
        let edited = doc.with_edit("title", "Hello");

        assert!(Arc::ptr_eq(doc.blocks_by_uid(), edited.blocks_by_uid()));
        assert!(Arc::ptr_eq(doc.block_order(), edited.block_order()));
        assert!(!Arc::ptr_eq(doc.edits(), edited.edits()));
        assert_eq!(edited.edits().get("title"), Some(&json!("Hello")));
    }

    #[test]
    fn test_attribute_update_keeps_other_blocks() {
        let doc = paragraphs(&["1", "2"]);
        let mut attributes = Attributes::new();
        attributes.insert("content".to_string(), json!("changed"));

        let updated = doc.with_attributes_updated(&Uid::from("1"), attributes).unwrap();

        assert!(Arc::ptr_eq(doc.block_order(), updated.block_order()));
        assert!(Arc::ptr_eq(
            doc.block(&Uid::from("2")).unwrap(),
            updated.block(&Uid::from("2")).unwrap()
        ));
        assert_eq!(
            updated.block(&Uid::from("1")).unwrap().attribute("content"),
            Some(&json!("changed"))
        );
    }

    #[test]
    fn test_insert_remove_move() {
        let doc = paragraphs(&["1", "2"]);

        let doc = doc.with_block_inserted(Block::new("3", "core/image"), Some(0)).unwrap();
        assert_eq!(doc.block_order().as_slice(), &[Uid::from("3"), Uid::from("1"), Uid::from("2")]);

        let doc = doc.with_block_moved(&Uid::from("3"), 2).unwrap();
        assert_eq!(doc.block_order().as_slice(), &[Uid::from("1"), Uid::from("2"), Uid::from("3")]);

        let doc = doc.with_block_removed(&Uid::from("2")).unwrap();
        assert_eq!(doc.block_order().as_slice(), &[Uid::from("1"), Uid::from("3")]);
        assert_eq!(doc.blocks_by_uid().len(), 2);
    }

    #[test]
    fn test_structural_errors() {
        let doc = paragraphs(&["1"]);

        assert_eq!(
            doc.with_block_removed(&Uid::from("9")).unwrap_err(),
            DocumentError::BlockNotFound(Uid::from("9"))
        );
        assert_eq!(
            doc.with_block_inserted(Block::new("2", "core/paragraph"), Some(5)).unwrap_err(),
            DocumentError::IndexOutOfBounds { index: 5, len: 1 }
        );
        assert_eq!(
            doc.with_block_moved(&Uid::from("1"), 1).unwrap_err(),
            DocumentError::IndexOutOfBounds { index: 1, len: 1 }
        );
    }
}
