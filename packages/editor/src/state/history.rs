//! # Undo/Redo History
//!
//! Snapshot history of the document: `past`, `present`, `future`.
//!
//! ## Design
//!
//! - Pushing a new present moves the old one onto the past and clears the future
//! - Undo moves the present onto the future and restores the latest past entry
//! - Redo is the mirror of undo
//! - The past is capped at `max_levels` entries (0 = unlimited), oldest dropped first
//! - A dirty flag is tracked alongside; it is set by every history move and
//!   cleared when the present is marked as saved
//!
//! Snapshots are cheap to keep around: see [`DocumentSnapshot`](super::DocumentSnapshot).
//!
//! ## Example
//!
//! ```rust
//! use scribe_editor::History;
//!
//! let mut history = History::new(1);
//! history.push(2);
//! assert!(history.undo());
//! assert_eq!(*history.present(), 1);
//! assert!(history.redo());
//! assert_eq!(*history.present(), 2);
//! ```

use std::collections::VecDeque;

/// Default number of undo levels
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct History<T> {
    /// Older snapshots (most recent last)
    past: VecDeque<T>,

    present: T,

    /// Undone snapshots (next redo last)
    future: Vec<T>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    is_dirty: bool,
}

impl<T> History<T> {
    /// History with the default limit
    pub fn new(present: T) -> Self {
        Self::with_max_levels(present, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_levels(present: T, max_levels: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present,
            future: Vec::new(),
            max_levels,
            is_dirty: false,
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// Push a new present; the old one becomes undoable
    pub fn push(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push_back(previous);

        if self.max_levels > 0 && self.past.len() > self.max_levels {
            self.past.pop_front();
        }

        // New edit invalidates the future
        self.future.clear();
        self.is_dirty = true;
    }

    /// Swap the present without recording an undo step
    pub fn replace_present(&mut self, next: T) {
        self.present = next;
    }

    /// Undo the most recent change
    pub fn undo(&mut self) -> bool {
        match self.past.pop_back() {
            Some(previous) => {
                let undone = std::mem::replace(&mut self.present, previous);
                self.future.push(undone);
                self.is_dirty = true;
                true
            }
            None => false,
        }
    }

    /// Redo the most recently undone change
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(next) => {
                let previous = std::mem::replace(&mut self.present, next);
                self.past.push_back(previous);
                self.is_dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    /// Past snapshots, oldest first
    pub fn past(&self) -> impl Iterator<Item = &T> {
        self.past.iter()
    }

    /// Future snapshots, next redo first
    pub fn future(&self) -> impl Iterator<Item = &T> {
        self.future.iter().rev()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    /// The present matches what was last saved
    pub fn mark_clean(&mut self) {
        self.is_dirty = false;
    }

    /// Forget all undo/redo steps, keeping the present
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

impl<T: Default> Default for History<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
