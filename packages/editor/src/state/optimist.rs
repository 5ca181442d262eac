//! # Optimistic Transaction Ledger
//!
//! Ordered log of speculative mutations applied before the server answered.
//! Each pending entry holds the full editor state captured just before the
//! mutation, so it can be restored on failure and inspected by selectors
//! (e.g. "was the post published before this save started?").
//!
//! Entries are tagged variants rather than loose records: a resolved entry no
//! longer carries a before-state. The log keeps insertion order and an index
//! for O(1) lookup by transaction id. Once nothing is pending the log is
//! compacted.

use super::EditorState;
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Transaction id used by post saves
pub const POST_UPDATE_TRANSACTION_ID: &str = "post-update";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TransactionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone)]
pub enum EntryState {
    /// In flight; `None` when no prior state was recorded
    Pending { before_state: Option<Arc<EditorState>> },
    Committed,
    Reverted,
}

#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub id: TransactionId,
    pub state: EntryState,
}

impl LedgerEntry {
    pub fn is_pending(&self) -> bool {
        matches!(self.state, EntryState::Pending { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Commit,
    Revert,
}

#[derive(Debug, Clone, Default)]
pub struct OptimisticLedger {
    entries: Vec<LedgerEntry>,
    index: HashMap<TransactionId, usize>,
}

impl OptimisticLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction with the state preceding it
    pub fn record(&mut self, id: TransactionId, before_state: Option<Arc<EditorState>>) -> Result<(), LedgerError> {
        if self.is_pending(&id) {
            return Err(LedgerError::AlreadyPending(id));
        }

        // A reused id of a resolved entry starts a fresh entry
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push(LedgerEntry {
            id,
            state: EntryState::Pending { before_state },
        });
        Ok(())
    }

    /// State captured when `id` began, if it is still pending
    pub fn before_state(&self, id: &TransactionId) -> Option<&Arc<EditorState>> {
        let entry = self.index.get(id).and_then(|&position| self.entries.get(position))?;
        match &entry.state {
            EntryState::Pending { before_state } => before_state.as_ref(),
            _ => None,
        }
    }

    /// Resolve a pending transaction, handing back its before-state
    pub fn resolve(
        &mut self,
        id: &TransactionId,
        resolution: Resolution,
    ) -> Result<Option<Arc<EditorState>>, LedgerError> {
        let Some(&position) = self.index.get(id) else {
            warn!(transaction = %id, "Unknown optimistic transaction");
            return Err(LedgerError::UnknownTransaction(id.clone()));
        };

        let entry = &mut self.entries[position];
        let resolved = match resolution {
            Resolution::Commit => EntryState::Committed,
            Resolution::Revert => EntryState::Reverted,
        };

        let before_state = match std::mem::replace(&mut entry.state, resolved) {
            EntryState::Pending { before_state } => before_state,
            previous => {
                entry.state = previous;
                return Err(LedgerError::AlreadyResolved(id.clone()));
            }
        };

        self.compact();
        Ok(before_state)
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn is_pending(&self, id: &TransactionId) -> bool {
        self.index
            .get(id)
            .and_then(|&position| self.entries.get(position))
            .map(LedgerEntry::is_pending)
            .unwrap_or(false)
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_pending()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop the log once every transaction is resolved
    fn compact(&mut self) {
        if self.pending_count() == 0 {
            self.entries.clear();
            self.index.clear();
        }
    }
}

impl EditorState {
    /// Start an optimistic transaction, capturing the current state
    pub fn begin_optimistic(&mut self, id: impl Into<TransactionId>) -> Result<(), LedgerError> {
        let id = id.into();
        let before = Arc::new(self.clone());
        self.optimist.record(id.clone(), Some(before))?;

        info!(transaction = %id, pending = self.optimist.pending_count(), "Began optimistic transaction");
        Ok(())
    }

    /// The server accepted the transaction; keep the speculative state
    pub fn commit_optimistic(&mut self, id: impl Into<TransactionId>) -> Result<(), LedgerError> {
        let id = id.into();
        self.optimist.resolve(&id, Resolution::Commit)?;

        info!(transaction = %id, "Committed optimistic transaction");
        Ok(())
    }

    /// The server rejected the transaction; restore what it speculatively changed.
    ///
    /// Only the transaction subtree (document history, current post, save
    /// status) is restored. Other transactions that touched the same slices
    /// in the meantime are overwritten.
    pub fn revert_optimistic(&mut self, id: impl Into<TransactionId>) -> Result<(), LedgerError> {
        let id = id.into();
        let before = self.optimist.resolve(&id, Resolution::Revert)?;

        if let Some(before) = before {
            self.editor = before.editor.clone();
            self.current_post = Arc::clone(&before.current_post);
            self.saving = before.saving.clone();
        }

        info!(transaction = %id, "Reverted optimistic transaction");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_lookup() {
        let mut ledger = OptimisticLedger::new();
        let before = Arc::new(EditorState::default());

        ledger.record("a".into(), Some(Arc::clone(&before))).unwrap();

        assert!(ledger.is_pending(&"a".into()));
        assert!(Arc::ptr_eq(ledger.before_state(&"a".into()).unwrap(), &before));
        assert!(ledger.before_state(&"b".into()).is_none());
    }

    #[test]
    fn test_duplicate_pending_rejected() {
        let mut ledger = OptimisticLedger::new();
        ledger.record("a".into(), None).unwrap();

        assert_eq!(
            ledger.record("a".into(), None).unwrap_err(),
            LedgerError::AlreadyPending("a".into())
        );
    }

    #[test]
    fn test_resolve_unknown() {
        let mut ledger = OptimisticLedger::new();

        assert_eq!(
            ledger.resolve(&"x".into(), Resolution::Commit).unwrap_err(),
            LedgerError::UnknownTransaction("x".into())
        );
    }

    #[test]
    fn test_resolved_entry_has_no_before_state() {
        let mut ledger = OptimisticLedger::new();
        ledger.record("a".into(), Some(Arc::new(EditorState::default()))).unwrap();
        ledger.record("b".into(), None).unwrap();

        ledger.resolve(&"a".into(), Resolution::Commit).unwrap();

        assert!(ledger.before_state(&"a".into()).is_none());
        assert_eq!(
            ledger.resolve(&"a".into(), Resolution::Revert).unwrap_err(),
            LedgerError::AlreadyResolved("a".into())
        );
        assert_eq!(ledger.entries().len(), 2);
    }

    #[test]
    fn test_compacts_when_nothing_pending() {
        let mut ledger = OptimisticLedger::new();
        ledger.record("a".into(), None).unwrap();
        ledger.record("b".into(), None).unwrap();

        ledger.resolve(&"a".into(), Resolution::Commit).unwrap();
        ledger.resolve(&"b".into(), Resolution::Revert).unwrap();

        assert!(ledger.is_empty());
        assert_eq!(ledger.pending_count(), 0);
    }
}
