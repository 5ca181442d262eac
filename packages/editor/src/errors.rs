//! Error types for the editor

use crate::state::TransactionId;
use scribe_blocks::Uid;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Optimistic transaction error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Block registry error: {0}")]
    Registry(#[from] scribe_blocks::RegistryError),
}

/// Structural edits on a document snapshot
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Block not found: {0}")]
    BlockNotFound(Uid),

    #[error("Block already exists: {0}")]
    DuplicateUid(Uid),

    #[error("Index {index} out of bounds for {len} blocks")]
    IndexOutOfBounds { index: usize, len: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("No optimistic transaction with id {0}")]
    UnknownTransaction(TransactionId),

    #[error("Optimistic transaction {0} was already resolved")]
    AlreadyResolved(TransactionId),

    #[error("Optimistic transaction {0} is already pending")]
    AlreadyPending(TransactionId),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
