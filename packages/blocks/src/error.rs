//! Error types for block registration

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Block type already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Invalid block name {0:?}: expected namespace/name in lowercase")]
    InvalidName(String),

    #[error("Block type needs a title: {0}")]
    MissingTitle(String),
}
