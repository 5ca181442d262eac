//! # Scribe Editor
//!
//! Editor state and the derived-state query layer over it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: block types + serialization         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: state + derived queries             │
//! │  - DocumentSnapshot: Arc-shared slices      │
//! │  - History: past / present / future         │
//! │  - OptimisticLedger: in-flight saves        │
//! │  - Selectors: pure, memoized queries        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ bus: post-updated events to the host        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **State is immutable between changes**: every change produces a new
//!    snapshot that shares whatever it did not touch
//! 2. **Selectors are pure**: same state in, same answer out
//! 3. **Memoization by identity**: cached values live until one of their
//!    declared inputs is replaced
//! 4. **No globals**: registry, clock, caches and bus are owned by the caller
//!
//! ## Usage
//!
//! ```rust
//! use scribe_blocks::{Block, BlockRegistry};
//! use scribe_editor::{selectors, EditorConfig, Selectors};
//! use std::sync::Arc;
//!
//! let config = EditorConfig::default();
//! let selectors = Selectors::from_config(Arc::new(BlockRegistry::with_core_types()), &config);
//!
//! let mut state = config.initial_state();
//! state.reset_blocks(vec![Block::new("1", "core/paragraph")]).unwrap();
//! state
//!     .edit_document(|doc| doc.with_block_inserted(Block::new("2", "core/image"), None))
//!     .unwrap();
//!
//! assert!(selectors::has_editor_undo(&state));
//! assert_eq!(selectors.get_blocks(&state).len(), 2);
//! assert_eq!(selectors.get_document_title(&state), "(Untitled)");
//! ```

mod bus;
mod clock;
mod config;
mod errors;
mod memo;
pub mod selectors;
mod state;

pub use bus::{ContentNotifier, EventBus, PostUpdated, POST_UPDATED};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EditorConfig, Labels, DEFAULT_CONFIG_NAME};
pub use errors::{ConfigError, DocumentError, EditorError, LedgerError};
pub use memo::{Dependency, KeyedMemo, Memo, MemoStats};
pub use selectors::{AllowedBlockTypes, InserterItem, PostVisibility, Selectors};
pub use state::*;
