//! # Scribe Blocks
//!
//! Block model shared by the editor crates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: block types + serialization         │
//! │  - Block / Uid instances                    │
//! │  - BlockType: inserter metadata, attribute  │
//! │    sources, save function                   │
//! │  - BlockRegistry: owned, injected           │
//! │  - Serializer: blocks → post content        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: state + derived queries             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use scribe_blocks::{serialize, Block, BlockRegistry};
//!
//! let registry = BlockRegistry::with_core_types();
//! let block = Block::new("1", "core/paragraph").with_attribute("content", "Hello");
//!
//! assert_eq!(
//!     serialize([&block], &registry),
//!     "<!-- wp:paragraph -->\n<p>Hello</p>\n<!-- /wp:paragraph -->"
//! );
//! ```

mod block;
mod block_type;
mod error;
mod registry;
mod serializer;

pub use block::{Attributes, Block, Uid};
pub use block_type::{AttributeKind, AttributeSchema, AttributeSource, BlockType, SaveFn};
pub use error::RegistryError;
pub use registry::{BlockRegistry, PARAGRAPH_BLOCK_NAME, REUSABLE_BLOCK_NAME};
pub use serializer::{serialize, serialize_attributes, Serializer};
