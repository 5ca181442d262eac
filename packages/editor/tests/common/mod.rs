//! Shared fixtures for editor integration tests

#![allow(dead_code)]

use scribe_blocks::{Block, BlockRegistry, BlockType};
use scribe_editor::{EditorState, Post, PostStatus, Selectors};
use std::sync::Arc;

pub fn registry() -> Arc<BlockRegistry> {
    let mut registry = BlockRegistry::with_core_types();
    registry
        .register(
            BlockType::new("core/test-block", "test block")
                .with_icon("test")
                .with_keywords(["testing"])
                .use_once(),
        )
        .expect("test block registers");
    Arc::new(registry)
}

pub fn selectors() -> Selectors {
    Selectors::new(registry())
}

/// Paragraph blocks with the given uids, in order
pub fn paragraphs(uids: &[&str]) -> Vec<Block> {
    uids.iter().map(|uid| Block::new(*uid, "core/paragraph")).collect()
}

pub fn state_with_blocks(blocks: Vec<Block>) -> EditorState {
    let mut state = EditorState::default();
    state.reset_blocks(blocks).expect("unique uids");
    state
}

pub fn state_with_post(status: PostStatus) -> EditorState {
    EditorState::default().with_post(Post::new(1, status))
}

/// Install a `tracing` subscriber honoring `RUST_LOG`, once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
