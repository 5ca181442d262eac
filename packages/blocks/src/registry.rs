//! # Block Type Registry
//!
//! Owned collection of registered block types. The editor receives a registry
//! when its query context is built; nothing here is process-global.

use crate::block::Attributes;
use crate::block_type::{AttributeKind, AttributeSchema, BlockType};
use crate::RegistryError;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Name of the block type that wraps reusable blocks
pub const REUSABLE_BLOCK_NAME: &str = "core/block";

/// Name of the default text block
pub const PARAGRAPH_BLOCK_NAME: &str = "core/paragraph";

/// Registered block types, in registration order
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    types: IndexMap<String, Arc<BlockType>>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Registry preloaded with the core block types
    pub fn with_core_types() -> Self {
        let types = core_block_types()
            .into_iter()
            .map(|block_type| (block_type.name.clone(), Arc::new(block_type)))
            .collect();
        Self { types }
    }

    /// Register a block type
    pub fn register(&mut self, block_type: BlockType) -> Result<Arc<BlockType>, RegistryError> {
        if !is_valid_name(&block_type.name) {
            return Err(RegistryError::InvalidName(block_type.name));
        }
        if block_type.title.trim().is_empty() {
            return Err(RegistryError::MissingTitle(block_type.name));
        }
        if self.types.contains_key(&block_type.name) {
            return Err(RegistryError::AlreadyRegistered(block_type.name));
        }

        debug!(block_name = %block_type.name, "Registering block type");
        let block_type = Arc::new(block_type);
        self.types
            .insert(block_type.name.clone(), Arc::clone(&block_type));
        Ok(block_type)
    }

    /// Remove a block type, returning it if it was registered
    pub fn unregister(&mut self, name: &str) -> Option<Arc<BlockType>> {
        self.types.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<BlockType>> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<BlockType>> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// `namespace/name`, both parts lowercase alphanumerics and dashes
fn is_valid_name(name: &str) -> bool {
    let Some((namespace, local)) = name.split_once('/') else {
        return false;
    };

    let valid_part = |part: &str| {
        part.chars().next().is_some_and(|c| c.is_ascii_lowercase())
            && part
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    };

    valid_part(namespace) && valid_part(local)
}

fn text_attribute(attributes: &Attributes, key: &str) -> String {
    match attributes.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn save_paragraph(attributes: &Attributes) -> String {
    format!("<p>{}</p>", text_attribute(attributes, "content"))
}

fn save_heading(attributes: &Attributes) -> String {
    let level = attributes
        .get("level")
        .and_then(Value::as_u64)
        .unwrap_or(2);
    format!("<h{level}>{}</h{level}>", text_attribute(attributes, "content"))
}

fn save_image(attributes: &Attributes) -> String {
    let url = text_attribute(attributes, "url");
    let alt = text_attribute(attributes, "alt");
    format!("<figure class=\"wp-block-image\"><img src=\"{url}\" alt=\"{alt}\"/></figure>")
}

fn save_quote(attributes: &Attributes) -> String {
    let citation = text_attribute(attributes, "citation");
    let value = text_attribute(attributes, "value");
    if citation.is_empty() {
        format!("<blockquote class=\"wp-block-quote\">{value}</blockquote>")
    } else {
        format!("<blockquote class=\"wp-block-quote\">{value}<cite>{citation}</cite></blockquote>")
    }
}

fn save_embed(attributes: &Attributes) -> String {
    let url = text_attribute(attributes, "url");
    if url.is_empty() {
        return String::new();
    }
    format!("<figure class=\"wp-block-embed\">\n{url}\n</figure>")
}

fn core_block_types() -> Vec<BlockType> {
    vec![
        BlockType::new(PARAGRAPH_BLOCK_NAME, "Paragraph")
            .with_icon("editor-paragraph")
            .with_keywords(["text"])
            .with_attribute("content", AttributeSchema::html(AttributeKind::String, "p"))
            .with_attribute("dropCap", AttributeSchema::new(AttributeKind::Boolean).with_default(false))
            .with_save(save_paragraph),
        BlockType::new("core/image", "Image")
            .with_icon("format-image")
            .with_keywords(["photo"])
            .with_attribute("url", AttributeSchema::html(AttributeKind::String, "img"))
            .with_attribute("alt", AttributeSchema::html(AttributeKind::String, "img"))
            .with_attribute("id", AttributeSchema::new(AttributeKind::Number))
            .with_save(save_image),
        BlockType::new("core/heading", "Heading")
            .with_icon("heading")
            .with_keywords(["title", "subtitle"])
            .with_attribute("content", AttributeSchema::html(AttributeKind::String, "h1,h2,h3,h4,h5,h6"))
            .with_attribute("level", AttributeSchema::new(AttributeKind::Number).with_default(2))
            .with_save(save_heading),
        BlockType::new("core/quote", "Quote")
            .with_icon("format-quote")
            .with_keywords(["blockquote"])
            .with_attribute("value", AttributeSchema::html(AttributeKind::String, "blockquote > p"))
            .with_attribute("citation", AttributeSchema::html(AttributeKind::String, "cite"))
            .with_save(save_quote),
        BlockType::new("core/gallery", "Gallery")
            .with_icon("format-gallery")
            .with_category("formatting")
            .with_attribute("images", AttributeSchema::new(AttributeKind::Array).with_default(Value::Array(Vec::new())))
            .with_attribute("columns", AttributeSchema::new(AttributeKind::Number)),
        BlockType::new("core/more", "More")
            .with_icon("editor-insertmore")
            .with_category("layout")
            .use_once()
            .with_attribute("customText", AttributeSchema::new(AttributeKind::String)),
        BlockType::new(REUSABLE_BLOCK_NAME, "Reusable Block")
            .with_category("reusable-blocks")
            .private()
            .with_attribute("ref", AttributeSchema::new(AttributeKind::String)),
        BlockType::new("core-embed/youtube", "YouTube")
            .with_icon("video-alt3")
            .with_category("embed")
            .with_keywords(["music", "video"])
            .with_attribute("url", AttributeSchema::new(AttributeKind::String))
            .with_save(save_embed),
        BlockType::new("core-embed/vimeo", "Vimeo")
            .with_icon("video-alt3")
            .with_category("embed")
            .with_keywords(["video"])
            .with_attribute("url", AttributeSchema::new(AttributeKind::String))
            .with_save(save_embed),
    ]
}
