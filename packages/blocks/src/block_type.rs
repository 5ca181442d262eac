//! # Block Types
//!
//! A block type describes everything the editor knows about a kind of block
//! without looking at any particular instance: how it is presented in the
//! inserter, how its attributes are sourced, and how it is saved.
//!
//! Attribute sources decide where a value lives:
//! - **No source**: stored in the block comment delimiter
//! - **Html**: parsed back out of the saved markup, never put in the comment
//! - **Meta**: read from the current post's meta fields at read time

use crate::block::Attributes;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Renders a block's saved markup from its attributes
pub type SaveFn = fn(&Attributes) -> String;

/// Value type of a declared attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

/// Where an attribute's value comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum AttributeSource {
    /// Extracted from the saved markup
    Html { selector: String },

    /// Mirrors a post meta field
    Meta { meta: String },
}

/// Declared attribute of a block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSchema {
    #[serde(rename = "type")]
    pub kind: AttributeKind,

    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub source: Option<AttributeSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl AttributeSchema {
    pub fn new(kind: AttributeKind) -> Self {
        Self {
            kind,
            source: None,
            default: None,
        }
    }

    /// Attribute backed by a post meta field
    pub fn meta(kind: AttributeKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            source: Some(AttributeSource::Meta { meta: key.into() }),
            default: None,
        }
    }

    /// Attribute parsed from saved markup
    pub fn html(kind: AttributeKind, selector: impl Into<String>) -> Self {
        Self {
            kind,
            source: Some(AttributeSource::Html {
                selector: selector.into(),
            }),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Meta key when the attribute is sourced from post meta
    pub fn meta_key(&self) -> Option<&str> {
        match &self.source {
            Some(AttributeSource::Meta { meta }) => Some(meta),
            _ => None,
        }
    }
}

/// Registered block type
#[derive(Debug, Clone)]
pub struct BlockType {
    /// Namespaced name, e.g. `core/paragraph`
    pub name: String,

    pub title: String,

    pub icon: String,

    pub category: String,

    pub keywords: Vec<String>,

    /// At most one instance per post
    pub use_once: bool,

    /// Hidden from the inserter
    pub is_private: bool,

    pub attributes: IndexMap<String, AttributeSchema>,

    pub save: Option<SaveFn>,
}

impl BlockType {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            icon: String::new(),
            category: "common".to_string(),
            keywords: Vec::new(),
            use_once: false,
            is_private: false,
            attributes: IndexMap::new(),
            save: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn use_once(mut self) -> Self {
        self.use_once = true;
        self
    }

    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, schema: AttributeSchema) -> Self {
        self.attributes.insert(key.into(), schema);
        self
    }

    pub fn with_save(mut self, save: SaveFn) -> Self {
        self.save = Some(save);
        self
    }

    /// Attributes mirrored from post meta, as `(attribute, meta key)` pairs
    pub fn meta_attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter_map(|(key, schema)| schema.meta_key().map(|meta| (key.as_str(), meta)))
    }

    /// Saved markup for the given attributes (empty without a save function)
    pub fn save_content(&self, attributes: &Attributes) -> String {
        self.save.map(|save| save(attributes)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meta_attributes_listed() {
        let block_type = BlockType::new("core/meta-block", "Meta")
            .with_attribute("foo", AttributeSchema::meta(AttributeKind::String, "foo_key"))
            .with_attribute("bar", AttributeSchema::new(AttributeKind::String));

        let metas: Vec<_> = block_type.meta_attributes().collect();
        assert_eq!(metas, vec![("foo", "foo_key")]);
    }

    #[test]
    fn test_schema_json_shape() {
        let schema: AttributeSchema = serde_json::from_value(json!({
            "type": "string",
            "source": "meta",
            "meta": "foo"
        }))
        .unwrap();

        assert_eq!(schema.meta_key(), Some("foo"));
        assert_eq!(schema.kind, AttributeKind::String);
    }

    #[test]
    fn test_save_content_without_save_fn() {
        let block_type = BlockType::new("core/spacer", "Spacer");
        assert_eq!(block_type.save_content(&Attributes::new()), "");
    }
}
