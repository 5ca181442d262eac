//! Block instances as stored in a document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Attribute values of a block, in declaration order
pub type Attributes = IndexMap<String, Value>;

/// Opaque, immutable block identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Uid {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Uid {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for Uid {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// A single block in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub uid: Uid,

    /// Block type name, e.g. `core/paragraph`
    pub name: String,

    #[serde(default)]
    pub attributes: Attributes,
}

impl Block {
    pub fn new(uid: impl Into<Uid>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    /// Set one attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_conversions() {
        assert_eq!(Uid::from(123u64), Uid::from("123"));
        assert_eq!(Uid::new("abc").to_string(), "abc");
    }

    #[test]
    fn test_block_serde_shape() {
        let block = Block::new("1", "core/paragraph").with_attribute("content", "Hi");
        let json = serde_json::to_value(&block).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "uid": "1",
                "name": "core/paragraph",
                "attributes": { "content": "Hi" }
            })
        );
    }
}
