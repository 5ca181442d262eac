use crate::block::{Attributes, Block};
use crate::block_type::BlockType;
use crate::registry::BlockRegistry;
use serde_json::{Map, Value};

/// Serializer converts blocks into comment-delimited post content
///
/// Each block becomes
///
/// ```text
/// <!-- wp:name {"attr":1} -->
/// saved markup
/// <!-- /wp:name -->
/// ```
///
/// Blocks are separated by a blank line. Only attributes that live in the
/// delimiter are written to the comment: attributes sourced from markup or
/// post meta, and attributes equal to their declared default, are left out.
/// A block with empty saved markup is written as a void comment `<!-- wp:name /-->`.
pub struct Serializer<'r> {
    registry: &'r BlockRegistry,
}

impl<'r> Serializer<'r> {
    pub fn new(registry: &'r BlockRegistry) -> Self {
        Self { registry }
    }

    /// Serialize blocks in the given order
    pub fn serialize<'a, I>(&self, blocks: I) -> String
    where
        I: IntoIterator<Item = &'a Block>,
    {
        blocks
            .into_iter()
            .map(|block| self.serialize_block(block))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Serialize a single block
    pub fn serialize_block(&self, block: &Block) -> String {
        match self.registry.get(&block.name) {
            Some(block_type) => {
                let content = block_type.save_content(&block.attributes);
                let attributes = comment_attributes(&block.attributes, block_type);
                comment_delimited(&block.name, &attributes, &content)
            }
            // Unknown types keep every attribute so nothing is lost on save
            None => {
                let attributes: Map<String, Value> = block
                    .attributes
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                comment_delimited(&block.name, &attributes, "")
            }
        }
    }
}

/// Serialize blocks with the given registry
pub fn serialize<'a, I>(blocks: I, registry: &BlockRegistry) -> String
where
    I: IntoIterator<Item = &'a Block>,
{
    Serializer::new(registry).serialize(blocks)
}

/// Declared attributes that belong in the comment delimiter
fn comment_attributes(attributes: &Attributes, block_type: &BlockType) -> Map<String, Value> {
    let mut result = Map::new();

    for (key, schema) in &block_type.attributes {
        let Some(value) = attributes.get(key) else {
            continue;
        };
        if schema.source.is_some() {
            continue;
        }
        if schema.default.as_ref() == Some(value) {
            continue;
        }
        result.insert(key.clone(), value.clone());
    }

    result
}

fn comment_delimited(block_name: &str, attributes: &Map<String, Value>, content: &str) -> String {
    let name = block_name.strip_prefix("core/").unwrap_or(block_name);
    let serialized_attributes = if attributes.is_empty() {
        String::new()
    } else {
        format!("{} ", serialize_attributes(attributes))
    };

    if content.is_empty() {
        return format!("<!-- wp:{name} {serialized_attributes}/-->");
    }

    format!("<!-- wp:{name} {serialized_attributes}-->\n{content}\n<!-- /wp:{name} -->")
}

/// JSON for a comment delimiter, escaped so it cannot close the comment or
/// be mistaken for markup
pub fn serialize_attributes(attributes: &Map<String, Value>) -> String {
    Value::Object(attributes.clone())
        .to_string()
        .replace("--", "\\u002d\\u002d")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace("\\\"", "\\u0022")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_type::{AttributeKind, AttributeSchema};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_strips_core_namespace() {
        let registry = BlockRegistry::with_core_types();
        let block = Block::new("1", "core/paragraph").with_attribute("content", "Hello");

        assert_eq!(
            Serializer::new(&registry).serialize_block(&block),
            "<!-- wp:paragraph -->\n<p>Hello</p>\n<!-- /wp:paragraph -->"
        );
    }

    #[test]
    fn test_comment_attributes_skip_sourced_and_defaults() {
        let registry = BlockRegistry::with_core_types();
        let block = Block::new("1", "core/heading")
            .with_attribute("content", "Title")
            .with_attribute("level", 2);

        // level 2 is the default, content is sourced from markup
        assert_eq!(
            Serializer::new(&registry).serialize_block(&block),
            "<!-- wp:heading -->\n<h2>Title</h2>\n<!-- /wp:heading -->"
        );

        let block = block.with_attribute("level", 3);
        assert_eq!(
            Serializer::new(&registry).serialize_block(&block),
            "<!-- wp:heading {\"level\":3} -->\n<h3>Title</h3>\n<!-- /wp:heading -->"
        );
    }

    #[test]
    fn test_void_block_without_content() {
        let registry = BlockRegistry::with_core_types();
        let block = Block::new("1", "core/more").with_attribute("customText", "Read on");

        assert_eq!(
            Serializer::new(&registry).serialize_block(&block),
            "<!-- wp:more {\"customText\":\"Read on\"} /-->"
        );
    }

    #[test]
    fn test_meta_attributes_not_serialized() {
        let mut registry = BlockRegistry::new();
        registry
            .register(
                crate::BlockType::new("my/meta", "Meta")
                    .with_attribute("foo", AttributeSchema::meta(AttributeKind::String, "foo")),
            )
            .unwrap();
        let block = Block::new("1", "my/meta").with_attribute("foo", "bar");

        assert_eq!(serialize([&block], &registry), "<!-- wp:my/meta /-->");
    }

    #[test]
    fn test_escapes_comment_breaking_sequences() {
        let mut attributes = Map::new();
        attributes.insert("text".to_string(), json!("a -- <b> & \"c\""));

        assert_eq!(
            serialize_attributes(&attributes),
            r#"{"text":"a \u002d\u002d \u003cb\u003e \u0026 \u0022c\u0022"}"#
        );
    }

    #[test]
    fn test_blocks_joined_by_blank_line() {
        let registry = BlockRegistry::with_core_types();
        let blocks = vec![
            Block::new("1", "core/paragraph").with_attribute("content", "One"),
            Block::new("2", "core/paragraph").with_attribute("content", "Two"),
        ];

        assert_eq!(
            serialize(&blocks, &registry),
            "<!-- wp:paragraph -->\n<p>One</p>\n<!-- /wp:paragraph -->\n\n\
             <!-- wp:paragraph -->\n<p>Two</p>\n<!-- /wp:paragraph -->"
        );
    }

    #[test]
    fn test_unknown_type_keeps_attributes() {
        let registry = BlockRegistry::new();
        let block = Block::new("1", "acme/widget").with_attribute("size", 3);

        assert_eq!(
            serialize([&block], &registry),
            "<!-- wp:acme/widget {\"size\":3} /-->"
        );
    }
}
