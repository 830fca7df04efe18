//! Block-level elements of a normalized document
//!
//! This module defines the flat block union produced by the normalizer and
//! consumed by the page renderer: headings, paragraphs, code blocks,
//! blockquotes, and list items.

use serde::{Deserialize, Serialize};

/// One structural unit of the document, in document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// A section heading
    Heading(Heading),
    /// A paragraph of plain text
    Paragraph(Paragraph),
    /// A literal/code block
    CodeBlock(CodeBlock),
    /// A blockquote, text already joined across its inner paragraphs
    Blockquote(Blockquote),
    /// A single list item, flattened out of its list
    ListItem(ListItem),
}

/// A section heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-4, where 1 is the highest)
    pub level: u8,
    /// Heading text, inline formatting already stripped
    pub text: String,
}

/// A paragraph of body text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph text, inline formatting already stripped
    pub text: String,
}

/// A literal/code block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    /// The literal content, newline-separated physical lines
    pub content: String,
    /// Language from the fence info string, if any
    pub language: Option<String>,
}

/// A blockquote
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Blockquote {
    /// The quote text, inner paragraphs joined with newlines
    pub text: String,
}

/// A single list item
///
/// Items from nested lists appear as consecutive entries in document
/// order; the list boundary itself is not preserved. Ordered-item
/// numbering is assigned by the renderer, not stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item text, inline formatting already stripped
    pub text: String,
    /// Whether the nearest enclosing list was ordered
    pub ordered: bool,
}

impl CodeBlock {
    /// The physical lines of the block, as the renderer will draw them
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }
}

impl Default for Heading {
    fn default() -> Self {
        Self {
            level: 1,
            text: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_default_level() {
        let h = Heading::default();
        assert_eq!(h.level, 1);
        assert!(h.text.is_empty());
    }

    #[test]
    fn test_code_block_lines() {
        let code = CodeBlock {
            content: "fn main() {\n    println!(\"hi\");\n}".to_string(),
            language: Some("rust".to_string()),
        };
        assert_eq!(code.lines().count(), 3);
    }

    #[test]
    fn test_list_item_flags() {
        let bullet = ListItem {
            text: "first".to_string(),
            ordered: false,
        };
        let numbered = ListItem {
            text: "first".to_string(),
            ordered: true,
        };
        assert!(!bullet.ordered);
        assert!(numbered.ordered);
    }

    #[test]
    fn test_block_serde_round_trip() {
        let block = Block::Blockquote(Blockquote {
            text: "quoted".to_string(),
        });
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(block, back);
    }
}
