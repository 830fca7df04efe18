//! Markdown Normalizer
//!
//! This module converts raw Markdown text into a flat `mdpress_ast`
//! block sequence, in document order.
//!
//! # Flattening rules
//!
//! - Headings deeper than level 4 are dropped.
//! - Paragraphs inside list items or blockquotes are consumed by their
//!   container and not emitted on their own.
//! - Nested lists are flattened: every item becomes one `ListItem`, in
//!   document order, carrying the ordered flag of its nearest list.
//! - Code blocks inside list items are emitted as their own `CodeBlock`
//!   after the item's text; inside blockquotes their literal joins the
//!   quote text.
//! - Blockquotes emit a single block with inner paragraphs joined by
//!   newlines.
//! - Inline formatting (bold, italic, links, inline code) collapses to
//!   plain text; soft and hard line breaks become newlines.
//! - Tables and raw HTML blocks are dropped.
//! - Blocks whose text is empty after trimming are skipped.
//!
//! Normalization never fails: CommonMark parsing is total over UTF-8.

use comrak::nodes::{AstNode, ListType as MdListType, NodeValue};
use comrak::{parse_document, Arena, Options};
use tracing::debug;

use mdpress_ast::{Block, Blockquote, CodeBlock, Document, Heading, ListItem, Paragraph};

/// Deepest heading level that survives normalization
const MAX_HEADING_LEVEL: u8 = 4;

/// Normalize Markdown text into a flat block sequence
pub fn normalize(input: &str) -> Document {
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.table = true;

    let root = parse_document(&arena, input, &options);

    let mut doc = Document::new();
    for child in root.children() {
        walk_block(child, &mut doc.blocks);
    }

    debug!(blocks = doc.len(), "normalized markdown input");
    doc
}

/// Normalize and attach a display title for the cover page and header
pub fn normalize_with_title(input: &str, title: impl Into<String>) -> Document {
    let mut doc = normalize(input);
    doc.metadata.title = Some(title.into());
    doc
}

/// Emit the blocks for one top-level node
fn walk_block<'a>(node: &'a AstNode<'a>, out: &mut Vec<Block>) {
    let ast = node.data.borrow();
    match &ast.value {
        NodeValue::Heading(heading) => {
            let text = trimmed_text(node);
            if heading.level <= MAX_HEADING_LEVEL && !text.is_empty() {
                out.push(Block::Heading(Heading {
                    level: heading.level,
                    text,
                }));
            }
        }

        NodeValue::Paragraph => {
            let text = trimmed_text(node);
            if !text.is_empty() {
                out.push(Block::Paragraph(Paragraph { text }));
            }
        }

        NodeValue::CodeBlock(code) => {
            let content = code.literal.trim().to_string();
            if !content.is_empty() {
                let language = code
                    .info
                    .split_whitespace()
                    .next()
                    .map(|lang| lang.to_string());
                out.push(Block::CodeBlock(CodeBlock { content, language }));
            }
        }

        NodeValue::BlockQuote => {
            let text = quote_text(node);
            if !text.is_empty() {
                out.push(Block::Blockquote(Blockquote { text }));
            }
        }

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, MdListType::Ordered);
            walk_list(node, ordered, out);
        }

        // No renderer handler for these; dropped during normalization
        NodeValue::ThematicBreak
        | NodeValue::Table(_)
        | NodeValue::HtmlBlock(_)
        | NodeValue::FrontMatter(_) => {}

        _ => {}
    }
}

/// Flatten a list into consecutive `ListItem` blocks
///
/// Each item's own text is emitted first, then any nested lists and
/// code blocks as their own blocks, so the output order matches
/// document order.
fn walk_list<'a>(node: &'a AstNode<'a>, ordered: bool, out: &mut Vec<Block>) {
    for item in node.children() {
        let mut text_parts: Vec<String> = Vec::new();
        let mut structural: Vec<&AstNode<'_>> = Vec::new();

        for child in item.children() {
            let ast = child.data.borrow();
            match &ast.value {
                NodeValue::List(_) | NodeValue::CodeBlock(_) => structural.push(child),
                _ => {
                    let text = trimmed_text(child);
                    if !text.is_empty() {
                        text_parts.push(text);
                    }
                }
            }
        }

        if !text_parts.is_empty() {
            out.push(Block::ListItem(ListItem {
                text: text_parts.join("\n"),
                ordered,
            }));
        }

        for child in structural {
            walk_block(child, out);
        }
    }
}

/// Join the blockquote's inner blocks into one text, paragraphs separated
/// by newlines
fn quote_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut parts: Vec<String> = Vec::new();
    for child in node.children() {
        let text = trimmed_text(child);
        if !text.is_empty() {
            parts.push(text);
        }
    }
    parts.join("\n")
}

/// Collect the plain text under a node, formatting stripped, trimmed
fn trimmed_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out.trim().to_string()
}

fn collect_text<'a>(node: &'a AstNode<'a>, out: &mut String) {
    let ast = node.data.borrow();
    match &ast.value {
        NodeValue::Text(text) => out.push_str(text),
        NodeValue::Code(code) => out.push_str(&code.literal),
        // Code blocks keep their literal on the node itself, not in
        // text children
        NodeValue::CodeBlock(code) => out.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push('\n'),
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph() {
        let doc = normalize("# Title\n\nBody text here.\n");
        assert_eq!(doc.len(), 2);
        assert_eq!(
            doc.blocks[0],
            Block::Heading(Heading {
                level: 1,
                text: "Title".to_string(),
            })
        );
        assert_eq!(
            doc.blocks[1],
            Block::Paragraph(Paragraph {
                text: "Body text here.".to_string(),
            })
        );
    }

    #[test]
    fn test_deep_headings_dropped() {
        let doc = normalize("##### Too deep\n\n###### Deeper\n\n#### Kept\n");
        assert_eq!(doc.len(), 1);
        assert_eq!(
            doc.blocks[0],
            Block::Heading(Heading {
                level: 4,
                text: "Kept".to_string(),
            })
        );
    }

    #[test]
    fn test_inline_formatting_stripped() {
        let doc = normalize("This is **bold** and *italic* with `code`.\n");
        assert_eq!(
            doc.blocks[0],
            Block::Paragraph(Paragraph {
                text: "This is bold and italic with code.".to_string(),
            })
        );
    }

    #[test]
    fn test_code_block_language() {
        let doc = normalize("```rust\nfn main() {}\n```\n");
        match &doc.blocks[0] {
            Block::CodeBlock(code) => {
                assert_eq!(code.language.as_deref(), Some("rust"));
                assert_eq!(code.content, "fn main() {}");
            }
            other => panic!("Expected CodeBlock, got {:?}", other),
        }
    }

    #[test]
    fn test_indented_code_block() {
        let doc = normalize("    indented code\n");
        match &doc.blocks[0] {
            Block::CodeBlock(code) => {
                assert_eq!(code.language, None);
                assert_eq!(code.content, "indented code");
            }
            other => panic!("Expected CodeBlock, got {:?}", other),
        }
    }

    #[test]
    fn test_blockquote_joined() {
        let doc = normalize("> First line\n> continues here\n>\n> Second paragraph\n");
        assert_eq!(doc.len(), 1);
        match &doc.blocks[0] {
            Block::Blockquote(quote) => {
                assert!(quote.text.contains("First line"));
                assert!(quote.text.contains("Second paragraph"));
            }
            other => panic!("Expected Blockquote, got {:?}", other),
        }
    }

    #[test]
    fn test_paragraph_inside_list_not_duplicated() {
        let doc = normalize("- item one\n- item two\n");
        assert_eq!(doc.len(), 2);
        assert!(doc
            .blocks
            .iter()
            .all(|block| matches!(block, Block::ListItem(_))));
    }

    #[test]
    fn test_nested_list_flattened() {
        let doc = normalize("- outer\n  1. inner one\n  2. inner two\n- last\n");
        let items: Vec<&ListItem> = doc
            .blocks
            .iter()
            .map(|block| match block {
                Block::ListItem(item) => item,
                other => panic!("Expected ListItem, got {:?}", other),
            })
            .collect();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].text, "outer");
        assert!(!items[0].ordered);
        assert!(items[1].ordered);
        assert!(items[2].ordered);
        assert_eq!(items[3].text, "last");
        assert!(!items[3].ordered);
    }

    #[test]
    fn test_code_block_inside_list_item_kept() {
        let doc = normalize("- item\n  ```\n  let x = 1;\n  ```\n- next\n");
        assert_eq!(doc.len(), 3);
        match &doc.blocks[0] {
            Block::ListItem(item) => assert_eq!(item.text, "item"),
            other => panic!("Expected ListItem, got {:?}", other),
        }
        match &doc.blocks[1] {
            Block::CodeBlock(code) => assert_eq!(code.content, "let x = 1;"),
            other => panic!("Expected CodeBlock, got {:?}", other),
        }
        match &doc.blocks[2] {
            Block::ListItem(item) => assert_eq!(item.text, "next"),
            other => panic!("Expected ListItem, got {:?}", other),
        }
    }

    #[test]
    fn test_blockquote_keeps_code_literal() {
        let doc = normalize("> intro\n>\n> ```\n> let x = 1;\n> ```\n");
        assert_eq!(doc.len(), 1);
        match &doc.blocks[0] {
            Block::Blockquote(quote) => {
                assert!(quote.text.contains("intro"));
                assert!(quote.text.contains("let x = 1;"));
            }
            other => panic!("Expected Blockquote, got {:?}", other),
        }
    }

    #[test]
    fn test_ordered_flag() {
        let doc = normalize("1. first\n2. second\n");
        match &doc.blocks[0] {
            Block::ListItem(item) => assert!(item.ordered),
            other => panic!("Expected ListItem, got {:?}", other),
        }
    }

    #[test]
    fn test_tables_dropped() {
        let doc = normalize("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let doc = normalize("");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_plain_text_becomes_paragraphs() {
        let doc = normalize("Just some plain text.\n\nAnother line.\n");
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_title_attached() {
        let doc = normalize_with_title("# Hi\n", "My Notes");
        assert_eq!(doc.display_title(), "My Notes");
    }
}
