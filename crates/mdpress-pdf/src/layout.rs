//! Block sequence to paginated draw-op layout
//!
//! This module walks the normalized block sequence once, in document
//! order, and produces one list of draw operations per page. All
//! coordinates are millimetres from the top-left page corner; the
//! emitter flips them into PDF space.
//!
//! Pagination rules:
//!
//! - Normal text lines break to a new page when the line would cross
//!   [`style::AUTO_BREAK_Y`].
//! - Code blocks check the stricter [`style::CODE_BREAK_Y`] before every
//!   physical line.
//! - The decorative left edge of code blocks and blockquotes is emitted
//!   as one segment per page it touches, so it spans the block's full
//!   rendered height even across page breaks.
//!
//! Per-block failures produce a [`SkipReason`]; the block is dropped and
//! the walk continues.

use tracing::{debug, trace};

use mdpress_ast::{Block, Blockquote, CodeBlock, Document, Heading, ListItem, Paragraph};

use crate::error::SkipReason;
use crate::style::{
    self, BlockStyle, Color, TextStyle, AUTO_BREAK_Y, BODY_TOP, CODE_BREAK_Y, CONTENT_RIGHT,
    EDGED_TEXT_X, FOOTER_Y, HEADER_Y, MARGIN_LEFT, MARKER_CELL_WIDTH, PAGE_WIDTH,
};
use crate::text::{sanitize, wrap};

/// One drawing primitive on a page
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A single line of text; `y` is the top of the line cell
    Text {
        x: f64,
        y: f64,
        text: String,
        style: TextStyle,
    },
    /// A stroked line segment
    Rule {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: f64,
        color: Color,
    },
    /// A filled rectangle; `y` is the top edge
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
    },
}

/// Draw operations for one page, in paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// The renderer's position state: current page and vertical offset
///
/// Mutated by every drawing operation; reset to the body top margin on
/// page break. Lives only for the duration of one layout call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCursor {
    /// Vertical position in mm from the top edge
    pub y: f64,
    /// Zero-based page index
    pub page: usize,
}

/// Running counter for ordered list markers
///
/// Increments per consecutive ordered item and resets to zero on any
/// unordered item. Non-list blocks in between do not reset it, so two
/// ordered lists separated only by a paragraph continue one numbering
/// run. That adjacency rule matches the document-order traversal, not
/// true list boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListNumbering {
    counter: u32,
}

impl ListNumbering {
    /// Marker number for the next item: `Some(n)` for ordered items,
    /// `None` (bullet) for unordered ones
    pub fn next(&mut self, ordered: bool) -> Option<u32> {
        if ordered {
            self.counter += 1;
            Some(self.counter)
        } else {
            self.counter = 0;
            None
        }
    }
}

/// Parameters for a code/quote block with a decorative left edge
struct EdgedBlock {
    lines: Vec<String>,
    style: BlockStyle,
    break_at: f64,
    fill: Color,
    edge_stroke: f64,
    edge_color: Color,
}

/// Walks a block sequence and lays pages out
pub struct LayoutEngine {
    pages: Vec<Page>,
    cursor: RenderCursor,
    title: String,
    numbering: ListNumbering,
}

impl LayoutEngine {
    /// Lay out a whole document: cover page, then body blocks in order
    pub fn layout(doc: &Document) -> Vec<Page> {
        let mut engine = Self::new(doc.display_title());
        engine.cover_page();
        engine.new_page();

        for (index, block) in doc.blocks.iter().enumerate() {
            if let Err(reason) = engine.layout_block(block) {
                debug!(index, %reason, "skipping block");
            }
        }

        engine.pages
    }

    fn new(title: &str) -> Self {
        Self {
            pages: Vec::new(),
            cursor: RenderCursor { y: BODY_TOP, page: 0 },
            title: sanitize(title),
            numbering: ListNumbering::default(),
        }
    }

    /// Lay out one block, or report why it was dropped
    fn layout_block(&mut self, block: &Block) -> Result<(), SkipReason> {
        match block {
            Block::Heading(heading) => self.heading(heading),
            Block::Paragraph(paragraph) => self.paragraph(paragraph),
            Block::CodeBlock(code) => self.code_block(code),
            Block::Blockquote(quote) => self.blockquote(quote),
            Block::ListItem(item) => self.list_item(item),
        }
    }

    // --- page management ---

    /// Start a new page with running header and footer; the cursor moves
    /// to the body top margin
    fn new_page(&mut self) {
        let mut page = Page::default();

        page.ops.push(DrawOp::Text {
            x: MARGIN_LEFT,
            y: HEADER_Y,
            text: self.title.clone(),
            style: style::HEADER_STYLE,
        });

        let footer = format!("Page {}", self.pages.len() + 1);
        let footer_x = (PAGE_WIDTH - style::FOOTER_STYLE.text_width_mm(&footer)) / 2.0;
        page.ops.push(DrawOp::Text {
            x: footer_x,
            y: FOOTER_Y,
            text: footer,
            style: style::FOOTER_STYLE,
        });

        self.pages.push(page);
        self.cursor = RenderCursor {
            y: BODY_TOP,
            page: self.pages.len() - 1,
        };
        trace!(page = self.cursor.page, "page break");
    }

    fn advance(&mut self, dy: f64) {
        self.cursor.y += dy;
    }

    /// Break to a new page if a cell of `line_height` would cross the
    /// auto-break threshold
    fn ensure_room(&mut self, line_height: f64) {
        if self.cursor.y + line_height > AUTO_BREAK_Y {
            self.new_page();
        }
    }

    fn push_op(&mut self, op: DrawOp) {
        let page = self.cursor.page;
        self.pages[page].ops.push(op);
    }

    /// Emit one text line at the cursor and advance past it
    fn text_line(&mut self, x: f64, text: String, style: TextStyle, line_height: f64) {
        self.push_op(DrawOp::Text {
            x,
            y: self.cursor.y,
            text,
            style,
        });
        self.advance(line_height);
    }

    /// Emit wrapped text lines at the left margin, breaking pages as
    /// needed
    fn wrapped_lines(&mut self, text: &str, block: BlockStyle) {
        let width = CONTENT_RIGHT - MARGIN_LEFT;
        for line in wrap(text, block.text.chars_per_line(width)) {
            self.ensure_room(block.line_height);
            self.text_line(MARGIN_LEFT, line, block.text, block.line_height);
        }
    }

    // --- cover page ---

    /// Fixed-format cover: title, static subtitle, short centered rule
    fn cover_page(&mut self) {
        self.new_page();
        self.advance(40.0);

        let title = self.title.clone();
        for line in wrap(&title, style::COVER_TITLE.text.chars_per_line(PAGE_WIDTH - 20.0)) {
            let x = (PAGE_WIDTH - style::COVER_TITLE.text.text_width_mm(&line)) / 2.0;
            self.text_line(x, line, style::COVER_TITLE.text, style::COVER_TITLE.line_height);
        }

        let subtitle = "Generated from Markdown".to_string();
        let x = (PAGE_WIDTH - style::COVER_SUBTITLE.text.text_width_mm(&subtitle)) / 2.0;
        self.text_line(x, subtitle, style::COVER_SUBTITLE.text, style::COVER_SUBTITLE.line_height);

        self.advance(10.0);
        self.push_op(DrawOp::Rule {
            x1: 60.0,
            y1: self.cursor.y,
            x2: 150.0,
            y2: self.cursor.y,
            stroke: style::COVER_RULE_STROKE,
            color: style::ACCENT,
        });
    }

    // --- block kinds ---

    fn heading(&mut self, heading: &Heading) -> Result<(), SkipReason> {
        if !(1..=4).contains(&heading.level) {
            return Err(SkipReason::HeadingLevel(heading.level));
        }
        let text = clean(&heading.text)?;

        let (block, space_before, separator) = match heading.level {
            1 => (
                style::HEADING_1,
                5.0,
                Some((style::H1_SEPARATOR_STROKE, style::ACCENT, 5.0)),
            ),
            2 => (
                style::HEADING_2,
                4.0,
                Some((style::H2_SEPARATOR_STROKE, style::SEPARATOR_LIGHT, 3.0)),
            ),
            _ => (style::HEADING_MINOR, 3.0, None),
        };

        self.advance(space_before);
        self.ensure_room(block.line_height);
        self.wrapped_lines(&text, block);
        self.advance(2.0);

        if let Some((stroke, color, space_after)) = separator {
            self.push_op(DrawOp::Rule {
                x1: MARGIN_LEFT,
                y1: self.cursor.y,
                x2: CONTENT_RIGHT,
                y2: self.cursor.y,
                stroke,
                color,
            });
            self.advance(space_after);
        }

        Ok(())
    }

    fn paragraph(&mut self, paragraph: &Paragraph) -> Result<(), SkipReason> {
        let text = clean(&paragraph.text)?;
        self.wrapped_lines(&text, style::PARAGRAPH);
        self.advance(2.0);
        Ok(())
    }

    fn code_block(&mut self, code: &CodeBlock) -> Result<(), SkipReason> {
        let content = clean(&code.content)?;
        // Code lines are physical lines, never re-wrapped
        let lines: Vec<String> = content.lines().map(|line| line.to_string()).collect();
        self.edged_block(EdgedBlock {
            lines,
            style: style::CODE,
            break_at: CODE_BREAK_Y,
            fill: style::CODE_FILL,
            edge_stroke: style::CODE_EDGE_STROKE,
            edge_color: style::ACCENT,
        });
        Ok(())
    }

    fn blockquote(&mut self, quote: &Blockquote) -> Result<(), SkipReason> {
        let text = clean(&quote.text)?;
        let width = CONTENT_RIGHT - EDGED_TEXT_X;
        let lines = wrap(&text, style::QUOTE.text.chars_per_line(width));
        self.edged_block(EdgedBlock {
            lines,
            style: style::QUOTE,
            // Break before a line would cross the auto-break threshold,
            // keeping the quote cell clear of the footer
            break_at: AUTO_BREAK_Y - style::QUOTE.line_height,
            fill: style::QUOTE_FILL,
            edge_stroke: style::QUOTE_EDGE_STROKE,
            edge_color: style::QUOTE_EDGE,
        });
        Ok(())
    }

    fn list_item(&mut self, item: &ListItem) -> Result<(), SkipReason> {
        let text = clean(&item.text)?;
        let marker = match self.numbering.next(item.ordered) {
            Some(number) => format!("{}.", number),
            None => "\u{2022}".to_string(),
        };

        let block = style::LIST_ITEM;
        let text_x = MARGIN_LEFT + MARKER_CELL_WIDTH;
        let width = CONTENT_RIGHT - text_x;

        self.ensure_room(block.line_height);
        self.push_op(DrawOp::Text {
            x: MARGIN_LEFT,
            y: self.cursor.y,
            text: marker,
            style: block.text,
        });

        // First wrapped line shares the marker's row
        for (i, line) in wrap(&text, block.text.chars_per_line(width))
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                self.ensure_room(block.line_height);
            }
            self.text_line(text_x, line, block.text, block.line_height);
        }

        Ok(())
    }

    /// Shared path for code blocks and blockquotes: filled line cells
    /// with a left edge stroke, segmented per page
    fn edged_block(&mut self, mut block: EdgedBlock) {
        if block.lines.is_empty() {
            return;
        }

        self.advance(2.0);
        let mut segment_start = self.cursor.y;
        let mut segment_page = self.cursor.page;

        for line in std::mem::take(&mut block.lines) {
            if self.cursor.y > block.break_at {
                self.close_edge(segment_page, segment_start, &block);
                self.new_page();
                segment_start = self.cursor.y;
                segment_page = self.cursor.page;
            }

            self.push_op(DrawOp::FillRect {
                x: MARGIN_LEFT,
                y: self.cursor.y,
                width: CONTENT_RIGHT - MARGIN_LEFT,
                height: block.style.line_height,
                fill: block.fill,
            });
            self.text_line(EDGED_TEXT_X, line, block.style.text, block.style.line_height);
        }

        self.close_edge(segment_page, segment_start, &block);
        self.advance(2.0);
    }

    /// Emit the left edge stroke for the segment ending at the cursor
    fn close_edge(&mut self, page: usize, segment_start: f64, block: &EdgedBlock) {
        let segment_end = self.cursor.y;
        if segment_end <= segment_start {
            return;
        }
        self.pages[page].ops.push(DrawOp::Rule {
            x1: MARGIN_LEFT,
            y1: segment_start,
            x2: MARGIN_LEFT,
            y2: segment_end,
            stroke: block.edge_stroke,
            color: block.edge_color,
        });
    }
}

/// Sanitize and trim block text, skipping blocks left empty
fn clean(text: &str) -> Result<String, SkipReason> {
    let cleaned = sanitize(text);
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return Err(SkipReason::EmptyText);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdpress_ast::Document;

    fn doc_with(blocks: Vec<Block>) -> Document {
        let mut doc = Document::with_title("Test");
        for block in blocks {
            doc.push(block);
        }
        doc
    }

    fn all_ops(pages: &[Page]) -> impl Iterator<Item = &DrawOp> {
        pages.iter().flat_map(|page| page.ops.iter())
    }

    fn texts(pages: &[Page]) -> Vec<&str> {
        all_ops(pages)
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_numbering_increments_and_resets() {
        let mut numbering = ListNumbering::default();
        assert_eq!(numbering.next(true), Some(1));
        assert_eq!(numbering.next(true), Some(2));
        assert_eq!(numbering.next(false), None);
        assert_eq!(numbering.next(true), Some(1));
    }

    #[test]
    fn test_empty_document_has_cover_and_body_page() {
        let pages = LayoutEngine::layout(&doc_with(vec![]));
        assert_eq!(pages.len(), 2);
        // Header and footer on both pages
        assert!(texts(&pages).iter().filter(|t| **t == "Test").count() >= 2);
        assert!(texts(&pages).contains(&"Page 1"));
        assert!(texts(&pages).contains(&"Page 2"));
    }

    #[test]
    fn test_cover_page_contents() {
        let pages = LayoutEngine::layout(&doc_with(vec![]));
        let cover = texts(&pages[..1]);
        assert!(cover.contains(&"Test"));
        assert!(cover.contains(&"Generated from Markdown"));
        let rules: Vec<&DrawOp> = pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rule { .. }))
            .collect();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_h1_separator_heavier_and_wider_than_h2() {
        let pages = LayoutEngine::layout(&doc_with(vec![
            Block::Heading(Heading {
                level: 1,
                text: "Big".to_string(),
            }),
            Block::Heading(Heading {
                level: 2,
                text: "Small".to_string(),
            }),
        ]));

        let separators: Vec<(f64, f64)> = pages[1]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rule {
                    x1, x2, stroke, y1, y2, ..
                } if y1 == y2 => Some((*x2 - *x1, *stroke)),
                _ => None,
            })
            .collect();

        assert_eq!(separators.len(), 2);
        let (h1_span, h1_stroke) = separators[0];
        let (h2_span, h2_stroke) = separators[1];
        assert!(h1_stroke > h2_stroke);
        assert!(h1_span >= h2_span);
    }

    #[test]
    fn test_minor_heading_has_no_separator() {
        let pages = LayoutEngine::layout(&doc_with(vec![Block::Heading(Heading {
            level: 3,
            text: "Minor".to_string(),
        })]));
        assert!(!pages[1]
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Rule { .. })));
    }

    #[test]
    fn test_ordered_markers_in_sequence() {
        let pages = LayoutEngine::layout(&doc_with(vec![
            Block::ListItem(ListItem {
                text: "a".to_string(),
                ordered: true,
            }),
            Block::ListItem(ListItem {
                text: "b".to_string(),
                ordered: true,
            }),
            Block::ListItem(ListItem {
                text: "c".to_string(),
                ordered: true,
            }),
        ]));
        let body = texts(&pages[1..]);
        assert!(body.contains(&"1."));
        assert!(body.contains(&"2."));
        assert!(body.contains(&"3."));
    }

    #[test]
    fn test_unordered_item_resets_numbering() {
        let pages = LayoutEngine::layout(&doc_with(vec![
            Block::ListItem(ListItem {
                text: "a".to_string(),
                ordered: true,
            }),
            Block::ListItem(ListItem {
                text: "b".to_string(),
                ordered: false,
            }),
            Block::ListItem(ListItem {
                text: "c".to_string(),
                ordered: true,
            }),
        ]));
        let body = texts(&pages[1..]);
        assert_eq!(body.iter().filter(|t| **t == "1.").count(), 2);
        assert!(body.contains(&"\u{2022}"));
        assert!(!body.contains(&"2."));
    }

    #[test]
    fn test_paragraph_between_ordered_runs_does_not_reset() {
        // Adjacency rule: only an unordered item resets the counter
        let pages = LayoutEngine::layout(&doc_with(vec![
            Block::ListItem(ListItem {
                text: "a".to_string(),
                ordered: true,
            }),
            Block::Paragraph(Paragraph {
                text: "interlude".to_string(),
            }),
            Block::ListItem(ListItem {
                text: "b".to_string(),
                ordered: true,
            }),
        ]));
        let body = texts(&pages[1..]);
        assert!(body.contains(&"1."));
        assert!(body.contains(&"2."));
    }

    #[test]
    fn test_long_code_block_breaks_pages_with_edges_on_each() {
        let content = (0..120)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let pages = LayoutEngine::layout(&doc_with(vec![Block::CodeBlock(CodeBlock {
            content,
            language: None,
        })]));

        // Cover + at least two body pages
        assert!(pages.len() >= 3, "expected a page break, got {} pages", pages.len());

        // Every body page the code touched carries a vertical edge in
        // accent color, and the segments are contiguous with the text
        for page in &pages[1..] {
            let has_code_text = page
                .ops
                .iter()
                .any(|op| matches!(op, DrawOp::Text { text, .. } if text.starts_with("line ")));
            let edge = page.ops.iter().find_map(|op| match op {
                DrawOp::Rule {
                    x1, x2, y1, y2, stroke, ..
                } if x1 == x2 => Some((*y1, *y2, *stroke)),
                _ => None,
            });
            assert_eq!(has_code_text, edge.is_some());
            if let Some((y1, y2, stroke)) = edge {
                assert!(y2 > y1);
                assert_eq!(stroke, style::CODE_EDGE_STROKE);
            }
        }
    }

    #[test]
    fn test_code_edge_spans_block_height_on_single_page() {
        let pages = LayoutEngine::layout(&doc_with(vec![Block::CodeBlock(CodeBlock {
            content: "a\nb\nc".to_string(),
            language: None,
        })]));
        let edge = pages[1]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Rule { x1, x2, y1, y2, .. } if x1 == x2 => Some(*y2 - *y1),
                _ => None,
            })
            .expect("code block must emit a left edge");
        // Three lines at the code line height
        assert!((edge - 3.0 * style::CODE.line_height).abs() < 1e-9);
    }

    #[test]
    fn test_blockquote_has_edge_and_fill() {
        let pages = LayoutEngine::layout(&doc_with(vec![Block::Blockquote(Blockquote {
            text: "wise words".to_string(),
        })]));
        let page = &pages[1];
        assert!(page
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::FillRect { fill, .. } if *fill == style::QUOTE_FILL)));
        assert!(page.ops.iter().any(|op| matches!(
            op,
            DrawOp::Rule { x1, x2, stroke, .. } if x1 == x2 && *stroke == style::QUOTE_EDGE_STROKE
        )));
    }

    #[test]
    fn test_long_blockquote_lines_stay_above_footer() {
        let text = (0..100)
            .map(|i| format!("quote line {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let pages = LayoutEngine::layout(&doc_with(vec![Block::Blockquote(Blockquote { text })]));

        assert!(pages.len() >= 3, "expected page breaks, got {} pages", pages.len());

        // Every quote line cell must end before the auto-break threshold
        // so it never runs into the footer
        for op in all_ops(&pages) {
            if let DrawOp::Text { y, text, .. } = op {
                if text.starts_with("quote line ") {
                    assert!(
                        y + style::QUOTE.line_height <= AUTO_BREAK_Y,
                        "quote line at y={} crosses into the footer area",
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_invalid_block_skipped_others_render() {
        let pages = LayoutEngine::layout(&doc_with(vec![
            Block::Paragraph(Paragraph {
                text: "before".to_string(),
            }),
            Block::Heading(Heading {
                level: 9,
                text: "bogus".to_string(),
            }),
            Block::Paragraph(Paragraph {
                text: "".to_string(),
            }),
            Block::Paragraph(Paragraph {
                text: "after".to_string(),
            }),
        ]));
        let body = texts(&pages[1..]);
        assert!(body.contains(&"before"));
        assert!(body.contains(&"after"));
        assert!(!body.contains(&"bogus"));
    }

    #[test]
    fn test_many_paragraphs_auto_break() {
        let blocks: Vec<Block> = (0..80)
            .map(|i| {
                Block::Paragraph(Paragraph {
                    text: format!("paragraph {}", i),
                })
            })
            .collect();
        let pages = LayoutEngine::layout(&doc_with(blocks));
        assert!(pages.len() > 2);
        // Every page stays inside the page height
        for page in &pages {
            for op in &page.ops {
                if let DrawOp::Text { y, .. } = op {
                    assert!(*y <= AUTO_BREAK_Y);
                }
            }
        }
    }

    #[test]
    fn test_unicode_outside_winansi_replaced() {
        let pages = LayoutEngine::layout(&doc_with(vec![Block::Paragraph(Paragraph {
            text: "emoji \u{1F600} here".to_string(),
        })]));
        let body = texts(&pages[1..]);
        assert!(body.iter().any(|t| t.contains('?')));
    }
}
