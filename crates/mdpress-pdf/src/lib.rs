//! mdpress-pdf - Paginated PDF rendering
//!
//! This crate turns a normalized [`mdpress_ast::Document`] into a styled,
//! paginated PDF byte buffer.
//!
//! # Architecture
//!
//! The rendering pipeline consists of two stages:
//!
//! 1. **Layout** - Walks the block sequence in document order and
//!    produces per-page lists of draw operations, handling wrapping,
//!    page breaks, and decorations.
//! 2. **Emitter** - Serializes the draw operations to PDF bytes via
//!    `printpdf` and the builtin Helvetica/Courier faces.
//!
//! A render call either returns a non-empty buffer or a [`PdfError`],
//! never partial output. Individual malformed blocks are skipped during
//! layout and the rest of the document still renders.
//!
//! # Example
//!
//! ```
//! use mdpress_ast::{Block, Document, Paragraph};
//! use mdpress_pdf::render_pdf;
//!
//! let mut doc = Document::with_title("Notes");
//! doc.push(Block::Paragraph(Paragraph {
//!     text: "Hello, page.".to_string(),
//! }));
//!
//! let pdf = render_pdf(&doc).unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! ```

mod emitter;
mod error;
mod layout;
pub mod style;
mod text;

pub use emitter::Emitter;
pub use error::{PdfError, Result, SkipReason};
pub use layout::{DrawOp, LayoutEngine, ListNumbering, Page, RenderCursor};

use tracing::info;

/// Render a document to PDF bytes
///
/// # Arguments
/// * `doc` - The normalized document to render
///
/// # Returns
/// PDF bytes on success; always non-empty (cover page plus body).
pub fn render_pdf(doc: &mdpress_ast::Document) -> Result<Vec<u8>> {
    let pages = LayoutEngine::layout(doc);
    let bytes = Emitter::emit(doc.display_title(), &pages)?;
    info!(
        pages = pages.len(),
        bytes = bytes.len(),
        "rendered document"
    );
    Ok(bytes)
}
