//! mdpress-core - Markdown normalization
//!
//! Core library for mdpress, converting raw Markdown or plain text into a
//! flat, ordered [`mdpress_ast::Block`] sequence ready for paginated
//! rendering.
//!
//! Normalization is best-effort and total: malformed Markdown never fails
//! the whole document, it just parses as the nearest CommonMark reading
//! (usually plain paragraphs).
//!
//! # Example
//!
//! ```
//! use mdpress_ast::Block;
//! use mdpress_core::normalize;
//!
//! let doc = normalize("# Title\n\nSome body text.\n");
//! assert_eq!(doc.len(), 2);
//! assert!(matches!(doc.blocks[0], Block::Heading(_)));
//! assert!(matches!(doc.blocks[1], Block::Paragraph(_)));
//! ```

pub mod normalizer;

// Re-export main entry points
pub use normalizer::{normalize, normalize_with_title};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
