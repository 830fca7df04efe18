//! mdpress-ast - Document model definitions
//!
//! This crate provides the types used by mdpress for representing a
//! normalized document: an ordered, flat sequence of self-contained blocks.
//!
//! The model is deliberately flat. List items carry their own ordered/
//! unordered flag instead of living inside a list node, and blockquotes
//! carry their full text rather than nested blocks. The renderer walks the
//! sequence once, in document order, with no cross-block references.

mod block;
mod document;

pub use block::{Block, Blockquote, CodeBlock, Heading, ListItem, Paragraph};
pub use document::{Document, DocumentMeta};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
