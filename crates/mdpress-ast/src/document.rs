//! Document root and metadata definitions

use serde::{Deserialize, Serialize};

use crate::block::Block;

/// A complete normalized document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (display title)
    pub metadata: DocumentMeta,
    /// Document content blocks, in document order
    pub blocks: Vec<Block>,
}

/// Document metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Display title, used for the cover page and per-page header
    pub title: Option<String>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            metadata: DocumentMeta::default(),
            blocks: Vec::new(),
        }
    }

    /// Create a document with a display title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            metadata: DocumentMeta {
                title: Some(title.into()),
            },
            blocks: Vec::new(),
        }
    }

    /// Add a block to the document
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// The display title, or the fallback used when none was supplied
    pub fn display_title(&self) -> &str {
        self.metadata.title.as_deref().unwrap_or("Document")
    }

    /// Check if the document is empty (no blocks)
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
