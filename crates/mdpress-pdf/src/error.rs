//! Error types for PDF rendering

use thiserror::Error;

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Errors that fail a whole render call
///
/// These abort the render with no output. Per-block problems are not
/// errors at this level; they become a [`SkipReason`] and only drop the
/// offending block.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Builtin font could not be registered
    #[error("font error: {0}")]
    Font(String),

    /// PDF serialization failed
    #[error("PDF serialization failed: {0}")]
    Emit(String),
}

/// Why a single block was dropped during layout
///
/// Skips are non-fatal: the block is omitted and traversal continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Block text was empty after sanitization and trimming
    #[error("block text is empty")]
    EmptyText,

    /// Heading level outside the supported 1-4 range
    #[error("unsupported heading level {0}")]
    HeadingLevel(u8),
}
