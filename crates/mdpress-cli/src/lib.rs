//! mdpress CLI - Command-line interface library
//!
//! This library provides the CLI functionality for mdpress:
//! - Convert: render a Markdown/plain-text file to a paginated PDF
//! - Blocks: dump the normalized block sequence (text or JSON)
//!
//! # Library Usage
//!
//! ```ignore
//! use mdpress_cli::{run_cli, convert_command};
//!
//! // Run the full CLI
//! run_cli()?;
//!
//! // Or use individual commands programmatically
//! convert_command(&input, None, None)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Render a Markdown file to PDF
//! mdpress convert notes.md --output notes.pdf
//!
//! # Inspect the normalized block sequence
//! mdpress blocks notes.md --format json
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{blocks_command, convert_command, run_cli, OutputFormat};
