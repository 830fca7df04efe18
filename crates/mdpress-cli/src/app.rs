//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use mdpress_ast::Block;
use mdpress_core::normalize_with_title;
use mdpress_pdf::render_pdf;

/// Output format for the blocks dump
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "mdpress")]
#[command(author, version, about = "Markdown in, paginated PDF out", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown or plain-text file to a styled PDF
    Convert {
        /// Input file (.md or .txt)
        input: PathBuf,

        /// Output PDF file (defaults to the input with a .pdf extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Display title for the cover page and page headers
        /// (defaults to the file name without its .md/.txt suffix)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Print the normalized block sequence of a file
    Blocks {
        /// Input file (.md or .txt)
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            title,
        } => {
            convert_command(&input, output.as_deref(), title.as_deref())?;
        }
        Commands::Blocks { input, format } => {
            blocks_command(&input, format)?;
        }
    }

    Ok(())
}

/// Execute the convert command
pub fn convert_command(input: &Path, output: Option<&Path>, title: Option<&str>) -> Result<()> {
    let source = read_text(input)?;

    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| display_name(input));
    let doc = normalize_with_title(&source, title);

    let pdf = render_pdf(&doc)
        .with_context(|| format!("Failed to render {}", input.display()))?;

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension("pdf"),
    };
    fs::write(&output_path, &pdf)
        .with_context(|| format!("Failed to write PDF file: {}", output_path.display()))?;

    println!("Created: {}", output_path.display());
    println!("  {} blocks, {} bytes", doc.len(), pdf.len());

    Ok(())
}

/// Execute the blocks command
pub fn blocks_command(input: &Path, format: OutputFormat) -> Result<()> {
    let source = read_text(input)?;
    let doc = normalize_with_title(&source, display_name(input));

    match format {
        OutputFormat::Text => {
            for (index, block) in doc.blocks.iter().enumerate() {
                println!("{:4}  {}", index, describe(block));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&doc.blocks)
                .context("Failed to serialize blocks")?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Read and decode the input file; decoding failure fails the whole run
fn read_text(input: &Path) -> Result<String> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    let bytes = fs::read(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    String::from_utf8(bytes)
        .with_context(|| format!("{} is not valid UTF-8 text", input.display()))
}

/// Derive the display title from the file name, stripping a known
/// text-file suffix
fn display_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    for suffix in [".md", ".txt"] {
        if let Some(stripped) = name.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    name
}

/// One-line summary of a block for the text dump
fn describe(block: &Block) -> String {
    match block {
        Block::Heading(heading) => format!("heading(l{}): {}", heading.level, excerpt(&heading.text)),
        Block::Paragraph(paragraph) => format!("paragraph: {}", excerpt(&paragraph.text)),
        Block::CodeBlock(code) => format!(
            "code[{}]: {} lines",
            code.language.as_deref().unwrap_or("-"),
            code.lines().count()
        ),
        Block::Blockquote(quote) => format!("blockquote: {}", excerpt(&quote.text)),
        Block::ListItem(item) => format!(
            "{} item: {}",
            if item.ordered { "ordered" } else { "bullet" },
            excerpt(&item.text)
        ),
    }
}

fn excerpt(text: &str) -> String {
    const LIMIT: usize = 50;
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= LIMIT {
        flat
    } else {
        let head: String = flat.chars().take(LIMIT).collect();
        format!("{}...", head)
    }
}
