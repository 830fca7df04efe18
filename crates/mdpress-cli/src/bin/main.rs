//! mdpress CLI binary entry point
//!
//! Thin wrapper that initializes logging and calls the library's
//! `run_cli()` function. Filter render diagnostics with RUST_LOG,
//! e.g. `RUST_LOG=mdpress_pdf=debug` to see which blocks were skipped.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use mdpress_cli::run_cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    run_cli()
}
