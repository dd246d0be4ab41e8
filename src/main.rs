//! context-bundle command-line entry point.

use anyhow::Result;

fn main() -> Result<()> {
    context_bundle::cli::run()
}
