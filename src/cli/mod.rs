//! Command-line interface for context-bundle
//!
//! A single command: follow the imports of one entry file and write the bundle.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod bundle;
mod utils;

/// Bundle a Python entry file and every local module it imports into one text file
#[derive(Parser)]
#[command(name = "context-bundle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Python file to start collecting from
    #[arg(value_name = "ENTRY")]
    entry: PathBuf,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    args: bundle::BundleArgs,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    bundle::run(&cli.entry, cli.args)
}
