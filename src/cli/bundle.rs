//! The bundle run: resolve the project, collect, render and write.

use anyhow::{Context, Result};
use clap::Args;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::utils::parse_csv;
use crate::collect::collect;
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::ParserBackend;
use crate::filter::IgnorePolicy;
use crate::imports::extractor_for;
use crate::project::{find_project_root, project_name, revision_info};
use crate::render::{bundle_file_name, render_bundle, write_bundle, BundleMetadata, RenderOptions};
use crate::scan::generate_tree;
use crate::utils::absolutize;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Args)]
pub struct BundleArgs {
    /// Directory to write the bundle into (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to config file (context-bundle.toml or .context-bundle.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ignore .gitignore rules
    #[arg(long)]
    pub no_gitignore: bool,

    /// Also exclude paths matching these gitignore-style patterns (comma-separated)
    #[arg(short = 'e', long, value_name = "GLOBS")]
    pub exclude: Option<String>,

    /// Omit the collection timestamp from the header
    #[arg(long)]
    pub no_timestamp: bool,

    /// Omit the reviewer preamble
    #[arg(long)]
    pub no_prompt: bool,

    /// Maximum depth of the directory tree
    #[arg(long, value_name = "N")]
    pub tree_depth: Option<usize>,

    /// Import parser: rustpython or tree-sitter
    #[arg(long, value_name = "BACKEND")]
    pub parser: Option<ParserBackend>,
}

pub fn run(entry: &Path, args: BundleArgs) -> Result<()> {
    if !entry.is_file() {
        anyhow::bail!("{} does not exist or is not a file", entry.display());
    }
    let entry = absolutize(entry)
        .with_context(|| format!("Failed to resolve entry file: {}", entry.display()))?;
    let start_dir = entry
        .parent()
        .with_context(|| format!("Entry file has no parent directory: {}", entry.display()))?;
    let root = find_project_root(start_dir);

    let file_config = load_config(&root, args.config.as_deref())?;
    let cli_overrides = CliOverrides {
        output_dir: args.output_dir,
        exclude_globs: parse_csv(&args.exclude),
        respect_gitignore: if args.no_gitignore { Some(false) } else { None },
        include_timestamp: if args.no_timestamp { Some(false) } else { None },
        include_prompt: if args.no_prompt { Some(false) } else { None },
        tree_depth: args.tree_depth,
        parser: args.parser,
    };
    let config = merge_cli_with_config(file_config, cli_overrides);
    tracing::debug!("Effective config: {:?}", config);

    let policy = IgnorePolicy::load(root.clone(), config.respect_gitignore, &config.exclude_globs);
    let extractor = extractor_for(config.parser);
    tracing::debug!("Collecting from {} with {}", entry.display(), extractor.name());

    let collection = collect(&entry, &policy, extractor.as_ref());
    if collection.files.is_empty() {
        tracing::warn!("Nothing collected from {}", entry.display());
    }
    if !collection.diagnostics.is_empty() {
        tracing::info!("{} file(s) could not be fully processed", collection.diagnostics.len());
    }

    let collected: HashSet<PathBuf> = collection.files.paths().map(Path::to_path_buf).collect();
    let tree = generate_tree(&policy, config.tree_max_depth, &collected);

    let metadata = BundleMetadata {
        root: root.clone(),
        entry_file: entry.clone(),
        tool_version: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        revision: revision_info(&root),
        timestamp: config
            .include_timestamp
            .then(|| chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()),
    };
    let options = RenderOptions { include_prompt: config.include_prompt };
    let content = render_bundle(&metadata, &collection.files, &tree, options);

    let output_dir = match config.output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let output_path =
        output_dir.join(bundle_file_name(&project_name(&root), &config.output_suffix));
    write_bundle(&output_path, &content)?;

    println!("Collected {} file(s) into {}", collection.files.len(), output_path.display());
    Ok(())
}
