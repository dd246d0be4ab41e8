//! Plain-text bundle generation.

use crate::collect::CollectedSet;
use crate::project::RevisionInfo;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const BANNER_WIDTH: usize = 80;

const PREAMBLE: &str = "This file is an auto-generated collection of a project's source code \
and context. Collection started at a single entry file and followed its import statements to \
gather every local project file they reach. Files in __pycache__, virtual environments (venv, \
.venv, env), site-packages, git metadata and paths matched by the project's .gitignore are \
excluded. The following context is provided:";

const PREAMBLE_ITEMS: &[&str] = &[
    "Project root directory (the enclosing git work tree, if any)",
    "Version of the tool that produced the bundle",
    "Current git commit and commit date (if available)",
    "Timestamp of when the collection was performed",
    "A list of all collected files",
    "A filtered directory tree of the project (collected files marked with *)",
];

/// Everything the header reports besides the collected files themselves.
#[derive(Debug, Clone)]
pub struct BundleMetadata {
    pub root: PathBuf,
    pub entry_file: PathBuf,
    pub tool_version: String,
    pub revision: Option<RevisionInfo>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub include_prompt: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { include_prompt: true }
    }
}

/// `<root name><suffix>`, e.g. `shop_collected_code.txt`.
pub fn bundle_file_name(project_name: &str, suffix: &str) -> String {
    format!("{}{}", project_name, suffix)
}

/// Assemble the whole bundle: header, sorted file list, tree, then every file body in
/// collection order.
pub fn render_bundle(
    metadata: &BundleMetadata,
    files: &CollectedSet,
    tree: &str,
    options: RenderOptions,
) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut lines: Vec<String> = Vec::new();

    if options.include_prompt {
        lines.push(banner.clone());
        lines.push("CONTEXT BUNDLE OVERVIEW".to_string());
        lines.push(banner.clone());
        lines.push(PREAMBLE.to_string());
        lines.extend(PREAMBLE_ITEMS.iter().map(|item| format!("  - {}", item)));
        lines.push(
            "Use this information to understand the context and structure of the project when \
             reviewing the code.\n"
                .to_string(),
        );
    }

    lines.push(banner.clone());
    lines.push("PROJECT CONTEXT INFORMATION".to_string());
    lines.push(banner.clone());
    lines.push(format!("Project Root: {}", metadata.root.display()));
    lines.push(format!("Entry File: {}", metadata.entry_file.display()));
    lines.push(format!("Tool Version: {}", metadata.tool_version));
    if let Some(revision) = &metadata.revision {
        lines.push(format!("Git Commit: {}", revision.commit));
        lines.push(format!("Commit Date: {}", revision.date));
    }
    if let Some(timestamp) = &metadata.timestamp {
        lines.push(format!("Collection Timestamp: {}", timestamp));
    }
    lines.push(format!("Total Collected Files: {}", files.len()));
    lines.push(String::new());
    lines.push("List of Collected Files:".to_string());
    lines.extend(files.sorted_paths().iter().map(|path| format!("- {}", path.display())));
    lines.push(String::new());
    lines.push("Filtered Project Directory Structure:".to_string());
    lines.push(tree.to_string());
    lines.push("\n".to_string());

    let mut out = lines.join("\n");
    out.push_str("\n\n");
    for file in files {
        out.push_str(&banner);
        out.push('\n');
        out.push_str(&format!("File: {}\n", file.path.display()));
        out.push_str(&banner);
        out.push_str("\n\n");
        out.push_str(&file.content);
        out.push_str("\n\n");
    }
    out
}

/// Write the rendered bundle, creating the output directory if needed.
pub fn write_bundle(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write bundle: {}", path.display()))?;
    Ok(())
}
