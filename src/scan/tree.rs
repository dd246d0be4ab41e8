//! Directory tree generation.

use crate::filter::IgnorePolicy;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to files that made it into the bundle.
pub const COLLECTED_MARKER: &str = " *";

/// Render the project tree under `policy`'s root.
///
/// Entries the policy ignores are pruned along with everything below them, so the tree and
/// the collected set never disagree. Directories sort before files, both by name. Files in
/// `collected` get [`COLLECTED_MARKER`]. `max_depth` of `None` means unlimited. A root that
/// cannot be listed yields just the root line.
pub fn generate_tree(
    policy: &IgnorePolicy,
    max_depth: Option<usize>,
    collected: &HashSet<PathBuf>,
) -> String {
    let root_path = policy.root();
    let mut lines =
        vec![format!("{}/", root_path.file_name().and_then(|n| n.to_str()).unwrap_or("."))];
    match read_entries(policy, root_path) {
        Ok(entries) => {
            let max_depth = max_depth.unwrap_or(usize::MAX);
            let walker = TreeWalker { policy, max_depth, collected };
            walker.walk(entries, "", 1, &mut lines);
        }
        Err(err) => tracing::warn!("Failed to list directory {}: {}", root_path.display(), err),
    }
    lines.join("\n")
}

struct TreeWalker<'a> {
    policy: &'a IgnorePolicy,
    max_depth: usize,
    collected: &'a HashSet<PathBuf>,
}

impl TreeWalker<'_> {
    fn walk(&self, entries: Vec<Entry>, prefix: &str, depth: usize, lines: &mut Vec<String>) {
        if depth > self.max_depth {
            return;
        }

        let total_entries = entries.len();
        for (idx, entry) in entries.into_iter().enumerate() {
            let is_last = idx + 1 == total_entries;
            let connector = if is_last { "└── " } else { "├── " };

            if entry.is_dir {
                lines.push(format!("{}{}{}/", prefix, connector, entry.name));
                let extension = if is_last { "    " } else { "│   " };
                match read_entries(self.policy, &entry.path) {
                    Ok(children) => {
                        self.walk(children, &format!("{}{}", prefix, extension), depth + 1, lines)
                    }
                    Err(err) => tracing::warn!(
                        "Skipping unreadable directory {}: {}",
                        entry.path.display(),
                        err
                    ),
                }
            } else {
                let marker =
                    if self.collected.contains(&entry.path) { COLLECTED_MARKER } else { "" };
                lines.push(format!("{}{}{}{}", prefix, connector, entry.name, marker));
            }
        }
    }
}

struct Entry {
    is_dir: bool,
    name: String,
    path: PathBuf,
}

/// Non-ignored children of `dir`, directories first.
fn read_entries(policy: &IgnorePolicy, dir: &Path) -> std::io::Result<Vec<Entry>> {
    let mut entries: Vec<Entry> = fs::read_dir(dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let file_type = entry.file_type().ok()?;
            let path = entry.path();
            if policy.is_ignored(&path) {
                return None;
            }
            Some(Entry {
                is_dir: file_type.is_dir(),
                name: entry.file_name().to_string_lossy().to_string(),
                path,
            })
        })
        .collect();

    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
    Ok(entries)
}
