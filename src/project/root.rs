//! Project root discovery

use crate::utils::lexical_normalize;
use std::path::{Path, PathBuf};

/// Directories the upward search never enters, as in git itself.
const CEILING_ENV: &str = "GIT_CEILING_DIRECTORIES";

/// Walk up from `start` looking for a `.git` directory.
///
/// Returns the nearest ancestor (or `start` itself) that contains one, or `None` when the walk
/// reaches the filesystem root, or a directory listed in `GIT_CEILING_DIRECTORIES`, without
/// finding any.
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    find_git_root_with_ceilings(start, &ceiling_directories())
}

/// Same as [`find_git_root`] with explicit ceilings. A ceiling is never searched unless it is
/// `start` itself.
pub fn find_git_root_with_ceilings(start: &Path, ceilings: &[PathBuf]) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").is_dir() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
        if ceilings.iter().any(|ceiling| ceiling == current) {
            return None;
        }
    }
}

fn ceiling_directories() -> Vec<PathBuf> {
    std::env::var_os(CEILING_ENV)
        .map(|value| {
            std::env::split_paths(&value)
                .filter(|path| path.is_absolute())
                .map(|path| lexical_normalize(&path))
                .collect()
        })
        .unwrap_or_default()
}

/// The traversal boundary for an entry file living in `start_dir`.
///
/// Uses the enclosing git work tree when there is one and `start_dir` otherwise, printing a
/// notice either way so the user knows which tree was bundled.
pub fn find_project_root(start_dir: &Path) -> PathBuf {
    choose_root(start_dir, find_git_root(start_dir))
}

fn choose_root(start_dir: &Path, git_root: Option<PathBuf>) -> PathBuf {
    match git_root {
        Some(root) => {
            if root != start_dir {
                println!(
                    "Note: using repository root {} (detected from {})",
                    root.display(),
                    start_dir.display()
                );
            }
            root
        }
        None => {
            println!(
                "Note: no .git found; using {} as project root",
                start_dir.display()
            );
            start_dir.to_path_buf()
        }
    }
}

/// Final path component of the root, used to name the bundle file.
pub fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}
