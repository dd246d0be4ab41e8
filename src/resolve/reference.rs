//! Import declaration to candidate files.

use crate::domain::ImportDeclaration;
use crate::resolve::module::{find_package_entry, resolve_module};
use std::path::{Path, PathBuf};

/// Resolve one declaration found in `importing_file`.
///
/// Absolute imports search the importing file's own directory before `root`; the first hit
/// wins. Relative imports climb `level - 1` directories from the importing file's directory
/// and then look for the trailing module, or for the package entry of the directory reached
/// when there is none. Returns at most one path; an empty result means "unresolved", which is
/// not an error.
pub fn resolve_references(
    declaration: &ImportDeclaration,
    importing_file: &Path,
    root: &Path,
) -> Vec<PathBuf> {
    let current_dir = importing_file.parent().unwrap_or(importing_file);

    let resolved = match declaration {
        ImportDeclaration::Absolute { module } => {
            resolve_module(module, current_dir).or_else(|| resolve_module(module, root))
        }
        ImportDeclaration::Relative { level, module } => {
            let base = ascend(current_dir, level.saturating_sub(1));
            match module {
                Some(module) => resolve_module(module, &base),
                None => find_package_entry(&base),
            }
        }
    };

    resolved.into_iter().collect()
}

/// Climb `steps` parents; the filesystem root is its own parent.
fn ascend(dir: &Path, steps: u32) -> PathBuf {
    let mut current = dir;
    for _ in 0..steps {
        current = current.parent().unwrap_or(current);
    }
    current.to_path_buf()
}
