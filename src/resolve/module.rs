//! Dotted module name to file path.

use crate::domain::{PACKAGE_ENTRY_FILE, SOURCE_EXTENSION};
use crate::utils::lexical_normalize;
use std::path::{Path, PathBuf};

/// Resolve `dotted_name` (e.g. `pkg.sub.mod`) beneath `base_dir`.
///
/// Tries the single-file module `base_dir/pkg/sub/mod.py` first, then the package
/// `base_dir/pkg/sub/mod/__init__.py`. Only regular files count; there is no fallback to other
/// search directories.
pub fn resolve_module(dotted_name: &str, base_dir: &Path) -> Option<PathBuf> {
    let segments: Vec<&str> = dotted_name.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return None;
    }
    let module_dir = module_path(base_dir, &segments);
    find_module_file(&module_dir)
}

/// Check `<module_dir>.py`, then `<module_dir>/__init__.py`.
fn find_module_file(module_dir: &Path) -> Option<PathBuf> {
    if let Some(name) = module_dir.file_name() {
        let mut file_name = name.to_os_string();
        file_name.push(".");
        file_name.push(SOURCE_EXTENSION);
        let file_candidate = module_dir.with_file_name(file_name);
        if file_candidate.is_file() {
            return Some(lexical_normalize(&file_candidate));
        }
    }
    find_package_entry(module_dir)
}

/// `<dir>/__init__.py` when it exists.
pub(crate) fn find_package_entry(dir: &Path) -> Option<PathBuf> {
    let package_candidate = dir.join(PACKAGE_ENTRY_FILE);
    package_candidate.is_file().then(|| lexical_normalize(&package_candidate))
}

fn module_path(base_dir: &Path, segments: &[&str]) -> PathBuf {
    let mut path = base_dir.to_path_buf();
    path.extend(segments);
    path
}
