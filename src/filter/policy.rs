//! The ignore decision itself.

use crate::filter::spec::{load_ignore_spec, PathMatcher};
use std::path::{Component, Path, PathBuf};

/// Directory name Python uses for bytecode caches.
pub const CACHE_MARKER: &str = "__pycache__";

/// Version-control metadata, virtual environments and installed-package directories.
pub const BUILTIN_EXCLUDES: &[&str] =
    &[".git", ".gitignore", ".gitmodules", "venv", ".venv", "env", "site-packages"];

/// Decide whether `path` is excluded from collection and from the printed tree.
///
/// Built-in markers are checked against the segments of the path relative to `root` (or the
/// whole path when it lies outside `root`), so a project that happens to live under a directory
/// called `env` is still collectable. `spec` sees the same relative path.
pub fn is_ignored(path: &Path, root: &Path, spec: Option<&dyn PathMatcher>) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);

    let has_marker = relative.components().any(|component| match component {
        Component::Normal(name) => name
            .to_str()
            .is_some_and(|name| name == CACHE_MARKER || BUILTIN_EXCLUDES.contains(&name)),
        _ => false,
    });
    if has_marker {
        return true;
    }

    match spec {
        Some(spec) if !relative.as_os_str().is_empty() => spec.is_match(relative, path.is_dir()),
        _ => false,
    }
}

/// Project root paired with its optional ignore rules; immutable for a run.
pub struct IgnorePolicy {
    root: PathBuf,
    spec: Option<Box<dyn PathMatcher>>,
}

impl IgnorePolicy {
    pub fn new(root: PathBuf, spec: Option<Box<dyn PathMatcher>>) -> Self {
        Self { root, spec }
    }

    /// Only the built-in exclusions apply.
    pub fn builtin_only(root: PathBuf) -> Self {
        Self::new(root, None)
    }

    /// Load `.gitignore` (when `respect_gitignore`) and `extra_patterns` for `root`.
    pub fn load(root: PathBuf, respect_gitignore: bool, extra_patterns: &[String]) -> Self {
        let spec = load_ignore_spec(&root, respect_gitignore, extra_patterns);
        Self::new(root, spec)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn has_spec(&self) -> bool {
        self.spec.is_some()
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        is_ignored(path, &self.root, self.spec.as_deref())
    }
}
