//! Ignore policy shared by the traversal and the directory tree.
//!
//! A path is excluded when one of its segments is a built-in marker (`__pycache__`, `.git`,
//! virtual environments, installed packages) or when the project's ignore rules match it.
//! Both consumers hold the same [`IgnorePolicy`] so the bundle never lists a file that the
//! traversal refused to collect.

pub mod policy;
pub mod spec;

pub use policy::{is_ignored, IgnorePolicy, BUILTIN_EXCLUDES, CACHE_MARKER};
pub use spec::{load_ignore_spec, GitignoreMatcher, PathMatcher};
