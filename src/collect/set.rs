//! The ordered, de-duplicated path -> content mapping produced by one traversal.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Arena index of a collected file, assigned in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedFile {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Default, Clone)]
pub struct CollectedSet {
    files: Vec<CollectedFile>,
    index: HashMap<PathBuf, FileId>,
}

impl CollectedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains_key(path)
    }

    pub fn id_of(&self, path: &Path) -> Option<FileId> {
        self.index.get(path).copied()
    }

    pub fn get(&self, id: FileId) -> &CollectedFile {
        &self.files[id.0]
    }

    pub fn content_of(&self, path: &Path) -> Option<&str> {
        self.id_of(path).map(|id| self.files[id.0].content.as_str())
    }

    /// Record a newly discovered file. The first insertion of a path wins; later ones return
    /// the existing id and leave the stored content untouched.
    pub(crate) fn insert(&mut self, path: PathBuf, content: String) -> FileId {
        if let Some(id) = self.index.get(&path) {
            return *id;
        }
        let id = FileId(self.files.len());
        self.index.insert(path.clone(), id);
        self.files.push(CollectedFile { path, content });
        id
    }

    /// Files in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &CollectedFile> {
        self.files.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|file| file.path.as_path())
    }

    pub fn sorted_paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = self.paths().collect();
        paths.sort();
        paths
    }
}

impl<'a> IntoIterator for &'a CollectedSet {
    type Item = &'a CollectedFile;
    type IntoIter = std::slice::Iter<'a, CollectedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
