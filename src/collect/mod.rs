//! Import-graph traversal.
//!
//! Starting at the entry file, every import that resolves to a file inside the project root
//! is visited exactly once. A file is recorded before its imports are followed, which is what
//! makes cycles terminate. The walk is depth-first in declaration order and uses an explicit
//! stack of frames, so arbitrarily long import chains cannot overflow the call stack.

mod set;

pub use set::{CollectedFile, CollectedSet, FileId};

use crate::filter::IgnorePolicy;
use crate::imports::{ImportExtractor, ParseError};
use crate::resolve::resolve_references;
use crate::utils::{absolutize, is_within, read_source};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A per-file failure. None of these stop the traversal.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl CollectError {
    pub fn path(&self) -> &Path {
        match self {
            CollectError::Read { path, .. } | CollectError::Parse { path, .. } => path,
        }
    }
}

/// Result of one traversal run.
#[derive(Debug, Default)]
pub struct Collection {
    pub files: CollectedSet,
    pub diagnostics: Vec<CollectError>,
}

/// Pending edges of a file whose imports are being followed.
struct Frame {
    file: FileId,
    targets: std::vec::IntoIter<PathBuf>,
}

pub struct Collector<'a> {
    policy: &'a IgnorePolicy,
    extractor: &'a dyn ImportExtractor,
}

impl<'a> Collector<'a> {
    /// The policy carries the project root that bounds the traversal.
    pub fn new(policy: &'a IgnorePolicy, extractor: &'a dyn ImportExtractor) -> Self {
        Self { policy, extractor }
    }

    pub fn root(&self) -> &Path {
        self.policy.root()
    }

    pub fn collect(&self, entry_file: &Path) -> Collection {
        let mut collection = Collection::default();
        let mut stack: Vec<Frame> = Vec::new();

        if let Some(frame) = self.visit(entry_file, &mut collection) {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            match frame.targets.next() {
                Some(target) => {
                    if let Some(next) = self.visit(&target, &mut collection) {
                        stack.push(next);
                    }
                }
                None => {
                    let done = frame.file;
                    stack.pop();
                    tracing::trace!(
                        file = %collection.files.get(done).path.display(),
                        "finished following imports"
                    );
                }
            }
        }

        tracing::debug!(
            files = collection.files.len(),
            diagnostics = collection.diagnostics.len(),
            "traversal complete"
        );
        collection
    }

    /// Record one file and return a frame for its in-root imports, or `None` when the branch
    /// ends here.
    fn visit(&self, path: &Path, collection: &mut Collection) -> Option<Frame> {
        let path = match absolutize(path) {
            Ok(path) => path,
            Err(source) => {
                self.report(collection, CollectError::Read { path: path.to_path_buf(), source });
                return None;
            }
        };

        if collection.files.contains(&path) {
            tracing::trace!(path = %path.display(), "already collected");
            return None;
        }
        if self.policy.is_ignored(&path) {
            tracing::debug!(path = %path.display(), "skipping ignored file");
            return None;
        }

        let content = match read_source(&path) {
            Ok(content) => content,
            Err(source) => {
                self.report(collection, CollectError::Read { path, source });
                return None;
            }
        };

        let id = collection.files.insert(path.clone(), content);
        tracing::debug!(path = %path.display(), "collected");

        let parsed = self.extractor.extract(&collection.files.get(id).content, &path);
        let declarations = match parsed {
            Ok(declarations) => declarations,
            Err(source) => {
                self.report(collection, CollectError::Parse { path, source });
                return None;
            }
        };

        let root = self.root();
        let targets: Vec<PathBuf> = declarations
            .iter()
            .flat_map(|declaration| resolve_references(declaration, &path, root))
            .filter(|target| is_within(target, root))
            .collect();

        Some(Frame { file: id, targets: targets.into_iter() })
    }

    fn report(&self, collection: &mut Collection, error: CollectError) {
        tracing::warn!("{}", error);
        collection.diagnostics.push(error);
    }
}

/// Collect every file reachable from `entry_file` under `policy`'s root.
pub fn collect(
    entry_file: &Path,
    policy: &IgnorePolicy,
    extractor: &dyn ImportExtractor,
) -> Collection {
    Collector::new(policy, extractor).collect(entry_file)
}
