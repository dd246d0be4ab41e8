//! Ignore-file loading and the matcher strategy behind it.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Decides whether a path is excluded by user-supplied ignore rules.
///
/// `path` is relative to the project root when the path lies inside it, otherwise the raw path.
pub trait PathMatcher {
    fn is_match(&self, path: &Path, is_dir: bool) -> bool;
}

/// `.gitignore` semantics: last matching pattern wins, `!` re-includes, and an ignored directory
/// hides everything below it.
pub struct GitignoreMatcher {
    gitignore: Gitignore,
}

impl GitignoreMatcher {
    pub fn new(gitignore: Gitignore) -> Self {
        Self { gitignore }
    }

    /// Compile gitignore-syntax lines rooted at `root`.
    pub fn from_lines<'a>(
        root: &Path,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ignore::Error> {
        let mut builder = GitignoreBuilder::new(root);
        for line in lines {
            builder.add_line(None, line)?;
        }
        Ok(Self::new(builder.build()?))
    }

    pub fn num_patterns(&self) -> u64 {
        self.gitignore.num_ignores() + self.gitignore.num_whitelists()
    }
}

impl PathMatcher for GitignoreMatcher {
    fn is_match(&self, path: &Path, is_dir: bool) -> bool {
        if path.has_root() {
            // Outside the root there are no parents to consult.
            self.gitignore.matched(path, is_dir).is_ignore()
        } else {
            self.gitignore.matched_path_or_any_parents(path, is_dir).is_ignore()
        }
    }
}

/// Build the project's ignore matcher from `<root>/.gitignore` and `extra_patterns`.
///
/// Returns `None` when there is nothing to match against. An unreadable or malformed
/// `.gitignore` is reported and skipped; the built-in exclusions keep applying regardless.
pub fn load_ignore_spec(
    root: &Path,
    respect_gitignore: bool,
    extra_patterns: &[String],
) -> Option<Box<dyn PathMatcher>> {
    let mut lines: Vec<String> = Vec::new();

    let gitignore_path = root.join(".gitignore");
    if respect_gitignore && gitignore_path.is_file() {
        match read_gitignore(root, &gitignore_path) {
            Ok(file_lines) => lines.extend(file_lines),
            Err(err) => {
                tracing::warn!("Error reading {}: {}", gitignore_path.display(), err);
            }
        }
    }

    for pattern in extra_patterns {
        match GitignoreMatcher::from_lines(root, [pattern.as_str()]) {
            Ok(_) => lines.push(pattern.clone()),
            Err(err) => tracing::warn!("Skipping invalid exclude pattern '{}': {}", pattern, err),
        }
    }

    if lines.is_empty() {
        return None;
    }

    match GitignoreMatcher::from_lines(root, lines.iter().map(String::as_str)) {
        Ok(matcher) if matcher.num_patterns() > 0 => {
            tracing::debug!(patterns = matcher.num_patterns(), "compiled ignore rules");
            Some(Box::new(matcher))
        }
        Ok(_) => None,
        Err(err) => {
            tracing::warn!("Failed to compile ignore rules: {}", err);
            None
        }
    }
}

/// Read `.gitignore` and check that every line compiles.
fn read_gitignore(root: &Path, path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    GitignoreMatcher::from_lines(root, lines.iter().map(String::as_str))?;
    Ok(lines)
}
