//! Revision metadata for the bundle header.

use chrono::{DateTime, FixedOffset};
use git2::Repository;
use std::path::Path;

/// `git log -1 --format=%cd` style: `Tue Mar 5 14:02:11 2024 +0100`.
const COMMIT_DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionInfo {
    pub commit: String,
    pub date: String,
}

/// HEAD commit of the repository whose work tree is `root`, if any.
///
/// `root` comes from project root discovery, so it is either a work tree or a directory with
/// no repository above it. Missing repositories and unborn branches yield `None`.
pub fn revision_info(root: &Path) -> Option<RevisionInfo> {
    match head_revision(root) {
        Ok(info) => Some(info),
        Err(err) => {
            tracing::debug!("no revision info for {}: {}", root.display(), err);
            None
        }
    }
}

fn head_revision(root: &Path) -> Result<RevisionInfo, git2::Error> {
    let repo = Repository::open(root)?;
    let commit = repo.head()?.peel_to_commit()?;
    let time = commit.time();
    Ok(RevisionInfo {
        commit: commit.id().to_string(),
        date: format_commit_time(time.seconds(), time.offset_minutes()),
    })
}

/// Render a commit timestamp in the committer's own UTC offset.
pub fn format_commit_time(seconds: i64, offset_minutes: i32) -> String {
    let committed = FixedOffset::east_opt(offset_minutes.saturating_mul(60))
        .and_then(|offset| Some(DateTime::from_timestamp(seconds, 0)?.with_timezone(&offset)));
    match committed {
        Some(time) => time.format(COMMIT_DATE_FORMAT).to_string(),
        None => seconds.to_string(),
    }
}
