//! Project-level facts gathered around the traversal: where the root is and which revision it
//! is at.

pub mod git;
pub mod root;

pub use git::{revision_info, RevisionInfo};
pub use root::{find_project_root, project_name};
