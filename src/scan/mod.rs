//! Project directory listing for the bundle header.

pub mod tree;

pub use tree::generate_tree;
