//! Shared helpers: path normalization and source decoding.

pub mod encoding;
pub mod paths;

pub use encoding::read_source;
pub use paths::{absolutize, is_within, lexical_normalize};
