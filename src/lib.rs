//! context-bundle: follow a Python entry file's local imports and bundle the result
//!
//! Starting from one entry file, the crate statically resolves every local module the file
//! imports (transitively), then renders the reached files, the project's filtered directory
//! tree and revision metadata into a single text snapshot.

pub mod cli;
pub mod collect;
pub mod config;
pub mod domain;
pub mod filter;
pub mod imports;
pub mod project;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod utils;
