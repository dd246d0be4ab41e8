//! Turning import declarations into files on disk.

pub mod module;
pub mod reference;

pub use module::resolve_module;
pub use reference::resolve_references;
