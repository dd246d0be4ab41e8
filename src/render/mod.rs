//! Bundle rendering

pub mod report;

pub use report::{bundle_file_name, render_bundle, write_bundle, BundleMetadata, RenderOptions};
