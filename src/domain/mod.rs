//! Core domain types shared across the crate.

mod config;

pub use config::{Config, ParserBackend, DEFAULT_OUTPUT_SUFFIX};

/// Python source file extension (without the dot).
pub const SOURCE_EXTENSION: &str = "py";

/// File that turns a directory into an importable package.
pub const PACKAGE_ENTRY_FILE: &str = "__init__.py";

/// One import statement found in a source file.
///
/// `import a.b, c` yields two `Absolute` declarations. `from x import y` is `Absolute { module:
/// "x" }` because only the module part names a file; `y` may be an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImportDeclaration {
    /// A dotted module name with no leading dots.
    Absolute { module: String },
    /// `from ..pkg.mod import x`: `level` counts the leading dots, `module` is the optional
    /// dotted name after them.
    Relative { level: u32, module: Option<String> },
}

impl ImportDeclaration {
    pub fn absolute(module: impl Into<String>) -> Self {
        Self::Absolute { module: module.into() }
    }

    pub fn relative(level: u32, module: Option<&str>) -> Self {
        Self::Relative { level, module: module.map(str::to_string) }
    }
}
