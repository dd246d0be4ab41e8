//! Import extraction from Python source.
//!
//! The traversal only needs the import statements of each file, so parsing sits behind the
//! [`ImportExtractor`] trait. Two backends ship: the `rustpython` grammar (strict, the default)
//! and `tree-sitter-python`.

pub mod rustpython;
pub mod treesitter;

use crate::domain::{ImportDeclaration, ParserBackend};
use std::path::Path;
use thiserror::Error;

pub use rustpython::RustPythonExtractor;
pub use treesitter::TreeSitterExtractor;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0}")]
    Syntax(String),
    #[error("failed to load grammar: {0}")]
    Grammar(String),
    #[error("parser returned no syntax tree")]
    NoTree,
}

/// Yields the import declarations of one source file, in source order.
pub trait ImportExtractor {
    fn name(&self) -> &'static str;

    fn extract(&self, source: &str, path: &Path) -> Result<Vec<ImportDeclaration>, ParseError>;
}

pub fn extractor_for(backend: ParserBackend) -> Box<dyn ImportExtractor> {
    match backend {
        ParserBackend::RustPython => Box::new(RustPythonExtractor),
        ParserBackend::TreeSitter => Box::new(TreeSitterExtractor),
    }
}

/// Both grammars reject a leading byte-order mark that editors sometimes leave behind.
fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{feff}').unwrap_or(source)
}

/// Shared fixtures: every backend must agree on these.
#[cfg(test)]
pub(crate) mod conformance {
    use super::*;

    pub const SAMPLE: &str = r#""""Module docstring."""
import os
import pkg.sub as alias, helpers
from core.models import User
from . import sibling
from .. import parent_thing
from ..shared.util import tool
from . sub import leaf

def handler():
    from .lazy import loader
    if True:
        import deep.nested
    return loader

class Service:
    try:
        import fast_json as json
    except ImportError:
        import json
    finally:
        from .cleanup import done

for item in range(3):
    import looped
else:
    import after_loop

while False:
    import never
"#;

    pub fn expected() -> Vec<ImportDeclaration> {
        vec![
            ImportDeclaration::absolute("os"),
            ImportDeclaration::absolute("pkg.sub"),
            ImportDeclaration::absolute("helpers"),
            ImportDeclaration::absolute("core.models"),
            ImportDeclaration::relative(1, None),
            ImportDeclaration::relative(2, None),
            ImportDeclaration::relative(2, Some("shared.util")),
            ImportDeclaration::relative(1, Some("sub")),
            ImportDeclaration::relative(1, Some("lazy")),
            ImportDeclaration::absolute("deep.nested"),
            ImportDeclaration::absolute("fast_json"),
            ImportDeclaration::absolute("json"),
            ImportDeclaration::relative(1, Some("cleanup")),
            ImportDeclaration::absolute("looped"),
            ImportDeclaration::absolute("after_loop"),
            ImportDeclaration::absolute("never"),
        ]
    }

    pub fn check_sample(extractor: &dyn ImportExtractor) {
        let found = extractor.extract(SAMPLE, Path::new("sample.py")).expect("sample parses");
        similar_asserts::assert_eq!(found, expected());
    }

    pub fn check_syntax_error(extractor: &dyn ImportExtractor) {
        let result = extractor.extract("import os\ndef broken(:\n    pass\n", Path::new("bad.py"));
        assert!(matches!(result, Err(ParseError::Syntax(_))), "got {:?}", result);
    }

    pub fn check_bom(extractor: &dyn ImportExtractor) {
        let found =
            extractor.extract("\u{feff}import first\n", Path::new("bom.py")).expect("parses");
        assert_eq!(found, vec![ImportDeclaration::absolute("first")]);
    }

    pub fn check_empty(extractor: &dyn ImportExtractor) {
        let found = extractor.extract("", Path::new("empty.py")).expect("parses");
        assert!(found.is_empty());
    }
}
