//! Import extraction with tree-sitter.
//!
//! tree-sitter recovers from syntax errors by inserting error nodes. A tree that contains any
//! is treated as a parse failure so both backends agree on which files yield edges.

use super::{strip_bom, ImportExtractor, ParseError};
use crate::domain::ImportDeclaration;
use std::path::Path;
use tree_sitter::{Node, Parser};

#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterExtractor;

impl ImportExtractor for TreeSitterExtractor {
    fn name(&self) -> &'static str {
        "tree-sitter"
    }

    fn extract(&self, source: &str, _path: &Path) -> Result<Vec<ImportDeclaration>, ParseError> {
        let source = strip_bom(source);
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|err| ParseError::Grammar(err.to_string()))?;
        let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;

        let root = tree.root_node();
        if root.has_error() {
            let message = match first_error_row(root) {
                Some(row) => format!("invalid syntax near line {}", row + 1),
                None => "invalid syntax".to_string(),
            };
            return Err(ParseError::Syntax(message));
        }

        let bytes = source.as_bytes();
        let mut declarations = Vec::new();
        let mut cursor = root.walk();
        let mut stack = vec![root];

        // Pre-order walk so declarations come out in source order.
        while let Some(node) = stack.pop() {
            match node.kind() {
                "import_statement" => {
                    for name in node.children_by_field_name("name", &mut cursor) {
                        if let Some(module) = imported_module(name, bytes) {
                            declarations.push(ImportDeclaration::Absolute { module });
                        }
                    }
                }
                "import_from_statement" => {
                    if let Some(declaration) = from_import(node, bytes) {
                        declarations.push(declaration);
                    }
                }
                _ => {
                    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
                    stack.extend(children.into_iter().rev());
                }
            }
        }

        Ok(declarations)
    }
}

/// `a.b` or `a.b as c` inside `import ...`.
fn imported_module(node: Node<'_>, source: &[u8]) -> Option<String> {
    match node.kind() {
        "dotted_name" => dotted_text(node, source),
        "aliased_import" => dotted_text(node.child_by_field_name("name")?, source),
        _ => None,
    }
}

fn from_import(node: Node<'_>, source: &[u8]) -> Option<ImportDeclaration> {
    let module_name = node.child_by_field_name("module_name")?;
    match module_name.kind() {
        "dotted_name" => {
            Some(ImportDeclaration::Absolute { module: dotted_text(module_name, source)? })
        }
        "relative_import" => {
            let mut level = 0u32;
            let mut module = None;
            let mut cursor = module_name.walk();
            for child in module_name.children(&mut cursor) {
                match child.kind() {
                    "import_prefix" => {
                        let prefix = child.utf8_text(source).ok()?;
                        level = prefix.chars().filter(|c| *c == '.').count() as u32;
                    }
                    "dotted_name" => module = dotted_text(child, source),
                    _ => {}
                }
            }
            Some(ImportDeclaration::Relative { level, module })
        }
        _ => None,
    }
}

fn dotted_text(node: Node<'_>, source: &[u8]) -> Option<String> {
    let text = node.utf8_text(source).ok()?;
    Some(text.chars().filter(|c| !c.is_whitespace()).collect())
}

fn first_error_row(root: Node<'_>) -> Option<usize> {
    let mut cursor = root.walk();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node.start_position().row);
        }
        if node.has_error() {
            let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    None
}
