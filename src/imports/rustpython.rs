//! Import extraction with the RustPython parser.

use super::{strip_bom, ImportExtractor, ParseError};
use crate::domain::ImportDeclaration;
use rustpython_parser::ast;
use rustpython_parser::Parse;
use std::path::Path;

/// Strict extractor: any syntax error fails the whole file.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustPythonExtractor;

impl ImportExtractor for RustPythonExtractor {
    fn name(&self) -> &'static str {
        "rustpython"
    }

    fn extract(&self, source: &str, path: &Path) -> Result<Vec<ImportDeclaration>, ParseError> {
        let suite = ast::Suite::parse(strip_bom(source), &path.to_string_lossy())
            .map_err(|err| ParseError::Syntax(err.to_string()))?;

        let mut declarations = Vec::new();
        collect_block(&suite, &mut declarations);
        Ok(declarations)
    }
}

/// Walk a statement block in source order, descending into every nested block.
fn collect_block(body: &[ast::Stmt], out: &mut Vec<ImportDeclaration>) {
    for stmt in body {
        match stmt {
            ast::Stmt::Import(import) => {
                out.extend(
                    import
                        .names
                        .iter()
                        .map(|alias| ImportDeclaration::absolute(alias.name.as_str())),
                );
            }
            ast::Stmt::ImportFrom(import) => {
                let level = import.level.map(|level| level.to_u32()).unwrap_or(0);
                let module = import.module.as_ref().map(|module| module.as_str());
                match (level, module) {
                    (0, Some(module)) => out.push(ImportDeclaration::absolute(module)),
                    (0, None) => {}
                    (level, module) => out.push(ImportDeclaration::relative(level, module)),
                }
            }
            ast::Stmt::FunctionDef(def) => collect_block(&def.body, out),
            ast::Stmt::AsyncFunctionDef(def) => collect_block(&def.body, out),
            ast::Stmt::ClassDef(def) => collect_block(&def.body, out),
            ast::Stmt::For(stmt) => {
                collect_block(&stmt.body, out);
                collect_block(&stmt.orelse, out);
            }
            ast::Stmt::AsyncFor(stmt) => {
                collect_block(&stmt.body, out);
                collect_block(&stmt.orelse, out);
            }
            ast::Stmt::While(stmt) => {
                collect_block(&stmt.body, out);
                collect_block(&stmt.orelse, out);
            }
            ast::Stmt::If(stmt) => {
                collect_block(&stmt.body, out);
                collect_block(&stmt.orelse, out);
            }
            ast::Stmt::With(stmt) => collect_block(&stmt.body, out),
            ast::Stmt::AsyncWith(stmt) => collect_block(&stmt.body, out),
            ast::Stmt::Match(stmt) => {
                for case in &stmt.cases {
                    collect_block(&case.body, out);
                }
            }
            ast::Stmt::Try(stmt) => {
                collect_block(&stmt.body, out);
                collect_handlers(&stmt.handlers, out);
                collect_block(&stmt.orelse, out);
                collect_block(&stmt.finalbody, out);
            }
            ast::Stmt::TryStar(stmt) => {
                collect_block(&stmt.body, out);
                collect_handlers(&stmt.handlers, out);
                collect_block(&stmt.orelse, out);
                collect_block(&stmt.finalbody, out);
            }
            _ => {}
        }
    }
}

fn collect_handlers(handlers: &[ast::ExceptHandler], out: &mut Vec<ImportDeclaration>) {
    for handler in handlers {
        let ast::ExceptHandler::ExceptHandler(handler) = handler;
        collect_block(&handler.body, out);
    }
}
