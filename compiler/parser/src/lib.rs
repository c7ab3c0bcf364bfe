#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Manifest parser.
//!
//! Turns a module manifest into a [`ManifestAst`]. The parser is deliberately
//! shallow: it recognises the top-level `class`, `define` and `node`
//! declarations, their formal parameters (with raw type and default
//! expressions) and the resources their bodies reference. It does not validate
//! or evaluate the language.

mod grammar;
mod lexer;

use std::path::{Path, PathBuf};

use ast::ManifestAst;
use thiserror::Error;
use tracing::debug;

/// Errors produced while reading or parsing a manifest.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The manifest could not be read from disk.
    #[error("failed to read manifest {path}: {source}")]
    Io {
        /// Manifest path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The manifest is not syntactically well formed.
    #[error("{path}:{line}:{column}: {message}")]
    Syntax {
        /// Manifest path
        path: PathBuf,
        /// 1-based line of the failure
        line: usize,
        /// 1-based column of the failure
        column: usize,
        /// Description of what was expected
        message: String,
    },
}

/// Convenient result type for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Source of manifest ASTs.
///
/// The pipeline only depends on this trait, so tests and alternative front ends
/// can supply ASTs without touching the filesystem.
pub trait AstProvider {
    /// Parse the manifest at `path`.
    fn parse(&self, path: &Path) -> Result<ManifestAst>;
}

/// The default [`AstProvider`], backed by [`parse_file`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestParser;

impl AstProvider for ManifestParser {
    fn parse(&self, path: &Path) -> Result<ManifestAst> { parse_file(path) }
}

/// Read and parse the manifest at `path`.
pub fn parse_file(path: &Path) -> Result<ManifestAst> {
    let source = std::fs::read_to_string(path)
        .map_err(|source| ParseError::Io { path: path.to_path_buf(), source })?;
    parse_str(&source, path)
}

/// Parse manifest source text. `path` is recorded on the AST and in errors.
pub fn parse_str(source: &str, path: impl Into<PathBuf>) -> Result<ManifestAst> {
    let path = path.into();
    let tokens = lexer::tokenize(source)
        .map_err(|e| syntax_error(source, &path, e.offset, e.message))?;
    let content = grammar::declarations(source, &tokens)
        .map_err(|e| syntax_error(source, &path, e.offset, e.message))?;
    debug!(path = %path.display(), declarations = content.len(), "parsed manifest");
    Ok(ManifestAst::new(path, content))
}

fn syntax_error(source: &str, path: &Path, offset: usize, message: String) -> ParseError {
    let (line, column) = line_column(source, offset);
    ParseError::Syntax { path: path.to_path_buf(), line, column, message }
}

/// 1-based line and column of a byte offset.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let prefix = &source[..offset.min(source.len())];
    let line = prefix.matches('\n').count() + 1;
    let column = prefix.rsplit('\n').next().map(|l| l.chars().count()).unwrap_or(0) + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_column_counts_from_one() {
        let source = "class a {\n  $x = 'y\n}";
        assert_eq!(line_column(source, 0), (1, 1));
        assert_eq!(line_column(source, 12), (2, 3));
    }

    #[test]
    fn syntax_errors_carry_position() {
        let err = parse_str("class foo {\n  file { 'x': }\n", "manifests/foo.pp")
            .expect_err("body is never closed");
        match err {
            ParseError::Syntax { line, path, .. } => {
                assert_eq!(line, 3);
                assert_eq!(path, PathBuf::from("manifests/foo.pp"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
