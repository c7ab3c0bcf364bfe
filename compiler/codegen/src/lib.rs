#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Scaffold content generation for module manifests.
//!
//! This crate turns a parsed [`ManifestAst`](ast::ManifestAst) into the text of an
//! rspec-puppet test scaffold. It extracts formal parameters, assembles a
//! [`GenerationContext`] and renders it through a pluggable [`SpecDumper`].
//!
//! Path resolution and file writes live in companion crates; everything here is a
//! pure function of its input.

pub mod dumpers;
pub mod generation_context;
pub mod parameters;
pub mod utils;

use thiserror::Error;

pub use dumpers::{render, DumperKind, FullDumper, SpecDumper, SummaryDumper};
pub use generation_context::{GenerationContext, GenerationContextBuilder};
pub use parameters::{extract, ExtractedParameter, ExtractedParameters, PARAMETER_SEPARATOR};

/// Error type for code generation operations in this crate.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The AST has no declaration to render.
    #[error(transparent)]
    Ast(#[from] ast::AstError),
    /// The first declaration is not a class, definition or node.
    #[error("cannot render a scaffold for a '{0}' declaration")]
    Unclassified(String),
    /// No template is registered under the requested identifier.
    #[error("unknown scaffold template '{0}'")]
    UnknownTemplate(String),
    /// Formatting error when building generated source.
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
    /// Generic message-based error.
    #[error("{0}")]
    Message(String),
}

impl From<String> for CodegenError {
    fn from(msg: String) -> Self { CodegenError::Message(msg) }
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;
