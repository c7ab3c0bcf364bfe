#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that turns module manifests into rspec-puppet scaffolds.
//!
//! ## Module Organization
//!
//! - `generator` - Per-manifest [`Generator`] and pure output path resolution
//! - `writer` - Scoped atomic file writes
//! - `batch` - Manifest discovery and the batch entry points

use std::path::PathBuf;

use ast::Variant;
use thiserror::Error;

pub mod batch;
pub mod generator;
pub mod writer;

pub use batch::{generate_all_spec_files, generate_spec_files, manifest_files};
pub use generator::{resolve_output, Generator, GeneratorOptions};
pub use writer::write_spec_file;

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while generating scaffolds.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No manifest file was supplied to a generator.
    #[error("a manifest file is required")]
    MissingManifest,
    /// The manifest could not be read, parsed or classified.
    #[error("malformed manifest {path}: {reason}")]
    MalformedManifest {
        /// Manifest path
        path: PathBuf,
        /// What went wrong
        reason: String,
    },
    /// The manifest's first declaration is not of the generator's variant.
    #[error("{path} declares a {found}, not a {expected}")]
    UnsupportedVariant {
        /// Manifest path
        path: PathBuf,
        /// Variant the generator handles
        expected: Variant,
        /// Keyword of the declaration that was found
        found: String,
    },
    /// No scaffold template is registered for a variant.
    #[error("no scaffold template registered for {0}")]
    UnimplementedContract(String),
    /// Error propagated from the codegen crate.
    #[error(transparent)]
    Codegen(codegen::CodegenError),
    /// I/O error while creating directories or writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The temporary file could not be moved onto the target path.
    #[error(transparent)]
    Persist(#[from] tempfile::PersistError),
    /// Manifest discovery failed.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

impl From<codegen::CodegenError> for PipelineError {
    fn from(err: codegen::CodegenError) -> Self {
        match err {
            codegen::CodegenError::UnknownTemplate(id) => PipelineError::UnimplementedContract(id),
            other => PipelineError::Codegen(other),
        }
    }
}
