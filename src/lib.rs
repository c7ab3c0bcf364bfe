// SPDX-License-Identifier: CC0-1.0

//! Retrospec umbrella crate.
//!
//! Generates rspec-puppet test scaffolds from the manifests of a module. The
//! work is split across the workspace member crates under `primitives`,
//! `compiler` and `cli`; this crate re-exports the pieces a library user needs.
//!
//! ```no_run
//! use retrospec::{generate_all_spec_files, GeneratorOptions};
//!
//! let written = generate_all_spec_files("modules/tomcat".as_ref(), &GeneratorOptions::default())?;
//! for path in written {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), retrospec::PipelineError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(deprecated_in_future)]
#![doc(test(attr(warn(unused))))]

pub use ast::{classify, DeclarationKind, ManifestAst, Variant};
pub use codegen::{DumperKind, FullDumper, SpecDumper, SummaryDumper};
pub use parser::{parse_file, AstProvider, ManifestParser};
pub use path::resolve_spec_path;
pub use pipeline::{
    generate_all_spec_files, generate_spec_files, Generator, GeneratorOptions, PipelineError,
};

/// Miscellaneous metadata about the Retrospec workspace.
pub mod retrospec_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
