// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Retrospec manifest AST
//!
//! This crate defines the structural representation of a parsed module manifest
//! and the classification of its top-level declaration. It is produced by the
//! parser crate and consumed by the path resolver, code generators and pipeline.

pub mod classifier;
pub mod manifest_ast;

// Re-export the main AST types for convenience
pub use classifier::{classify, Variant};
pub use manifest_ast::*;
