// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Path utility functions for module layouts and scaffold output paths.
//!
//! This crate maps declaration names onto spec file locations, locates manifests
//! for a declaration, and finds the root of the module being scaffolded.

pub mod path_utils;

// Re-export for convenience
pub use path_utils::*;
