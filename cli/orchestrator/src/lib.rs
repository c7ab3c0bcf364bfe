#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Collection of utilities for the retrospec command line.

use std::path::{Path, PathBuf};

use ast::Variant;
use codegen::DumperKind;
use config::{Config, ConfigError, GenerationConfig};
use pipeline::{Generator, GeneratorOptions, PipelineError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Scaffold generation failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    /// No module root was found at or above the given directory.
    #[error("{0} is not inside a module: {1}")]
    ModuleRoot(PathBuf, String),
    /// The configured dumper name is not recognised.
    #[error("{0}")]
    Dumper(String),
    /// The manifest does not declare a class, definition or node.
    #[error("{0} does not declare a class, define or node")]
    Unclassified(PathBuf),
}

/// Result type alias for command operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Load the configuration from `explicit` or, failing that, the default location.
///
/// An explicitly named file must exist. A missing default file yields defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Ok(Config::from_file(path)?),
        None => match Config::default_path() {
            Ok(path) => Ok(Config::load_or_default(path)?),
            Err(ConfigError::ConfigDirUnavailable) => Ok(Config::default()),
            Err(err) => Err(err.into()),
        },
    }
}

/// Generator options from the configured settings, with an optional dumper override.
pub fn generator_options(
    generation: &GenerationConfig,
    dumper_override: Option<&str>,
) -> Result<GeneratorOptions> {
    let dumper: DumperKind = dumper_override
        .unwrap_or(generation.dumper.as_str())
        .parse()
        .map_err(|e: codegen::CodegenError| CliError::Dumper(e.to_string()))?;

    Ok(GeneratorOptions {
        manifest_extension: generation.manifest_extension.clone(),
        spec_extension: generation.spec_extension.clone(),
        dumper,
    })
}

/// Module root at or above `start`.
pub fn module_root(start: &Path) -> Result<PathBuf> {
    path::find_module_root(start)
        .map_err(|e| CliError::ModuleRoot(start.to_path_buf(), e.to_string()))
}

/// Variant declared by the first declaration of `manifest`.
pub fn detect_variant(module_root: &Path, manifest: &Path) -> Result<Variant> {
    let generator = Generator::new(module_root, Some(manifest.to_path_buf()), Variant::Class)?;
    Variant::from_kind(&generator.declaration_kind()?)
        .ok_or_else(|| CliError::Unclassified(manifest.to_path_buf()))
}

/// Output path of the scaffold for `manifest`, without writing it.
pub fn spec_path(
    module_root: &Path,
    manifest: &Path,
    variant: Option<Variant>,
    options: &GeneratorOptions,
) -> Result<PathBuf> {
    let variant = match variant {
        Some(variant) => variant,
        None => detect_variant(module_root, manifest)?,
    };
    let generator = Generator::new(module_root, Some(manifest.to_path_buf()), variant)?
        .with_options(options.clone());
    Ok(generator.item_spec_path()?)
}
