//! Batch generation over a module's `manifests/` directory.
//!
//! Discovery is non-recursive and sorted by file name, so a batch always visits
//! manifests in the same order. Each manifest gets its own [`Generator`];
//! manifests of another variant are skipped and malformed ones are logged and
//! skipped without aborting the batch.

use std::path::{Path, PathBuf};

use ast::Variant;
use path::manifests_dir;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::generator::{Generator, GeneratorOptions};
use crate::{PipelineError, Result};

/// Manifest files directly inside `«module_root»/manifests`, sorted by name.
///
/// Symlinked manifests are followed. A module without a manifests directory
/// has no manifests.
pub fn manifest_files(module_root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = manifests_dir(module_root);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let walker =
        WalkDir::new(&dir).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name();
    for entry in walker {
        let entry = entry?;
        let matches = entry.path().extension().is_some_and(|ext| ext == extension);
        if entry.file_type().is_file() && matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Generate the scaffolds of every manifest declaring `variant`.
///
/// Returns the written paths in discovery order. I/O failures while writing
/// abort the batch.
pub fn generate_spec_files(
    module_root: &Path,
    variant: Variant,
    options: &GeneratorOptions,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for manifest in manifest_files(module_root, &options.manifest_extension)? {
        let generator = Generator::new(module_root, Some(manifest.clone()), variant)?
            .with_options(options.clone());

        match generator.generate_spec_file() {
            Ok(path) => written.push(path),
            Err(PipelineError::UnsupportedVariant { found, .. }) => {
                debug!(manifest = %manifest.display(), %found, %variant, "skipping manifest");
            }
            Err(err @ PipelineError::MalformedManifest { .. }) => {
                warn!(error = %err, "skipping malformed manifest");
            }
            Err(err) => return Err(err),
        }
    }

    info!(%variant, count = written.len(), module = %module_root.display(), "batch complete");
    Ok(written)
}

/// Generate the scaffolds of every variant: classes, then definitions, then nodes.
pub fn generate_all_spec_files(
    module_root: &Path,
    options: &GeneratorOptions,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for variant in Variant::ALL {
        written.extend(generate_spec_files(module_root, variant, options)?);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_is_flat_sorted_and_filtered() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manifests = dir.path().join("manifests");
        std::fs::create_dir_all(manifests.join("config")).expect("mkdir");
        for name in ["zeta.pp", "alpha.pp", "notes.txt", "config/nested.pp"] {
            std::fs::write(manifests.join(name), "class x {}").expect("write");
        }

        let files = manifest_files(dir.path(), "pp").expect("discovery");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().expect("name").to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alpha.pp", "zeta.pp"]);
    }

    #[test]
    fn module_without_manifests_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(manifest_files(dir.path(), "pp").expect("discovery").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_manifests_are_discovered() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manifests = dir.path().join("manifests");
        std::fs::create_dir_all(&manifests).expect("mkdir");
        let shared = dir.path().join("shared.pp");
        std::fs::write(&shared, "class ntp {}").expect("write");
        std::os::unix::fs::symlink(&shared, manifests.join("init.pp")).expect("symlink");

        let files = manifest_files(dir.path(), "pp").expect("discovery");
        assert_eq!(files, vec![manifests.join("init.pp")]);
    }
}
