// SPDX-License-Identifier: CC0-1.0

//! Path utility functions for module layouts and scaffold output paths.
//!
//! Scaffold paths mirror the declaration's namespace. The module's own root
//! namespace is never repeated as a directory and the terminal segment always
//! becomes the file name:
//!
//! ```text
//! tomcat                          -> spec/classes/tomcat_spec.rb
//! tomcat::params                  -> spec/classes/params_spec.rb
//! tomcat::config::server          -> spec/classes/server_spec.rb
//! tomcat::config::server::connector -> spec/classes/config/server/connector_spec.rb
//! ```

use std::path::{Path, PathBuf};

use ast::{Variant, NAMESPACE_SEPARATOR};

/// Directory holding a module's manifests, relative to the module root.
pub const MANIFESTS_DIR: &str = "manifests";

/// Directory holding a module's spec tests, relative to the module root.
pub const SPEC_DIR: &str = "spec";

/// Default extension of generated spec files.
pub const DEFAULT_SPEC_EXTENSION: &str = "rb";

/// Default extension of manifest files.
pub const DEFAULT_MANIFEST_EXTENSION: &str = "pp";

/// Spec directory for a variant: `«module_root»/spec/«plural_name»`
pub fn spec_dir(module_root: &Path, variant: Variant) -> PathBuf {
    module_root.join(SPEC_DIR).join(variant.plural_name())
}

/// Manifests directory of a module: `«module_root»/manifests`
pub fn manifests_dir(module_root: &Path) -> PathBuf { module_root.join(MANIFESTS_DIR) }

/// File name of the spec for a declaration: `«last_segment»_spec.«ext»`
pub fn spec_file_name(declaration_name: &str, extension: &str) -> String {
    let last = declaration_name.rsplit(NAMESPACE_SEPARATOR).next().unwrap_or(declaration_name);
    format!("{}_spec.{}", last, extension)
}

/// Resolve the spec path of a declaration using the default `rb` extension.
///
/// See [`resolve_spec_path_with_extension`].
pub fn resolve_spec_path(declaration_name: &str, variant: Variant, module_root: &Path) -> PathBuf {
    resolve_spec_path_with_extension(declaration_name, variant, module_root, DEFAULT_SPEC_EXTENSION)
}

/// Resolve the spec path of a declaration
///
/// # Arguments
///
/// * `declaration_name` - Fully namespaced name (`tomcat::config::server::connector`)
/// * `variant` - Declaration variant, which selects the spec subdirectory
/// * `module_root` - Root directory of the module
/// * `extension` - Extension of the generated file, without the dot
///
/// # Returns
///
/// Names with at most two segments land directly in the variant's spec directory.
/// Longer names drop their first and last segments and use whatever remains as
/// nested directories, so a three-segment name also lands directly in the spec
/// directory.
pub fn resolve_spec_path_with_extension(
    declaration_name: &str,
    variant: Variant,
    module_root: &Path,
    extension: &str,
) -> PathBuf {
    let file_name = spec_file_name(declaration_name, extension);
    let segments: Vec<&str> = declaration_name.split(NAMESPACE_SEPARATOR).collect();

    let mut path = spec_dir(module_root, variant);
    if segments.len() > 2 {
        for dir in &segments[1..segments.len() - 1] {
            path.push(dir);
        }
    }
    path.push(file_name);
    path
}

/// Manifest path the autoloader expects for a declaration name.
///
/// The module's root class lives in `init.pp`; every other name maps its
/// segments after the module name onto directories below `manifests/`.
pub fn manifest_path_for(module_root: &Path, declaration_name: &str, extension: &str) -> PathBuf {
    let segments: Vec<&str> = declaration_name.split(NAMESPACE_SEPARATOR).collect();
    let mut path = manifests_dir(module_root);
    match segments.split_last() {
        Some((last, rest)) if !rest.is_empty() => {
            for dir in &rest[1..] {
                path.push(dir);
            }
            path.push(format!("{}.{}", last, extension));
        }
        _ => path.push(format!("init.{}", extension)),
    }
    path
}

/// Find the module root by walking up from `start`
///
/// A directory is a module root when it contains a `manifests` directory or a
/// `metadata.json` file.
///
/// # Returns
///
/// Returns `Result<PathBuf>` containing the module root directory.
/// Returns an error if no ancestor of `start` looks like a module.
pub fn find_module_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(MANIFESTS_DIR).is_dir() || current.join("metadata.json").is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "Could not find module root above {} (no manifests/ directory or metadata.json)",
                start.display()
            )
            .into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_file_name_uses_last_segment() {
        assert_eq!(spec_file_name("tomcat::config::server", "rb"), "server_spec.rb");
        assert_eq!(spec_file_name("tomcat", "rb"), "tomcat_spec.rb");
    }

    #[test]
    fn manifest_path_for_root_class_is_init() {
        let root = Path::new("/mod");
        assert_eq!(manifest_path_for(root, "tomcat", "pp"), PathBuf::from("/mod/manifests/init.pp"));
        assert_eq!(
            manifest_path_for(root, "tomcat::params", "pp"),
            PathBuf::from("/mod/manifests/params.pp")
        );
        assert_eq!(
            manifest_path_for(root, "tomcat::config::server", "pp"),
            PathBuf::from("/mod/manifests/config/server.pp")
        );
    }

    #[test]
    fn custom_extension() {
        let path =
            resolve_spec_path_with_extension("ntp::peer", Variant::Definition, Path::new("m"), "txt");
        assert_eq!(path, PathBuf::from("m/spec/defines/peer_spec.txt"));
    }
}
