//! Manifest AST
//!
//! A manifest is reduced to the parts scaffold generation cares about: the ordered
//! list of top-level declarations, their names, formal parameters and the
//! resources referenced in their bodies.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between namespace segments of a declaration name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Errors raised when inspecting an AST.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AstError {
    /// The manifest contains no top-level declaration at all.
    #[error("manifest {0} contains no top-level declaration")]
    EmptyManifest(PathBuf),
}

/// Kind tag of a top-level declaration, as reported by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    /// `class name (...) { ... }`
    HostClass,
    /// `define name (...) { ... }`
    Definition,
    /// `node 'host' { ... }`
    Node,
    /// Any other top-level construct (functions, type aliases, bare resources).
    /// Carries the leading keyword for diagnostics.
    Other(String),
}

/// A formal parameter of a class or definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name without the leading `$`
    pub name: String,
    /// Type expression, if declared (e.g. `String`, `Optional[Integer]`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_expr: Option<String>,
    /// Raw default-value expression. `None` means the parameter is required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Parameter {
    /// Create a required, untyped parameter.
    pub fn required(name: impl Into<String>) -> Self {
        Self { name: name.into(), type_expr: None, default: None }
    }

    /// Create an untyped parameter with a default expression.
    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self { name: name.into(), type_expr: None, default: Some(default.into()) }
    }

    /// Whether the parameter carries a default value.
    pub fn has_default(&self) -> bool { self.default.is_some() }
}

/// A resource referenced inside a declaration body, e.g. `file { '/etc/motd': }`
/// or `include ntp` (recorded as type `class`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Lower-cased resource type (`file`, `class`, `apache::vhost`)
    pub type_name: String,
    /// Resource title with quotes stripped
    pub title: String,
}

impl ResourceRef {
    /// Create a new resource reference.
    pub fn new(type_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self { type_name: type_name.into(), title: title.into() }
    }
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}['{}']", self.type_name, self.title)
    }
}

/// One top-level construct of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Declaration kind tag
    pub kind: DeclarationKind,
    /// Fully namespaced name (`tomcat::config::server`). For nodes this is the
    /// first host match (`default`, `web01.example.com` or a `/regex/`).
    pub name: String,
    /// Formal parameters in declared order
    pub parameters: Vec<Parameter>,
    /// Parent class of an `inherits` clause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Resources referenced in the body, in source order
    #[serde(default)]
    pub resources: Vec<ResourceRef>,
}

impl Declaration {
    /// Create a declaration with no parameters, parent or resources.
    pub fn new(kind: DeclarationKind, name: impl Into<String>) -> Self {
        Self { kind, name: name.into(), parameters: Vec::new(), parent: None, resources: Vec::new() }
    }

    /// Builder-style helper to attach parameters.
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Builder-style helper to attach body resources.
    pub fn with_resources(mut self, resources: Vec<ResourceRef>) -> Self {
        self.resources = resources;
        self
    }

    /// Namespace segments of the declaration name.
    pub fn name_segments(&self) -> Vec<&str> { self.name.split(NAMESPACE_SEPARATOR).collect() }
}

/// Structural parse of a single manifest file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestAst {
    /// Path of the manifest the AST was parsed from
    path: PathBuf,
    /// Top-level declarations in source order
    content: Vec<Declaration>,
}

impl ManifestAst {
    /// Create a new AST from its parts.
    pub fn new(path: impl Into<PathBuf>, content: Vec<Declaration>) -> Self {
        Self { path: path.into(), content }
    }

    /// Path of the source manifest.
    pub fn path(&self) -> &Path { &self.path }

    /// All top-level declarations.
    pub fn content(&self) -> &[Declaration] { &self.content }

    /// The first top-level declaration. Manifests are expected to declare one
    /// primary construct; anything after it is ignored.
    pub fn body(&self) -> Result<&Declaration, AstError> {
        self.content.first().ok_or_else(|| AstError::EmptyManifest(self.path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_first_declaration() {
        let ast = ManifestAst::new(
            "init.pp",
            vec![
                Declaration::new(DeclarationKind::HostClass, "ntp"),
                Declaration::new(DeclarationKind::Definition, "ntp::peer"),
            ],
        );
        assert_eq!(ast.body().map(|d| d.name.as_str()), Ok("ntp"));
    }

    #[test]
    fn empty_manifest_has_no_body() {
        let ast = ManifestAst::new("empty.pp", vec![]);
        assert_eq!(ast.body(), Err(AstError::EmptyManifest(PathBuf::from("empty.pp"))));
    }

    #[test]
    fn name_segments_split_on_double_colon() {
        let decl = Declaration::new(DeclarationKind::HostClass, "tomcat::config::server");
        assert_eq!(decl.name_segments(), vec!["tomcat", "config", "server"]);
    }

    #[test]
    fn resource_ref_display() {
        assert_eq!(ResourceRef::new("file", "/etc/motd").to_string(), "file['/etc/motd']");
    }
}
