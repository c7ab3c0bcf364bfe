//! Generation context for scaffold rendering.
//!
//! This module provides the context that carries everything a dumper needs to
//! render one scaffold. A context is created fresh for each manifest and dropped
//! after rendering.

use std::path::PathBuf;

use ast::{DeclarationKind, ManifestAst, ResourceRef, Variant};
use serde::Serialize;

use crate::parameters::{extract, ExtractedParameters};
use crate::{CodegenError, Result};

/// Context containing all metadata needed to render one scaffold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationContext {
    /// Manifest the declaration was parsed from
    pub manifest_file: PathBuf,
    /// Fully namespaced declaration name
    pub type_name: String,
    /// Declaration variant (class, define or node)
    pub variant: Variant,
    /// Extracted formal parameters
    pub parameters: ExtractedParameters,
    /// Resources referenced by the declaration body
    pub resources: Vec<ResourceRef>,
    /// Parent of an `inherits` clause
    pub parent: Option<String>,
}

impl GenerationContext {
    /// Create a new builder for GenerationContext
    pub fn builder() -> GenerationContextBuilder { GenerationContextBuilder::default() }

    /// Build the context for the first declaration of `ast`.
    pub fn from_ast(ast: &ManifestAst) -> Result<Self> {
        let body = ast.body()?;
        let variant = Variant::from_kind(&body.kind).ok_or_else(|| {
            CodegenError::Unclassified(match &body.kind {
                DeclarationKind::Other(keyword) => keyword.clone(),
                other => format!("{:?}", other),
            })
        })?;

        Self::builder()
            .manifest_file(ast.path().to_path_buf())
            .type_name(body.name.clone())
            .variant(variant)
            .parameters(extract(body))
            .resources(body.resources.clone())
            .parent(body.parent.clone())
            .build()
    }

    /// Resource type name used in `describe` blocks; the full declaration name.
    pub fn resource_type_name(&self) -> &str { &self.type_name }

    /// Comma-joined parameter names.
    pub fn parameter_summary(&self) -> &str { &self.parameters.summary }

    /// Referenced resources rendered as `type['title']`.
    pub fn resource_names(&self) -> Vec<String> {
        self.resources.iter().map(ToString::to_string).collect()
    }
}

#[derive(Default)]
/// Builder for GenerationContext
pub struct GenerationContextBuilder {
    /// Manifest the declaration was parsed from
    manifest_file: Option<PathBuf>,
    /// Fully namespaced declaration name
    type_name: Option<String>,
    /// Declaration variant
    variant: Option<Variant>,
    /// Extracted formal parameters
    parameters: Option<ExtractedParameters>,
    /// Resources referenced by the declaration body
    resources: Vec<ResourceRef>,
    /// Parent of an `inherits` clause
    parent: Option<String>,
}

impl GenerationContextBuilder {
    /// Set the manifest file
    pub fn manifest_file(mut self, path: PathBuf) -> Self {
        self.manifest_file = Some(path);
        self
    }

    /// Set the declaration name
    pub fn type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = Some(name.into());
        self
    }

    /// Set the variant
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Set the extracted parameters
    pub fn parameters(mut self, parameters: ExtractedParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Set the referenced resources
    pub fn resources(mut self, resources: Vec<ResourceRef>) -> Self {
        self.resources = resources;
        self
    }

    /// Set the parent class
    pub fn parent(mut self, parent: Option<String>) -> Self {
        self.parent = parent;
        self
    }

    /// Build the GenerationContext
    pub fn build(self) -> Result<GenerationContext> {
        Ok(GenerationContext {
            manifest_file: self
                .manifest_file
                .ok_or_else(|| CodegenError::Message("manifest_file is required".to_string()))?,
            type_name: self
                .type_name
                .ok_or_else(|| CodegenError::Message("type_name is required".to_string()))?,
            variant: self
                .variant
                .ok_or_else(|| CodegenError::Message("variant is required".to_string()))?,
            parameters: self.parameters.unwrap_or_default(),
            resources: self.resources,
            parent: self.parent,
        })
    }
}
