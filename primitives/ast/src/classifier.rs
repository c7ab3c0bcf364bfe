//! Declaration classification.
//!
//! Classification reads only the kind tag of the first top-level declaration.
//! It never looks further into the manifest.

use serde::{Deserialize, Serialize};

use crate::manifest_ast::{AstError, DeclarationKind, ManifestAst};

/// Return the kind of the manifest's first top-level declaration.
pub fn classify(ast: &ManifestAst) -> Result<DeclarationKind, AstError> {
    ast.body().map(|decl| decl.kind.clone())
}

/// The three declaration kinds a scaffold can be generated for.
///
/// Each variant fixes the singular and plural names used in output paths and the
/// identifier of the template used to render its scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Class-like declaration
    Class,
    /// Parameterized definition
    Definition,
    /// Node (host-scoped) declaration
    Node,
}

impl Variant {
    /// All variants in batch generation order.
    pub const ALL: [Variant; 3] = [Variant::Class, Variant::Definition, Variant::Node];

    /// Map a declaration kind onto a supported variant. Unsupported kinds yield `None`.
    pub fn from_kind(kind: &DeclarationKind) -> Option<Self> {
        match kind {
            DeclarationKind::HostClass => Some(Variant::Class),
            DeclarationKind::Definition => Some(Variant::Definition),
            DeclarationKind::Node => Some(Variant::Node),
            DeclarationKind::Other(_) => None,
        }
    }

    /// Singular name (`class`, `define`, `node`).
    pub fn singular_name(&self) -> &'static str {
        match self {
            Variant::Class => "class",
            Variant::Definition => "define",
            Variant::Node => "node",
        }
    }

    /// Plural name, which is also the spec subdirectory (`classes`, `defines`, `nodes`).
    pub fn plural_name(&self) -> &'static str {
        match self {
            Variant::Class => "classes",
            Variant::Definition => "defines",
            Variant::Node => "nodes",
        }
    }

    /// Identifier of the scaffold template for this variant.
    pub fn template_id(&self) -> &'static str {
        match self {
            Variant::Class => "hostclass_spec",
            Variant::Definition => "definition_spec",
            Variant::Node => "node_spec",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.singular_name())
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "class" | "classes" | "hostclass" => Ok(Variant::Class),
            "define" | "defines" | "definition" => Ok(Variant::Definition),
            "node" | "nodes" => Ok(Variant::Node),
            other => Err(format!("Unknown variant '{}'. Supported: class, define, node", other)),
        }
    }
}
