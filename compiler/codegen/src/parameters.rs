//! Formal parameter extraction.
//!
//! Walks a declaration's parameter list in declared order and produces the
//! per-parameter view the dumpers render, plus a flat comma-joined summary.

use ast::Declaration;
use serde::Serialize;

/// Separator used in the parameter summary string.
pub const PARAMETER_SEPARATOR: &str = ",";

/// One extracted parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedParameter {
    /// Parameter name without the `$` sigil
    pub name: String,
    /// Whether a default value was declared
    pub has_default: bool,
    /// Raw default expression, when declared
    pub default: Option<String>,
    /// Declared type expression, when present
    pub type_expr: Option<String>,
}

impl ExtractedParameter {
    /// A parameter without a default must be supplied by the caller.
    pub fn is_required(&self) -> bool { !self.has_default }
}

/// Parameters of a declaration in declared order, with their summary string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedParameters {
    /// Parameters in declared order
    pub parameters: Vec<ExtractedParameter>,
    /// Parameter names joined by [`PARAMETER_SEPARATOR`]; empty when there are none
    pub summary: String,
}

impl ExtractedParameters {
    /// Number of parameters.
    pub fn len(&self) -> usize { self.parameters.len() }

    /// Whether the declaration takes no parameters.
    pub fn is_empty(&self) -> bool { self.parameters.is_empty() }

    /// Parameter names in declared order.
    pub fn names(&self) -> impl Iterator<Item = &str> { self.parameters.iter().map(|p| p.name.as_str()) }

    /// Parameters without a default value.
    pub fn required(&self) -> impl Iterator<Item = &ExtractedParameter> {
        self.parameters.iter().filter(|p| p.is_required())
    }
}

/// Extract the formal parameters of `declaration`.
pub fn extract(declaration: &Declaration) -> ExtractedParameters {
    let parameters: Vec<ExtractedParameter> = declaration
        .parameters
        .iter()
        .map(|p| ExtractedParameter {
            name: p.name.clone(),
            has_default: p.default.is_some(),
            default: p.default.clone(),
            type_expr: p.type_expr.clone(),
        })
        .collect();

    let summary =
        parameters.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(PARAMETER_SEPARATOR);

    ExtractedParameters { parameters, summary }
}
