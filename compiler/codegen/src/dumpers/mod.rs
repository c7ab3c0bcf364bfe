//! Content dumpers that render a [`GenerationContext`] into scaffold text.
//!
//! Two dumpers share the [`SpecDumper`] contract:
//! - [`SummaryDumper`] emits a one-line summary used for quick existence and
//!   parameter-count checks.
//! - [`FullDumper`] emits the complete rspec-puppet scaffold.
//!
//! Both are pure: the same AST always renders to byte-identical text.

use ast::ManifestAst;

use crate::generation_context::GenerationContext;
use crate::{CodegenError, Result};

pub mod full;
pub mod summary;

pub use full::FullDumper;
pub use summary::SummaryDumper;

/// Template identifier of the one-line summary.
pub const SUMMARY_TEMPLATE: &str = "summary";

/// Renders scaffold text.
pub trait SpecDumper {
    /// Render a prepared context.
    fn render(&self, context: &GenerationContext) -> Result<String>;

    /// Render the first declaration of `ast`.
    fn dump(&self, ast: &ManifestAst) -> Result<String> {
        let context = GenerationContext::from_ast(ast)?;
        self.render(&context)
    }
}

/// Render `context` with the template registered under `template_id`.
pub fn render(template_id: &str, context: &GenerationContext) -> Result<String> {
    if template_id == SUMMARY_TEMPLATE {
        return summary::render_summary(context);
    }
    match full::ScaffoldLayout::for_template(template_id) {
        Some(layout) => full::render_scaffold(&layout, context),
        None => Err(CodegenError::UnknownTemplate(template_id.to_string())),
    }
}

/// Selects a dumper by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DumperKind {
    /// One-line summary
    Summary,
    /// Complete scaffold
    #[default]
    Full,
}

impl DumperKind {
    /// Instantiate the selected dumper.
    pub fn dumper(self) -> Box<dyn SpecDumper> {
        match self {
            DumperKind::Summary => Box::new(SummaryDumper),
            DumperKind::Full => Box::new(FullDumper),
        }
    }
}

impl std::str::FromStr for DumperKind {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "summary" => Ok(DumperKind::Summary),
            "full" => Ok(DumperKind::Full),
            other => Err(CodegenError::Message(format!(
                "Unknown dumper '{}'. Supported: full, summary",
                other
            ))),
        }
    }
}
