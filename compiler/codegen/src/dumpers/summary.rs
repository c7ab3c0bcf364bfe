//! One-line summary dumper.

use crate::dumpers::{render, SpecDumper, SUMMARY_TEMPLATE};
use crate::generation_context::GenerationContext;
use crate::Result;

/// Emits `<kind> <name>(<parameter summary>)` followed by a newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryDumper;

impl SpecDumper for SummaryDumper {
    fn render(&self, context: &GenerationContext) -> Result<String> {
        render(SUMMARY_TEMPLATE, context)
    }
}

pub(crate) fn render_summary(context: &GenerationContext) -> Result<String> {
    Ok(format!(
        "{} {}({})\n",
        context.variant.singular_name(),
        context.type_name,
        context.parameter_summary()
    ))
}
