//! Full rspec-puppet scaffold dumper.
//!
//! Every scaffold shares the same frame: shared helper requires, a `describe`
//! block keyed on the declaration name, hiera and facts mocking guidance and a
//! debug-mode footer. The variant's [`ScaffoldLayout`] decides which of the
//! optional sections (title, node, parameters, resources) appear in between.

use std::fmt::Write;

use crate::dumpers::{render, SpecDumper};
use crate::generation_context::GenerationContext;
use crate::utils::{contain_matcher, placeholder_value, ruby_single_quoted, single_line};
use crate::Result;

/// Placeholder the user is expected to replace by hand.
pub const REPLACE_ME: &str = "XXreplace_meXX";

/// Renders the complete scaffold for the context's variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullDumper;

impl SpecDumper for FullDumper {
    fn render(&self, context: &GenerationContext) -> Result<String> {
        render(context.variant.template_id(), context)
    }
}

/// Optional sections of a scaffold template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldLayout {
    /// Emit `let(:title)`; definitions need a resource title
    pub title: bool,
    /// Emit `let(:node)` with the node's host match
    pub node: bool,
    /// Emit the `let(:params)` block
    pub params: bool,
    /// Emit one `contain_*` expectation per referenced resource
    pub resources: bool,
}

impl ScaffoldLayout {
    /// Layout registered under a template identifier.
    pub fn for_template(template_id: &str) -> Option<Self> {
        match template_id {
            "hostclass_spec" => {
                Some(Self { title: false, node: false, params: true, resources: false })
            }
            "definition_spec" => {
                Some(Self { title: true, node: false, params: true, resources: false })
            }
            "node_spec" => Some(Self { title: false, node: true, params: false, resources: true }),
            _ => None,
        }
    }
}

pub(crate) fn render_scaffold(layout: &ScaffoldLayout, ctx: &GenerationContext) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "require 'spec_helper'")?;
    writeln!(out, "require 'shared_contexts'")?;
    writeln!(out)?;
    writeln!(out, "describe {} do", ruby_single_quoted(&ctx.type_name))?;
    if let Some(parent) = &ctx.parent {
        writeln!(out, "  # inherits from {}", ruby_single_quoted(parent))?;
    }
    write_hiera_guidance(&mut out)?;
    writeln!(out)?;

    if layout.title {
        writeln!(out, "  let(:title) {{ {} }}", ruby_single_quoted(REPLACE_ME))?;
        writeln!(out)?;
    }
    if layout.node {
        writeln!(out, "  let(:node) {{ {} }}", ruby_single_quoted(&ctx.type_name))?;
        writeln!(out)?;
    }

    writeln!(out, "  # below is the facts hash that gives you the ability to mock")?;
    writeln!(out, "  # facts on a per describe/context block.  If you use a fact in your")?;
    writeln!(out, "  # manifest you should mock the facts below.")?;
    writeln!(out, "  let(:facts) do")?;
    writeln!(out, "    {{}}")?;
    writeln!(out, "  end")?;

    if layout.params {
        write_params(&mut out, ctx)?;
    }
    if layout.resources {
        write_resources(&mut out, ctx)?;
    }

    writeln!(out, "  # add these two lines in a single test block to enable puppet and hiera debug mode")?;
    writeln!(out, "  # Puppet::Util::Log.level = :debug")?;
    writeln!(out, "  # Puppet::Util::Log.newdestination(:console)")?;
    writeln!(out, "end")?;

    Ok(out)
}

fn write_hiera_guidance(out: &mut String) -> std::fmt::Result {
    writeln!(out, "  # by default the hiera integration uses hiera data from the shared_contexts.rb file")?;
    writeln!(out, "  # but basically to mock hiera you first need to add a key/value pair")?;
    writeln!(out, "  # to the specific context in the spec/shared_contexts.rb file")?;
    writeln!(out, "  # Note: you can only use a single hiera context per describe/context block")?;
    writeln!(out, "  # rspec-puppet does not allow you to swap out hiera data on a per test block")?;
    writeln!(out, "  #include_context :hiera")
}

/// Required parameters are active with a placeholder value. Optional ones are
/// commented out with their declared default.
fn write_params(out: &mut String, ctx: &GenerationContext) -> std::fmt::Result {
    writeln!(out, "  # below is a list of the resource parameters that you can override.")?;
    writeln!(out, "  # By default all non-required parameters are commented out,")?;
    writeln!(out, "  # while all required parameters will require you to add a value")?;
    writeln!(out, "  let(:params) do")?;
    writeln!(out, "    {{")?;
    for param in &ctx.parameters.parameters {
        match &param.default {
            Some(default) => {
                writeln!(out, "      #:{} => {},", param.name, single_line(default))?;
            }
            None => {
                writeln!(out, "      :{} => {}, # required", param.name, placeholder_value(&param.name))?;
            }
        }
    }
    writeln!(out, "    }}")?;
    writeln!(out, "  end")
}

fn write_resources(out: &mut String, ctx: &GenerationContext) -> std::fmt::Result {
    if ctx.resources.is_empty() {
        return Ok(());
    }
    writeln!(out, "  # resources declared by this node")?;
    for resource in &ctx.resources {
        writeln!(
            out,
            "  it {{ is_expected.to {}({}) }}",
            contain_matcher(&resource.type_name),
            ruby_single_quoted(&resource.title)
        )?;
    }
    Ok(())
}
