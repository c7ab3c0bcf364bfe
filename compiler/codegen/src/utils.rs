// codegen/src/utils.rs

//! String helpers for rendering Ruby scaffold text.

/// Quote `value` as a single-quoted Ruby string literal.
pub fn ruby_single_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

/// rspec-puppet matcher for a resource type: `apache::vhost` -> `contain_apache__vhost`
pub fn contain_matcher(type_name: &str) -> String {
    format!("contain_{}", type_name.trim_start_matches("::").to_lowercase().replace("::", "__"))
}

/// Collapse a raw expression onto one line so it stays inside a Ruby comment.
pub fn single_line(expr: &str) -> String { expr.split_whitespace().collect::<Vec<_>>().join(" ") }

/// Placeholder value for a required parameter: `"one_value"`
pub fn placeholder_value(name: &str) -> String { format!("\"{}_value\"", name) }
