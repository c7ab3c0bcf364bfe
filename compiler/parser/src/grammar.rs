//! Declaration grammar over the token stream.
//!
//! Only the shape scaffold generation needs is recognised: `class`, `define`
//! and `node` headers with their parameter lists, `inherits` clauses and the
//! resources referenced in their bodies. Every other top-level statement is
//! recorded as [`DeclarationKind::Other`] and skipped.

use ast::{Declaration, DeclarationKind, Parameter, ResourceRef};

use crate::lexer::{Token, TokenKind};

/// A grammar failure at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GrammarError {
    pub offset: usize,
    pub message: String,
}

type GResult<T> = Result<T, GrammarError>;

/// Words that start control flow or are otherwise never resource types.
const NON_RESOURCE_WORDS: &[&str] = &[
    "and", "case", "default", "define", "else", "elsif", "false", "function", "if", "in",
    "inherits", "node", "or", "true", "undef", "unless",
];

/// Statement functions that declare classes by name.
const CLASS_FUNCTIONS: &[&str] = &["include", "contain", "require"];

/// Top-level keywords that end a skipped statement.
const DECLARATION_KEYWORDS: &[&str] = &["class", "define", "node", "function", "type", "plan"];

struct Cursor<'t, 'a> {
    source: &'a str,
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn peek(&self) -> Option<&'t Token<'a>> { self.tokens.get(self.pos) }

    fn peek_at(&self, n: usize) -> Option<&'t Token<'a>> { self.tokens.get(self.pos + n) }

    fn bump(&mut self) -> Option<&'t Token<'a>> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn offset(&self) -> usize { self.peek().map(|t| t.start).unwrap_or(self.source.len()) }

    fn error<T>(&self, message: impl Into<String>) -> GResult<T> {
        Err(GrammarError { offset: self.offset(), message: message.into() })
    }

    fn expect_punct(&mut self, c: char) -> GResult<&'t Token<'a>> {
        match self.peek() {
            Some(tok) if tok.is_punct(c) => {
                self.pos += 1;
                Ok(tok)
            }
            Some(tok) => self.error(format!("expected '{}', found '{}'", c, tok.text)),
            None => self.error(format!("expected '{}', found end of file", c)),
        }
    }

    fn expect_name(&mut self, what: &str) -> GResult<String> {
        match self.peek() {
            Some(tok) if tok.kind == TokenKind::Word => {
                self.pos += 1;
                Ok(tok.text.trim_start_matches("::").to_string())
            }
            Some(tok) => self.error(format!("expected {} name, found '{}'", what, tok.text)),
            None => self.error(format!("expected {} name, found end of file", what)),
        }
    }

    fn eat_word(&mut self, w: &str) -> bool {
        if self.peek().map(|t| t.is_word(w)).unwrap_or(false) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Raw source between two token indices (end exclusive), trimmed.
    fn slice(&self, from: usize, to: usize) -> String {
        match (self.tokens.get(from), to.checked_sub(1).and_then(|i| self.tokens.get(i))) {
            (Some(first), Some(last)) if to > from => {
                self.source[first.start..last.end].trim().to_string()
            }
            _ => String::new(),
        }
    }
}

fn opens(tok: &Token<'_>) -> bool { tok.is_punct('(') || tok.is_punct('[') || tok.is_punct('{') }

fn closes(tok: &Token<'_>) -> bool { tok.is_punct(')') || tok.is_punct(']') || tok.is_punct('}') }

/// Parse all top-level declarations of a token stream.
pub(crate) fn declarations(source: &str, tokens: &[Token<'_>]) -> GResult<Vec<Declaration>> {
    let mut cursor = Cursor { source, tokens, pos: 0 };
    let mut out = Vec::new();

    while let Some(tok) = cursor.peek() {
        let next_is_name =
            cursor.peek_at(1).map(|t| t.kind == TokenKind::Word).unwrap_or(false);
        let decl = if tok.is_word("class") && next_is_name {
            class_definition(&mut cursor)?
        } else if tok.is_word("define") && next_is_name {
            resource_type_definition(&mut cursor)?
        } else if tok.is_word("node") {
            node_definition(&mut cursor)?
        } else {
            other_statement(&mut cursor)?
        };
        out.push(decl);
    }

    Ok(out)
}

fn class_definition(cursor: &mut Cursor<'_, '_>) -> GResult<Declaration> {
    cursor.bump();
    let name = cursor.expect_name("class")?;
    let parameters = parameter_list(cursor)?;
    let parent = if cursor.eat_word("inherits") { Some(cursor.expect_name("parent class")?) } else { None };
    let resources = block(cursor)?;
    Ok(Declaration { kind: DeclarationKind::HostClass, name, parameters, parent, resources })
}

fn resource_type_definition(cursor: &mut Cursor<'_, '_>) -> GResult<Declaration> {
    cursor.bump();
    let name = cursor.expect_name("define")?;
    let parameters = parameter_list(cursor)?;
    let resources = block(cursor)?;
    Ok(Declaration { kind: DeclarationKind::Definition, name, parameters, parent: None, resources })
}

fn node_definition(cursor: &mut Cursor<'_, '_>) -> GResult<Declaration> {
    cursor.bump();
    let mut matches = vec![host_match(cursor)?];
    while cursor.peek().map(|t| t.is_punct(',')).unwrap_or(false) {
        cursor.bump();
        // trailing comma before the body
        if cursor.peek().map(|t| t.is_punct('{')).unwrap_or(false) {
            break;
        }
        matches.push(host_match(cursor)?);
    }
    let parent = if cursor.eat_word("inherits") { Some(host_match(cursor)?) } else { None };
    let resources = block(cursor)?;
    let name = matches.swap_remove(0);
    Ok(Declaration { kind: DeclarationKind::Node, name, parameters: Vec::new(), parent, resources })
}

/// `'web01.example.com'`, `default`, `/^web\d+$/` or an unquoted dotted host name.
fn host_match(cursor: &mut Cursor<'_, '_>) -> GResult<String> {
    let Some(first) = cursor.peek() else {
        return cursor.error("expected node name, found end of file");
    };
    match first.kind {
        TokenKind::Str => {
            cursor.bump();
            Ok(first.unquoted())
        }
        TokenKind::Regex => {
            cursor.bump();
            Ok(first.text.to_string())
        }
        TokenKind::Word | TokenKind::Number => {
            // unquoted host names lex as adjacent words, numbers, dots and dashes
            let start = cursor.pos;
            let mut end_offset = first.end;
            cursor.bump();
            while let Some(tok) = cursor.peek() {
                let joinable = matches!(tok.kind, TokenKind::Word | TokenKind::Number)
                    || tok.is_punct('.')
                    || tok.is_punct('-');
                if !joinable || tok.start != end_offset {
                    break;
                }
                end_offset = tok.end;
                cursor.bump();
            }
            Ok(cursor.slice(start, cursor.pos))
        }
        _ => cursor.error(format!("expected node name, found '{}'", first.text)),
    }
}

/// Optional `( ... )` parameter list.
fn parameter_list(cursor: &mut Cursor<'_, '_>) -> GResult<Vec<Parameter>> {
    if !cursor.peek().map(|t| t.is_punct('(')).unwrap_or(false) {
        return Ok(Vec::new());
    }
    cursor.bump();

    let mut params = Vec::new();
    loop {
        match cursor.peek() {
            Some(tok) if tok.is_punct(')') => {
                cursor.bump();
                return Ok(params);
            }
            Some(_) => params.push(parameter(cursor)?),
            None => return cursor.error("unterminated parameter list"),
        }
        match cursor.peek() {
            Some(tok) if tok.is_punct(',') => {
                cursor.bump();
            }
            Some(tok) if tok.is_punct(')') => {}
            Some(tok) => return cursor.error(format!("expected ',' or ')', found '{}'", tok.text)),
            None => return cursor.error("unterminated parameter list"),
        }
    }
}

/// `[Type] [*]$name [= default]`
fn parameter(cursor: &mut Cursor<'_, '_>) -> GResult<Parameter> {
    let type_start = cursor.pos;
    let mut depth = 0usize;
    let name = loop {
        let Some(tok) = cursor.peek() else {
            return cursor.error("unterminated parameter list");
        };
        if depth == 0 && tok.kind == TokenKind::Variable {
            break tok.text.trim_start_matches('$').to_string();
        }
        if opens(tok) {
            depth += 1;
        } else if closes(tok) {
            if depth == 0 {
                return cursor.error(format!("expected parameter name, found '{}'", tok.text));
            }
            depth -= 1;
        } else if depth == 0 && tok.is_punct(',') {
            return cursor.error("expected parameter name, found ','");
        }
        cursor.bump();
    };
    let type_expr = cursor.slice(type_start, cursor.pos);
    let type_expr = type_expr.trim_end_matches('*').trim_end().to_string();
    cursor.bump();

    let default = if cursor.peek().map(|t| t.is_punct('=')).unwrap_or(false) {
        cursor.bump();
        let expr = default_expression(cursor)?;
        if expr.is_empty() {
            return cursor.error(format!("missing default value for parameter '{}'", name));
        }
        Some(expr)
    } else {
        None
    };

    Ok(Parameter {
        name,
        type_expr: if type_expr.is_empty() { None } else { Some(type_expr) },
        default,
    })
}

/// Raw default expression up to the next top-level `,` or `)`.
fn default_expression(cursor: &mut Cursor<'_, '_>) -> GResult<String> {
    let start = cursor.pos;
    let mut depth = 0usize;
    while let Some(tok) = cursor.peek() {
        if depth == 0 && (tok.is_punct(',') || tok.is_punct(')')) {
            break;
        }
        if opens(tok) {
            depth += 1;
        } else if closes(tok) {
            depth = depth.saturating_sub(1);
        }
        cursor.bump();
    }
    Ok(cursor.slice(start, cursor.pos))
}

/// `{ ... }` body; returns the resources referenced inside it.
fn block(cursor: &mut Cursor<'_, '_>) -> GResult<Vec<ResourceRef>> {
    cursor.expect_punct('{')?;
    let body_start = cursor.pos;
    let mut depth = 0usize;
    loop {
        let Some(tok) = cursor.peek() else {
            return cursor.error("unterminated block, expected '}'");
        };
        if tok.is_punct('}') && depth == 0 {
            break;
        }
        if opens(tok) {
            depth += 1;
        } else if closes(tok) {
            if depth == 0 {
                return cursor.error(format!("unbalanced '{}' in block", tok.text));
            }
            depth -= 1;
        }
        cursor.bump();
    }
    let body = &cursor.tokens[body_start..cursor.pos];
    cursor.bump();
    Ok(body_resources(body))
}

/// Skip a statement that is not a supported declaration.
fn other_statement(cursor: &mut Cursor<'_, '_>) -> GResult<Declaration> {
    let keyword = cursor.peek().map(|t| t.text.to_string()).unwrap_or_default();
    let mut depth = 0usize;
    let mut first = true;
    while let Some(tok) = cursor.peek() {
        if !first && depth == 0 && tok.kind == TokenKind::Word && DECLARATION_KEYWORDS.contains(&tok.text) {
            break;
        }
        if opens(tok) {
            depth += 1;
        } else if closes(tok) {
            if depth == 0 {
                return cursor.error(format!("unbalanced '{}'", tok.text));
            }
            depth -= 1;
        }
        first = false;
        cursor.bump();
    }
    if depth > 0 {
        return cursor.error("unexpected end of file inside statement");
    }
    Ok(Declaration::new(DeclarationKind::Other(keyword), ""))
}

/// Collect `include x` style class references and `type { 'title': }` resource
/// declarations from a body, in source order.
fn body_resources(body: &[Token<'_>]) -> Vec<ResourceRef> {
    let mut out = Vec::new();
    for (i, tok) in body.iter().enumerate() {
        if tok.kind != TokenKind::Word {
            continue;
        }
        if CLASS_FUNCTIONS.contains(&tok.text) {
            out.extend(class_references(&body[i + 1..]));
        } else if is_resource_type(tok.text) && body.get(i + 1).map(|t| t.is_punct('{')).unwrap_or(false) {
            let type_name = tok.text.trim_start_matches("::").to_string();
            for title in resource_titles(&body[i + 2..]) {
                out.push(ResourceRef::new(type_name.clone(), title));
            }
        }
    }
    out
}

fn is_resource_type(word: &str) -> bool {
    word.trim_start_matches("::").starts_with(|c: char| c.is_ascii_lowercase())
        && !NON_RESOURCE_WORDS.contains(&word)
}

/// Names following `include`: `include a, 'b', c::d`.
fn class_references(rest: &[Token<'_>]) -> Vec<ResourceRef> {
    let mut out = Vec::new();
    let mut iter = rest.iter();
    while let Some(tok) = iter.next() {
        let name = match tok.kind {
            TokenKind::Word => tok.text.trim_start_matches("::").to_string(),
            TokenKind::Str => tok.unquoted().trim_start_matches("::").to_string(),
            _ => break,
        };
        out.push(ResourceRef::new("class", name));
        match iter.next() {
            Some(sep) if sep.is_punct(',') => continue,
            _ => break,
        }
    }
    out
}

/// Titles after a resource's opening brace: `'a':`, `$x:` or `['a', 'b']:`.
fn resource_titles(rest: &[Token<'_>]) -> Vec<String> {
    let title = |tok: &Token<'_>| match tok.kind {
        TokenKind::Str => Some(tok.unquoted()),
        TokenKind::Variable | TokenKind::Word => Some(tok.text.to_string()),
        _ => None,
    };

    match rest.first() {
        Some(open) if open.is_punct('[') => {
            let mut titles = Vec::new();
            for (i, tok) in rest.iter().enumerate().skip(1) {
                if tok.is_punct(']') {
                    let colon = rest.get(i + 1).map(|t| t.is_punct(':')).unwrap_or(false);
                    return if colon { titles } else { Vec::new() };
                }
                if tok.is_punct(',') {
                    continue;
                }
                match title(tok) {
                    Some(t) => titles.push(t),
                    None => return Vec::new(),
                }
            }
            Vec::new()
        }
        Some(tok) if rest.get(1).map(|t| t.is_punct(':')).unwrap_or(false) => {
            title(tok).into_iter().collect()
        }
        _ => Vec::new(),
    }
}
