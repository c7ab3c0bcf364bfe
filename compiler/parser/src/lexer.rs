//! Manifest lexer.
//!
//! Splits manifest source into a flat token stream. Comments and whitespace are
//! dropped; every token keeps its byte span so the grammar can slice raw
//! expression text (parameter types and defaults) straight out of the source.

use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_until, take_while};
use nom::character::complete::{alpha1, anychar, char, digit1, multispace1, none_of, not_line_ending};
use nom::combinator::{cut, map, opt, recognize};
use nom::multi::{many0_count, separated_list1};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::IResult;

/// Kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Bare word or qualified name (`class`, `tomcat::config`, `String`)
    Word,
    /// Variable reference including the sigil (`$name`, `$::osfamily`)
    Variable,
    /// Single- or double-quoted string including quotes
    Str,
    /// Numeric literal (`8080`, `0755`, `1.5`)
    Number,
    /// Regex literal including slashes (`/^web\d+$/`)
    Regex,
    /// Heredoc header (`@(EOT)`, `@("EOT":json/L)`); the body is skipped
    Heredoc,
    /// Any other single character
    Punct,
}

/// A token and its byte span in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    /// Whether this is the punctuation character `c`.
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct && self.text.starts_with(c)
    }

    /// Whether this is the bare word `w`.
    pub fn is_word(&self, w: &str) -> bool { self.kind == TokenKind::Word && self.text == w }

    /// String contents with quotes removed and the quote/backslash escapes resolved.
    pub fn unquoted(&self) -> String {
        if self.kind != TokenKind::Str || self.text.len() < 2 {
            return self.text.to_string();
        }
        let quote = self.text.chars().next().unwrap_or('\'');
        let inner = &self.text[1..self.text.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == '\\' {
                match chars.peek() {
                    Some(&next) if next == quote || next == '\\' => {
                        out.push(next);
                        chars.next();
                    }
                    _ => out.push(ch),
                }
            } else {
                out.push(ch);
            }
        }
        out
    }
}

/// A lexing failure at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LexError {
    pub offset: usize,
    pub message: String,
}

/// Tokenize a full manifest.
///
/// Heredoc bodies start on the line after their header and are not tokenized.
/// Several heredocs opened on one line take consecutive bodies.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut bodies: Vec<(usize, usize)> = Vec::new();
    let mut pos = 0;
    loop {
        let limit = bodies.first().map_or(source.len(), |&(start, _)| start);
        let (rest, _) = trivia(&source[pos..limit]).map_err(|_| LexError {
            offset: pos,
            message: "unterminated block comment".to_string(),
        })?;
        pos = limit - rest.len();
        if rest.is_empty() {
            if bodies.is_empty() {
                break;
            }
            pos = bodies.remove(0).1;
            continue;
        }

        let regex_ok = tokens.last().map_or(false, regex_may_follow);
        let (rest, (kind, text)) = token(rest, regex_ok).map_err(|_| LexError {
            offset: pos,
            message: "unterminated string literal".to_string(),
        })?;
        let start = pos;
        pos = limit - rest.len();

        if kind == TokenKind::Heredoc {
            let body_start = match bodies.last() {
                Some(&(_, end)) => end,
                None => source[pos..].find('\n').map_or(source.len(), |i| pos + i + 1),
            };
            let body_end = heredoc_end(source, body_start, heredoc_tag(text)).ok_or_else(|| {
                LexError { offset: start, message: "unterminated heredoc".to_string() }
            })?;
            bodies.push((body_start, body_end));
        }
        tokens.push(Token { kind, text, start, end: pos });
    }
    Ok(tokens)
}

/// Division and regexes both start with `/`; a regex can only follow these.
fn regex_may_follow(prev: &Token<'_>) -> bool {
    match prev.kind {
        TokenKind::Word => prev.text == "node" || prev.text == "case",
        TokenKind::Punct => matches!(prev.text, "~" | "(" | "," | "{" | "["),
        _ => false,
    }
}

/// End offset of the heredoc body starting at `body_start`, after its `| TAG` line.
fn heredoc_end(source: &str, body_start: usize, tag: &str) -> Option<usize> {
    let mut line_start = body_start;
    while line_start < source.len() {
        let line_end = source[line_start..].find('\n').map_or(source.len(), |i| line_start + i);
        let line = source[line_start..line_end].trim_start();
        let line = line.strip_prefix('|').unwrap_or(line).trim_start();
        let line = line.strip_prefix('-').unwrap_or(line).trim();
        if line == tag {
            return Some(line_end);
        }
        line_start = line_end + 1;
    }
    None
}

/// Tag of a heredoc header: `EOT` for `@("EOT":json/L)`.
fn heredoc_tag(header: &str) -> &str {
    let inner = header.trim_start_matches("@(").trim_start_matches('"');
    let end = inner.find(|c: char| matches!(c, '"' | ':' | '/' | ')')).unwrap_or(inner.len());
    inner[..end].trim()
}

fn comment(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(char('#'), not_line_ending)),
        recognize(preceded(tag("/*"), cut(terminated(take_until("*/"), tag("*/"))))),
    ))(input)
}

fn trivia(input: &str) -> IResult<&str, usize> { many0_count(alt((multispace1, comment)))(input) }

fn escaped_char(input: &str) -> IResult<&str, &str> { recognize(pair(char('\\'), anychar))(input) }

fn single_quoted(input: &str) -> IResult<&str, &str> {
    recognize(preceded(
        char('\''),
        cut(terminated(many0_count(alt((is_not("\\'"), escaped_char))), char('\''))),
    ))(input)
}

fn double_quoted(input: &str) -> IResult<&str, &str> {
    recognize(preceded(
        char('"'),
        cut(terminated(many0_count(alt((is_not("\\\""), escaped_char))), char('"'))),
    ))(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn variable(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        char('$'),
        alt((recognize(pair(opt(tag("::")), separated_list1(tag("::"), identifier))), digit1)),
    ))(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    recognize(tuple((opt(tag("::")), identifier, many0_count(preceded(tag("::"), identifier)))))(
        input,
    )
}

fn number(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        digit1,
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '.' || c == '_'),
    ))(input)
}

fn regex(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('/'),
        pair(
            alt((escaped_char, recognize(none_of(" /\n\\")))),
            many0_count(alt((is_not("\\/\n"), escaped_char))),
        ),
        char('/'),
    ))(input)
}

fn heredoc(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        tag("@("),
        opt(char('"')),
        is_not("\":/)\n"),
        opt(char('"')),
        opt(preceded(char(':'), is_not("/)\n"))),
        opt(preceded(char('/'), is_not(")\n"))),
        char(')'),
    )))(input)
}

fn token(input: &str, regex_ok: bool) -> IResult<&str, (TokenKind, &str)> {
    if regex_ok {
        if let Ok((rest, text)) = regex(input) {
            return Ok((rest, (TokenKind::Regex, text)));
        }
    }
    alt((
        map(alt((single_quoted, double_quoted)), |s: &str| (TokenKind::Str, s)),
        map(heredoc, |s: &str| (TokenKind::Heredoc, s)),
        map(variable, |s: &str| (TokenKind::Variable, s)),
        map(word, |s: &str| (TokenKind::Word, s)),
        map(number, |s: &str| (TokenKind::Number, s)),
        map(recognize(anychar), |s: &str| (TokenKind::Punct, s)),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(TokenKind, &str)> {
        tokenize(source).expect("source should lex").into_iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn lexes_class_header() {
        assert_eq!(
            kinds("class tomcat::config ( $port = 8080 ) {"),
            vec![
                (TokenKind::Word, "class"),
                (TokenKind::Word, "tomcat::config"),
                (TokenKind::Punct, "("),
                (TokenKind::Variable, "$port"),
                (TokenKind::Punct, "="),
                (TokenKind::Number, "8080"),
                (TokenKind::Punct, ")"),
                (TokenKind::Punct, "{"),
            ]
        );
    }

    #[test]
    fn skips_comments() {
        let source = "# leading\n/* block\ncomment */ node default {}";
        assert_eq!(kinds(source)[0], (TokenKind::Word, "node"));
    }

    #[test]
    fn strings_keep_escapes_until_unquoted() {
        let tokens = tokenize(r#"'it\'s' "a \"b\"""#).expect("source should lex");
        assert_eq!(tokens[0].unquoted(), "it's");
        assert_eq!(tokens[1].unquoted(), "a \"b\"");
    }

    #[test]
    fn regex_literals() {
        assert_eq!(kinds(r"node /^web\d+$/ {}")[1], (TokenKind::Regex, r"/^web\d+$/"));
    }

    #[test]
    fn top_scope_variables() {
        assert_eq!(kinds("$::osfamily")[0], (TokenKind::Variable, "$::osfamily"));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = tokenize("class foo { $x = 'oops }").expect_err("unterminated string");
        assert_eq!(err.offset, 17);
    }

    #[test]
    fn heredoc_bodies_are_skipped() {
        let source = "$motd = @(EOT)\n  Don't edit this file\n  | EOT\n$next = 1\n";
        assert_eq!(
            kinds(source),
            vec![
                (TokenKind::Variable, "$motd"),
                (TokenKind::Punct, "="),
                (TokenKind::Heredoc, "@(EOT)"),
                (TokenKind::Variable, "$next"),
                (TokenKind::Punct, "="),
                (TokenKind::Number, "1"),
            ]
        );
    }

    #[test]
    fn heredoc_header_line_keeps_lexing() {
        let source = "f(@(\"A\":json/L), @(B))\nit's\n-A\nb'\n|- B\n;";
        let tokens: Vec<_> = kinds(source).into_iter().map(|(_, text)| text).collect();
        assert_eq!(tokens, vec!["f", "(", "@(\"A\":json/L)", ",", "@(B)", ")", ";"]);
    }

    #[test]
    fn unterminated_heredoc_is_an_error() {
        let err = tokenize("$x = @(EOT)\nno end\n").expect_err("missing end tag");
        assert_eq!(err.message, "unterminated heredoc");
    }

    #[test]
    fn slash_after_an_operand_is_division() {
        let source = "($a = 4/2, $b = 'x/y')";
        assert!(kinds(source).contains(&(TokenKind::Punct, "/")));
        assert!(kinds(source).contains(&(TokenKind::Str, "'x/y'")));
        assert_eq!(kinds("$x =~ /^a,b$/")[3], (TokenKind::Regex, "/^a,b$/"));
    }
}
