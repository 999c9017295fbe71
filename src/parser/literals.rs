//! String literal decoding.
//!
//! Only plain literals decode to a value. Interpolated strings (f-strings,
//! template strings) and byte strings yield `None`, since their runtime value
//! is not a fixed `str`.

use super::{node_text, significant_children, unwrap_parens};
use std::iter::Peekable;
use std::str::Chars;
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Python,
    JavaScript,
}

/// Decode a Python string literal, including implicit concatenation
/// (`'a' 'b'`) and redundant parentheses.
pub fn python_string_value(node: Node, source: &str) -> Option<String> {
    let node = unwrap_parens(node);
    match node.kind() {
        "string" => python_string_part(node, source),
        "concatenated_string" => significant_children(&node)
            .into_iter()
            .map(|part| python_string_part(part, source))
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.concat()),
        _ => None,
    }
}

fn python_string_part(node: Node, source: &str) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let children = significant_children(&node);
    let start = children.first().filter(|c| c.kind() == "string_start")?;
    let end = children.last().filter(|c| c.kind() == "string_end")?;
    if children.iter().any(|c| c.kind() == "interpolation") {
        return None;
    }

    let prefix = node_text(start, source)
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_lowercase();
    if prefix.contains(['f', 'b', 't']) {
        return None;
    }

    let body = source.get(start.end_byte()..end.start_byte())?;
    if prefix.contains('r') {
        Some(body.to_string())
    } else {
        Some(unescape(body, Dialect::Python))
    }
}

/// Decode a JavaScript/TypeScript `'...'` or `"..."` literal.
///
/// Template strings are not plain literals and are rejected even without
/// substitutions.
pub fn js_string_value(node: Node, source: &str) -> Option<String> {
    let node = unwrap_parens(node);
    if node.kind() != "string" {
        return None;
    }
    let text = node_text(&node, source);
    let quote = text.chars().next().filter(|q| *q == '\'' || *q == '"')?;
    let body = text.strip_prefix(quote)?.strip_suffix(quote)?;
    Some(unescape(body, Dialect::JavaScript))
}

fn unescape(body: &str, dialect: Dialect) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        match escape {
            // line continuation
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\\' | '\'' | '"' => out.push(escape),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            'a' if dialect == Dialect::Python => out.push('\u{7}'),
            '0'..='7' if dialect == Dialect::Python => {
                let mut digits = String::from(escape);
                while digits.len() < 3 {
                    match chars.peek() {
                        Some(d @ '0'..='7') => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                push_code_point(&mut out, u32::from_str_radix(&digits, 8).ok(), &digits);
            }
            '0' if !matches!(chars.peek(), Some('0'..='9')) => out.push('\0'),
            'x' => {
                let digits = take_hex(&mut chars, 2);
                push_escaped(&mut out, escape, &digits, 2);
            }
            'u' if dialect == Dialect::JavaScript && chars.peek() == Some(&'{') => {
                chars.next();
                let mut digits = String::new();
                while let Some(d) = chars.next_if(|d| *d != '}') {
                    digits.push(d);
                }
                if chars.next_if_eq(&'}').is_some() {
                    let value = u32::from_str_radix(&digits, 16).ok();
                    push_code_point(&mut out, value, &format!("u{{{digits}}}"));
                } else {
                    out.push_str("\\u{");
                    out.push_str(&digits);
                }
            }
            'u' => {
                let digits = take_hex(&mut chars, 4);
                push_escaped(&mut out, escape, &digits, 4);
            }
            'U' if dialect == Dialect::Python => {
                let digits = take_hex(&mut chars, 8);
                push_escaped(&mut out, escape, &digits, 8);
            }
            other => match dialect {
                Dialect::Python => {
                    out.push('\\');
                    out.push(other);
                }
                Dialect::JavaScript => out.push(other),
            },
        }
    }

    out
}

fn take_hex(chars: &mut Peekable<Chars<'_>>, max: usize) -> String {
    let mut digits = String::new();
    while digits.len() < max {
        match chars.next_if(|c| c.is_ascii_hexdigit()) {
            Some(d) => digits.push(d),
            None => break,
        }
    }
    digits
}

fn push_escaped(out: &mut String, escape: char, digits: &str, expected: usize) {
    let value = if digits.len() == expected {
        u32::from_str_radix(digits, 16).ok()
    } else {
        None
    };
    push_code_point(out, value, &format!("{escape}{digits}"));
}

/// Push a decoded code point, or the original escape text when it is invalid.
fn push_code_point(out: &mut String, value: Option<u32>, original: &str) {
    match value.and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => {
            out.push('\\');
            out.push_str(original);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceLanguage;
    use crate::parser::parse;

    fn python_value(expr: &str) -> Option<String> {
        let source = format!("x = {expr}\n");
        let tree = parse(&source, SourceLanguage::Python).unwrap();
        let right = tree
            .nodes_of_kind("assignment")
            .next()
            .and_then(|n| n.child_by_field_name("right"))
            .unwrap();
        python_string_value(right, tree.source())
    }

    fn js_value(expr: &str) -> Option<String> {
        let source = format!("const x = {expr};\n");
        let tree = parse(&source, SourceLanguage::JavaScript).unwrap();
        let value = tree
            .nodes_of_kind("variable_declarator")
            .next()
            .and_then(|n| n.child_by_field_name("value"))
            .unwrap();
        js_string_value(value, tree.source())
    }

    #[test]
    fn test_python_plain_strings() {
        assert_eq!(python_value("'users/'").as_deref(), Some("users/"));
        assert_eq!(python_value("\"users/\"").as_deref(), Some("users/"));
        assert_eq!(python_value("''").as_deref(), Some(""));
        assert_eq!(python_value("u'api'").as_deref(), Some("api"));
        assert_eq!(python_value("'''multi'''").as_deref(), Some("multi"));
    }

    #[test]
    fn test_python_raw_string_keeps_backslashes() {
        assert_eq!(
            python_value(r"r'^items/(?P<pk>\d+)/$'").as_deref(),
            Some(r"^items/(?P<pk>\d+)/$")
        );
    }

    #[test]
    fn test_python_escapes() {
        assert_eq!(python_value(r"'a\tb'").as_deref(), Some("a\tb"));
        assert_eq!(python_value(r"'\x41é\101'").as_deref(), Some("AéA"));
        assert_eq!(python_value(r"'\d'").as_deref(), Some(r"\d"));
    }

    #[test]
    fn test_python_rejects_non_plain_literals() {
        assert_eq!(python_value("f'/users/{uid}'"), None);
        assert_eq!(python_value("b'/bytes'"), None);
        assert_eq!(python_value("name"), None);
        assert_eq!(python_value("1"), None);
    }

    #[test]
    fn test_python_concatenation_and_parens() {
        assert_eq!(python_value("('api/' 'users/')").as_deref(), Some("api/users/"));
        assert_eq!(python_value("(('nested'))").as_deref(), Some("nested"));
        assert_eq!(python_value("'a' f'{b}'"), None);
    }

    #[test]
    fn test_js_strings() {
        assert_eq!(js_value("'/users'").as_deref(), Some("/users"));
        assert_eq!(js_value("\"/users/:id\"").as_deref(), Some("/users/:id"));
        assert_eq!(js_value(r"'/café'").as_deref(), Some("/café"));
        assert_eq!(js_value(r"'/\u{1F600}'").as_deref(), Some("/\u{1F600}"));
        assert_eq!(js_value(r"'\/path'").as_deref(), Some("/path"));
    }

    #[test]
    fn test_js_rejects_templates_and_names() {
        assert_eq!(js_value("`/users`"), None);
        assert_eq!(js_value("`/users/${id}`"), None);
        assert_eq!(js_value("path"), None);
    }

    #[test]
    fn test_malformed_escape_is_preserved() {
        assert_eq!(unescape(r"\xZZ", Dialect::Python), r"\xZZ");
        assert_eq!(unescape(r"\u12", Dialect::JavaScript), r"\u12");
        assert_eq!(unescape("trailing\\", Dialect::Python), "trailing\\");
    }
}
