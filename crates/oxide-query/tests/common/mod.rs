#![allow(dead_code)]

use oxide_query::ast::{Expression, Identifier, Join};
use oxide_query::parser::{self, ParseError, ParseErrorKind};

pub fn id(name: &str) -> Identifier {
    Identifier::new(name)
}

pub fn join(text: &str) -> Join {
    parser::parse_join(text).unwrap_or_else(|e| panic!("Failed to parse join: {text}\nError: {e}"))
}

pub fn join_err(text: &str) -> ParseError {
    parser::parse_join(text)
        .expect_err(&format!("Expected join parse error for: {text}"))
}

pub fn condition(text: &str) -> Expression {
    parser::parse_where(text)
        .unwrap_or_else(|e| panic!("Failed to parse condition: {text}\nError: {e}"))
}

pub fn condition_err(text: &str) -> ParseError {
    parser::parse_where(text)
        .expect_err(&format!("Expected condition parse error for: {text}"))
}

/// Asserts the error is recoverable, tagged with `kind` and carries the input.
pub fn assert_error(err: &ParseError, kind: ParseErrorKind, text: &str) {
    assert!(err.is(kind), "expected {kind:?} for {text}, got {err:?}");
    assert_eq!(err.query, text);
}

/// Replaces every `$N` and `:arg_N` placeholder with `?`.
pub fn strip_placeholders(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        let marker = match c {
            '$' => Some(""),
            ':' if sql.contains(":arg_") => Some("arg_"),
            _ => None,
        };
        let Some(marker) = marker else {
            out.push(c);
            continue;
        };
        for expected in marker.chars() {
            assert_eq!(chars.next(), Some(expected));
        }
        while chars.peek().is_some_and(char::is_ascii_digit) {
            chars.next();
        }
        out.push('?');
    }
    out
}
