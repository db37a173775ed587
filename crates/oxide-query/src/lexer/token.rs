//! Token types for the fragment lexer.

use core::fmt;

use super::Span;

/// Keywords recognized by the lexer.
///
/// Anything that is not in this table is lexed as a generic literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Operations
    Select,
    Update,
    Insert,
    Delete,

    // Clauses
    From,
    Where,
    Limit,
    Offset,
    Set,
    As,
    Group,
    By,
    Having,
    Order,
    Distinct,
    Only,
    Returning,
    Values,
    Into,

    // Logical operators
    And,
    Or,

    // Joins
    Inner,
    Cross,
    Left,
    Right,
    Join,
    On,
}

impl Keyword {
    /// Looks up a keyword from raw text (case-insensitive).
    #[must_use]
    pub fn lookup(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "UPDATE" => Some(Self::Update),
            "INSERT" => Some(Self::Insert),
            "DELETE" => Some(Self::Delete),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "LIMIT" => Some(Self::Limit),
            "OFFSET" => Some(Self::Offset),
            "SET" => Some(Self::Set),
            "AS" => Some(Self::As),
            "GROUP" => Some(Self::Group),
            "BY" => Some(Self::By),
            "HAVING" => Some(Self::Having),
            "ORDER" => Some(Self::Order),
            "DISTINCT" => Some(Self::Distinct),
            "ONLY" => Some(Self::Only),
            "RETURNING" => Some(Self::Returning),
            "VALUES" => Some(Self::Values),
            "INTO" => Some(Self::Into),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "INNER" => Some(Self::Inner),
            "CROSS" => Some(Self::Cross),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            "JOIN" => Some(Self::Join),
            "ON" => Some(Self::On),
            _ => None,
        }
    }

    /// Returns the canonical (upper-case) spelling of the keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Update => "UPDATE",
            Self::Insert => "INSERT",
            Self::Delete => "DELETE",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Set => "SET",
            Self::As => "AS",
            Self::Group => "GROUP",
            Self::By => "BY",
            Self::Having => "HAVING",
            Self::Order => "ORDER",
            Self::Distinct => "DISTINCT",
            Self::Only => "ONLY",
            Self::Returning => "RETURNING",
            Self::Values => "VALUES",
            Self::Into => "INTO",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Inner => "INNER",
            Self::Cross => "CROSS",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Join => "JOIN",
            Self::On => "ON",
        }
    }
}

/// The lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier, number or any other run of literal characters.
    Literal,
    /// A keyword from the fixed table.
    Keyword(Keyword),

    // Operators
    /// *
    Asterisk,
    /// =
    Equals,

    // Delimiters
    /// ; (also produced for newlines when terminators are enabled)
    Semicolon,
    /// ,
    Comma,
    /// :
    Colon,
    /// (
    LParen,
    /// )
    RParen,

    // Special
    /// A character the lexer has no category for.
    Illegal,
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal => f.write_str("literal"),
            Self::Keyword(kw) => f.write_str(kw.as_str()),
            Self::Asterisk => f.write_str("'*'"),
            Self::Equals => f.write_str("'='"),
            Self::Semicolon => f.write_str("';'"),
            Self::Comma => f.write_str("','"),
            Self::Colon => f.write_str("':'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::Illegal => f.write_str("illegal character"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

/// A token: its category, the raw text it was lexed from and its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The raw source text (empty for EOF).
    pub value: String,
    /// The location in the source.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    /// Creates an EOF token positioned at `offset`.
    #[must_use]
    pub const fn eof(offset: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            value: String::new(),
            span: Span::new(offset, offset),
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }
}
