//! Parser error types.

use thiserror::Error;

use crate::lexer::Span;

/// Stable marker identifying which grammar rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseErrorKind {
    /// A join clause could not be parsed.
    #[error("join condition is invalid")]
    InvalidJoinCondition,
    /// A where/having condition could not be parsed.
    #[error("condition is invalid")]
    InvalidCondition,
    /// The analyzer could not find the requested information.
    #[error("query is invalid")]
    InvalidQuery,
    /// A SELECT statement could not be parsed.
    #[error("select statement is invalid")]
    InvalidSelect,
}

/// A recoverable parse error.
///
/// Carries the error kind, a description of what went wrong, the location
/// of the offending token (when there is one) and the full input text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message} in {query:?}")]
pub struct ParseError {
    /// The error kind.
    pub kind: ParseErrorKind,
    /// What went wrong.
    pub message: String,
    /// The location of the offending token.
    pub span: Option<Span>,
    /// The text that was being parsed.
    pub query: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(
        kind: ParseErrorKind,
        message: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            query: query.into(),
        }
    }

    /// Attaches the location of the offending token.
    #[must_use]
    pub const fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Returns true if the error has the given kind.
    #[must_use]
    pub fn is(&self, kind: ParseErrorKind) -> bool {
        self.kind == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ParseError::new(
            ParseErrorKind::InvalidJoinCondition,
            "expected literal, found `*`",
            "ON a = *",
        )
        .at(Span::new(7, 8));
        assert_eq!(
            err.to_string(),
            "join condition is invalid: expected literal, found `*` in \"ON a = *\""
        );
        assert_eq!(err.span, Some(Span::new(7, 8)));
    }

    #[test]
    fn test_is() {
        let err = ParseError::new(ParseErrorKind::InvalidQuery, "no operation", "");
        assert!(err.is(ParseErrorKind::InvalidQuery));
        assert!(!err.is(ParseErrorKind::InvalidSelect));
    }
}
