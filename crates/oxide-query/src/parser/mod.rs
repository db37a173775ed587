//! Fragment parsers.
//!
//! Hand-written recursive descent parsers over an eagerly lexed token
//! sequence. Each entry point owns a [`Cursor`] and threads it through its
//! productions; malformed input always comes back as a [`ParseError`],
//! never as a panic.
//!
//! - [`parse_join`]: `[INNER|LEFT|RIGHT|CROSS] JOIN table [AS alias] ON a = b ...`
//! - [`parse_where`] / [`parse_having`]: `a = b AND (c = d OR e = f) ...`
//! - [`analyze`]: operation and table of a full statement
//! - [`parse_select`]: `SELECT cols FROM [ONLY] table [AS alias]`

mod analyze;
mod condition;
mod error;
mod join;
mod select;

pub use analyze::{Analysis, AnalyzeOptions, Operation, analyze};
pub use condition::{parse_having, parse_where};
pub use error::{ParseError, ParseErrorKind};
pub use join::parse_join;
pub use select::parse_select;

use crate::lexer::{Keyword, Token, TokenIter, TokenKind};

/// Deepest parenthesis nesting a condition may use.
const MAX_DEPTH: usize = 128;

/// Most `a = b` tests a single condition may chain.
const MAX_TERMS: usize = 512;

/// A token cursor bound to the text it was lexed from.
///
/// Every error it produces carries `kind`, the current token's span and the
/// full input. The cursor also bounds how deep and how long a condition may
/// grow, since the resulting trees are walked recursively.
struct Cursor<'q> {
    tokens: TokenIter,
    query: &'q str,
    kind: ParseErrorKind,
    depth: usize,
    terms: usize,
}

impl<'q> Cursor<'q> {
    fn new(query: &'q str, kind: ParseErrorKind) -> Self {
        Self {
            tokens: TokenIter::lex(query),
            query,
            kind,
            depth: 0,
            terms: 0,
        }
    }

    /// Enters a parenthesized group.
    fn open(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves a parenthesized group, failing if none is open.
    fn close(&mut self) -> Result<(), ParseError> {
        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or_else(|| self.error("unbalanced parenthesis"))?;
        self.expect(TokenKind::RParen)?;
        Ok(())
    }

    /// Counts one more test in the current condition.
    fn term(&mut self) -> Result<(), ParseError> {
        if self.terms >= MAX_TERMS {
            return Err(self.error("too many conditions"));
        }
        self.terms += 1;
        Ok(())
    }

    fn current(&self) -> &Token {
        self.tokens.current()
    }

    fn is(&self, kind: TokenKind) -> bool {
        self.tokens.is(kind)
    }

    fn is_keyword(&self, keyword: Keyword) -> bool {
        self.tokens.is(TokenKind::Keyword(keyword))
    }

    fn is_nth_keyword(&self, offset: usize, keyword: Keyword) -> bool {
        self.tokens.is_nth(offset, TokenKind::Keyword(keyword))
    }

    fn at_end(&self) -> bool {
        !self.tokens.has_next()
    }

    fn advance(&mut self) -> Token {
        self.tokens.next()
    }

    /// Consumes the current token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.is(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        self.eat(TokenKind::Keyword(keyword))
    }

    /// Consumes a token of the given kind or fails.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.is(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    /// Consumes a literal and returns its text.
    fn expect_literal(&mut self) -> Result<String, ParseError> {
        self.expect(TokenKind::Literal).map(|t| t.value)
    }

    /// Fails unless every token has been consumed.
    fn expect_end(&self) -> Result<(), ParseError> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.kind, message, self.query).at(self.current().span)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        let found = if token.is_eof() || token.value.is_empty() {
            token.kind.to_string()
        } else {
            format!("`{}`", token.value)
        };
        self.error(format!("expected {expected}, found {found}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_expect() {
        let mut cursor = Cursor::new("a = *", ParseErrorKind::InvalidCondition);
        assert_eq!(cursor.expect_literal().unwrap(), "a");
        assert!(cursor.eat(TokenKind::Equals));
        let err = cursor.expect_literal().unwrap_err();
        assert_eq!(err.message, "expected literal, found `*`");
        assert_eq!(err.span.map(|s| s.start), Some(4));
        assert!(err.is(ParseErrorKind::InvalidCondition));
    }

    #[test]
    fn test_cursor_end() {
        let mut cursor = Cursor::new("a b", ParseErrorKind::InvalidQuery);
        cursor.advance();
        let err = cursor.expect_end().unwrap_err();
        assert_eq!(err.message, "expected end of input, found `b`");
        cursor.advance();
        assert!(cursor.expect_end().is_ok());
        let err = cursor.expect_literal().unwrap_err();
        assert_eq!(err.message, "expected literal, found end of input");
    }

    #[test]
    fn test_cursor_depth() {
        let mut cursor = Cursor::new(")", ParseErrorKind::InvalidCondition);
        for _ in 0..MAX_DEPTH {
            cursor.open().unwrap();
        }
        assert_eq!(cursor.open().unwrap_err().message, "nesting too deep");
        cursor.close().unwrap();
        assert_eq!(cursor.depth, MAX_DEPTH - 1);

        let mut cursor = Cursor::new(")", ParseErrorKind::InvalidCondition);
        assert_eq!(cursor.close().unwrap_err().message, "unbalanced parenthesis");
    }

    #[test]
    fn test_cursor_terms() {
        let mut cursor = Cursor::new("", ParseErrorKind::InvalidJoinCondition);
        for _ in 0..MAX_TERMS {
            cursor.term().unwrap();
        }
        let err = cursor.term().unwrap_err();
        assert_eq!(err.message, "too many conditions");
        assert!(err.is(ParseErrorKind::InvalidJoinCondition));
    }
}
