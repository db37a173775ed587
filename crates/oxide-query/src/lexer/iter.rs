//! Eager token iterator consumed by the fragment parsers.

use super::{Lexer, Token, TokenKind};

/// A fully materialized token sequence with a cursor.
///
/// The sequence always ends with an EOF token; reading past the end keeps
/// yielding that EOF token, mirroring the lexer's pull behaviour.
#[derive(Debug, Clone)]
pub struct TokenIter {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenIter {
    /// Wraps an already lexed token list. An EOF token is appended if the
    /// list does not end with one.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let offset = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::eof(offset));
        }
        Self { tokens, pos: 0 }
    }

    /// Lexes `input` completely.
    #[must_use]
    pub fn lex(input: &str) -> Self {
        Lexer::new(input).into_token_iter()
    }

    /// Returns true while the cursor is before the EOF token.
    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.current().is_eof()
    }

    /// Returns the token under the cursor without consuming it.
    #[must_use]
    pub fn current(&self) -> &Token {
        self.nth(0)
    }

    /// Returns the token `offset` positions after the cursor.
    #[must_use]
    pub fn nth(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    /// Checks whether the token under the cursor has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Checks whether the token `offset` positions ahead has the given kind.
    #[must_use]
    pub fn is_nth(&self, offset: usize, kind: TokenKind) -> bool {
        self.nth(offset).kind == kind
    }

    /// Consumes and returns the token under the cursor.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Number of tokens, EOF included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false: a token sequence holds at least the EOF token.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}
