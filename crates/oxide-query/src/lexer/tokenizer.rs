//! Fragment tokenizer implementation.

use super::{Keyword, Span, Token, TokenIter, TokenKind};

/// A lexer that tokenizes SQL fragments.
///
/// The lexer is a pull source: [`Lexer::next_token`] can be polled past the
/// end of input and keeps returning an EOF token.
pub struct Lexer<'a> {
    /// The input source text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Emit newlines as `Semicolon` tokens instead of skipping them.
    newline_terminators: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            newline_terminators: false,
        }
    }

    /// Makes `\n` produce a statement terminator token instead of being
    /// skipped as whitespace.
    #[must_use]
    pub const fn with_newline_terminators(mut self, enabled: bool) -> Self {
        self.newline_terminators = enabled;
        self
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    const fn is_whitespace(&self, c: char) -> bool {
        match c {
            ' ' | '\t' | '\r' => true,
            '\n' => !self.newline_terminators,
            _ => false,
        }
    }

    fn is_literal(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '.'
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| self.is_whitespace(c)) {
            self.advance();
        }
    }

    /// Creates a token spanning from the token start to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            &self.input[self.start..self.pos],
            Span::new(self.start, self.pos),
        )
    }

    /// Scans a maximal run of literal characters, then classifies it.
    fn scan_literal(&mut self) -> Token {
        while self.peek().is_some_and(Self::is_literal) {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::lookup(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Literal),
        }
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return Token::eof(self.pos);
        };

        match c {
            '\n' => Token::new(
                TokenKind::Semicolon,
                ";",
                Span::new(self.start, self.pos),
            ),
            '*' => self.make_token(TokenKind::Asterisk),
            '=' => self.make_token(TokenKind::Equals),
            ';' => self.make_token(TokenKind::Semicolon),
            ',' => self.make_token(TokenKind::Comma),
            ':' => self.make_token(TokenKind::Colon),
            '(' => self.make_token(TokenKind::LParen),
            ')' => self.make_token(TokenKind::RParen),
            c if Self::is_literal(c) => {
                self.pos = self.start;
                self.scan_literal()
            }
            _ => self.make_token(TokenKind::Illegal),
        }
    }

    /// Tokenizes the entire input. The returned list always ends with
    /// exactly one EOF token.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Drains the lexer into an eager, indexable token iterator.
    #[must_use]
    pub fn into_token_iter(mut self) -> TokenIter {
        TokenIter::new(self.tokenize())
    }
}
