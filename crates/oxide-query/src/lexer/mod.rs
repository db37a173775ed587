//! SQL fragment lexer.
//!
//! The lexer turns caller-supplied SQL fragments into a flat token stream.
//! It only knows the small vocabulary the fragment parsers need: a fixed
//! keyword table, a handful of delimiters and generic literals.

mod iter;
mod span;
mod token;
mod tokenizer;

pub use iter::TokenIter;
pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
