//! WHERE / HAVING condition parser.
//!
//! Grammar:
//!
//! ```text
//! where     := [WHERE] condition EOF
//! having    := [HAVING] condition EOF
//! condition := group ((AND | OR) group)*
//! group     := "(" condition ")" | test
//! test      := literal "=" literal
//! ```
//!
//! There is no AND-over-OR precedence: `a = b OR c = d AND e = f` folds to
//! `((a = b OR c = d) AND e = f)`. Parentheses are the only way to group.
//! Both sides of a test are identifiers; nothing is bound.

use tracing::debug;

use super::{Cursor, ParseError, ParseErrorKind};
use crate::ast::{ComparisonOperator, Expression, Identifier, Infix};
use crate::lexer::{Keyword, TokenKind};

/// Parses a WHERE condition such as `user.id = project.user_id`.
///
/// A leading `WHERE` keyword is optional.
///
/// # Errors
///
/// Returns a [`ParseErrorKind::InvalidCondition`] error if the text does
/// not match the grammar. Comparison operators other than `=` are rejected.
pub fn parse_where(query: &str) -> Result<Expression, ParseError> {
    parse(query, Keyword::Where)
}

/// Parses a HAVING condition. Same grammar as [`parse_where`], with an
/// optional leading `HAVING`.
///
/// # Errors
///
/// Returns a [`ParseErrorKind::InvalidCondition`] error if the text does
/// not match the grammar.
pub fn parse_having(query: &str) -> Result<Expression, ParseError> {
    parse(query, Keyword::Having)
}

fn parse(query: &str, keyword: Keyword) -> Result<Expression, ParseError> {
    let mut cursor = Cursor::new(query, ParseErrorKind::InvalidCondition);
    cursor.eat_keyword(keyword);
    let result = parse_condition(&mut cursor).and_then(|condition| {
        cursor.expect_end()?;
        Ok(condition)
    });
    match &result {
        Ok(_) => debug!(query = %query, clause = keyword.as_str(), "parsed condition"),
        Err(err) => debug!(query = %query, error = %err, "invalid condition"),
    }
    result
}

/// condition := group ((AND | OR) group)*
fn parse_condition(cursor: &mut Cursor<'_>) -> Result<Expression, ParseError> {
    let mut condition = parse_group(cursor)?;
    loop {
        if cursor.eat_keyword(Keyword::And) {
            condition = condition.and(parse_group(cursor)?);
        } else if cursor.eat_keyword(Keyword::Or) {
            condition = condition.or(parse_group(cursor)?);
        } else {
            return Ok(condition);
        }
    }
}

/// group := "(" condition ")" | test
fn parse_group(cursor: &mut Cursor<'_>) -> Result<Expression, ParseError> {
    if !cursor.eat(TokenKind::LParen) {
        return parse_test(cursor);
    }
    cursor.open()?;
    let condition = parse_condition(cursor)?;
    cursor.close()?;
    Ok(condition)
}

/// test := literal "=" literal
fn parse_test(cursor: &mut Cursor<'_>) -> Result<Expression, ParseError> {
    cursor.term()?;
    let left = cursor.expect_literal()?;
    if !cursor.eat(TokenKind::Equals) {
        if cursor.at_end() {
            return Err(cursor.unexpected("'='"));
        }
        let found = cursor.current().value.clone();
        return Err(cursor.error(format!(
            "unsupported operator `{found}`, only `=` is allowed"
        )));
    }
    let right = cursor.expect_literal()?;
    Ok(Infix::new(
        Identifier::new(left),
        ComparisonOperator::Equal,
        Identifier::new(right),
    )
    .into())
}
