//! Best-effort SELECT parser.
//!
//! Grammar:
//!
//! ```text
//! select := SELECT [DISTINCT] item ("," item)* [FROM [ONLY] literal [AS literal]] ...
//! item   := "*" | literal [AS literal]
//! ```
//!
//! Only the prefix up to the FROM table is reconstructed; whatever follows
//! is ignored.

use tracing::debug;

use super::{Cursor, ParseError, ParseErrorKind};
use crate::ast::{Column, FromClause, Raw, Select, SelectExpression, Table};
use crate::lexer::{Keyword, TokenKind};

/// Reconstructs the select list and FROM clause of a SELECT statement.
///
/// # Errors
///
/// Returns a [`ParseErrorKind::InvalidSelect`] error if the text does not
/// start with `SELECT`, has an empty or malformed select list, or has a
/// malformed FROM clause.
pub fn parse_select(query: &str) -> Result<Select, ParseError> {
    let mut cursor = Cursor::new(query, ParseErrorKind::InvalidSelect);
    let result = parse(&mut cursor);
    match &result {
        Ok(select) => debug!(
            query = %query,
            columns = select.expressions.len(),
            table = %select.from.table.name,
            "parsed select"
        ),
        Err(err) => debug!(query = %query, error = %err, "invalid select"),
    }
    result
}

fn parse(cursor: &mut Cursor<'_>) -> Result<Select, ParseError> {
    cursor.expect(TokenKind::Keyword(Keyword::Select))?;
    let distinct = cursor.eat_keyword(Keyword::Distinct);

    let mut expressions = vec![parse_item(cursor)?];
    while cursor.eat(TokenKind::Comma) {
        expressions.push(parse_item(cursor)?);
    }

    let mut select = Select::new(expressions);
    select.distinct = distinct;

    if cursor.eat_keyword(Keyword::From) {
        let only = cursor.eat_keyword(Keyword::Only);
        let mut table = Table::new(cursor.expect_literal()?);
        if cursor.eat_keyword(Keyword::As) {
            table = table.alias(cursor.expect_literal()?);
        }
        select.from = if only {
            FromClause::only(table)
        } else {
            FromClause::new(table)
        };
    }
    Ok(select)
}

/// item := "*" | literal [AS literal]
fn parse_item(cursor: &mut Cursor<'_>) -> Result<SelectExpression, ParseError> {
    if cursor.eat(TokenKind::Asterisk) {
        return Ok(Raw::new("*").into());
    }
    let column = Column::new(cursor.expect_literal()?);
    if cursor.eat_keyword(Keyword::As) {
        return Ok(column.alias(cursor.expect_literal()?).into());
    }
    Ok(column.into())
}
