//! Join clause parser.
//!
//! Grammar:
//!
//! ```text
//! join      := [join_type] [table ON] condition EOF
//!            | CROSS JOIN table EOF
//! join_type := (INNER | LEFT | RIGHT) JOIN | JOIN
//! table     := literal [AS literal]
//! condition := group ((AND | OR) group)*
//! group     := "(" condition ")" | test
//! test      := literal "=" literal
//! ```
//!
//! `AND`/`OR` fold left to right in source order; parentheses only delimit
//! groups.

use tracing::debug;

use super::{Cursor, ParseError, ParseErrorKind};
use crate::ast::{Join, JoinType, OnClause, OnExpression, Statement, Table};
use crate::lexer::{Keyword, TokenKind};

/// Parses a join clause such as `LEFT JOIN project ON user.id = project.user_id`.
///
/// The join type defaults to `INNER JOIN`. The table is only filled in when
/// a literal precedes `ON`; a bare condition yields a join with an empty
/// table.
///
/// # Errors
///
/// Returns a [`ParseErrorKind::InvalidJoinCondition`] error if the text does
/// not match the grammar, including unbalanced parentheses.
pub fn parse_join(query: &str) -> Result<Join, ParseError> {
    let result = JoinParser::new(query).parse();
    match &result {
        Ok(join) => debug!(
            query = %query,
            kind = ?join.kind,
            table = %join.table.name,
            "parsed join"
        ),
        Err(err) => debug!(query = %query, error = %err, "invalid join"),
    }
    result
}

struct JoinParser<'q> {
    cursor: Cursor<'q>,
}

impl<'q> JoinParser<'q> {
    fn new(query: &'q str) -> Self {
        Self {
            cursor: Cursor::new(query, ParseErrorKind::InvalidJoinCondition),
        }
    }

    fn parse(mut self) -> Result<Join, ParseError> {
        let kind = self.parse_join_type()?;

        if kind == JoinType::Cross {
            let table = self.parse_table()?;
            if self.cursor.is_keyword(Keyword::On) {
                return Err(self.cursor.error("CROSS JOIN does not take a condition"));
            }
            self.cursor.expect_end()?;
            return Ok(Join::cross(table));
        }

        let table = if self.cursor.is(TokenKind::Literal)
            && (self.cursor.is_nth_keyword(1, Keyword::On)
                || self.cursor.is_nth_keyword(1, Keyword::As))
        {
            self.parse_table()?
        } else {
            Table::default()
        };
        if !table.is_empty() || self.cursor.is_keyword(Keyword::On) {
            self.cursor.expect(TokenKind::Keyword(Keyword::On))?;
        }

        let condition = self.parse_condition()?;
        if self.cursor.is(TokenKind::RParen) {
            self.cursor.close()?;
        }
        self.cursor.expect_end()?;

        Ok(Join {
            kind,
            table,
            condition: Some(condition),
        })
    }

    /// join_type := (INNER | LEFT | RIGHT | CROSS) JOIN | JOIN
    fn parse_join_type(&mut self) -> Result<JoinType, ParseError> {
        let kind = match self.cursor.current().as_keyword() {
            Some(Keyword::Inner) => JoinType::Inner,
            Some(Keyword::Left) => JoinType::Left,
            Some(Keyword::Right) => JoinType::Right,
            Some(Keyword::Cross) => JoinType::Cross,
            Some(Keyword::Join) => {
                self.cursor.advance();
                return Ok(JoinType::Inner);
            }
            _ => return Ok(JoinType::Inner),
        };
        self.cursor.advance();
        self.cursor.expect(TokenKind::Keyword(Keyword::Join))?;
        Ok(kind)
    }

    /// table := literal [AS literal]
    fn parse_table(&mut self) -> Result<Table, ParseError> {
        let table = Table::new(self.cursor.expect_literal()?);
        if self.cursor.eat_keyword(Keyword::As) {
            return Ok(table.alias(self.cursor.expect_literal()?));
        }
        Ok(table)
    }

    /// condition := group ((AND | OR) group)*
    fn parse_condition(&mut self) -> Result<OnExpression, ParseError> {
        let mut condition = self.parse_group()?;
        loop {
            if self.cursor.eat_keyword(Keyword::And) {
                condition = condition.and(self.parse_group()?);
            } else if self.cursor.eat_keyword(Keyword::Or) {
                condition = condition.or(self.parse_group()?);
            } else {
                return Ok(condition);
            }
        }
    }

    /// group := "(" condition ")" | test
    fn parse_group(&mut self) -> Result<OnExpression, ParseError> {
        if !self.cursor.eat(TokenKind::LParen) {
            return self.parse_test().map(OnExpression::from);
        }
        self.cursor.open()?;
        let condition = self.parse_condition()?;
        self.cursor.close()?;
        Ok(condition)
    }

    /// test := literal "=" literal
    fn parse_test(&mut self) -> Result<OnClause, ParseError> {
        self.cursor.term()?;
        let left = self.cursor.expect_literal()?;
        self.cursor.expect(TokenKind::Equals)?;
        let right = self.cursor.expect_literal()?;
        Ok(OnClause::new(left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{InfixOn, LogicalOperator};

    fn on(left: &str, right: &str) -> OnExpression {
        OnClause::new(left, right).into()
    }

    #[test]
    fn test_left_join() {
        let join = parse_join("LEFT JOIN project ON user.id = project.user_id").unwrap();
        assert_eq!(join.kind, JoinType::Left);
        assert_eq!(join.table.name, "project");
        assert_eq!(join.condition, Some(on("user.id", "project.user_id")));
    }

    #[test]
    fn test_join_types() {
        for (text, kind) in [
            ("INNER JOIN t ON a = b", JoinType::Inner),
            ("left join t on a = b", JoinType::Left),
            ("RIGHT JOIN t ON a = b", JoinType::Right),
            ("JOIN t ON a = b", JoinType::Inner),
            ("t ON a = b", JoinType::Inner),
        ] {
            assert_eq!(parse_join(text).unwrap().kind, kind, "{text}");
        }
    }

    #[test]
    fn test_bare_condition() {
        let join = parse_join("a.id = b.a_id").unwrap();
        assert!(join.table.is_empty());
        assert_eq!(join.condition, Some(on("a.id", "b.a_id")));
        assert!(parse_join("ON a.id = b.a_id").unwrap().table.is_empty());
    }

    #[test]
    fn test_table_alias() {
        let join = parse_join("INNER JOIN project AS p ON u.id = p.user_id").unwrap();
        assert_eq!(join.table, Table::new("project").alias("p"));
        assert_eq!(join.to_raw(), "INNER JOIN project AS p ON u.id = p.user_id");
    }

    #[test]
    fn test_cross_join() {
        let join = parse_join("CROSS JOIN colors").unwrap();
        assert_eq!(join, Join::cross("colors"));
        let err = parse_join("CROSS JOIN colors ON a = b").unwrap_err();
        assert!(err.is(ParseErrorKind::InvalidJoinCondition));
    }

    #[test]
    fn test_fold_in_source_order() {
        let join = parse_join("JOIN t ON a = b OR c = d AND e = f").unwrap();
        let expected = on("a", "b").or(on("c", "d")).and(on("e", "f"));
        assert_eq!(join.condition, Some(expected));
    }

    #[test]
    fn test_parenthesized_groups() {
        let join = parse_join("LEFT JOIN t ON (a = b AND (c = d OR e = f))").unwrap();
        let expected = OnExpression::Infix(InfixOn::new(
            on("a", "b"),
            LogicalOperator::And,
            on("c", "d").or(on("e", "f")),
        ));
        assert_eq!(join.condition, Some(expected));
        assert_eq!(
            join.to_raw(),
            "LEFT JOIN t ON (a = b AND (c = d OR e = f))"
        );
    }

    #[test]
    fn test_invalid_right_operand() {
        let err = parse_join("INNER JOIN account ON (project.account_id = *)").unwrap_err();
        assert!(err.is(ParseErrorKind::InvalidJoinCondition));
        assert_eq!(err.query, "INNER JOIN account ON (project.account_id = *)");
    }

    #[test]
    fn test_unbalanced_parentheses() {
        for text in [
            "JOIN t ON (a = b",
            "JOIN t ON a = b)",
            "JOIN t ON ((a = b)",
            "JOIN t ON (a = b))",
        ] {
            let err = parse_join(text).unwrap_err();
            assert!(err.is(ParseErrorKind::InvalidJoinCondition), "{text}");
        }
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let err = parse_join(&format!("JOIN t ON {}", "(".repeat(10_000))).unwrap_err();
        assert!(err.is(ParseErrorKind::InvalidJoinCondition));
        assert_eq!(err.message, "nesting too deep");

        let nested = format!("JOIN t ON {}a = b{}", "(".repeat(100), ")".repeat(100));
        assert!(parse_join(&nested).is_ok());
    }

    #[test]
    fn test_long_chain_is_rejected() {
        let chain = format!("JOIN t ON a = b{}", " AND a = b".repeat(200_000));
        let err = parse_join(&chain).unwrap_err();
        assert!(err.is(ParseErrorKind::InvalidJoinCondition));
        assert_eq!(err.message, "too many conditions");

        let chain = format!("JOIN t ON a = b{}", " OR a = b".repeat(100));
        assert!(parse_join(&chain).is_ok());
    }

    #[test]
    fn test_malformed() {
        for text in [
            "",
            "LEFT project ON a = b",
            "JOIN t ON",
            "JOIN t ON a",
            "JOIN t ON a = b AND",
            "JOIN t ON a != b",
            "JOIN t AS ON a = b",
        ] {
            assert!(parse_join(text).is_err(), "{text}");
        }
    }
}
