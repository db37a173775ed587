//! Single-pass statement analyzer.
//!
//! Finds the operation of a complete statement and the table it targets
//! without building a tree:
//!
//! ```text
//! INSERT INTO <table> ...
//! UPDATE [ONLY] <table> ...
//! SELECT ... FROM [ONLY] <table> ...
//! DELETE FROM [ONLY] <table> ...
//! ```
//!
//! Statements starting with `WITH` are not supported.

use core::fmt;

use serde::Serialize;
use tracing::debug;

use super::{Cursor, ParseError, ParseErrorKind};
use crate::lexer::{Keyword, TokenKind};

/// What [`analyze`] should look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AnalyzeOptions {
    /// Find the operation.
    pub operation: bool,
    /// Find the target table.
    pub table: bool,
}

impl AnalyzeOptions {
    /// Looks for everything.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            operation: true,
            table: true,
        }
    }
}

/// The operation of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

impl Operation {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    const fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Select => Some(Self::Select),
            Keyword::Insert => Some(Self::Insert),
            Keyword::Update => Some(Self::Update),
            Keyword::Delete => Some(Self::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of [`analyze`]. Fields that were not requested stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Analysis {
    pub operation: Option<Operation>,
    pub table: Option<String>,
}

/// Extracts the operation and/or target table of a statement.
///
/// Scanning stops as soon as every requested field is known.
///
/// # Errors
///
/// Returns a [`ParseErrorKind::InvalidQuery`] error carrying the query text
/// when no operation is found, when the table is not where the operation
/// puts it, or when the statement starts with `WITH`.
pub fn analyze(query: &str, options: AnalyzeOptions) -> Result<Analysis, ParseError> {
    let result = Analyzer::new(query).run(options);
    match &result {
        Ok(analysis) => debug!(
            query = %query,
            operation = ?analysis.operation,
            table = ?analysis.table,
            "analyzed query"
        ),
        Err(err) => debug!(query = %query, error = %err, "invalid query"),
    }
    result
}

struct Analyzer<'q> {
    cursor: Cursor<'q>,
}

impl<'q> Analyzer<'q> {
    fn new(query: &'q str) -> Self {
        Self {
            cursor: Cursor::new(query, ParseErrorKind::InvalidQuery),
        }
    }

    fn run(mut self, options: AnalyzeOptions) -> Result<Analysis, ParseError> {
        let mut analysis = Analysis::default();
        if !options.operation && !options.table {
            return Ok(analysis);
        }

        if self.cursor.is(TokenKind::Literal)
            && self.cursor.current().value.eq_ignore_ascii_case("WITH")
        {
            return Err(self.cursor.error("WITH statements are not supported"));
        }

        let operation = self.find_operation()?;
        if options.operation {
            analysis.operation = Some(operation);
        }
        if options.table {
            analysis.table = Some(self.find_table(operation)?);
        }
        Ok(analysis)
    }

    /// Skips tokens up to and including the first operation keyword.
    fn find_operation(&mut self) -> Result<Operation, ParseError> {
        while !self.cursor.at_end() {
            let token = self.cursor.advance();
            if let Some(operation) = token.as_keyword().and_then(Operation::from_keyword) {
                return Ok(operation);
            }
        }
        Err(self.cursor.error("no SELECT, INSERT, UPDATE or DELETE found"))
    }

    fn find_table(&mut self, operation: Operation) -> Result<String, ParseError> {
        match operation {
            Operation::Insert => {
                self.cursor.expect(TokenKind::Keyword(Keyword::Into))?;
            }
            Operation::Update => {
                self.cursor.eat_keyword(Keyword::Only);
            }
            Operation::Select | Operation::Delete => {
                self.skip_to_from()?;
                self.cursor.eat_keyword(Keyword::Only);
            }
        }
        self.cursor.expect_literal()
    }

    /// Skips tokens up to and including the first FROM outside parentheses.
    fn skip_to_from(&mut self) -> Result<(), ParseError> {
        let mut depth = 0_usize;
        while !self.cursor.at_end() {
            let token = self.cursor.advance();
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth = depth.saturating_sub(1),
                TokenKind::Keyword(Keyword::From) if depth == 0 => return Ok(()),
                _ => {}
            }
        }
        Err(self.cursor.unexpected("FROM"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(query: &str) -> Analysis {
        analyze(query, AnalyzeOptions::all()).unwrap()
    }

    #[test]
    fn test_insert() {
        let analysis = all("INSERT INTO table (email) VALUES ('x')");
        assert_eq!(analysis.operation, Some(Operation::Insert));
        assert_eq!(analysis.table.as_deref(), Some("table"));
    }

    #[test]
    fn test_update() {
        assert_eq!(all("UPDATE users SET a = 1").table.as_deref(), Some("users"));
        assert_eq!(
            all("update only users set a = 1").table.as_deref(),
            Some("users")
        );
    }

    #[test]
    fn test_select_and_delete() {
        let analysis = all("SELECT id, (SELECT 1 FROM b) FROM ONLY public.users WHERE id = 1");
        assert_eq!(analysis.operation, Some(Operation::Select));
        assert_eq!(analysis.table.as_deref(), Some("public.users"));

        let analysis = all("DELETE FROM sessions WHERE expired = true");
        assert_eq!(analysis.operation, Some(Operation::Delete));
        assert_eq!(analysis.table.as_deref(), Some("sessions"));
    }

    #[test]
    fn test_operation_only_stops_early() {
        let options = AnalyzeOptions {
            operation: true,
            table: false,
        };
        let analysis = analyze("SELECT * FROM (", options).unwrap();
        assert_eq!(analysis.operation, Some(Operation::Select));
        assert_eq!(analysis.table, None);
    }

    #[test]
    fn test_table_only() {
        let options = AnalyzeOptions {
            operation: false,
            table: true,
        };
        let analysis = analyze("INSERT INTO logs VALUES (1)", options).unwrap();
        assert_eq!(analysis.operation, None);
        assert_eq!(analysis.table.as_deref(), Some("logs"));
    }

    #[test]
    fn test_nothing_requested() {
        let analysis = analyze("not sql at all", AnalyzeOptions::default()).unwrap();
        assert_eq!(analysis, Analysis::default());
    }

    #[test]
    fn test_errors_carry_query() {
        for text in [
            "",
            "TRUNCATE users",
            "INSERT users VALUES (1)",
            "SELECT 1",
            "DELETE FROM",
            "UPDATE SET a = 1",
            "WITH a AS (SELECT 1 FROM b) SELECT * FROM a",
        ] {
            let err = analyze(text, AnalyzeOptions::all()).unwrap_err();
            assert!(err.is(ParseErrorKind::InvalidQuery), "{text}");
            assert_eq!(err.query, text);
        }
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&all("UPDATE users SET a = 1")).unwrap();
        assert_eq!(json, r#"{"operation":"UPDATE","table":"users"}"#);
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }
}
