//! Statement analysis.

mod common;
use common::*;

use oxide_query::parser::{Analysis, AnalyzeOptions, Operation, ParseErrorKind, analyze};

fn analyze_all(text: &str) -> Analysis {
    analyze(text, AnalyzeOptions::all())
        .unwrap_or_else(|e| panic!("Failed to analyze: {text}\nError: {e}"))
}

#[test]
fn insert_into_table() {
    let analysis = analyze_all("INSERT INTO table (email) VALUES ('x')");
    assert_eq!(analysis.operation, Some(Operation::Insert));
    assert_eq!(analysis.table.as_deref(), Some("table"));
}

#[test]
fn each_operation() {
    for (text, operation, table) in [
        ("SELECT * FROM users", Operation::Select, "users"),
        ("select count(id) from only public.users", Operation::Select, "public.users"),
        ("UPDATE ONLY accounts SET a = 1", Operation::Update, "accounts"),
        ("DELETE FROM sessions WHERE id = 1", Operation::Delete, "sessions"),
        ("insert into logs values (1)", Operation::Insert, "logs"),
    ] {
        let analysis = analyze_all(text);
        assert_eq!(analysis.operation, Some(operation), "{text}");
        assert_eq!(analysis.table.as_deref(), Some(table), "{text}");
    }
}

#[test]
fn multi_line_statement() {
    let analysis = analyze_all("SELECT id,\n       email\n  FROM users\n WHERE id = 1");
    assert_eq!(analysis.table.as_deref(), Some("users"));
}

#[test]
fn requested_fields_only() {
    let table_only = AnalyzeOptions {
        operation: false,
        table: true,
    };
    let analysis = analyze("UPDATE users SET a = 1", table_only).unwrap();
    assert_eq!(
        analysis,
        Analysis {
            operation: None,
            table: Some(String::from("users")),
        }
    );
}

#[test]
fn malformed_queries_are_recoverable() {
    for text in [
        "",
        "VACUUM",
        "INSERT users (id) VALUES (1)",
        "SELECT now()",
        "UPDATE SET a = 1",
        "WITH x AS (SELECT 1 FROM y) DELETE FROM x",
    ] {
        let err = analyze(text, AnalyzeOptions::all()).unwrap_err();
        assert_error(&err, ParseErrorKind::InvalidQuery, text);
    }
}
