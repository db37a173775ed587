//! # oxide-query
//!
//! An SQL statement tree with three render modes, plus a small lexer and
//! recursive descent parsers for SQL fragments.
//!
//! This crate provides:
//! - An immutable statement tree (SELECT, INSERT, UPDATE, DELETE and their
//!   clauses) with a left-associative `and`/`or` composition algebra
//! - Rendering with inlined values, `:arg_N` named placeholders or `$N`
//!   positional placeholders, optionally through bounded context pools
//! - Parsers that turn join clauses, where/having conditions and SELECT
//!   prefixes back into tree nodes, and an analyzer that extracts the
//!   operation and target table of a statement
//!
//! ## Building and Rendering
//!
//! ```rust
//! use oxide_query::ast::{Identifier, Select, Statement, Where};
//! use oxide_query::value::SqlValue;
//!
//! let query = Select::new(["id", "email"])
//!     .from("users")
//!     .where_clause(
//!         Where::new(Identifier::new("active").equal(true))
//!             .and(Identifier::new("age").greater_than(18)),
//!     )
//!     .limit(10);
//!
//! let (sql, args) = query.to_positional();
//! assert_eq!(
//!     sql,
//!     "SELECT id, email FROM users WHERE ((active = $1) AND (age > $2)) LIMIT 10"
//! );
//! assert_eq!(args, vec![SqlValue::Bool(true), SqlValue::Int(18)]);
//!
//! let (sql, _) = query.to_named();
//! assert!(sql.contains("(active = :arg_1) AND (age > :arg_2)"));
//! ```
//!
//! ## Parsing Fragments
//!
//! ```rust
//! use oxide_query::ast::{JoinType, Select, Statement};
//! use oxide_query::parser::{analyze, parse_join, AnalyzeOptions, Operation};
//!
//! let join = parse_join("LEFT JOIN project ON user.id = project.user_id").unwrap();
//! assert_eq!(join.kind, JoinType::Left);
//!
//! let query = Select::new(["user.id"]).from("user").join(join);
//! assert_eq!(
//!     query.to_raw(),
//!     "SELECT user.id FROM user LEFT JOIN project ON user.id = project.user_id"
//! );
//!
//! let analysis = analyze("DELETE FROM sessions", AnalyzeOptions::all()).unwrap();
//! assert_eq!(analysis.operation, Some(Operation::Delete));
//! assert_eq!(analysis.table.as_deref(), Some("sessions"));
//! ```
//!
//! ## Construction Contracts
//!
//! Malformed *text* is always reported as a [`ParseError`]. A malformed
//! *tree*, such as a SELECT without a select list or `and` on an empty
//! WHERE, is a programming error and panics with a message starting with
//! `contract violation:`.

pub mod ast;
mod contract;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod value;

pub use ast::{Delete, Expression, Insert, Select, Statement, Update};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseError, ParseErrorKind};
pub use render::{RenderMode, Rendered, Renderer, render};
pub use value::{SqlValue, ToSqlValue};
