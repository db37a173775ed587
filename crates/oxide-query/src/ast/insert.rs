//! INSERT statements.

use super::{
    Array, Column, Comment, IntoClause, OnConflict, Prefix, Returning, Select, Statement, Suffix,
    Values, With, write_clause,
};
use crate::contract;
use crate::render::Context;

/// Rows to insert: literal values or the result of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// `VALUES (..), (..)`.
    Values(Values),
    /// `SELECT ...`.
    Query(Box<Select>),
}

impl Statement for InsertSource {
    fn is_empty(&self) -> bool {
        match self {
            Self::Values(v) => v.is_empty(),
            Self::Query(q) => q.is_empty(),
        }
    }

    fn write(&self, ctx: &mut dyn Context) {
        match self {
            Self::Values(v) => v.write(ctx),
            Self::Query(q) => q.write(ctx),
        }
    }
}

impl Default for InsertSource {
    fn default() -> Self {
        Self::Values(Values::default())
    }
}

/// An INSERT statement:
///
/// ```text
/// [prefix] [WITH ..] INSERT INTO table [(cols)] [VALUES .. | SELECT ..]
/// [ON CONFLICT ..] [RETURNING ..] [suffix] [/* comment */]
/// ```
///
/// The INTO clause is mandatory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Insert {
    pub with: With,
    pub prefix: Prefix,
    pub into: IntoClause,
    pub columns: Vec<Column>,
    pub source: InsertSource,
    pub on_conflict: Option<OnConflict>,
    pub returning: Returning,
    pub suffix: Suffix,
    pub comment: Comment,
}

impl Insert {
    /// `INSERT INTO table`.
    #[must_use]
    pub fn new(table: impl Into<IntoClause>) -> Self {
        Self {
            into: table.into(),
            ..Self::default()
        }
    }

    /// Sets the column list.
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = impl Into<Column>>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a row of values, replacing a query source if one was set.
    #[must_use]
    pub fn values(mut self, row: impl Into<Array>) -> Self {
        self.source = match self.source {
            InsertSource::Values(values) if !values.is_empty() => {
                InsertSource::Values(values.row(row))
            }
            _ => InsertSource::Values(Values::new(row)),
        };
        self
    }

    /// Inserts the result of a query.
    #[must_use]
    pub fn query(mut self, query: Select) -> Self {
        self.source = InsertSource::Query(Box::new(query));
        self
    }

    /// Sets the ON CONFLICT clause.
    #[must_use]
    pub fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = Some(on_conflict);
        self
    }

    /// Sets the RETURNING clause.
    #[must_use]
    pub fn returning(mut self, columns: impl IntoIterator<Item = impl Into<Column>>) -> Self {
        self.returning = Returning::new(columns);
        self
    }

    #[must_use]
    pub fn with(mut self, with: With) -> Self {
        self.with = with;
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Prefix::new(prefix);
        self
    }

    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Suffix::new(suffix);
        self
    }

    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Comment::new(comment);
        self
    }
}

impl Statement for Insert {
    fn is_empty(&self) -> bool {
        self.into.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        contract::require(&self.into, "insert into clause");

        if !self.prefix.is_empty() {
            self.prefix.write(ctx);
            ctx.write(" ");
        }
        if !self.with.is_empty() {
            self.with.write(ctx);
            ctx.write(" ");
        }

        ctx.write("INSERT ");
        self.into.write(ctx);
        if !self.columns.is_empty() {
            ctx.write(" (");
            for (i, column) in self.columns.iter().enumerate() {
                if i > 0 {
                    ctx.write(", ");
                }
                ctx.write(&column.name);
            }
            ctx.write(")");
        }
        write_clause(ctx, &self.source);
        if let Some(on_conflict) = &self.on_conflict {
            write_clause(ctx, on_conflict);
        }
        write_clause(ctx, &self.returning);
        write_clause(ctx, &self.suffix);
        write_clause(ctx, &self.comment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Raw, Set};
    use crate::value::SqlValue;

    #[test]
    fn test_insert_values() {
        let insert = Insert::new("users")
            .columns(["email", "enabled"])
            .values(Array::from_values(["a@example.com"]).push(true));
        let (sql, args) = insert.to_named();
        assert_eq!(
            sql,
            "INSERT INTO users (email, enabled) VALUES (:arg_1, :arg_2)"
        );
        assert_eq!(args[0].1, SqlValue::Text(String::from("a@example.com")));
    }

    #[test]
    fn test_insert_multiple_rows() {
        let insert = Insert::new("tags")
            .columns(["name"])
            .values(Array::from_values(["a"]))
            .values(Array::from_values(["b"]));
        assert_eq!(
            insert.to_positional().0,
            "INSERT INTO tags (name) VALUES ($1), ($2)"
        );
    }

    #[test]
    fn test_insert_query_and_returning() {
        let insert = Insert::new("archive")
            .columns(["id"])
            .query(Select::new(["id"]).from("users"))
            .returning(["id"]);
        assert_eq!(
            insert.to_raw(),
            "INSERT INTO archive (id) SELECT id FROM users RETURNING id"
        );
    }

    #[test]
    fn test_insert_on_conflict() {
        let insert = Insert::new("users")
            .columns(["email", "name"])
            .values(Array::from_values(["a@example.com", "A"]))
            .on_conflict(OnConflict::do_update(
                ["email"],
                Set::new().pair("name", Raw::new("EXCLUDED.name")),
            ));
        assert_eq!(
            insert.to_positional().0,
            "INSERT INTO users (email, name) VALUES ($1, $2) \
             ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name"
        );
    }

    #[test]
    fn test_insert_default_values_row() {
        let insert = Insert::new("events").values(Array::new([Raw::new("DEFAULT")]));
        assert_eq!(insert.to_raw(), "INSERT INTO events VALUES (DEFAULT)");
    }

    #[test]
    #[should_panic(expected = "contract violation: insert into clause must not be empty")]
    fn test_insert_without_table_panics() {
        let _ = Insert::default().to_raw();
    }
}
