//! UPDATE statements.

use super::{
    Column, Comment, Expression, FromClause, Prefix, Returning, Set, Statement, Suffix, Table,
    Where, With, write_clause,
};
use crate::contract;
use crate::render::Context;

/// An UPDATE statement:
///
/// ```text
/// [prefix] [WITH ..] UPDATE [ONLY] table SET .. [FROM ..] [WHERE ..]
/// [RETURNING ..] [suffix] [/* comment */]
/// ```
///
/// Both the table and the SET clause are mandatory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Update {
    pub with: With,
    pub prefix: Prefix,
    pub table: Table,
    pub only: bool,
    pub set: Set,
    pub from: FromClause,
    pub where_clause: Where,
    pub returning: Returning,
    pub suffix: Suffix,
    pub comment: Comment,
}

impl Update {
    /// `UPDATE table`.
    #[must_use]
    pub fn new(table: impl Into<Table>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Excludes inheriting tables.
    #[must_use]
    pub const fn only(mut self) -> Self {
        self.only = true;
        self
    }

    /// Replaces the SET clause.
    #[must_use]
    pub fn set(mut self, set: Set) -> Self {
        self.set = set;
        self
    }

    /// Appends `column = value` to the SET clause.
    #[must_use]
    pub fn pair(mut self, column: impl Into<Column>, value: impl Into<Expression>) -> Self {
        self.set = self.set.pair(column, value);
        self
    }

    #[must_use]
    pub fn from(mut self, from: impl Into<FromClause>) -> Self {
        self.from = from.into();
        self
    }

    #[must_use]
    pub fn where_clause(mut self, where_clause: impl Into<Where>) -> Self {
        self.where_clause = where_clause.into();
        self
    }

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

impl Statement for Update {
    fn is_empty(&self) -> bool {
        self.table.is_empty() || self.set.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        contract::require(&self.table, "update table");
        contract::require(&self.set, "update set clause");

        if !self.prefix.is_empty() {
            self.prefix.write(ctx);
            ctx.write(" ");
        }
        if !self.with.is_empty() {
            self.with.write(ctx);
            ctx.write(" ");
        }

        ctx.write(if self.only { "UPDATE ONLY " } else { "UPDATE " });
        self.table.write(ctx);
        ctx.write(" ");
        self.set.write(ctx);
        write_clause(ctx, &self.from);
        write_clause(ctx, &self.where_clause);
        write_clause(ctx, &self.returning);
        write_clause(ctx, &self.suffix);
        write_clause(ctx, &self.comment);
    }
}
