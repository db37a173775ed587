//! DELETE statements.

use super::{
    Column, Comment, FromClause, Prefix, Returning, Statement, Suffix, Table, Using, Where, With,
    write_clause,
};
use crate::contract;
use crate::render::Context;

/// A DELETE statement:
///
/// ```text
/// [prefix] [WITH ..] DELETE FROM [ONLY] table [USING ..] [WHERE ..]
/// [RETURNING ..] [suffix] [/* comment */]
/// ```
///
/// The FROM clause is mandatory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Delete {
    pub with: With,
    pub prefix: Prefix,
    pub from: FromClause,
    pub using: Using,
    pub where_clause: Where,
    pub returning: Returning,
    pub suffix: Suffix,
    pub comment: Comment,
}

impl Delete {
    /// `DELETE FROM table`.
    #[must_use]
    pub fn new(from: impl Into<FromClause>) -> Self {
        Self {
            from: from.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn using(mut self, tables: impl IntoIterator<Item = impl Into<Table>>) -> Self {
        self.using = Using::new(tables);
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

impl Statement for Delete {
    fn is_empty(&self) -> bool {
        self.from.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        contract::require(&self.from, "delete from clause");

        if !self.prefix.is_empty() {
            self.prefix.write(ctx);
            ctx.write(" ");
        }
        if !self.with.is_empty() {
            self.with.write(ctx);
            ctx.write(" ");
        }

        ctx.write("DELETE ");
        self.from.write(ctx);
        write_clause(ctx, &self.using);
        write_clause(ctx, &self.where_clause);
        write_clause(ctx, &self.returning);
        write_clause(ctx, &self.suffix);
        write_clause(ctx, &self.comment);
    }
}
