//! Statement and expression tree.
//!
//! Every node is an immutable value implementing [`Statement`]. Composition
//! methods (`and`, `or`, `alias`, `asc`, ...) return new values and never
//! mutate their receiver, so partially built trees can be cloned and reused.
//!
//! Position restrictions are encoded as separate closed enums:
//! [`Expression`] for value/boolean positions, [`SelectExpression`] for the
//! select list and [`OnExpression`] for join conditions.

mod aggregate;
mod clause;
mod delete;
mod expression;
mod insert;
mod join;
mod leaf;
mod operator;
mod select;
mod update;

pub use aggregate::{Aggregate, AggregateFunction};
pub use clause::{
    Comment, ConflictAction, FromClause, GroupBy, Having, IntoClause, Limit, Offset, OnConflict,
    Order, OrderBy, OrderDirection, Prefix, Returning, Set, Suffix, Using, Values, Where, With,
    WithQuery,
};
pub use delete::Delete;
pub use expression::{Array, Between, Exists, Expression, In, Infix, Wrapper};
pub use insert::{Insert, InsertSource};
pub use join::{InfixOn, Join, JoinType, OnClause, OnExpression};
pub use leaf::{Column, Identifier, Raw, Table, Value};
pub use operator::{ComparisonOperator, LogicalOperator, Operator};
pub use select::{Select, SelectExpression};
pub use update::Update;

use crate::render::{Context, NamedContext, PositionalContext, RawContext};
use crate::value::SqlValue;

/// A node of the statement tree.
pub trait Statement {
    /// Returns true when the node has nothing to render.
    ///
    /// Optional clauses are skipped when empty; mandatory clauses abort the
    /// render with a contract violation.
    fn is_empty(&self) -> bool;

    /// Writes the node into a render context.
    fn write(&self, ctx: &mut dyn Context);

    /// Renders with inlined values. Debug output only: not injection safe.
    fn to_raw(&self) -> String {
        let mut ctx = RawContext::new();
        self.write(&mut ctx);
        ctx.into_sql()
    }

    /// Renders with `:arg_N` placeholders.
    fn to_named(&self) -> (String, Vec<(String, SqlValue)>) {
        let mut ctx = NamedContext::new();
        self.write(&mut ctx);
        ctx.into_parts()
    }

    /// Renders with `$N` placeholders.
    fn to_positional(&self) -> (String, Vec<SqlValue>) {
        let mut ctx = PositionalContext::new();
        self.write(&mut ctx);
        ctx.into_parts()
    }
}

impl<T: Statement + ?Sized> Statement for Box<T> {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        (**self).write(ctx);
    }
}

/// Writes `items` separated by `sep`.
pub(crate) fn write_list<T: Statement>(ctx: &mut dyn Context, items: &[T], sep: &str) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            ctx.write(sep);
        }
        item.write(ctx);
    }
}

/// Writes ` <clause>` when the clause is not empty.
pub(crate) fn write_clause(ctx: &mut dyn Context, clause: &(impl Statement + ?Sized)) {
    if !clause.is_empty() {
        ctx.write(" ");
        clause.write(ctx);
    }
}
