//! Statement sub-clauses.
//!
//! Every clause is optional from the point of view of the statement that
//! holds it: an empty clause is simply skipped at render time. Statements
//! that need a clause check it themselves before writing.

use super::{
    Array, Column, Expression, LogicalOperator, Select, Statement, Table, Wrapper, write_list,
};
use crate::contract;
use crate::render::Context;

macro_rules! condition_clause {
    ($(#[$doc:meta])* $name:ident, $keyword:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            /// The condition; `None` for an empty clause.
            pub condition: Option<Expression>,
        }

        impl $name {
            /// Creates the clause, wrapping `condition` in a transparent group.
            #[must_use]
            pub fn new(condition: impl Into<Expression>) -> Self {
                Self {
                    condition: Some(Wrapper::new(condition).into()),
                }
            }

            fn combine(self, operator: LogicalOperator, other: impl Into<Expression>) -> Self {
                let Some(condition) = self.condition.filter(|c| !c.is_empty()) else {
                    contract::violation(concat!(
                        "cannot combine an empty ",
                        $keyword,
                        " clause"
                    ));
                };
                let other = other.into();
                if other.is_empty() {
                    contract::violation(concat!(
                        "cannot add an empty expression to a ",
                        $keyword,
                        " clause"
                    ));
                }
                let condition = match operator {
                    LogicalOperator::And => condition.and(other),
                    LogicalOperator::Or => condition.or(other),
                };
                Self {
                    condition: Some(condition),
                }
            }

            /// Returns `(current AND other)`.
            ///
            /// # Panics
            ///
            /// Panics with a contract violation if the clause or `other` is empty.
            #[must_use]
            pub fn and(self, other: impl Into<Expression>) -> Self {
                self.combine(LogicalOperator::And, other)
            }

            /// Returns `(current OR other)`.
            ///
            /// # Panics
            ///
            /// Panics with a contract violation if the clause or `other` is empty.
            #[must_use]
            pub fn or(self, other: impl Into<Expression>) -> Self {
                self.combine(LogicalOperator::Or, other)
            }
        }

        impl Statement for $name {
            fn is_empty(&self) -> bool {
                self.condition.as_ref().is_none_or(Statement::is_empty)
            }

            fn write(&self, ctx: &mut dyn Context) {
                if let Some(condition) = &self.condition {
                    ctx.write(concat!($keyword, " "));
                    condition.write(ctx);
                }
            }
        }

        impl From<Expression> for $name {
            fn from(condition: Expression) -> Self {
                Self::new(condition)
            }
        }
    };
}

condition_clause!(
    /// `WHERE <condition>`.
    Where,
    "WHERE"
);

condition_clause!(
    /// `HAVING <condition>`.
    Having,
    "HAVING"
);

/// `FROM [ONLY] <table>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FromClause {
    /// Source table.
    pub table: Table,
    /// Excludes inheriting tables.
    pub only: bool,
}

impl FromClause {
    /// `FROM table`.
    #[must_use]
    pub fn new(table: impl Into<Table>) -> Self {
        Self {
            table: table.into(),
            only: false,
        }
    }

    /// `FROM ONLY table`.
    #[must_use]
    pub fn only(table: impl Into<Table>) -> Self {
        Self {
            table: table.into(),
            only: true,
        }
    }
}

impl Statement for FromClause {
    fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write(if self.only { "FROM ONLY " } else { "FROM " });
        self.table.write(ctx);
    }
}

impl From<&str> for FromClause {
    fn from(table: &str) -> Self {
        Self::new(table)
    }
}

impl From<String> for FromClause {
    fn from(table: String) -> Self {
        Self::new(table)
    }
}

impl From<Table> for FromClause {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}

/// `INTO <table>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntoClause {
    /// Target table.
    pub table: Table,
}

impl IntoClause {
    #[must_use]
    pub fn new(table: impl Into<Table>) -> Self {
        Self {
            table: table.into(),
        }
    }
}

impl From<&str> for IntoClause {
    fn from(table: &str) -> Self {
        Self::new(table)
    }
}

impl From<Table> for IntoClause {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}

impl Statement for IntoClause {
    fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write("INTO ");
        self.table.write(ctx);
    }
}

/// `USING <table>, ...` for DELETE.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Using {
    pub tables: Vec<Table>,
}

impl Using {
    #[must_use]
    pub fn new(tables: impl IntoIterator<Item = impl Into<Table>>) -> Self {
        Self {
            tables: tables.into_iter().map(Into::into).collect(),
        }
    }
}

impl Statement for Using {
    fn is_empty(&self) -> bool {
        self.tables.iter().all(Statement::is_empty)
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write("USING ");
        write_list(ctx, &self.tables, ", ");
    }
}

/// `SET col = value, ...`.
///
/// Pairs keep insertion order; setting the same column twice writes it twice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Set {
    /// Column/value pairs in insertion order.
    pub pairs: Vec<(Column, Expression)>,
}

impl Set {
    /// Creates an empty SET clause.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `column = value` appended.
    #[must_use]
    pub fn pair(&self, column: impl Into<Column>, value: impl Into<Expression>) -> Self {
        let mut pairs = self.pairs.clone();
        pairs.push((column.into(), value.into()));
        Self { pairs }
    }
}

impl Statement for Set {
    fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write("SET ");
        for (i, (column, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                ctx.write(", ");
            }
            ctx.write(&column.name);
            ctx.write(" = ");
            value.write(ctx);
        }
    }
}

/// `VALUES (..), (..)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Values {
    pub rows: Vec<Array>,
}

impl Values {
    /// A single row.
    #[must_use]
    pub fn new(row: impl Into<Array>) -> Self {
        Self {
            rows: vec![row.into()],
        }
    }

    /// Returns a copy with another row appended.
    #[must_use]
    pub fn row(&self, row: impl Into<Array>) -> Self {
        let mut rows = self.rows.clone();
        rows.push(row.into());
        Self { rows }
    }
}

impl Statement for Values {
    fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write("VALUES ");
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                ctx.write(", ");
            }
            ctx.write("(");
            row.write(ctx);
            ctx.write(")");
        }
    }
}

/// `GROUP BY col, ...`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupBy {
    pub columns: Vec<Column>,
}

impl GroupBy {
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = impl Into<Column>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl Statement for GroupBy {
    fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write("GROUP BY ");
        write_list(ctx, &self.columns, ", ");
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One `ORDER BY` entry: `col ASC|DESC`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Order {
    pub column: Column,
    pub direction: OrderDirection,
}

impl Order {
    #[must_use]
    pub fn new(column: impl Into<Column>, direction: OrderDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

impl Statement for Order {
    fn is_empty(&self) -> bool {
        self.column.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write(&self.column.name);
        ctx.write(" ");
        ctx.write(self.direction.as_str());
    }
}

/// `ORDER BY col ASC, ...`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderBy {
    pub orders: Vec<Order>,
}

impl OrderBy {
    #[must_use]
    pub fn new(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            orders: orders.into_iter().collect(),
        }
    }
}

impl Statement for OrderBy {
    fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write("ORDER BY ");
        write_list(ctx, &self.orders, ", ");
    }
}

/// `LIMIT n`, written inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limit {
    pub count: Option<u64>,
}

impl Limit {
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self { count: Some(count) }
    }
}

impl Statement for Limit {
    fn is_empty(&self) -> bool {
        self.count.is_none()
    }

    fn write(&self, ctx: &mut dyn Context) {
        if let Some(count) = self.count {
            ctx.write(&format!("LIMIT {count}"));
        }
    }
}

/// `OFFSET n`, written inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub start: Option<u64>,
}

impl Offset {
    #[must_use]
    pub const fn new(start: u64) -> Self {
        Self { start: Some(start) }
    }
}

impl Statement for Offset {
    fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    fn write(&self, ctx: &mut dyn Context) {
        if let Some(start) = self.start {
            ctx.write(&format!("OFFSET {start}"));
        }
    }
}

/// `RETURNING col, ...`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Returning {
    pub columns: Vec<Column>,
}

impl Returning {
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = impl Into<Column>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl Statement for Returning {
    fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write("RETURNING ");
        write_list(ctx, &self.columns, ", ");
    }
}

/// One named query of a WITH clause: `name AS (query)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WithQuery {
    pub name: String,
    pub query: Select,
}

impl Statement for WithQuery {
    fn is_empty(&self) -> bool {
        self.name.trim().is_empty() || self.query.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write(&self.name);
        ctx.write(" AS (");
        self.query.write(ctx);
        ctx.write(")");
    }
}

/// `WITH a AS (...), b AS (...)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct With {
    pub queries: Vec<WithQuery>,
}

impl With {
    /// A WITH clause holding a single named query.
    #[must_use]
    pub fn new(name: impl Into<String>, query: Select) -> Self {
        Self::default().query(name, query)
    }

    /// Returns a copy with another named query appended.
    #[must_use]
    pub fn query(&self, name: impl Into<String>, query: Select) -> Self {
        let mut queries = self.queries.clone();
        queries.push(WithQuery {
            name: name.into(),
            query,
        });
        Self { queries }
    }
}

impl Statement for With {
    fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write("WITH ");
        write_list(ctx, &self.queries, ", ");
    }
}

macro_rules! text_clause {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name(pub String);

        impl $name {
            #[must_use]
            pub fn new(text: impl Into<String>) -> Self {
                Self(text.into())
            }
        }

        impl From<&str> for $name {
            fn from(text: &str) -> Self {
                Self::new(text)
            }
        }
    };
}

text_clause!(
    /// Text written before the statement, e.g. `EXPLAIN`.
    Prefix
);

text_clause!(
    /// Text written after the last clause, e.g. `FOR UPDATE`.
    Suffix
);

text_clause!(
    /// A trailing `/* comment */`.
    Comment
);

impl Statement for Prefix {
    fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write(self.0.trim());
    }
}

impl Statement for Suffix {
    fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write(self.0.trim());
    }
}

impl Statement for Comment {
    fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write("/* ");
        ctx.write(&self.0.trim().replace("*/", "* /"));
        ctx.write(" */");
    }
}

/// What to do when an INSERT hits a conflict.
#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    /// `DO NOTHING`.
    DoNothing,
    /// `DO UPDATE SET ...`.
    DoUpdate(Set),
}

/// `ON CONFLICT [(target)] DO ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct OnConflict {
    /// Conflict target columns; may be empty.
    pub target: Vec<Column>,
    pub action: ConflictAction,
}

impl OnConflict {
    /// `ON CONFLICT (target) DO NOTHING`.
    #[must_use]
    pub fn do_nothing(target: impl IntoIterator<Item = impl Into<Column>>) -> Self {
        Self {
            target: target.into_iter().map(Into::into).collect(),
            action: ConflictAction::DoNothing,
        }
    }

    /// `ON CONFLICT (target) DO UPDATE SET ...`.
    #[must_use]
    pub fn do_update(target: impl IntoIterator<Item = impl Into<Column>>, set: Set) -> Self {
        Self {
            target: target.into_iter().map(Into::into).collect(),
            action: ConflictAction::DoUpdate(set),
        }
    }
}

impl Statement for OnConflict {
    fn is_empty(&self) -> bool {
        false
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write("ON CONFLICT");
        if !self.target.is_empty() {
            ctx.write(" (");
            for (i, column) in self.target.iter().enumerate() {
                if i > 0 {
                    ctx.write(", ");
                }
                ctx.write(&column.name);
            }
            ctx.write(")");
        }
        match &self.action {
            ConflictAction::DoNothing => ctx.write(" DO NOTHING"),
            ConflictAction::DoUpdate(set) => {
                contract::require(set, "conflict update set");
                ctx.write(" DO UPDATE ");
                set.write(ctx);
            }
        }
    }
}
