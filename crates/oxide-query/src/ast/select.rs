//! SELECT statements.

use super::{
    Aggregate, Column, Comment, FromClause, GroupBy, Having, Join, Limit, Offset, Order, OrderBy,
    Prefix, Raw, Statement, Suffix, Where, With, write_clause, write_list,
};
use crate::contract;
use crate::render::Context;

/// A node usable in the select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectExpression {
    /// A column, optionally aliased.
    Column(Column),
    /// A verbatim fragment, e.g. `*` or `NOW()`.
    Raw(Raw),
    /// An aggregate call.
    Aggregate(Aggregate),
}

impl Statement for SelectExpression {
    fn is_empty(&self) -> bool {
        match self {
            Self::Column(e) => e.is_empty(),
            Self::Raw(e) => e.is_empty(),
            Self::Aggregate(e) => e.is_empty(),
        }
    }

    fn write(&self, ctx: &mut dyn Context) {
        match self {
            Self::Column(e) => e.write(ctx),
            Self::Raw(e) => e.write(ctx),
            Self::Aggregate(e) => e.write(ctx),
        }
    }
}

impl From<Column> for SelectExpression {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

impl From<Raw> for SelectExpression {
    fn from(raw: Raw) -> Self {
        Self::Raw(raw)
    }
}

impl From<Aggregate> for SelectExpression {
    fn from(aggregate: Aggregate) -> Self {
        Self::Aggregate(aggregate)
    }
}

impl From<&str> for SelectExpression {
    fn from(name: &str) -> Self {
        Self::Column(Column::new(name))
    }
}

impl From<String> for SelectExpression {
    fn from(name: String) -> Self {
        Self::Column(Column::new(name))
    }
}

/// A SELECT statement.
///
/// Clauses render in SQL order:
///
/// ```text
/// [prefix] [WITH ..] SELECT [DISTINCT] exprs [FROM ..] [JOIN ..]* [WHERE ..]
/// [GROUP BY ..] [HAVING ..] [ORDER BY ..] [LIMIT n] [OFFSET n] [suffix] [/* comment */]
/// ```
///
/// The select list is mandatory: rendering a statement without one is a
/// contract violation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Select {
    pub with: With,
    pub prefix: Prefix,
    pub distinct: bool,
    pub expressions: Vec<SelectExpression>,
    pub from: FromClause,
    pub joins: Vec<Join>,
    pub where_clause: Where,
    pub group_by: GroupBy,
    pub having: Having,
    pub order_by: OrderBy,
    pub limit: Limit,
    pub offset: Offset,
    pub suffix: Suffix,
    pub comment: Comment,
}

impl Select {
    /// Creates a SELECT over the given select list.
    #[must_use]
    pub fn new<I, E>(expressions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<SelectExpression>,
    {
        Self {
            expressions: expressions.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Adds `DISTINCT`.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Sets the FROM clause.
    #[must_use]
    pub fn from(mut self, from: impl Into<FromClause>) -> Self {
        self.from = from.into();
        self
    }

    /// Appends a JOIN clause.
    #[must_use]
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// Sets the WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, where_clause: impl Into<Where>) -> Self {
        self.where_clause = where_clause.into();
        self
    }

    /// Sets the GROUP BY clause.
    #[must_use]
    pub fn group_by(mut self, columns: impl IntoIterator<Item = impl Into<Column>>) -> Self {
        self.group_by = GroupBy::new(columns);
        self
    }

    /// Sets the HAVING clause.
    #[must_use]
    pub fn having(mut self, having: impl Into<Having>) -> Self {
        self.having = having.into();
        self
    }

    /// Sets the ORDER BY clause.
    #[must_use]
    pub fn order_by(mut self, orders: impl IntoIterator<Item = Order>) -> Self {
        self.order_by = OrderBy::new(orders);
        self
    }

    /// Sets `LIMIT`.
    #[must_use]
    pub const fn limit(mut self, count: u64) -> Self {
        self.limit = Limit::new(count);
        self
    }

    /// Sets `OFFSET`.
    #[must_use]
    pub const fn offset(mut self, start: u64) -> Self {
        self.offset = Offset::new(start);
        self
    }

    /// Sets the WITH clause.
    #[must_use]
    pub fn with(mut self, with: With) -> Self {
        self.with = with;
        self
    }

    /// Sets the text written before the statement.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Prefix::new(prefix);
        self
    }

    /// Sets the text written after the last clause.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Suffix::new(suffix);
        self
    }

    /// Sets the trailing comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Comment::new(comment);
        self
    }
}

impl Statement for Select {
    fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        if self.is_empty() {
            contract::violation("select expressions must not be empty");
        }

        if !self.prefix.is_empty() {
            self.prefix.write(ctx);
            ctx.write(" ");
        }
        if !self.with.is_empty() {
            self.with.write(ctx);
            ctx.write(" ");
        }

        ctx.write(if self.distinct {
            "SELECT DISTINCT "
        } else {
            "SELECT "
        });
        write_list(ctx, &self.expressions, ", ");

        write_clause(ctx, &self.from);
        for join in self.joins.iter().filter(|j| **j != Join::default()) {
            ctx.write(" ");
            join.write(ctx);
        }
        write_clause(ctx, &self.where_clause);
        write_clause(ctx, &self.group_by);
        write_clause(ctx, &self.having);
        write_clause(ctx, &self.order_by);
        write_clause(ctx, &self.limit);
        write_clause(ctx, &self.offset);
        write_clause(ctx, &self.suffix);
        write_clause(ctx, &self.comment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Identifier, OnClause};

    #[test]
    fn test_simple_select() {
        let query = Select::new(["id", "name"]).from("users");
        assert_eq!(query.to_raw(), "SELECT id, name FROM users");
    }

    #[test]
    fn test_select_without_from() {
        assert_eq!(Select::new([Raw::new("1")]).to_raw(), "SELECT 1");
    }

    #[test]
    fn test_full_clause_order() {
        let query = Select::new([
            SelectExpression::from("u.id"),
            Aggregate::count("p.id").alias("projects").into(),
        ])
        .prefix("EXPLAIN")
        .distinct()
        .from(crate::ast::Table::new("users").alias("u"))
        .join(Join::left("project p", OnClause::new("u.id", "p.user_id")))
        .where_clause(Identifier::new("u.active").equal(true))
        .group_by(["u.id"])
        .having(Identifier::new("COUNT(p.id)").greater_than(2))
        .order_by([Column::new("u.id").asc()])
        .limit(10)
        .offset(20)
        .suffix("FOR UPDATE")
        .comment("listing");

        let (sql, args) = query.to_positional();
        assert_eq!(
            sql,
            "EXPLAIN SELECT DISTINCT u.id, COUNT(p.id) AS projects FROM users AS u \
             LEFT JOIN project p ON u.id = p.user_id WHERE (u.active = $1) GROUP BY u.id \
             HAVING (COUNT(p.id) > $2) ORDER BY u.id ASC LIMIT 10 OFFSET 20 FOR UPDATE \
             /* listing */"
        );
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_with_clause() {
        let query = Select::new(["id"])
            .from("recent")
            .with(With::new("recent", Select::new(["id"]).from("users").limit(5)));
        assert_eq!(
            query.to_raw(),
            "WITH recent AS (SELECT id FROM users LIMIT 5) SELECT id FROM recent"
        );
    }

    #[test]
    fn test_subquery_in_where() {
        let sub = Select::new(["user_id"]).from("banned");
        let query = Select::new(["id"])
            .from("users")
            .where_clause(Identifier::new("id").not_in_query(sub));
        assert_eq!(
            query.to_raw(),
            "SELECT id FROM users WHERE (id NOT IN (SELECT user_id FROM banned))"
        );
    }

    #[test]
    fn test_empty_select() {
        let query = Select::new(Vec::<Column>::new()).from("users");
        assert!(query.is_empty());
    }

    #[test]
    #[should_panic(expected = "contract violation: select expressions must not be empty")]
    fn test_empty_select_panics() {
        let _ = Select::default().from("users").to_raw();
    }

    #[test]
    #[should_panic(expected = "contract violation: join table must not be empty")]
    fn test_join_without_table_panics() {
        let join = Join {
            condition: Some(OnClause::new("a.id", "b.a_id").into()),
            ..Join::default()
        };
        let _ = Select::new(["a.id"]).from("a").join(join).to_raw();
    }

    #[test]
    #[should_panic(expected = "contract violation: join condition must not be empty")]
    fn test_join_without_condition_panics() {
        let join = Join {
            kind: crate::ast::JoinType::Left,
            table: crate::ast::Table::new("t"),
            condition: None,
        };
        let _ = Select::new(["a.id"]).from("a").join(join).to_raw();
    }

    #[test]
    fn test_empty_join_skipped() {
        let query = Select::new(["id"]).from("users").join(Join::default());
        assert_eq!(query.to_raw(), "SELECT id FROM users");
    }
}
