//! JOIN clauses and their ON conditions.

use super::{Column, LogicalOperator, Statement, Table};
use crate::contract;
use crate::render::Context;

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinType {
    /// INNER JOIN.
    #[default]
    Inner,
    /// LEFT JOIN.
    Left,
    /// RIGHT JOIN.
    Right,
    /// CROSS JOIN.
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// A join-condition leaf: `left = right`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OnClause {
    /// Left column.
    pub left: Column,
    /// Right column.
    pub right: Column,
}

impl OnClause {
    /// Creates an ON leaf comparing two columns.
    #[must_use]
    pub fn new(left: impl Into<Column>, right: impl Into<Column>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Combines with AND, nesting to the left.
    #[must_use]
    pub fn and(self, other: impl Into<OnExpression>) -> OnExpression {
        OnExpression::from(self).and(other)
    }

    /// Combines with OR, nesting to the left.
    #[must_use]
    pub fn or(self, other: impl Into<OnExpression>) -> OnExpression {
        OnExpression::from(self).or(other)
    }
}

impl Statement for OnClause {
    fn is_empty(&self) -> bool {
        self.left.is_empty() || self.right.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        self.left.write(ctx);
        ctx.write(" = ");
        self.right.write(ctx);
    }
}

/// A binary join condition: `(left op right)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfixOn {
    /// Left operand.
    pub left: Box<OnExpression>,
    /// AND / OR.
    pub operator: LogicalOperator,
    /// Right operand.
    pub right: Box<OnExpression>,
}

impl InfixOn {
    /// Creates a binary join condition.
    #[must_use]
    pub fn new(
        left: impl Into<OnExpression>,
        operator: LogicalOperator,
        right: impl Into<OnExpression>,
    ) -> Self {
        Self {
            left: Box::new(left.into()),
            operator,
            right: Box::new(right.into()),
        }
    }
}

impl Statement for InfixOn {
    fn is_empty(&self) -> bool {
        self.left.is_empty() || self.operator.is_empty() || self.right.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write("(");
        self.left.write(ctx);
        ctx.write(" ");
        self.operator.write(ctx);
        ctx.write(" ");
        self.right.write(ctx);
        ctx.write(")");
    }
}

/// A node usable as a join condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnExpression {
    /// `left = right`.
    On(OnClause),
    /// `(left AND|OR right)`.
    Infix(InfixOn),
}

impl OnExpression {
    /// Combines with AND; the receiver becomes the left operand.
    #[must_use]
    pub fn and(self, other: impl Into<Self>) -> Self {
        Self::Infix(InfixOn::new(self, LogicalOperator::And, other))
    }

    /// Combines with OR; the receiver becomes the left operand.
    #[must_use]
    pub fn or(self, other: impl Into<Self>) -> Self {
        Self::Infix(InfixOn::new(self, LogicalOperator::Or, other))
    }
}

impl Statement for OnExpression {
    fn is_empty(&self) -> bool {
        match self {
            Self::On(e) => e.is_empty(),
            Self::Infix(e) => e.is_empty(),
        }
    }

    fn write(&self, ctx: &mut dyn Context) {
        match self {
            Self::On(e) => e.write(ctx),
            Self::Infix(e) => e.write(ctx),
        }
    }
}

impl From<OnClause> for OnExpression {
    fn from(on: OnClause) -> Self {
        Self::On(on)
    }
}

impl From<InfixOn> for OnExpression {
    fn from(infix: InfixOn) -> Self {
        Self::Infix(infix)
    }
}

/// A JOIN clause: `<type> <table> ON <condition>`.
///
/// `CROSS JOIN` carries no condition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Join {
    /// The join type.
    pub kind: JoinType,
    /// The joined table; empty when a parsed fragment had no table.
    pub table: Table,
    /// The join condition.
    pub condition: Option<OnExpression>,
}

impl Join {
    /// Creates a join of the given type.
    #[must_use]
    pub fn new(kind: JoinType, table: impl Into<Table>, condition: impl Into<OnExpression>) -> Self {
        Self {
            kind,
            table: table.into(),
            condition: Some(condition.into()),
        }
    }

    /// `INNER JOIN table ON condition`.
    #[must_use]
    pub fn inner(table: impl Into<Table>, condition: impl Into<OnExpression>) -> Self {
        Self::new(JoinType::Inner, table, condition)
    }

    /// `LEFT JOIN table ON condition`.
    #[must_use]
    pub fn left(table: impl Into<Table>, condition: impl Into<OnExpression>) -> Self {
        Self::new(JoinType::Left, table, condition)
    }

    /// `RIGHT JOIN table ON condition`.
    #[must_use]
    pub fn right(table: impl Into<Table>, condition: impl Into<OnExpression>) -> Self {
        Self::new(JoinType::Right, table, condition)
    }

    /// `CROSS JOIN table`.
    #[must_use]
    pub fn cross(table: impl Into<Table>) -> Self {
        Self {
            kind: JoinType::Cross,
            table: table.into(),
            condition: None,
        }
    }

    /// Returns a copy joined against `table`.
    #[must_use]
    pub fn with_table(&self, table: impl Into<Table>) -> Self {
        Self {
            table: table.into(),
            ..self.clone()
        }
    }
}

impl Statement for Join {
    fn is_empty(&self) -> bool {
        if self.table.is_empty() {
            return true;
        }
        match (&self.kind, &self.condition) {
            (JoinType::Cross, _) => false,
            (_, Some(condition)) => condition.is_empty(),
            (_, None) => true,
        }
    }

    fn write(&self, ctx: &mut dyn Context) {
        contract::require(&self.table, "join table");
        ctx.write(self.kind.as_str());
        ctx.write(" ");
        self.table.write(ctx);
        if self.kind == JoinType::Cross {
            return;
        }
        match &self.condition {
            Some(condition) if !condition.is_empty() => {
                ctx.write(" ON ");
                condition.write(ctx);
            }
            _ => contract::violation("join condition must not be empty"),
        }
    }
}
