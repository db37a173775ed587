//! Expression nodes and the AND/OR composition algebra.

use super::{
    Aggregate, Column, ComparisonOperator, Identifier, LogicalOperator, Operator, Raw, Select,
    Statement, Value, write_list,
};
use crate::render::Context;
use crate::value::ToSqlValue;

/// A node usable in a value or boolean position.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A bare name.
    Identifier(Identifier),
    /// A column reference.
    Column(Column),
    /// A bound scalar.
    Value(Value),
    /// A verbatim fragment.
    Raw(Raw),
    /// A comma-separated list.
    Array(Array),
    /// `(left op right)`.
    Infix(Infix),
    /// `(id [NOT] BETWEEN a AND b)`.
    Between(Between),
    /// `(expr [NOT] IN (...))`.
    In(In),
    /// `[NOT] EXISTS (subquery)`.
    Exists(Exists),
    /// An aggregate call.
    Aggregate(Aggregate),
    /// A transparent grouping node.
    Wrapper(Wrapper),
    /// A parenthesized subquery.
    Select(Box<Select>),
}

impl Expression {
    /// Combines with AND. The whole receiver becomes the left operand, so
    /// repeated calls nest to the left: `((a AND b) AND c)`.
    #[must_use]
    pub fn and(self, other: impl Into<Self>) -> Self {
        Infix::new(self, LogicalOperator::And, other).into()
    }

    /// Combines with OR, nesting to the left like [`Expression::and`].
    #[must_use]
    pub fn or(self, other: impl Into<Self>) -> Self {
        Infix::new(self, LogicalOperator::Or, other).into()
    }
}

impl Statement for Expression {
    fn is_empty(&self) -> bool {
        match self {
            Self::Identifier(e) => e.is_empty(),
            Self::Column(e) => e.is_empty(),
            Self::Value(e) => e.is_empty(),
            Self::Raw(e) => e.is_empty(),
            Self::Array(e) => e.is_empty(),
            Self::Infix(e) => e.is_empty(),
            Self::Between(e) => e.is_empty(),
            Self::In(e) => e.is_empty(),
            Self::Exists(e) => e.is_empty(),
            Self::Aggregate(e) => e.is_empty(),
            Self::Wrapper(e) => e.is_empty(),
            Self::Select(e) => e.is_empty(),
        }
    }

    fn write(&self, ctx: &mut dyn Context) {
        match self {
            Self::Identifier(e) => e.write(ctx),
            Self::Column(e) => e.write(ctx),
            Self::Value(e) => e.write(ctx),
            Self::Raw(e) => e.write(ctx),
            Self::Array(e) => e.write(ctx),
            Self::Infix(e) => e.write(ctx),
            Self::Between(e) => e.write(ctx),
            Self::In(e) => e.write(ctx),
            Self::Exists(e) => e.write(ctx),
            Self::Aggregate(e) => e.write(ctx),
            Self::Wrapper(e) => e.write(ctx),
            Self::Select(e) => {
                ctx.write("(");
                e.write(ctx);
                ctx.write(")");
            }
        }
    }
}

impl<T: ToSqlValue> From<T> for Expression {
    fn from(value: T) -> Self {
        Self::Value(Value::new(value))
    }
}

macro_rules! impl_from_node {
    ($($variant:ident),*) => {
        $(impl From<$variant> for Expression {
            fn from(node: $variant) -> Self {
                Self::$variant(node)
            }
        })*
    };
}

impl_from_node!(
    Identifier, Column, Value, Raw, Array, Infix, Between, In, Exists, Aggregate, Wrapper
);

impl From<Select> for Expression {
    fn from(query: Select) -> Self {
        Self::Select(Box::new(query))
    }
}

/// A binary node: `(left op right)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    /// Left operand.
    pub left: Box<Expression>,
    /// Operator.
    pub operator: Operator,
    /// Right operand.
    pub right: Box<Expression>,
}

impl Infix {
    /// Creates an infix node.
    #[must_use]
    pub fn new(
        left: impl Into<Expression>,
        operator: impl Into<Operator>,
        right: impl Into<Expression>,
    ) -> Self {
        Self {
            left: Box::new(left.into()),
            operator: operator.into(),
            right: Box::new(right.into()),
        }
    }

    /// Combines with AND; see [`Expression::and`].
    #[must_use]
    pub fn and(self, other: impl Into<Expression>) -> Expression {
        Expression::from(self).and(other)
    }

    /// Combines with OR; see [`Expression::or`].
    #[must_use]
    pub fn or(self, other: impl Into<Expression>) -> Expression {
        Expression::from(self).or(other)
    }
}

impl Statement for Infix {
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

/// `(identifier [NOT] BETWEEN from AND to)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Between {
    /// Tested identifier.
    pub identifier: Identifier,
    /// `BETWEEN` or `NOT BETWEEN`.
    pub operator: ComparisonOperator,
    /// Lower bound.
    pub from: Box<Expression>,
    /// The `AND` joining the bounds.
    pub and: LogicalOperator,
    /// Upper bound.
    pub to: Box<Expression>,
}

impl Between {
    /// Creates a BETWEEN node.
    #[must_use]
    pub fn new(
        identifier: Identifier,
        operator: ComparisonOperator,
        from: impl Into<Expression>,
        to: impl Into<Expression>,
    ) -> Self {
        Self {
            identifier,
            operator,
            from: Box::new(from.into()),
            and: LogicalOperator::And,
            to: Box::new(to.into()),
        }
    }
}

impl Statement for Between {
    fn is_empty(&self) -> bool {
        self.identifier.is_empty() || self.from.is_empty() || self.to.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write("(");
        self.identifier.write(ctx);
        ctx.write(" ");
        self.operator.write(ctx);
        ctx.write(" ");
        self.from.write(ctx);
        ctx.write(" ");
        self.and.write(ctx);
        ctx.write(" ");
        self.to.write(ctx);
        ctx.write(")");
    }
}

/// `(expression [NOT] IN (values))`.
///
/// The value is usually an [`Array`]; a subquery brings its own parentheses.
/// An empty array renders `IN ()` rather than dropping the condition.
#[derive(Debug, Clone, PartialEq)]
pub struct In {
    /// Tested expression.
    pub expression: Box<Expression>,
    /// `IN` or `NOT IN`.
    pub operator: ComparisonOperator,
    /// Candidate values.
    pub value: Box<Expression>,
}

impl In {
    /// Creates an IN node.
    #[must_use]
    pub fn new(
        expression: impl Into<Expression>,
        operator: ComparisonOperator,
        value: impl Into<Expression>,
    ) -> Self {
        Self {
            expression: Box::new(expression.into()),
            operator,
            value: Box::new(value.into()),
        }
    }

    /// Combines with AND; see [`Expression::and`].
    #[must_use]
    pub fn and(self, other: impl Into<Expression>) -> Expression {
        Expression::from(self).and(other)
    }

    /// Combines with OR; see [`Expression::or`].
    #[must_use]
    pub fn or(self, other: impl Into<Expression>) -> Expression {
        Expression::from(self).or(other)
    }
}

impl Statement for In {
    fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write("(");
        self.expression.write(ctx);
        ctx.write(" ");
        self.operator.write(ctx);
        ctx.write(" ");
        match self.value.as_ref() {
            Expression::Select(_) => self.value.write(ctx),
            value => {
                ctx.write("(");
                value.write(ctx);
                ctx.write(")");
            }
        }
        ctx.write(")");
    }
}

/// An ordered list of values or raw fragments, comma-joined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    /// The items.
    pub items: Vec<Expression>,
}

impl Array {
    /// Creates an array from expressions.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = impl Into<Expression>>) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an array of bound values.
    #[must_use]
    pub fn from_values<T: ToSqlValue>(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: values
                .into_iter()
                .map(|v| Expression::Value(Value::new(v)))
                .collect(),
        }
    }

    /// Returns a copy with `item` appended.
    #[must_use]
    pub fn push(&self, item: impl Into<Expression>) -> Self {
        let mut items = self.items.clone();
        items.push(item.into());
        Self { items }
    }
}

impl Statement for Array {
    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        write_list(ctx, &self.items, ", ");
    }
}

/// A transparent grouping node.
///
/// Where and Having wrap their initial condition in one, so a lone
/// condition renders as itself and later `and`/`or` calls nest around it.
#[derive(Debug, Clone, PartialEq)]
pub struct Wrapper {
    /// The wrapped expression.
    pub inner: Box<Expression>,
}

impl Wrapper {
    /// Wraps an expression.
    #[must_use]
    pub fn new(inner: impl Into<Expression>) -> Self {
        Self {
            inner: Box::new(inner.into()),
        }
    }
}

impl Statement for Wrapper {
    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        self.inner.write(ctx);
    }
}

/// `EXISTS (subquery)` or `NOT EXISTS (subquery)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Exists {
    /// The subquery.
    pub subquery: Box<Expression>,
    /// Whether this is NOT EXISTS.
    pub negated: bool,
}

impl Exists {
    /// `EXISTS (subquery)`.
    #[must_use]
    pub fn new(subquery: impl Into<Expression>) -> Self {
        Self {
            subquery: Box::new(subquery.into()),
            negated: false,
        }
    }

    /// `NOT EXISTS (subquery)`.
    #[must_use]
    pub fn not(subquery: impl Into<Expression>) -> Self {
        Self {
            subquery: Box::new(subquery.into()),
            negated: true,
        }
    }
}

impl Statement for Exists {
    fn is_empty(&self) -> bool {
        self.subquery.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write(if self.negated { "NOT EXISTS " } else { "EXISTS " });
        match self.subquery.as_ref() {
            Expression::Select(_) => self.subquery.write(ctx),
            subquery => {
                ctx.write("(");
                subquery.write(ctx);
                ctx.write(")");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlValue;

    fn id(name: &str) -> Identifier {
        Identifier::new(name)
    }

    #[test]
    fn test_left_associative_fold() {
        let expr = id("a")
            .equal(1)
            .and(id("b").equal(2))
            .and(id("c").equal(3));
        assert_eq!(expr.to_raw(), "(((a = 1) AND (b = 2)) AND (c = 3))");

        let Expression::Infix(outer) = &expr else {
            panic!("expected infix");
        };
        assert!(matches!(outer.left.as_ref(), Expression::Infix(_)));
        assert!(matches!(outer.right.as_ref(), Expression::Infix(i) if i.left.to_raw() == "c"));
    }

    #[test]
    fn test_mixed_and_or_keeps_call_order() {
        let expr = id("a").equal(1).or(id("b").equal(2)).and(id("c").equal(3));
        assert_eq!(expr.to_raw(), "(((a = 1) OR (b = 2)) AND (c = 3))");
    }

    #[test]
    fn test_infix_is_empty() {
        assert!(Infix::new(Identifier::default(), ComparisonOperator::Equal, 1).is_empty());
        assert!(Infix::new(id("a"), ComparisonOperator::Equal, Raw::new("")).is_empty());
        assert!(!Infix::new(id("a"), ComparisonOperator::Equal, 1).is_empty());
    }

    #[test]
    fn test_between() {
        let (sql, args) = id("count").between(1, 10).to_named();
        assert_eq!(sql, "(count BETWEEN :arg_1 AND :arg_2)");
        assert_eq!(args[1], (String::from("arg_2"), SqlValue::Int(10)));
        assert_eq!(
            id("count").not_between(1, 10).to_raw(),
            "(count NOT BETWEEN 1 AND 10)"
        );
    }

    #[test]
    fn test_in_list() {
        let (sql, args) = id("status").in_list(["active", "pending"]).to_positional();
        assert_eq!(sql, "(status IN ($1, $2))");
        assert_eq!(args.len(), 2);
        assert_eq!(
            id("id").not_in_list([1, 2, 3]).to_raw(),
            "(id NOT IN (1, 2, 3))"
        );
    }

    #[test]
    fn test_in_empty_list_still_renders() {
        let expr = id("id").in_list(Vec::<i64>::new());
        assert!(!expr.is_empty());
        assert_eq!(expr.to_raw(), "(id IN ())");
    }

    #[test]
    fn test_in_and_or() {
        let Expression::In(in_) = id("a").in_list([1]) else {
            panic!("expected IN");
        };
        assert_eq!(
            in_.or(id("b").equal(2)).to_raw(),
            "((a IN (1)) OR (b = 2))"
        );
    }

    #[test]
    fn test_array_with_raw() {
        let array = Array::from_values([1, 2]).push(Raw::new("DEFAULT"));
        assert_eq!(array.items.len(), 3);
        let (sql, args) = array.to_positional();
        assert_eq!(sql, "$1, $2, DEFAULT");
        assert_eq!(args.len(), 2);
        assert!(Array::default().is_empty());
        assert_eq!(Array::default().to_raw(), "");
    }

    #[test]
    fn test_wrapper_is_transparent() {
        let wrapped = Wrapper::new(id("a").equal(1));
        assert_eq!(wrapped.to_raw(), "(a = 1)");
        assert!(Wrapper::new(Raw::new("")).is_empty());
    }

    #[test]
    fn test_exists() {
        let sub = Select::new(["1"]).from("users");
        assert_eq!(
            Exists::new(sub.clone()).to_raw(),
            "EXISTS (SELECT 1 FROM users)"
        );
        assert_eq!(
            Exists::not(sub).to_raw(),
            "NOT EXISTS (SELECT 1 FROM users)"
        );
        assert_eq!(
            Exists::new(Raw::new("SELECT 1")).to_raw(),
            "EXISTS (SELECT 1)"
        );
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Expression::from(1), Expression::Value(Value::new(1)));
        assert_eq!(
            Expression::from(id("a")),
            Expression::Identifier(id("a"))
        );
    }
}
