//! Leaf nodes: identifiers, columns, tables, raw fragments and values.

use super::{
    Array, Between, ComparisonOperator, Expression, In, Infix, Order, OrderDirection, Select,
    Statement,
};
use crate::render::Context;
use crate::value::{SqlValue, ToSqlValue};

fn write_alias(ctx: &mut dyn Context, alias: Option<&str>) {
    if let Some(alias) = alias.filter(|a| !a.trim().is_empty()) {
        ctx.write(" AS ");
        ctx.write(alias);
    }
}

/// A column reference with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Column {
    /// Column name, possibly qualified (`user.id`).
    pub name: String,
    /// Alias rendered as `AS <alias>`.
    pub alias: Option<String>,
}

impl Column {
    /// Creates a column reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Returns a copy of this column with an alias.
    #[must_use]
    pub fn alias(&self, alias: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            alias: Some(alias.into()),
        }
    }

    /// Ascending order on this column.
    #[must_use]
    pub fn asc(&self) -> Order {
        Order::new(self.name.clone(), OrderDirection::Asc)
    }

    /// Descending order on this column.
    #[must_use]
    pub fn desc(&self) -> Order {
        Order::new(self.name.clone(), OrderDirection::Desc)
    }
}

impl Statement for Column {
    fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write(&self.name);
        write_alias(ctx, self.alias.as_deref());
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// A table reference with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Table name, possibly schema-qualified.
    pub name: String,
    /// Alias rendered as `AS <alias>`.
    pub alias: Option<String>,
}

impl Table {
    /// Creates a table reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Returns a copy of this table with an alias.
    #[must_use]
    pub fn alias(&self, alias: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            alias: Some(alias.into()),
        }
    }
}

impl Statement for Table {
    fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write(&self.name);
        write_alias(ctx, self.alias.as_deref());
    }
}

impl From<&str> for Table {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Table {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// A bare name used as the left operand of a comparison.
///
/// The comparison factories borrow the identifier and build a new node, so
/// the same identifier can back any number of conditions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identifier {
    /// The name, written verbatim.
    pub name: String,
}

impl Identifier {
    /// Creates an identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn compare(&self, op: ComparisonOperator, value: impl Into<Expression>) -> Expression {
        Infix::new(self.clone(), op, value).into()
    }

    /// `<id> = <value>`
    #[must_use]
    pub fn equal(&self, value: impl Into<Expression>) -> Expression {
        self.compare(ComparisonOperator::Equal, value)
    }

    /// `<id> != <value>`
    #[must_use]
    pub fn not_equal(&self, value: impl Into<Expression>) -> Expression {
        self.compare(ComparisonOperator::NotEqual, value)
    }

    /// `<id> IS <value>`
    #[must_use]
    pub fn is(&self, value: impl Into<Expression>) -> Expression {
        self.compare(ComparisonOperator::Is, value)
    }

    /// `<id> IS NOT <value>`
    #[must_use]
    pub fn is_not(&self, value: impl Into<Expression>) -> Expression {
        self.compare(ComparisonOperator::IsNot, value)
    }

    /// `<id> IS NULL`
    #[must_use]
    pub fn is_null(&self) -> Expression {
        self.is(SqlValue::Null)
    }

    /// `<id> IS NOT NULL`
    #[must_use]
    pub fn is_not_null(&self) -> Expression {
        self.is_not(SqlValue::Null)
    }

    /// `<id> > <value>`
    #[must_use]
    pub fn greater_than(&self, value: impl Into<Expression>) -> Expression {
        self.compare(ComparisonOperator::GreaterThan, value)
    }

    /// `<id> >= <value>`
    #[must_use]
    pub fn greater_than_or_equal(&self, value: impl Into<Expression>) -> Expression {
        self.compare(ComparisonOperator::GreaterThanOrEqual, value)
    }

    /// `<id> < <value>`
    #[must_use]
    pub fn less_than(&self, value: impl Into<Expression>) -> Expression {
        self.compare(ComparisonOperator::LessThan, value)
    }

    /// `<id> <= <value>`
    #[must_use]
    pub fn less_than_or_equal(&self, value: impl Into<Expression>) -> Expression {
        self.compare(ComparisonOperator::LessThanOrEqual, value)
    }

    /// `<id> LIKE <value>`
    #[must_use]
    pub fn like(&self, value: impl Into<Expression>) -> Expression {
        self.compare(ComparisonOperator::Like, value)
    }

    /// `<id> NOT LIKE <value>`
    #[must_use]
    pub fn not_like(&self, value: impl Into<Expression>) -> Expression {
        self.compare(ComparisonOperator::NotLike, value)
    }

    /// `<id> ILIKE <value>`
    #[must_use]
    pub fn ilike(&self, value: impl Into<Expression>) -> Expression {
        self.compare(ComparisonOperator::ILike, value)
    }

    /// `<id> NOT ILIKE <value>`
    #[must_use]
    pub fn not_ilike(&self, value: impl Into<Expression>) -> Expression {
        self.compare(ComparisonOperator::NotILike, value)
    }

    /// `<id> IN (<values>)`
    #[must_use]
    pub fn in_list<T: ToSqlValue>(&self, values: impl IntoIterator<Item = T>) -> Expression {
        In::new(self.clone(), ComparisonOperator::In, Array::from_values(values)).into()
    }

    /// `<id> NOT IN (<values>)`
    #[must_use]
    pub fn not_in_list<T: ToSqlValue>(&self, values: impl IntoIterator<Item = T>) -> Expression {
        In::new(self.clone(), ComparisonOperator::NotIn, Array::from_values(values)).into()
    }

    /// `<id> IN (<subquery>)`
    #[must_use]
    pub fn in_query(&self, query: Select) -> Expression {
        In::new(self.clone(), ComparisonOperator::In, query).into()
    }

    /// `<id> NOT IN (<subquery>)`
    #[must_use]
    pub fn not_in_query(&self, query: Select) -> Expression {
        In::new(self.clone(), ComparisonOperator::NotIn, query).into()
    }

    /// `<id> BETWEEN <from> AND <to>`
    #[must_use]
    pub fn between(&self, from: impl Into<Expression>, to: impl Into<Expression>) -> Expression {
        Between::new(self.clone(), ComparisonOperator::Between, from, to).into()
    }

    /// `<id> NOT BETWEEN <from> AND <to>`
    #[must_use]
    pub fn not_between(
        &self,
        from: impl Into<Expression>,
        to: impl Into<Expression>,
    ) -> Expression {
        Between::new(self.clone(), ComparisonOperator::NotBetween, from, to).into()
    }
}

impl Statement for Identifier {
    fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write(&self.name);
    }
}

/// Caller-trusted SQL written verbatim and never bound (e.g. `NOW()`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Raw {
    /// The SQL fragment.
    pub value: String,
}

impl Raw {
    /// Creates a raw fragment.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Statement for Raw {
    fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write(&self.value);
    }
}

/// A scalar bound through the context, or `NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    /// The scalar.
    pub value: SqlValue,
}

impl Value {
    /// Creates a value node.
    #[must_use]
    pub fn new(value: impl ToSqlValue) -> Self {
        Self {
            value: value.to_sql_value(),
        }
    }
}

impl Statement for Value {
    fn is_empty(&self) -> bool {
        false
    }

    fn write(&self, ctx: &mut dyn Context) {
        if self.value.is_null() {
            ctx.write("NULL");
        } else {
            ctx.bind(&self.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_alias() {
        let col = Column::new("id");
        let aliased = col.alias("user_id");
        assert_eq!(col.to_raw(), "id");
        assert_eq!(aliased.to_raw(), "id AS user_id");
        assert!(Column::new("  ").is_empty());
    }

    #[test]
    fn test_table_alias() {
        assert_eq!(Table::new("users").alias("u").to_raw(), "users AS u");
        assert!(Table::default().is_empty());
    }

    #[test]
    fn test_identifier_not_mutated() {
        let id = Identifier::new("age");
        let a = id.greater_than(18);
        let b = id.less_than_or_equal(65);
        assert_eq!(id.to_raw(), "age");
        assert_eq!(a.to_raw(), "(age > 18)");
        assert_eq!(b.to_raw(), "(age <= 65)");
    }

    #[test]
    fn test_identifier_comparisons() {
        let id = Identifier::new("name");
        assert_eq!(id.not_equal("x").to_named().0, "(name != :arg_1)");
        assert_eq!(id.like("a%").to_positional().0, "(name LIKE $1)");
        assert_eq!(id.not_like("a%").to_raw(), "(name NOT LIKE 'a%')");
        assert_eq!(id.ilike("a%").to_raw(), "(name ILIKE 'a%')");
        assert_eq!(id.not_ilike("a%").to_raw(), "(name NOT ILIKE 'a%')");
        assert_eq!(id.greater_than_or_equal(1).to_raw(), "(name >= 1)");
    }

    #[test]
    fn test_is_null() {
        let (sql, args) = Identifier::new("deleted_at").is_null().to_positional();
        assert_eq!(sql, "(deleted_at IS NULL)");
        assert!(args.is_empty());
        assert_eq!(
            Identifier::new("deleted_at").is_not_null().to_raw(),
            "(deleted_at IS NOT NULL)"
        );
        assert_eq!(Identifier::new("ok").is(true).to_raw(), "(ok IS true)");
    }

    #[test]
    fn test_raw_never_bound() {
        let (sql, args) = Identifier::new("created_at")
            .less_than(Raw::new("NOW()"))
            .to_positional();
        assert_eq!(sql, "(created_at < NOW())");
        assert!(args.is_empty());
    }

    #[test]
    fn test_value_binding() {
        let (sql, args) = Value::new(42).to_positional();
        assert_eq!(sql, "$1");
        assert_eq!(args, vec![SqlValue::Int(42)]);
    }
}
