//! Logical and comparison operators.

use super::Statement;
use crate::render::Context;

/// AND / OR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Comparison operators usable in an infix, IN or BETWEEN node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    Is,
    IsNot,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    NotIn,
    Like,
    NotLike,
    ILike,
    NotILike,
    Between,
    NotBetween,
}

impl ComparisonOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::ILike => "ILIKE",
            Self::NotILike => "NOT ILIKE",
            Self::Between => "BETWEEN",
            Self::NotBetween => "NOT BETWEEN",
        }
    }
}

/// Either kind of operator, as stored in an infix node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Logical(LogicalOperator),
    Comparison(ComparisonOperator),
}

impl Operator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Logical(op) => op.as_str(),
            Self::Comparison(op) => op.as_str(),
        }
    }
}

impl From<LogicalOperator> for Operator {
    fn from(op: LogicalOperator) -> Self {
        Self::Logical(op)
    }
}

impl From<ComparisonOperator> for Operator {
    fn from(op: ComparisonOperator) -> Self {
        Self::Comparison(op)
    }
}

// Operators are closed enums, so their text is never blank.
macro_rules! impl_operator_statement {
    ($($t:ty),*) => {
        $(impl Statement for $t {
            fn is_empty(&self) -> bool {
                self.as_str().is_empty()
            }

            fn write(&self, ctx: &mut dyn Context) {
                ctx.write(self.as_str());
            }
        })*
    };
}

impl_operator_statement!(LogicalOperator, ComparisonOperator, Operator);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_text() {
        assert_eq!(Operator::from(LogicalOperator::Or).to_raw(), "OR");
        assert_eq!(ComparisonOperator::IsNot.to_raw(), "IS NOT");
        assert_eq!(ComparisonOperator::NotILike.as_str(), "NOT ILIKE");
        assert!(!Operator::from(ComparisonOperator::Equal).is_empty());
    }
}
