//! Aggregate calls: COUNT, MAX, MIN and SUM.

use super::{Raw, Statement};
use crate::render::Context;

/// The aggregate function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Count,
    Max,
    Min,
    Sum,
}

impl AggregateFunction {
    /// Returns the SQL function name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Sum => "SUM",
        }
    }
}

/// An aggregate over a raw argument, e.g. `COUNT(DISTINCT id) AS total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    /// The function.
    pub function: AggregateFunction,
    /// The argument, written verbatim.
    pub value: Raw,
    /// Alias rendered as `AS <alias>`.
    pub alias: Option<String>,
    /// `DISTINCT` modifier; only ever set on COUNT.
    pub distinct: bool,
}

impl Aggregate {
    const fn new(function: AggregateFunction, value: Raw, distinct: bool) -> Self {
        Self {
            function,
            value,
            alias: None,
            distinct,
        }
    }

    /// `COUNT(value)`
    #[must_use]
    pub fn count(value: impl Into<String>) -> Self {
        Self::new(AggregateFunction::Count, Raw::new(value), false)
    }

    /// `COUNT(DISTINCT value)`
    #[must_use]
    pub fn count_distinct(value: impl Into<String>) -> Self {
        Self::new(AggregateFunction::Count, Raw::new(value), true)
    }

    /// `MAX(value)`
    #[must_use]
    pub fn max(value: impl Into<String>) -> Self {
        Self::new(AggregateFunction::Max, Raw::new(value), false)
    }

    /// `MIN(value)`
    #[must_use]
    pub fn min(value: impl Into<String>) -> Self {
        Self::new(AggregateFunction::Min, Raw::new(value), false)
    }

    /// `SUM(value)`
    #[must_use]
    pub fn sum(value: impl Into<String>) -> Self {
        Self::new(AggregateFunction::Sum, Raw::new(value), false)
    }

    /// Returns a copy with an alias.
    #[must_use]
    pub fn alias(&self, alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..self.clone()
        }
    }
}

impl Statement for Aggregate {
    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn write(&self, ctx: &mut dyn Context) {
        ctx.write(self.function.as_str());
        ctx.write("(");
        if self.distinct {
            ctx.write("DISTINCT ");
        }
        self.value.write(ctx);
        ctx.write(")");
        if let Some(alias) = self.alias.as_deref().filter(|a| !a.trim().is_empty()) {
            ctx.write(" AS ");
            ctx.write(alias);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count() {
        assert_eq!(Aggregate::count("*").to_raw(), "COUNT(*)");
        assert_eq!(
            Aggregate::count_distinct("user_id").alias("users").to_raw(),
            "COUNT(DISTINCT user_id) AS users"
        );
    }

    #[test]
    fn test_other_functions() {
        assert_eq!(Aggregate::max("price").to_raw(), "MAX(price)");
        assert_eq!(Aggregate::min("price").alias("low").to_raw(), "MIN(price) AS low");
        assert_eq!(Aggregate::sum("amount").to_raw(), "SUM(amount)");
    }

    #[test]
    fn test_empty_argument() {
        assert!(Aggregate::sum("").is_empty());
    }
}
