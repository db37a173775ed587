//! Debug rendering with inlined values.

use super::{Context, Reusable};
use crate::value::SqlValue;

/// A context that inlines every bound value as a literal.
///
/// The output is not safe against injection: strings are quoted without
/// escaping. Use it for logs and debugging only.
#[derive(Debug, Clone, Default)]
pub struct RawContext {
    buf: String,
}

impl RawContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: String::new() }
    }

    /// The SQL written so far.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.buf
    }

    /// Consumes the context and returns the SQL.
    #[must_use]
    pub fn into_sql(self) -> String {
        self.buf
    }
}

impl Context for RawContext {
    fn write(&mut self, sql: &str) {
        self.buf.push_str(sql);
    }

    fn bind(&mut self, value: &SqlValue) {
        self.buf.push_str(&value.to_inline());
    }
}

impl Reusable for RawContext {
    fn reset(&mut self) {
        self.buf.clear();
    }

    fn buffer_capacity(&self) -> usize {
        self.buf.capacity()
    }

    fn value_count(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_inlines() {
        let mut ctx = RawContext::new();
        ctx.write("a = ");
        ctx.bind(&SqlValue::Text(String::from("x")));
        ctx.write(" AND b = ");
        ctx.bind(&SqlValue::Int(2));
        assert_eq!(ctx.into_sql(), "a = 'x' AND b = 2");
    }
}
