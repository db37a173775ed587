//! Positional placeholder rendering (`$1`, `$2`, ...).

use super::{Context, Reusable};
use crate::value::SqlValue;

/// A context that replaces bound values by sequential `$N` placeholders.
#[derive(Debug, Clone, Default)]
pub struct PositionalContext {
    buf: String,
    args: Vec<SqlValue>,
}

impl PositionalContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: String::new(),
            args: Vec::new(),
        }
    }

    /// The SQL written so far.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.buf
    }

    /// Values in placeholder order; `args()[0]` is `$1`.
    #[must_use]
    pub fn args(&self) -> &[SqlValue] {
        &self.args
    }

    /// Consumes the context and returns the SQL and its arguments.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.buf, self.args)
    }
}

impl Context for PositionalContext {
    fn write(&mut self, sql: &str) {
        self.buf.push_str(sql);
    }

    fn bind(&mut self, value: &SqlValue) {
        self.args.push(value.clone());
        self.buf.push('$');
        self.buf.push_str(&self.args.len().to_string());
    }
}

impl Reusable for PositionalContext {
    fn reset(&mut self) {
        self.buf.clear();
        self.args.clear();
    }

    fn buffer_capacity(&self) -> usize {
        self.buf.capacity()
    }

    fn value_count(&self) -> usize {
        self.args.capacity()
    }
}
