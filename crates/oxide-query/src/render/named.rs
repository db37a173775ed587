//! Named placeholder rendering (`:arg_1`, `:arg_2`, ...).

use super::{Context, Reusable};
use crate::value::SqlValue;

/// A context that replaces bound values by sequential `:arg_N` names.
///
/// Every call to [`Context::bind`] takes a new name, even when the value is
/// equal to one bound before.
#[derive(Debug, Clone, Default)]
pub struct NamedContext {
    buf: String,
    args: Vec<(String, SqlValue)>,
}

impl NamedContext {
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

    /// `(name, value)` pairs in bind order.
    #[must_use]
    pub fn args(&self) -> &[(String, SqlValue)] {
        &self.args
    }

    /// Looks up a bound value by name (without the leading colon).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.args.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Consumes the context and returns the SQL and its arguments.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<(String, SqlValue)>) {
        (self.buf, self.args)
    }
}

impl Context for NamedContext {
    fn write(&mut self, sql: &str) {
        self.buf.push_str(sql);
    }

    fn bind(&mut self, value: &SqlValue) {
        let name = format!("arg_{}", self.args.len() + 1);
        self.buf.push(':');
        self.buf.push_str(&name);
        self.args.push((name, value.clone()));
    }
}

impl Reusable for NamedContext {
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
