//! Rendering engine.
//!
//! A statement tree is rendered by walking it against a [`Context`]. The
//! context decides what a bound value turns into:
//!
//! - [`RawContext`] inlines the value (debug output, not injection safe)
//! - [`NamedContext`] writes `:arg_1`, `:arg_2`, ... and collects the values by name
//! - [`PositionalContext`] writes `$1`, `$2`, ... and collects the values in order
//!
//! # Example
//!
//! ```rust
//! use oxide_query::ast::{Identifier, Select, Where};
//! use oxide_query::render::{render, BoundArgs, RenderMode};
//!
//! let query = Select::new(["id"])
//!     .from("users")
//!     .where_clause(Where::new(Identifier::new("email").equal("a@example.com")));
//!
//! let rendered = render(&query, RenderMode::Positional);
//! assert_eq!(rendered.sql, "SELECT id FROM users WHERE (email = $1)");
//! assert!(matches!(rendered.args, BoundArgs::Positional(ref v) if v.len() == 1));
//! ```

mod named;
mod pool;
mod positional;
mod raw;

pub use named::NamedContext;
pub use pool::{ContextPool, PoolConfig, Pooled, Reusable};
pub use positional::PositionalContext;
pub use raw::RawContext;

use crate::ast::Statement;
use crate::value::SqlValue;

/// A render sink.
///
/// A context is mutated in place during a walk and must not be shared by two
/// render passes at the same time.
pub trait Context {
    /// Appends literal SQL text.
    fn write(&mut self, sql: &str);

    /// Binds a value at the current position.
    fn bind(&mut self, value: &SqlValue);
}

/// Placeholder strategy used by [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Values inlined as literals.
    Raw,
    /// Values replaced by `:arg_N`.
    Named,
    /// Values replaced by `$N`.
    Positional,
}

/// Values collected while rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundArgs {
    /// Raw mode binds nothing.
    None,
    /// `(name, value)` pairs in bind order.
    Named(Vec<(String, SqlValue)>),
    /// Values in placeholder order.
    Positional(Vec<SqlValue>),
}

impl BoundArgs {
    /// Number of bound values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Named(args) => args.len(),
            Self::Positional(args) => args.len(),
        }
    }

    /// Returns true when nothing was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the bound values in placeholder order.
    #[must_use]
    pub fn values(&self) -> Box<dyn Iterator<Item = &SqlValue> + '_> {
        match self {
            Self::None => Box::new(core::iter::empty()),
            Self::Named(args) => Box::new(args.iter().map(|(_, v)| v)),
            Self::Positional(args) => Box::new(args.iter()),
        }
    }
}

/// The output of a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// The SQL text.
    pub sql: String,
    /// The values bound while rendering.
    pub args: BoundArgs,
}

/// Renders `stmt` with a fresh context of the given mode.
///
/// # Panics
///
/// Panics if the tree violates a construction contract, e.g. a mandatory
/// clause is empty.
#[must_use]
pub fn render(stmt: &(impl Statement + ?Sized), mode: RenderMode) -> Rendered {
    match mode {
        RenderMode::Raw => {
            let mut ctx = RawContext::new();
            stmt.write(&mut ctx);
            Rendered {
                sql: ctx.into_sql(),
                args: BoundArgs::None,
            }
        }
        RenderMode::Named => {
            let mut ctx = NamedContext::new();
            stmt.write(&mut ctx);
            let (sql, args) = ctx.into_parts();
            Rendered {
                sql,
                args: BoundArgs::Named(args),
            }
        }
        RenderMode::Positional => {
            let mut ctx = PositionalContext::new();
            stmt.write(&mut ctx);
            let (sql, args) = ctx.into_parts();
            Rendered {
                sql,
                args: BoundArgs::Positional(args),
            }
        }
    }
}

/// Renders through pooled contexts.
///
/// Each mode has its own bounded pool; contexts are returned on every exit
/// path, including unwinding out of a contract violation.
#[derive(Debug, Default)]
pub struct Renderer {
    raw: ContextPool<RawContext>,
    named: ContextPool<NamedContext>,
    positional: ContextPool<PositionalContext>,
}

impl Renderer {
    /// Creates a renderer with the default pool configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer with the given pool configuration.
    #[must_use]
    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            raw: ContextPool::new(config),
            named: ContextPool::new(config),
            positional: ContextPool::new(config),
        }
    }

    /// Renders `stmt` in the given mode.
    ///
    /// # Panics
    ///
    /// Panics if the tree violates a construction contract.
    #[must_use]
    pub fn render(&self, stmt: &(impl Statement + ?Sized), mode: RenderMode) -> Rendered {
        match mode {
            RenderMode::Raw => {
                let mut ctx = self.raw.acquire();
                stmt.write(&mut *ctx);
                Rendered {
                    sql: ctx.sql().to_owned(),
                    args: BoundArgs::None,
                }
            }
            RenderMode::Named => {
                let mut ctx = self.named.acquire();
                stmt.write(&mut *ctx);
                Rendered {
                    sql: ctx.sql().to_owned(),
                    args: BoundArgs::Named(ctx.args().to_vec()),
                }
            }
            RenderMode::Positional => {
                let mut ctx = self.positional.acquire();
                stmt.write(&mut *ctx);
                Rendered {
                    sql: ctx.sql().to_owned(),
                    args: BoundArgs::Positional(ctx.args().to_vec()),
                }
            }
        }
    }

    /// Idle contexts currently held, per mode (raw, named, positional).
    #[must_use]
    pub fn idle(&self) -> (usize, usize, usize) {
        (self.raw.idle(), self.named.idle(), self.positional.idle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Identifier, Value};

    #[test]
    fn test_render_modes_differ_only_at_bind_sites() {
        let expr = Identifier::new("a")
            .equal(1)
            .and(Identifier::new("b").equal("x"));

        assert_eq!(render(&expr, RenderMode::Raw).sql, "((a = 1) AND (b = 'x'))");
        assert_eq!(
            render(&expr, RenderMode::Named).sql,
            "((a = :arg_1) AND (b = :arg_2))"
        );
        assert_eq!(
            render(&expr, RenderMode::Positional).sql,
            "((a = $1) AND (b = $2))"
        );
    }

    #[test]
    fn test_null_is_never_bound() {
        let rendered = render(&Value::new(None::<i32>), RenderMode::Positional);
        assert_eq!(rendered.sql, "NULL");
        assert!(rendered.args.is_empty());
    }

    #[test]
    fn test_bound_args_values_order() {
        let expr = Identifier::new("a").between(1, 2);
        let named = render(&expr, RenderMode::Named).args;
        let positional = render(&expr, RenderMode::Positional).args;
        let n: Vec<&SqlValue> = named.values().collect();
        let p: Vec<&SqlValue> = positional.values().collect();
        assert_eq!(n, p);
        assert_eq!(BoundArgs::None.len(), 0);
    }

    #[test]
    fn test_renderer_returns_contexts() {
        let renderer = Renderer::new();
        let expr = Identifier::new("a").equal(1);
        let first = renderer.render(&expr, RenderMode::Named);
        let second = renderer.render(&expr, RenderMode::Named);
        assert_eq!(first, second);
        assert_eq!(renderer.idle(), (0, 1, 0));
    }
}
