//! Bounded pool of reusable render contexts.
//!
//! Contexts are handed out through a [`Pooled`] guard and returned when the
//! guard is dropped. A context that grew past the configured caps during its
//! render pass is discarded instead of being kept alive.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Pool limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum number of idle contexts kept per pool.
    pub max_idle: usize,
    /// Largest SQL buffer capacity (in bytes) a returned context may retain.
    pub max_buffer_capacity: usize,
    /// Largest bound-value capacity a returned context may retain.
    pub max_values: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle: 16,
            max_buffer_capacity: 64 * 1024,
            max_values: 1024,
        }
    }
}

impl PoolConfig {
    /// Sets the number of idle contexts kept.
    #[must_use]
    pub const fn max_idle(mut self, max_idle: usize) -> Self {
        self.max_idle = max_idle;
        self
    }

    /// Sets the buffer capacity cap.
    #[must_use]
    pub const fn max_buffer_capacity(mut self, bytes: usize) -> Self {
        self.max_buffer_capacity = bytes;
        self
    }

    /// Sets the bound-value capacity cap.
    #[must_use]
    pub const fn max_values(mut self, values: usize) -> Self {
        self.max_values = values;
        self
    }
}

/// A context that can be cleared and reused across render passes.
pub trait Reusable {
    /// Clears all written SQL and bound values, keeping allocations.
    fn reset(&mut self);

    /// Allocated capacity of the SQL buffer, in bytes.
    fn buffer_capacity(&self) -> usize;

    /// Allocated capacity of the bound-value collection.
    fn value_count(&self) -> usize;
}

/// A thread-safe pool of contexts of one kind.
pub struct ContextPool<C> {
    config: PoolConfig,
    idle: Mutex<Vec<C>>,
}

impl<C> core::fmt::Debug for ContextPool<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContextPool")
            .field("config", &self.config)
            .field("idle", &self.idle())
            .finish()
    }
}

impl<C> Default for ContextPool<C> {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl<C> ContextPool<C> {
    /// Creates an empty pool.
    #[must_use]
    pub const fn new(config: PoolConfig) -> Self {
        Self {
            config,
            idle: Mutex::new(Vec::new()),
        }
    }

    /// The pool's configuration.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Number of idle contexts currently held.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl<C: Reusable + Default> ContextPool<C> {
    /// Takes an idle context, or creates one if the pool is empty.
    #[must_use]
    pub fn acquire(&self) -> Pooled<'_, C> {
        let reused = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        trace!(reused = reused.is_some(), "acquire render context");
        Pooled {
            pool: self,
            ctx: Some(reused.unwrap_or_default()),
        }
    }

    fn release(&self, mut ctx: C) {
        let buffer = ctx.buffer_capacity();
        let values = ctx.value_count();
        if buffer > self.config.max_buffer_capacity || values > self.config.max_values {
            debug!(buffer, values, "discarding oversized render context");
            return;
        }

        ctx.reset();
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        if idle.len() < self.config.max_idle {
            idle.push(ctx);
            trace!(idle = idle.len(), "release render context");
        }
    }
}

/// A context borrowed from a [`ContextPool`].
///
/// The context is returned to its pool when the guard is dropped.
pub struct Pooled<'a, C: Reusable + Default> {
    pool: &'a ContextPool<C>,
    ctx: Option<C>,
}

impl<C: Reusable + Default> Deref for Pooled<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ctx.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl<C: Reusable + Default> DerefMut for Pooled<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.ctx.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl<C: Reusable + Default> Drop for Pooled<'_, C> {
    fn drop(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            self.pool.release(ctx);
        }
    }
}
