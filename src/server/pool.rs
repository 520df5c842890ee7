//! Pool of idle handlers.
//!
//! Handlers move by value: [`HandlerPool::acquire`] hands one out and only
//! [`HandlerPool::release`] takes it back, so a pooled handler is never
//! running and a running one belongs to exactly one task.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::server::handler::Handler;

#[derive(Default)]
pub struct HandlerPool {
    idle: Mutex<Vec<Handler>>,
    created: AtomicUsize,
}

impl HandlerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes an idle handler, or creates one if none is idle.
    pub fn acquire(&self) -> Handler {
        let reused = self.lock().pop();
        match reused {
            Some(handler) => handler,
            None => {
                let created = self.created.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::debug!(created, "creating handler");
                Handler::new()
            }
        }
    }

    /// Returns a handler to the pool.
    pub fn release(&self, handler: Handler) {
        self.lock().push(handler);
    }

    /// Handlers currently idle in the pool.
    pub fn idle(&self) -> usize {
        self.lock().len()
    }

    /// Handlers created over the pool's lifetime.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Handler>> {
        // A handler vector cannot be left half-updated, so poisoning is ignored.
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
