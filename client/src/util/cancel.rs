//! Cancellation for page-scoped async work.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages start fetches in `spawn_local` tasks that can finish after the page
//! is gone. Each task holds a [`CancelToken`]; the page cancels it on
//! cleanup and the task checks it before writing any signal.

#[cfg(test)]
#[path = "cancel_test.rs"]
mod cancel_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared "stop applying results" flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A token cancelled automatically when the current reactive owner is
    /// cleaned up (component teardown).
    #[must_use]
    pub fn scoped() -> Self {
        let token = Self::new();
        let on_drop = token.clone();
        leptos::prelude::on_cleanup(move || on_drop.cancel());
        token
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Run `apply` only while the token is live.
    pub fn guard<F: FnOnce()>(&self, apply: F) -> bool {
        if self.is_cancelled() {
            return false;
        }
        apply();
        true
    }
}
