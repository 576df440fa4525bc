//! Wheel event interception
//!
//! Runs synchronously on the OS hook-dispatch thread for every wheel event in
//! the system. It must return promptly: no I/O, no unbounded allocation, and the
//! only lock taken is the accumulator guard for a few arithmetic operations.

use crate::capture::input::types::{HookVerdict, WheelEvent};
use crate::engine::params::SharedParameters;
use crate::processing::accumulator::ScrollAccumulator;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterceptorStats {
    pub consumed: u64,
    pub passed_through: u64,
}

#[derive(Debug)]
pub struct InputInterceptor {
    accumulator: Arc<ScrollAccumulator>,
    params: Arc<SharedParameters>,
    consumed: AtomicU64,
    passed_through: AtomicU64,
}

impl InputInterceptor {
    pub fn new(accumulator: Arc<ScrollAccumulator>, params: Arc<SharedParameters>) -> Self {
        Self {
            accumulator,
            params,
            consumed: AtomicU64::new(0),
            passed_through: AtomicU64::new(0),
        }
    }

    /// Decide the fate of one wheel event.
    ///
    /// Never panics across the hook boundary; an internal fault lets the
    /// original event through.
    pub fn handle_event(&self, event: &WheelEvent) -> HookVerdict {
        match catch_unwind(AssertUnwindSafe(|| self.intercept(event))) {
            Ok(verdict) => verdict,
            Err(_) => {
                tracing::error!("Wheel interceptor panicked; passing event through");
                HookVerdict::PassThrough
            }
        }
    }

    fn intercept(&self, event: &WheelEvent) -> HookVerdict {
        // Ctrl+wheel zoom, Shift+wheel horizontal scroll etc. keep native behaviour
        if event.modifiers.any() {
            self.passed_through.fetch_add(1, Ordering::Relaxed);
            return HookVerdict::PassThrough;
        }

        let amount = f64::from(event.delta) * self.params.scroll_multiplier();
        if self.accumulator.add_delta(amount) {
            tracing::trace!("Smoothing armed (delta={})", event.delta);
        } else {
            tracing::trace!("Wheel delta accumulated (delta={})", event.delta);
        }

        self.consumed.fetch_add(1, Ordering::Relaxed);
        HookVerdict::Consumed
    }

    pub fn stats(&self) -> InterceptorStats {
        InterceptorStats {
            consumed: self.consumed.load(Ordering::Relaxed),
            passed_through: self.passed_through.load(Ordering::Relaxed),
        }
    }
}
