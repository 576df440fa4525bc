//! Periodic smoothing ticker
//!
//! A dedicated thread parks on the accumulator's condition variable while
//! disarmed and, once armed, ticks every `interval` until the filter converges.
//! The thread lives as long as the scheduler; disarming only parks it.

use crate::engine::injector::EventInjector;
use crate::engine::error::InjectionFailure;
use crate::engine::params::SharedParameters;
use crate::processing::accumulator::{ScrollAccumulator, Wake};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

/// Outcome of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The step was delivered
    Injected(i32),
    /// The step rounded to zero; nothing to post
    Idle,
    /// Delivery failed; the state already advanced and the next tick carries on
    Dropped(i32, InjectionFailure),
    /// Within one unit of the target; the scheduler is now disarmed
    Converged,
}

#[derive(Debug, Default)]
pub struct TickStats {
    ticks: AtomicU64,
    injected: AtomicU64,
    dropped: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickCounts {
    pub ticks: u64,
    pub injected: u64,
    pub dropped: u64,
}

impl TickStats {
    pub fn counts(&self) -> TickCounts {
        TickCounts {
            ticks: self.ticks.load(Ordering::Relaxed),
            injected: self.injected.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Run one interpolation step and inject its result.
///
/// The accumulator lock is released before injection, so window resolution and
/// posting never hold up the hook thread.
pub fn tick(
    accumulator: &ScrollAccumulator,
    params: &SharedParameters,
    injector: &EventInjector,
    stats: &TickStats,
) -> TickOutcome {
    stats.ticks.fetch_add(1, Ordering::Relaxed);

    match accumulator.step(params.smoothness()) {
        None => TickOutcome::Converged,
        Some(0) => TickOutcome::Idle,
        Some(amount) => match injector.inject(amount) {
            Ok(()) => {
                stats.injected.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Injected wheel step {}", amount);
                TickOutcome::Injected(amount)
            }
            Err(e) => {
                stats.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Dropped wheel step {}: {}", amount, e);
                TickOutcome::Dropped(amount, e)
            }
        },
    }
}

pub struct SmoothingScheduler {
    accumulator: Arc<ScrollAccumulator>,
    session: u64,
    thread: Option<JoinHandle<()>>,
}

impl SmoothingScheduler {
    pub fn spawn(
        accumulator: Arc<ScrollAccumulator>,
        params: Arc<SharedParameters>,
        injector: EventInjector,
        stats: Arc<TickStats>,
    ) -> std::io::Result<Self> {
        let session = accumulator.open_session();

        let spawned = {
            let accumulator = accumulator.clone();
            std::thread::Builder::new()
                .name("smooth-scroll-ticker".into())
                .spawn(move || run_ticker(&accumulator, session, &params, &injector, &stats))
        };
        let thread = match spawned {
            Ok(thread) => thread,
            Err(e) => {
                accumulator.close_session(session);
                return Err(e);
            }
        };

        Ok(Self {
            accumulator,
            session,
            thread: Some(thread),
        })
    }

    /// Wake the ticker, wait for it to exit and discard pending motion.
    /// Idempotent.
    ///
    /// A scheduler already superseded by a newer one only joins its thread;
    /// the accumulator then belongs to the newer session.
    pub fn shutdown(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };

        let current = self.accumulator.close_session(self.session);
        if thread.join().is_err() {
            tracing::error!("Ticker thread panicked");
        }
        if current {
            self.accumulator.reset();
        }
    }
}

impl Drop for SmoothingScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_ticker(
    accumulator: &ScrollAccumulator,
    session: u64,
    params: &SharedParameters,
    injector: &EventInjector,
    stats: &TickStats,
) {
    tracing::debug!("Ticker thread started");

    while accumulator.wait_armed(session) == Wake::Tick {
        // First tick fires as soon as we are armed
        let deadline = Instant::now() + params.interval();

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            tick(accumulator, params, injector, stats)
        }));

        match outcome {
            Ok(TickOutcome::Converged) => {
                tracing::debug!("Smoothing converged; ticker disarmed");
                continue;
            }
            Ok(_) => {}
            Err(_) => {
                tracing::error!("Tick panicked; discarding pending scroll");
                accumulator.reset();
                continue;
            }
        }

        if accumulator.wait_until(session, deadline) == Wake::Closed {
            break;
        }
    }

    tracing::debug!("Ticker thread stopped");
}
