//! Shared scroll interpolation state
//!
//! Implements a first-order exponential filter: every tick `current` moves a
//! fixed fraction (`smoothness`) of the remaining distance toward `target`.
//! The hook context writes `target`, the ticker advances `current`, and both go
//! through the single guard held here together with the armed flag.

use parking_lot::{Condvar, Mutex};
use std::time::Instant;

/// Remaining distance below which the filter snaps to the target and idles
pub const CONVERGENCE_THRESHOLD: f64 = 1.0;

/// Target and current scroll position, in notch-scaled units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    pub target: f64,
    pub current: f64,
}

impl ScrollState {
    pub fn difference(&self) -> f64 {
        self.target - self.current
    }
}

/// Counters for accumulator writes, used to verify injections never feed back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccumulatorStats {
    pub deltas_added: u64,
    pub arm_count: u64,
    pub disarm_count: u64,
}

#[derive(Debug, Default)]
struct Guarded {
    scroll: ScrollState,
    armed: bool,
    /// Current ticker session; a waiter holding any other id has been released
    session: u64,
    stats: AccumulatorStats,
}

/// Result of waiting on the ticker's condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// Armed, a tick is due
    Tick,
    /// The waiter's session was closed or superseded
    Closed,
}

#[derive(Debug, Default)]
pub struct ScrollAccumulator {
    inner: Mutex<Guarded>,
    wake: Condvar,
}

impl ScrollAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a scaled wheel delta into the target.
    ///
    /// Returns `true` when this call armed the ticker, i.e. it was idle and the
    /// outstanding distance is now at least one unit.
    pub fn add_delta(&self, amount: f64) -> bool {
        let mut inner = self.inner.lock();
        inner.scroll.target += amount;
        inner.stats.deltas_added += 1;

        let needs_arming =
            !inner.armed && inner.scroll.difference().abs() >= CONVERGENCE_THRESHOLD;
        if needs_arming {
            inner.armed = true;
            inner.stats.arm_count += 1;
            self.wake.notify_all();
        }
        needs_arming
    }

    /// Advance `current` one step toward `target`.
    ///
    /// Returns the rounded amount to inject, which can be zero while sub-unit
    /// progress accumulates. Returns `None` once converged; the accumulator is
    /// then disarmed and `current == target`.
    pub fn step(&self, smoothness: f64) -> Option<i32> {
        let mut inner = self.inner.lock();
        let difference = inner.scroll.difference();

        if difference.abs() < CONVERGENCE_THRESHOLD {
            inner.scroll.current = inner.scroll.target;
            if inner.armed {
                inner.armed = false;
                inner.stats.disarm_count += 1;
            }
            return None;
        }

        let step = difference * smoothness;
        inner.scroll.current += step;
        Some(round_step(step))
    }

    /// Discard outstanding motion and go idle.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.scroll.current = inner.scroll.target;
        if inner.armed {
            inner.armed = false;
            inner.stats.disarm_count += 1;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.inner.lock().armed
    }

    pub fn state(&self) -> ScrollState {
        self.inner.lock().scroll
    }

    pub fn stats(&self) -> AccumulatorStats {
        self.inner.lock().stats
    }

    /// Begin a ticker session, superseding any previous one.
    ///
    /// Waiters of older sessions wake up with [`Wake::Closed`].
    pub fn open_session(&self) -> u64 {
        let mut inner = self.inner.lock();
        inner.session += 1;
        self.wake.notify_all();
        inner.session
    }

    /// End `session` if it is still the current one.
    ///
    /// Returns `false` when a newer session has already taken over; that
    /// session and its pending motion are left alone.
    pub fn close_session(&self, session: u64) -> bool {
        let mut inner = self.inner.lock();
        if inner.session != session {
            return false;
        }
        inner.session += 1;
        self.wake.notify_all();
        true
    }

    /// Block until armed or until `session` is no longer current.
    pub fn wait_armed(&self, session: u64) -> Wake {
        let mut inner = self.inner.lock();
        while !inner.armed && inner.session == session {
            self.wake.wait(&mut inner);
        }
        if inner.session == session {
            Wake::Tick
        } else {
            Wake::Closed
        }
    }

    /// Sleep until `deadline`, returning early only if `session` ends.
    pub fn wait_until(&self, session: u64, deadline: Instant) -> Wake {
        let mut inner = self.inner.lock();
        while inner.session == session {
            if self.wake.wait_until(&mut inner, deadline).timed_out() {
                break;
            }
        }
        if inner.session == session {
            Wake::Tick
        } else {
            Wake::Closed
        }
    }
}

fn round_step(step: f64) -> i32 {
    // Half away from zero; saturates on absurd magnitudes
    step.round() as i32
}
