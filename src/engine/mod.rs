//! Smooth scroll engine
//!
//! Ties the interceptor, accumulator, scheduler and injector together behind a
//! start/stop surface. A running session owns exactly one hook registration and
//! one ticker thread; both are released on `stop()` or when the engine drops.

pub mod error;
pub mod injector;
pub mod params;
pub mod scheduler;

use crate::capture::input::interceptor::{InputInterceptor, InterceptorStats};
use crate::capture::traits::{HookHandle, WheelPlatform};
use crate::processing::accumulator::{AccumulatorStats, ScrollAccumulator, ScrollState};
use error::{HookInstallError, ParameterError};
use injector::EventInjector;
use params::{Parameters, SharedParameters};
use parking_lot::Mutex;
use scheduler::{SmoothingScheduler, TickCounts, TickStats};
use std::sync::Arc;

pub use error::{EngineError, EngineResult, InjectionFailure, PersistenceError};

/// Counters gathered across all sessions of an engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub interceptor: InterceptorStats,
    pub accumulator: AccumulatorStats,
    pub ticks: TickCounts,
}

struct Session {
    hook: HookHandle,
    scheduler: SmoothingScheduler,
}

pub struct SmoothScrollEngine {
    platform: Arc<dyn WheelPlatform>,
    params: Arc<SharedParameters>,
    accumulator: Arc<ScrollAccumulator>,
    interceptor: Arc<InputInterceptor>,
    tick_stats: Arc<TickStats>,
    session: Mutex<Option<Session>>,
}

impl SmoothScrollEngine {
    pub fn new(platform: Arc<dyn WheelPlatform>, params: Parameters) -> Result<Self, ParameterError> {
        params.validate()?;

        let params = Arc::new(SharedParameters::new(params));
        let accumulator = Arc::new(ScrollAccumulator::new());
        let interceptor = Arc::new(InputInterceptor::new(accumulator.clone(), params.clone()));

        Ok(Self {
            platform,
            params,
            accumulator,
            interceptor,
            tick_stats: Arc::new(TickStats::default()),
            session: Mutex::new(None),
        })
    }

    /// Install the wheel hook and start the ticker.
    ///
    /// Calling this while already running is a no-op. On failure the engine
    /// stays constructed and idle; nothing is retried.
    pub fn start(&self) -> Result<(), HookInstallError> {
        let mut session = self.session.lock();
        if session.is_some() {
            tracing::debug!("Smooth scrolling already running");
            return Ok(());
        }

        let scheduler = SmoothingScheduler::spawn(
            self.accumulator.clone(),
            self.params.clone(),
            EventInjector::new(self.platform.clone()),
            self.tick_stats.clone(),
        )?;

        // On failure `scheduler` drops here and its thread is joined
        let hook = self.platform.install_wheel_hook(self.interceptor.clone())?;

        *session = Some(Session { hook, scheduler });

        let params = self.params.snapshot();
        tracing::info!(
            "Smooth scrolling started (platform={}, smoothness={}, multiplier={}, interval={}ms)",
            self.platform.name(),
            params.smoothness,
            params.scroll_multiplier,
            params.interval_ms
        );
        Ok(())
    }

    /// Remove the hook, then disarm and release the ticker. Idempotent.
    ///
    /// The session lock is held until teardown completes, so a concurrent
    /// `start()` only begins once this session is fully gone.
    pub fn stop(&self) {
        let mut session = self.session.lock();
        let Some(Session { hook, mut scheduler }) = session.take() else {
            return;
        };

        // Unhook first so no new delta can arrive while the ticker winds down
        hook.release();
        scheduler.shutdown();
        drop(session);

        let stats = self.stats();
        tracing::info!(
            "Smooth scrolling stopped (consumed={}, passed={}, injected={}, dropped={})",
            stats.interceptor.consumed,
            stats.interceptor.passed_through,
            stats.ticks.injected,
            stats.ticks.dropped
        );
    }

    pub fn is_running(&self) -> bool {
        self.session.lock().is_some()
    }

    pub fn parameters(&self) -> Parameters {
        self.params.snapshot()
    }

    pub fn set_smoothness(&self, value: f64) -> Result<(), ParameterError> {
        self.params.set_smoothness(value)
    }

    pub fn set_scroll_multiplier(&self, value: f64) -> Result<(), ParameterError> {
        self.params.set_scroll_multiplier(value)
    }

    pub fn set_timer_interval(&self, interval_ms: u32) -> Result<(), ParameterError> {
        self.params.set_interval_ms(interval_ms)
    }

    pub fn apply_parameters(&self, params: Parameters) -> Result<(), ParameterError> {
        self.params.apply(params)?;
        tracing::debug!("Parameters updated: {:?}", params);
        Ok(())
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.accumulator.state()
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            interceptor: self.interceptor.stats(),
            accumulator: self.accumulator.stats(),
            ticks: self.tick_stats.counts(),
        }
    }
}

impl Drop for SmoothScrollEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
