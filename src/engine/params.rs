//! Runtime tuning parameters
//!
//! The hook callback and the ticker read these on every event, so the live copy
//! is kept in atomics rather than behind a lock.

use crate::engine::error::ParameterError;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

pub const DEFAULT_SMOOTHNESS: f64 = 0.25;
pub const DEFAULT_SCROLL_MULTIPLIER: f64 = 1.0;
pub const DEFAULT_TIMER_INTERVAL_MS: u32 = 8;

/// Smoothing parameters owned by the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Fraction of the remaining distance covered per tick, in (0, 1]
    pub smoothness: f64,
    /// Scale applied to every raw wheel delta
    pub scroll_multiplier: f64,
    /// Ticker period in milliseconds
    pub interval_ms: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            smoothness: DEFAULT_SMOOTHNESS,
            scroll_multiplier: DEFAULT_SCROLL_MULTIPLIER,
            interval_ms: DEFAULT_TIMER_INTERVAL_MS,
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        validate_smoothness(self.smoothness)?;
        validate_scroll_multiplier(self.scroll_multiplier)?;
        validate_interval(self.interval_ms)?;
        Ok(())
    }
}

pub fn validate_smoothness(value: f64) -> Result<(), ParameterError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ParameterError::Smoothness(value))
    }
}

pub fn validate_scroll_multiplier(value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::ScrollMultiplier(value))
    }
}

pub fn validate_interval(value: u32) -> Result<(), ParameterError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ParameterError::TimerInterval)
    }
}

/// Live parameter set shared between the hook context, the ticker and callers.
///
/// Each field is updated independently; a reader may see a new smoothness
/// paired with an old interval for one tick, which is harmless.
#[derive(Debug)]
pub struct SharedParameters {
    smoothness: AtomicU64,
    scroll_multiplier: AtomicU64,
    interval_ms: AtomicU32,
}

impl SharedParameters {
    pub fn new(initial: Parameters) -> Self {
        Self {
            smoothness: AtomicU64::new(initial.smoothness.to_bits()),
            scroll_multiplier: AtomicU64::new(initial.scroll_multiplier.to_bits()),
            interval_ms: AtomicU32::new(initial.interval_ms),
        }
    }

    pub fn smoothness(&self) -> f64 {
        f64::from_bits(self.smoothness.load(Ordering::Relaxed))
    }

    pub fn scroll_multiplier(&self) -> f64 {
        f64::from_bits(self.scroll_multiplier.load(Ordering::Relaxed))
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.interval_ms.load(Ordering::Relaxed)))
    }

    pub fn set_smoothness(&self, value: f64) -> Result<(), ParameterError> {
        validate_smoothness(value)?;
        self.smoothness.store(value.to_bits(), Ordering::Relaxed);
        Ok(())
    }

    pub fn set_scroll_multiplier(&self, value: f64) -> Result<(), ParameterError> {
        validate_scroll_multiplier(value)?;
        self.scroll_multiplier.store(value.to_bits(), Ordering::Relaxed);
        Ok(())
    }

    pub fn set_interval_ms(&self, value: u32) -> Result<(), ParameterError> {
        validate_interval(value)?;
        self.interval_ms.store(value, Ordering::Relaxed);
        Ok(())
    }

    /// Apply a whole parameter set; nothing is written unless all fields are valid.
    pub fn apply(&self, params: Parameters) -> Result<(), ParameterError> {
        params.validate()?;
        self.smoothness.store(params.smoothness.to_bits(), Ordering::Relaxed);
        self.scroll_multiplier
            .store(params.scroll_multiplier.to_bits(), Ordering::Relaxed);
        self.interval_ms.store(params.interval_ms, Ordering::Relaxed);
        Ok(())
    }

    pub fn snapshot(&self) -> Parameters {
        Parameters {
            smoothness: self.smoothness(),
            scroll_multiplier: self.scroll_multiplier(),
            interval_ms: self.interval_ms.load(Ordering::Relaxed),
        }
    }
}

impl Default for SharedParameters {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}
