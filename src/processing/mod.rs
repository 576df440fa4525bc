//! Scroll interpolation
//!
//! This module contains the exponential smoothing filter that turns bursts of
//! discrete wheel deltas into a sequence of small, decaying scroll steps.

pub mod accumulator;

pub use accumulator::{AccumulatorStats, ScrollAccumulator, ScrollState, CONVERGENCE_THRESHOLD};
