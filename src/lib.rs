//! Smooth Scroll - system-wide smooth mouse-wheel scrolling.
//!
//! Intercepts raw wheel input, replaces each discrete jump with a smoothly
//! decaying series of small steps, and posts those steps to the window under
//! the cursor.

pub mod capture;
pub mod commands;
pub mod engine;
pub mod processing;
pub mod settings;

pub use engine::params::Parameters;
pub use engine::{EngineError, EngineResult, SmoothScrollEngine};
pub use settings::{Settings, SettingsStore, Theme};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` is used.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
