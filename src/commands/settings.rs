//! Settings file inspection and editing

use crate::engine::params::Parameters;
use crate::engine::EngineResult;
use crate::settings::{Settings, SettingsStore, Theme};
use std::fmt::Write as _;

/// Fields to change; `None` keeps the saved value
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsUpdate {
    pub smoothness: Option<f64>,
    pub scroll_multiplier: Option<f64>,
    pub timer_interval: Option<u32>,
    pub theme: Option<Theme>,
}

/// Render the effective settings for display.
pub fn show(store: &SettingsStore) -> String {
    let settings = store.load();
    let mut out = String::new();
    let _ = writeln!(out, "Settings file:     {}", store.path().display());
    let _ = writeln!(out, "Smoothness:        {:.2}", settings.smoothness);
    let _ = writeln!(out, "Scroll multiplier: {:.1}x", settings.scroll_multiplier);
    let _ = writeln!(out, "Update interval:   {}ms", settings.timer_interval);
    let _ = writeln!(out, "Theme:             {:?}", settings.theme);
    out
}

/// Validate and persist a partial update.
pub fn set(store: &SettingsStore, update: SettingsUpdate) -> EngineResult<Settings> {
    let current = store.load();
    let params = Parameters {
        smoothness: update.smoothness.unwrap_or(current.smoothness),
        scroll_multiplier: update.scroll_multiplier.unwrap_or(current.scroll_multiplier),
        interval_ms: update.timer_interval.unwrap_or(current.timer_interval),
    };
    params.validate()?;

    let updated = Settings {
        theme: update.theme.unwrap_or(current.theme),
        ..current.with_parameters(params)
    };
    store.try_save(&updated)?;

    tracing::info!("Settings saved to {:?}", store.path());
    Ok(updated)
}

/// Restore default parameters, keeping the theme.
pub fn reset(store: &SettingsStore) -> EngineResult<Settings> {
    let current = store.load();
    let restored = current.with_parameters(Parameters::default());
    store.try_save(&restored)?;
    Ok(restored)
}
