//! Settings persistence
//!
//! Stores the tuning parameters plus the UI theme as a small JSON document.
//! Reading is lenient field by field: a missing, mistyped or out-of-range value
//! falls back to that field's default without discarding the rest of the file.

use crate::engine::error::PersistenceError;
use crate::engine::params::{
    validate_interval, validate_scroll_multiplier, validate_smoothness, Parameters,
    DEFAULT_SCROLL_MULTIPLIER, DEFAULT_SMOOTHNESS, DEFAULT_TIMER_INTERVAL_MS,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "SmoothScroll";
const SETTINGS_FILE: &str = "settings.json";

/// Settings dialog colour scheme; owned by the UI and only carried through here
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// Persisted settings, using the on-disk key names of the settings file
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    pub smoothness: f64,
    pub scroll_multiplier: f64,
    pub timer_interval: u32,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            smoothness: DEFAULT_SMOOTHNESS,
            scroll_multiplier: DEFAULT_SCROLL_MULTIPLIER,
            timer_interval: DEFAULT_TIMER_INTERVAL_MS,
            theme: Theme::default(),
        }
    }
}

impl Settings {
    pub fn parameters(&self) -> Parameters {
        Parameters {
            smoothness: self.smoothness,
            scroll_multiplier: self.scroll_multiplier,
            interval_ms: self.timer_interval,
        }
    }

    pub fn with_parameters(self, params: Parameters) -> Self {
        Self {
            smoothness: params.smoothness,
            scroll_multiplier: params.scroll_multiplier,
            timer_interval: params.interval_ms,
            ..self
        }
    }

    /// Parse a settings document, degrading per field.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        // Only an object is a settings document; arrays and scalars are rejected
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let raw = RawSettings::deserialize(serde_json::Value::Object(object))?;
        Ok(raw.resolve())
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Every field optional and type-tolerant; `resolve` applies defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawSettings {
    #[serde(default, deserialize_with = "lenient")]
    smoothness: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    scroll_multiplier: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    timer_interval: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    theme: Option<Theme>,
}

impl RawSettings {
    fn resolve(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            smoothness: self
                .smoothness
                .filter(|v| validate_smoothness(*v).is_ok())
                .unwrap_or(defaults.smoothness),
            scroll_multiplier: self
                .scroll_multiplier
                .filter(|v| validate_scroll_multiplier(*v).is_ok())
                .unwrap_or(defaults.scroll_multiplier),
            timer_interval: self
                .timer_interval
                .filter(|v| validate_interval(*v).is_ok())
                .unwrap_or(defaults.timer_interval),
            theme: self.theme.unwrap_or(defaults.theme),
        }
    }
}

/// Accept any JSON value, keeping it only if it converts to `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Default settings file: `<config dir>/SmoothScroll/settings.json`
pub fn default_settings_path() -> Result<PathBuf, PersistenceError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
        .ok_or(PersistenceError::NoConfigDir)
}

/// Loads and saves [`Settings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the per-user default location
    pub fn open_default() -> Result<Self, PersistenceError> {
        default_settings_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; any failure yields defaults.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    "Could not load settings from {:?}, using defaults: {}",
                    self.path,
                    e
                );
                Settings::default()
            }
        }
    }

    /// Load settings; a missing file is not an error and yields defaults.
    pub fn try_load(&self) -> Result<Settings, PersistenceError> {
        if !self.path.exists() {
            tracing::debug!("No settings file at {:?}", self.path);
            return Ok(Settings::default());
        }

        let json = std::fs::read_to_string(&self.path)?;
        let settings = Settings::from_json(&json)?;
        tracing::debug!("Loaded settings from {:?}: {:?}", self.path, settings);
        Ok(settings)
    }

    /// Save settings; failures are logged and absorbed.
    pub fn save(&self, settings: &Settings) -> bool {
        match self.try_save(settings) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Could not save settings to {:?}: {}", self.path, e);
                false
            }
        }
    }

    pub fn try_save(&self, settings: &Settings) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        std::fs::write(&self.path, settings.to_json()?)?;
        tracing::debug!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("SmoothScroll").join("settings.json"))
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let settings = store.load();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.smoothness, 0.25);
        assert_eq!(settings.scroll_multiplier, 1.0);
        assert_eq!(settings.timer_interval, 8);
        assert_eq!(settings.theme, Theme::Light);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let settings = Settings {
            smoothness: 0.4,
            scroll_multiplier: 2.5,
            timer_interval: 12,
            theme: Theme::Dark,
        };

        assert!(store.save(&settings), "parent directory should be created");
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn test_on_disk_key_names() {
        let json = Settings::default().to_json().unwrap();
        for key in ["\"Smoothness\"", "\"ScrollMultiplier\"", "\"TimerInterval\"", "\"Theme\": \"Light\""] {
            assert!(json.contains(key), "{} missing from {}", key, json);
        }
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(store.try_load().is_err());
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_fields_degrade_independently() {
        let json = r#"{
            "Smoothness": "fast",
            "ScrollMultiplier": 1.8,
            "TimerInterval": -3,
            "Theme": "Dark"
        }"#;

        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.smoothness, DEFAULT_SMOOTHNESS);
        assert_eq!(settings.scroll_multiplier, 1.8);
        assert_eq!(settings.timer_interval, DEFAULT_TIMER_INTERVAL_MS);
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn test_out_of_domain_values_fall_back() {
        let json = r#"{ "Smoothness": 1.5, "ScrollMultiplier": 0, "TimerInterval": 0, "Theme": "Blue" }"#;
        assert_eq!(Settings::from_json(json).unwrap(), Settings::default());
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(Settings::from_json("[0.5, 2.0, 8, \"Dark\"]").is_err());
        assert!(Settings::from_json("42").is_err());
    }

    #[test]
    fn test_partial_file_keeps_present_fields() {
        let settings = Settings::from_json(r#"{ "TimerInterval": 16 }"#).unwrap();
        assert_eq!(settings.timer_interval, 16);
        assert_eq!(settings.smoothness, DEFAULT_SMOOTHNESS);
    }

    #[test]
    fn test_save_failure_is_absorbed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should go makes the write fail
        let path = dir.path().join("settings.json");
        std::fs::create_dir_all(&path).unwrap();

        let store = SettingsStore::new(path);
        assert!(!store.save(&Settings::default()));
    }

    #[test]
    fn test_parameters_conversion() {
        let settings = Settings::default().with_parameters(Parameters {
            smoothness: 0.1,
            scroll_multiplier: 3.0,
            interval_ms: 4,
        });
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.parameters().interval_ms, 4);
        assert_eq!(settings.parameters().smoothness, 0.1);
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("Light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }
}
