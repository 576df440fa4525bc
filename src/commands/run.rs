//! Foreground engine runner

use crate::capture::{native_platform, WheelPlatform};
use crate::engine::params::Parameters;
use crate::engine::{EngineResult, SmoothScrollEngine};
use crate::settings::SettingsStore;
use std::future::Future;
use std::sync::Arc;

/// Command-line overrides applied on top of the saved settings
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterOverrides {
    pub smoothness: Option<f64>,
    pub scroll_multiplier: Option<f64>,
    pub interval_ms: Option<u32>,
}

impl ParameterOverrides {
    pub fn apply(&self, params: Parameters) -> Parameters {
        Parameters {
            smoothness: self.smoothness.unwrap_or(params.smoothness),
            scroll_multiplier: self.scroll_multiplier.unwrap_or(params.scroll_multiplier),
            interval_ms: self.interval_ms.unwrap_or(params.interval_ms),
        }
    }
}

/// Run the engine with the native backend until Ctrl+C.
pub async fn run(store: &SettingsStore, overrides: ParameterOverrides) -> EngineResult<()> {
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };
    run_until(native_platform(), store, overrides, shutdown).await
}

/// Run the engine on `platform` until `shutdown` resolves.
pub async fn run_until(
    platform: Arc<dyn WheelPlatform>,
    store: &SettingsStore,
    overrides: ParameterOverrides,
    shutdown: impl Future<Output = ()>,
) -> EngineResult<()> {
    let settings = store.load();
    let params = overrides.apply(settings.parameters());

    let engine = SmoothScrollEngine::new(platform, params)?;
    engine.start()?;

    tracing::info!("Smooth scrolling active; press Ctrl+C to exit");
    shutdown.await;

    engine.stop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::mock::MockPlatform;
    use crate::capture::unsupported::UnsupportedPlatform;
    use crate::engine::error::{HookInstallError, ParameterError};
    use crate::engine::EngineError;
    use crate::settings::Settings;

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let overrides = ParameterOverrides {
            scroll_multiplier: Some(2.0),
            ..ParameterOverrides::default()
        };
        let params = overrides.apply(Parameters::default());
        assert_eq!(params.scroll_multiplier, 2.0);
        assert_eq!(params.smoothness, Parameters::default().smoothness);
    }

    #[tokio::test]
    async fn test_run_until_starts_and_stops_engine() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let platform = Arc::new(MockPlatform::new());

        let observed = platform.clone();
        let shutdown = async move {
            assert_eq!(observed.active_hooks(), 1, "hook installed while running");
        };

        run_until(platform.clone(), &store, ParameterOverrides::default(), shutdown)
            .await
            .unwrap();

        assert_eq!(platform.active_hooks(), 0);
        assert_eq!(store.load(), Settings::default(), "running never writes settings");
    }

    #[tokio::test]
    async fn test_run_until_reports_invalid_override() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let overrides = ParameterOverrides {
            smoothness: Some(0.0),
            ..ParameterOverrides::default()
        };

        let result = run_until(Arc::new(MockPlatform::new()), &store, overrides, async {}).await;
        assert!(matches!(
            result,
            Err(EngineError::Parameter(ParameterError::Smoothness(_)))
        ));
    }

    #[tokio::test]
    async fn test_run_until_reports_hook_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        let result = run_until(
            Arc::new(UnsupportedPlatform),
            &store,
            ParameterOverrides::default(),
            async {},
        )
        .await;
        assert!(matches!(
            result,
            Err(EngineError::HookInstall(HookInstallError::Unsupported))
        ));
    }
}
