//! Fallback for targets without a wheel hook backend

use crate::capture::input::interceptor::InputInterceptor;
use crate::capture::traits::{HookHandle, ScreenPoint, WheelPlatform, WindowId};
use crate::engine::error::{HookInstallError, InjectionFailure};
use std::sync::Arc;

/// Reports every capability as unavailable; `Start()` fails with
/// [`HookInstallError::Unsupported`].
#[derive(Debug, Default)]
pub struct UnsupportedPlatform;

impl WheelPlatform for UnsupportedPlatform {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn install_wheel_hook(
        &self,
        _interceptor: Arc<InputInterceptor>,
    ) -> Result<HookHandle, HookInstallError> {
        Err(HookInstallError::Unsupported)
    }

    fn cursor_position(&self) -> Option<ScreenPoint> {
        None
    }

    fn window_at_point(&self, _point: ScreenPoint) -> Option<WindowId> {
        None
    }

    fn post_wheel_event(
        &self,
        _window: WindowId,
        _delta: i32,
        _point: ScreenPoint,
    ) -> Result<(), InjectionFailure> {
        Err(InjectionFailure::NoWindow)
    }
}
