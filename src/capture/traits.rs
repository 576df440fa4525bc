//! Platform capability boundary
//!
//! Everything the engine needs from the operating system: installing the wheel
//! hook (and releasing it by dropping the returned handle), reading the cursor
//! position, resolving the window under a point and posting a wheel event to it.
//! A new target OS only has to implement [`WheelPlatform`].

use crate::capture::input::interceptor::InputInterceptor;
use crate::engine::error::{HookInstallError, InjectionFailure};
use std::fmt;
use std::sync::Arc;

/// Point in virtual-screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Opaque native window identifier (an `HWND` on Windows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub isize);

/// A live hook registration owned by the platform backend.
pub trait HookRegistration: Send {
    /// Remove the registration. Must be safe to call more than once.
    fn release(&mut self);
}

/// Owned hook registration; released when dropped.
pub struct HookHandle {
    registration: Box<dyn HookRegistration>,
}

impl HookHandle {
    pub fn new(registration: Box<dyn HookRegistration>) -> Self {
        Self { registration }
    }

    /// Release the registration now rather than at end of scope.
    pub fn release(mut self) {
        self.registration.release();
    }
}

impl Drop for HookHandle {
    fn drop(&mut self) {
        self.registration.release();
    }
}

impl fmt::Debug for HookHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HookHandle")
    }
}

/// OS primitives used by the engine.
///
/// `post_wheel_event` must deliver through a path the wheel hook does not see
/// (e.g. a window message queue), otherwise injected motion would be
/// re-accumulated.
pub trait WheelPlatform: Send + Sync {
    /// Human-readable backend name for logs
    fn name(&self) -> &'static str;

    /// Start delivering wheel events to `interceptor` until the handle is dropped.
    fn install_wheel_hook(
        &self,
        interceptor: Arc<InputInterceptor>,
    ) -> Result<HookHandle, HookInstallError>;

    fn cursor_position(&self) -> Option<ScreenPoint>;

    fn window_at_point(&self, point: ScreenPoint) -> Option<WindowId>;

    fn post_wheel_event(
        &self,
        window: WindowId,
        delta: i32,
        point: ScreenPoint,
    ) -> Result<(), InjectionFailure>;
}
