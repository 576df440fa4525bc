//! Platform-specific wheel capture and injection
//!
//! This module defines the capability boundary the engine depends on and
//! provides the implementation for each supported platform.

pub mod input;
pub mod traits;
pub mod unsupported;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(test)]
pub mod mock;

use std::sync::Arc;

pub use input::{HookVerdict, InputInterceptor, Modifiers, WheelEvent};
pub use traits::{HookHandle, HookRegistration, ScreenPoint, WheelPlatform, WindowId};

/// The backend for the platform this binary was built for
pub fn native_platform() -> Arc<dyn WheelPlatform> {
    #[cfg(target_os = "windows")]
    {
        Arc::new(self::windows::WindowsPlatform)
    }

    #[cfg(not(target_os = "windows"))]
    {
        Arc::new(unsupported::UnsupportedPlatform)
    }
}
