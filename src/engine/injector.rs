//! Synthetic wheel delivery to the window under the pointer

use crate::capture::traits::WheelPlatform;
use crate::engine::error::InjectionFailure;
use std::sync::Arc;

/// Posts smoothed wheel steps to whatever window sits under the cursor.
///
/// The target is resolved on every call, so scrolling follows the pointer
/// rather than keyboard focus.
#[derive(Clone)]
pub struct EventInjector {
    platform: Arc<dyn WheelPlatform>,
}

impl EventInjector {
    pub fn new(platform: Arc<dyn WheelPlatform>) -> Self {
        Self { platform }
    }

    pub fn inject(&self, amount: i32) -> Result<(), InjectionFailure> {
        let point = self
            .platform
            .cursor_position()
            .ok_or(InjectionFailure::NoCursor)?;
        let window = self
            .platform
            .window_at_point(point)
            .ok_or(InjectionFailure::NoWindow)?;
        self.platform.post_wheel_event(window, amount, point)
    }
}
