//! Windows backend
//!
//! Interception uses a `WH_MOUSE_LL` hook; injection posts `WM_MOUSEWHEEL`
//! straight into the target window's queue, which low-level hooks never see.

pub mod hook;

use crate::capture::input::interceptor::InputInterceptor;
use crate::capture::traits::{HookHandle, ScreenPoint, WheelPlatform, WindowId};
use crate::engine::error::{HookInstallError, InjectionFailure};
use hook::WheelHook;
use std::sync::Arc;
use windows::Win32::Foundation::{HWND, LPARAM, POINT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, PostMessageW, WindowFromPoint, WM_MOUSEWHEEL};

#[derive(Debug, Default)]
pub struct WindowsPlatform;

impl WheelPlatform for WindowsPlatform {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn install_wheel_hook(
        &self,
        interceptor: Arc<InputInterceptor>,
    ) -> Result<HookHandle, HookInstallError> {
        let hook = WheelHook::install(interceptor)?;
        Ok(HookHandle::new(Box::new(hook)))
    }

    fn cursor_position(&self) -> Option<ScreenPoint> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point) }.ok()?;
        Some(ScreenPoint::new(point.x, point.y))
    }

    fn window_at_point(&self, point: ScreenPoint) -> Option<WindowId> {
        let hwnd = unsafe { WindowFromPoint(POINT { x: point.x, y: point.y }) };
        if hwnd.0.is_null() {
            None
        } else {
            Some(WindowId(hwnd.0 as isize))
        }
    }

    fn post_wheel_event(
        &self,
        window: WindowId,
        delta: i32,
        point: ScreenPoint,
    ) -> Result<(), InjectionFailure> {
        let hwnd = HWND(window.0 as *mut _);
        let (wparam, lparam) = pack_wheel_message(delta, point);
        unsafe { PostMessageW(hwnd, WM_MOUSEWHEEL, wparam, lparam) }
            .map_err(|e| InjectionFailure::PostFailed(e.to_string()))
    }
}

/// `WM_MOUSEWHEEL` parameters: delta in the high word of wParam (no key-state
/// flags), screen coordinates packed into lParam.
fn pack_wheel_message(delta: i32, point: ScreenPoint) -> (WPARAM, LPARAM) {
    let delta = delta.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
    let wparam = WPARAM((delta as u16 as usize) << 16);
    let lparam = LPARAM((((point.y as u16 as u32) << 16) | (point.x as u16 as u32)) as isize);
    (wparam, lparam)
}
