//! Low-level mouse hook (WH_MOUSE_LL)
//!
//! The hook is installed from a dedicated thread that pumps a message loop; the
//! OS calls `wheel_hook_proc` on that same thread, so the interceptor is reached
//! through a thread-local. Releasing the registration posts `WM_QUIT` to the
//! thread, which unhooks and exits.

use crate::capture::input::interceptor::InputInterceptor;
use crate::capture::input::types::{HookVerdict, Modifiers, WheelEvent};
use crate::capture::traits::{HookRegistration, ScreenPoint};
use crate::engine::error::HookInstallError;
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use windows::core::PCWSTR;
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Input::KeyboardAndMouse::{GetAsyncKeyState, VK_CONTROL, VK_MENU, VK_SHIFT};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PeekMessageW, PostThreadMessageW,
    SetWindowsHookExW, TranslateMessage, UnhookWindowsHookEx, HHOOK, MSG, MSLLHOOKSTRUCT,
    PM_NOREMOVE, WH_MOUSE_LL, WM_MOUSEWHEEL, WM_QUIT, WM_USER,
};

const HC_ACTION: i32 = 0;

/// One wheel hook per process
static HOOK_ACTIVE: AtomicBool = AtomicBool::new(false);

thread_local! {
    static INTERCEPTOR: RefCell<Option<Arc<InputInterceptor>>> = const { RefCell::new(None) };
}

pub struct WheelHook {
    thread_id: u32,
    thread: Option<JoinHandle<()>>,
}

impl WheelHook {
    pub fn install(interceptor: Arc<InputInterceptor>) -> Result<Self, HookInstallError> {
        if HOOK_ACTIVE.swap(true, Ordering::SeqCst) {
            return Err(HookInstallError::AlreadyInstalled);
        }

        let (ready_tx, ready_rx) = mpsc::channel();
        let spawned = std::thread::Builder::new()
            .name("smooth-scroll-hook".into())
            .spawn(move || run_hook_thread(interceptor, ready_tx));

        let thread = match spawned {
            Ok(thread) => thread,
            Err(e) => {
                HOOK_ACTIVE.store(false, Ordering::SeqCst);
                return Err(HookInstallError::ThreadSpawn(e));
            }
        };

        let outcome = ready_rx.recv().unwrap_or_else(|_| {
            Err(HookInstallError::Os(
                "hook thread exited before reporting".to_string(),
            ))
        });

        match outcome {
            Ok(thread_id) => Ok(Self {
                thread_id,
                thread: Some(thread),
            }),
            Err(e) => {
                let _ = thread.join();
                HOOK_ACTIVE.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }
}

impl HookRegistration for WheelHook {
    fn release(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };

        if let Err(e) = unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) } {
            // The thread already left its loop; joining below still reclaims it
            tracing::warn!("Failed to signal hook thread: {}", e);
        }
        if thread.join().is_err() {
            tracing::error!("Hook thread panicked during shutdown");
        }
        HOOK_ACTIVE.store(false, Ordering::SeqCst);
    }
}

fn run_hook_thread(
    interceptor: Arc<InputInterceptor>,
    ready: mpsc::Sender<Result<u32, HookInstallError>>,
) {
    let mut msg = MSG::default();

    unsafe {
        // Create this thread's message queue before anyone can post WM_QUIT to it
        let _ = PeekMessageW(&mut msg, HWND::default(), WM_USER, WM_USER, PM_NOREMOVE);
    }

    INTERCEPTOR.with(|slot| *slot.borrow_mut() = Some(interceptor));

    let installed = unsafe {
        GetModuleHandleW(PCWSTR::null()).and_then(|module| {
            SetWindowsHookExW(WH_MOUSE_LL, Some(wheel_hook_proc), HINSTANCE::from(module), 0)
        })
    };

    let hook = match installed {
        Ok(hook) => hook,
        Err(e) => {
            INTERCEPTOR.with(|slot| slot.borrow_mut().take());
            let _ = ready.send(Err(HookInstallError::Os(e.to_string())));
            return;
        }
    };

    let _ = ready.send(Ok(unsafe { GetCurrentThreadId() }));
    tracing::info!("Wheel hook installed");

    unsafe {
        // 0 = WM_QUIT, -1 = error
        while GetMessageW(&mut msg, HWND::default(), 0, 0).0 > 0 {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        if let Err(e) = UnhookWindowsHookEx(hook) {
            tracing::warn!("UnhookWindowsHookEx failed: {}", e);
        }
    }

    INTERCEPTOR.with(|slot| slot.borrow_mut().take());
    tracing::info!("Wheel hook removed");
}

unsafe extern "system" fn wheel_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION && wparam.0 as u32 == WM_MOUSEWHEEL {
        let info = &*(lparam.0 as *const MSLLHOOKSTRUCT);
        let event = wheel_event(info, current_modifiers());
        let verdict = INTERCEPTOR.with(|slot| {
            slot.borrow()
                .as_ref()
                .map_or(HookVerdict::PassThrough, |i| i.handle_event(&event))
        });
        if verdict == HookVerdict::Consumed {
            return LRESULT(1);
        }
    }

    CallNextHookEx(HHOOK::default(), code, wparam, lparam)
}

/// Build the interceptor's view of a hooked wheel message.
///
/// Injected input from other software (`LLMHF_INJECTED`) is treated like any
/// other wheel event; our own steps are posted to window queues and never
/// reach this hook.
fn wheel_event(info: &MSLLHOOKSTRUCT, modifiers: Modifiers) -> WheelEvent {
    WheelEvent::new(
        wheel_delta(info.mouseData),
        ScreenPoint::new(info.pt.x, info.pt.y),
        modifiers,
    )
}

/// Signed wheel delta carried in the high word of `mouseData`
fn wheel_delta(mouse_data: u32) -> i32 {
    i32::from((mouse_data >> 16) as u16 as i16)
}

fn current_modifiers() -> Modifiers {
    let held = |vk: i32| unsafe { GetAsyncKeyState(vk) } < 0;
    Modifiers {
        control: held(VK_CONTROL.0 as i32),
        shift: held(VK_SHIFT.0 as i32),
        alt: held(VK_MENU.0 as i32),
    }
}
