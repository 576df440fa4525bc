//! In-memory platform used by the unit tests

use crate::capture::input::interceptor::InputInterceptor;
use crate::capture::input::types::{HookVerdict, Modifiers, WheelEvent};
use crate::capture::traits::{HookHandle, HookRegistration, ScreenPoint, WheelPlatform, WindowId};
use crate::engine::error::{HookInstallError, InjectionFailure};
use parking_lot::Mutex;
use std::sync::mpsc;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostedWheel {
    pub window: WindowId,
    pub delta: i32,
    pub point: ScreenPoint,
}

#[derive(Default)]
struct MockState {
    interceptor: Option<Arc<InputInterceptor>>,
    installs: usize,
    active: usize,
    fail_install: bool,
    cursor: Option<ScreenPoint>,
    window: Option<WindowId>,
    posts: Vec<PostedWheel>,
    /// Posted events are also seen by the hook, like hardware-level injection
    loopback: bool,
    release_gate: Option<(mpsc::Sender<()>, mpsc::Receiver<()>)>,
}

/// Holds the next hook release at its start until `resume` is signalled
pub struct ReleaseGate {
    pub entered: mpsc::Receiver<()>,
    pub resume: mpsc::Sender<()>,
}

pub struct MockPlatform {
    state: Arc<Mutex<MockState>>,
}

impl MockPlatform {
    pub const WINDOW: WindowId = WindowId(0x1234);
    pub const CURSOR: ScreenPoint = ScreenPoint::new(640, 360);

    pub fn new() -> Self {
        let state = MockState {
            cursor: Some(Self::CURSOR),
            window: Some(Self::WINDOW),
            ..MockState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Deliver a wheel event the way the OS hook would.
    /// Returns `None` when no hook is installed.
    pub fn fire(&self, event: WheelEvent) -> Option<HookVerdict> {
        let interceptor = self.state.lock().interceptor.clone();
        interceptor.map(|i| i.handle_event(&event))
    }

    pub fn set_window(&self, window: Option<WindowId>) {
        self.state.lock().window = window;
    }

    pub fn set_fail_install(&self, fail: bool) {
        self.state.lock().fail_install = fail;
    }

    pub fn set_loopback(&self, loopback: bool) {
        self.state.lock().loopback = loopback;
    }

    pub fn pause_next_release(&self) -> ReleaseGate {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (resume_tx, resume_rx) = mpsc::channel();
        self.state.lock().release_gate = Some((entered_tx, resume_rx));
        ReleaseGate {
            entered: entered_rx,
            resume: resume_tx,
        }
    }

    pub fn installs(&self) -> usize {
        self.state.lock().installs
    }

    pub fn active_hooks(&self) -> usize {
        self.state.lock().active
    }

    pub fn posts(&self) -> Vec<PostedWheel> {
        self.state.lock().posts.clone()
    }

    pub fn total_posted(&self) -> i32 {
        self.state.lock().posts.iter().map(|p| p.delta).sum()
    }
}

struct MockRegistration {
    state: Arc<Mutex<MockState>>,
    released: bool,
}

impl HookRegistration for MockRegistration {
    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let gate = self.state.lock().release_gate.take();
        if let Some((entered, resume)) = gate {
            let _ = entered.send(());
            let _ = resume.recv();
        }

        let mut state = self.state.lock();
        state.active -= 1;
        state.interceptor = None;
    }
}

impl WheelPlatform for MockPlatform {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn install_wheel_hook(
        &self,
        interceptor: Arc<InputInterceptor>,
    ) -> Result<HookHandle, HookInstallError> {
        let mut state = self.state.lock();
        if state.fail_install {
            return Err(HookInstallError::Os("mock install failure".to_string()));
        }
        if state.active > 0 {
            return Err(HookInstallError::AlreadyInstalled);
        }
        state.installs += 1;
        state.active += 1;
        state.interceptor = Some(interceptor);

        Ok(HookHandle::new(Box::new(MockRegistration {
            state: self.state.clone(),
            released: false,
        })))
    }

    fn cursor_position(&self) -> Option<ScreenPoint> {
        self.state.lock().cursor
    }

    fn window_at_point(&self, _point: ScreenPoint) -> Option<WindowId> {
        self.state.lock().window
    }

    // Posts are recorded; only in loopback mode do they reach the hook
    fn post_wheel_event(
        &self,
        window: WindowId,
        delta: i32,
        point: ScreenPoint,
    ) -> Result<(), InjectionFailure> {
        let hook = {
            let mut state = self.state.lock();
            state.posts.push(PostedWheel {
                window,
                delta,
                point,
            });
            if state.loopback {
                state.interceptor.clone()
            } else {
                None
            }
        };

        if let Some(interceptor) = hook {
            interceptor.handle_event(&WheelEvent::new(delta, point, Modifiers::NONE));
        }
        Ok(())
    }
}
