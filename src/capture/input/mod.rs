//! Wheel input interception
//!
//! Types describing hooked wheel events and the interceptor that decides
//! whether each one is smoothed or passed through.

pub mod interceptor;
pub mod types;

pub use interceptor::{InputInterceptor, InterceptorStats};
pub use types::{HookVerdict, Modifiers, WheelEvent, WHEEL_DELTA};
