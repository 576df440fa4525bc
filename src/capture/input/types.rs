use crate::capture::traits::ScreenPoint;

/// Raw delta reported for one physical wheel notch
pub const WHEEL_DELTA: i32 = 120;

/// Modifier keys held while a wheel event was raised
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub control: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        control: false,
        shift: false,
        alt: false,
    };

    pub fn any(&self) -> bool {
        self.control || self.shift || self.alt
    }
}

/// Vertical wheel event as seen by the hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelEvent {
    /// Signed delta in notch-scaled units; positive scrolls content up
    pub delta: i32,
    pub point: ScreenPoint,
    pub modifiers: Modifiers,
}

impl WheelEvent {
    pub fn new(delta: i32, point: ScreenPoint, modifiers: Modifiers) -> Self {
        Self {
            delta,
            point,
            modifiers,
        }
    }

    /// An unmodified event of `notches` wheel steps
    pub fn notches(notches: i32) -> Self {
        Self::new(notches * WHEEL_DELTA, ScreenPoint::default(), Modifiers::NONE)
    }
}

/// What the hook should do with the original event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookVerdict {
    /// Let the event reach its normal destination unchanged
    PassThrough,
    /// Suppress the event; a smoothed replacement will be injected
    Consumed,
}
