// --- INPUT CAPTURE ---
// Modifier-gated classification of system-wide mouse input.

mod channel;
#[cfg(windows)]
mod hook;
mod registration;

pub use channel::{EventChannel, CHANNEL_CAPACITY};
#[cfg(windows)]
pub use hook::MouseHook;

use crate::geometry::ScreenPoint;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Callbacks slower than this are counted by the latency watchdog.
pub const HOOK_BUDGET: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ButtonKind {
    PrimaryDown = 1,
    PrimaryUp = 2,
    SecondaryDown = 3,
    SecondaryUp = 4,
}

impl ButtonKind {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::PrimaryDown),
            2 => Some(Self::PrimaryUp),
            3 => Some(Self::SecondaryDown),
            4 => Some(Self::SecondaryUp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    pub kind: ButtonKind,
    pub position: ScreenPoint,
}

/// A mouse message after translation from the OS representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseInput {
    Move(ScreenPoint),
    Button(ButtonEvent),
    /// Wheel, middle/X buttons and anything else we never touch.
    Other,
}

/// What the hook tells the OS to do with the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    PassThrough,
    Suppress,
}

/// Routes one input through the modifier gate. Must stay allocation- and lock-free:
/// it runs inside the OS input dispatch.
pub fn route(channel: &EventChannel, modifier_held: bool, input: MouseInput) -> Disposition {
    if !modifier_held {
        return Disposition::PassThrough;
    }
    match input {
        MouseInput::Move(p) => {
            channel.store_move(p);
            Disposition::PassThrough
        }
        MouseInput::Button(event) => {
            channel.push_button(event);
            Disposition::Suppress
        }
        MouseInput::Other => Disposition::PassThrough,
    }
}

/// Counters bumped from the hook callback, reported by the worker.
#[derive(Debug, Default)]
pub struct HookStats {
    slow_calls: AtomicU64,
    slowest_micros: AtomicU64,
}

impl HookStats {
    pub const fn new() -> Self {
        HookStats {
            slow_calls: AtomicU64::new(0),
            slowest_micros: AtomicU64::new(0),
        }
    }

    pub fn record(&self, elapsed: Duration) {
        if elapsed <= HOOK_BUDGET {
            return;
        }
        self.slow_calls.fetch_add(1, Ordering::Relaxed);
        let micros = elapsed.as_micros().min(u128::from(u64::MAX)) as u64;
        self.slowest_micros.fetch_max(micros, Ordering::Relaxed);
    }

    /// Returns `(slow_calls, slowest_micros)` accumulated since the last call.
    pub fn take(&self) -> (u64, u64) {
        (
            self.slow_calls.swap(0, Ordering::Relaxed),
            self.slowest_micros.swap(0, Ordering::Relaxed),
        )
    }
}
