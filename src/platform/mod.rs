// --- PLATFORM ---
// The OS surface the drag worker talks to, behind a trait so the state machine
// can run against an in-memory desktop in tests.

#[cfg(windows)]
pub mod win32;

use crate::geometry::{Rect, ScreenPoint};

/// Opaque reference to a top-level OS window. The worker never owns the window;
/// it may disappear at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

/// Minimum width/height a window accepts while being resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackSize {
    pub width: i32,
    pub height: i32,
}

/// Window queries and mutations used by the drag/resize controller.
///
/// Calls against a handle that has gone stale must be harmless: queries return
/// `None`/`false` and mutations do nothing.
pub trait Desktop {
    /// Topmost captioned, visible window under `point`.
    fn locate(&self, point: ScreenPoint) -> Option<WindowHandle>;

    fn is_window(&self, window: WindowHandle) -> bool;

    fn window_rect(&self, window: WindowHandle) -> Option<Rect>;

    fn is_maximized(&self, window: WindowHandle) -> bool;

    /// Restores a maximized window to its normal size.
    fn restore(&mut self, window: WindowHandle);

    fn min_track_size(&self, window: WindowHandle) -> TrackSize;

    /// Moves and resizes the window to `rect`, then forces a frame redraw.
    fn move_window(&mut self, window: WindowHandle, rect: Rect);

    fn bring_to_front(&mut self, window: WindowHandle);

    /// Direct (unbuffered) state of the gate modifier.
    fn modifier_held(&self) -> bool;
}
