// --- OVERLAY ---
// The outline indicator the drag worker drives while a drag or resize is live.

#[cfg(windows)]
mod accent;
#[cfg(windows)]
mod outline;

#[cfg(windows)]
pub use outline::OutlineWindow;

use crate::geometry::{Rect, ScreenPoint};
use crate::platform::WindowHandle;

/// Fire-and-forget commands issued by the controller. Implementations only
/// draw; they never decide geometry. Positioning commands carry the outline
/// rect the controller computed for the current pointer.
pub trait OverlayRenderer {
    fn start_drag(&mut self, target: WindowHandle, point: ScreenPoint, outline: Rect);
    fn start_resize(&mut self, target: WindowHandle, point: ScreenPoint, outline: Rect);
    fn perform_drag(&mut self, point: ScreenPoint, outline: Rect);
    fn perform_resize(&mut self, point: ScreenPoint, outline: Rect);
    fn stop_drag(&mut self);
    fn stop_resize(&mut self);
    fn hide(&mut self);
}
