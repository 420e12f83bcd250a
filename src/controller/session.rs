// --- SESSION ---
// Working geometry of one drag or resize.

use crate::geometry::{Rect, ScreenPoint};
use crate::platform::{TrackSize, WindowHandle};

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub target: WindowHandle,
    /// Bounds read from the window when the session began.
    pub start_rect: Rect,
    pub last_pointer: ScreenPoint,
    /// Proposed bounds, committed to the window when the session ends.
    pub outline: Rect,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

/// Which axes a resize step accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisUpdate {
    pub width: bool,
    pub height: bool,
}

impl Session {
    pub fn new(target: WindowHandle, rect: Rect, pointer: ScreenPoint) -> Self {
        let (anchor_x, anchor_y) = rect.anchor_of(pointer);
        Session {
            target,
            start_rect: rect,
            last_pointer: pointer,
            outline: rect,
            anchor_x,
            anchor_y,
        }
    }

    /// Session for a window that was maximized at `maximized` and has just been
    /// restored to `restored`. The outline is the restored rect shifted so the
    /// pointer keeps its relative position inside it.
    pub fn from_restored(
        target: WindowHandle,
        maximized: Rect,
        restored: Rect,
        pointer: ScreenPoint,
    ) -> Self {
        let (anchor_x, anchor_y) = maximized.anchor_of(pointer);
        let anchor = restored.point_at(anchor_x, anchor_y);
        let (dx, dy) = pointer.delta_from(anchor);
        Session {
            target,
            start_rect: maximized,
            last_pointer: pointer,
            outline: restored.offset(dx, dy),
            anchor_x,
            anchor_y,
        }
    }

    /// Translates the outline by the pointer delta.
    pub fn drag_to(&mut self, pointer: ScreenPoint) {
        let (dx, dy) = pointer.delta_from(self.last_pointer);
        self.outline = self.outline.offset(dx, dy);
        self.last_pointer = pointer;
    }

    /// Grows or shrinks the outline's bottom-right corner by the pointer delta.
    /// Each axis is accepted only if it stays at or above the minimum track
    /// size; a rejected axis keeps its old pointer reference.
    pub fn resize_to(&mut self, pointer: ScreenPoint, min: TrackSize) -> AxisUpdate {
        let (dx, dy) = pointer.delta_from(self.last_pointer);
        let mut update = AxisUpdate::default();

        if self.outline.width() + dx >= min.width {
            self.outline.right += dx;
            self.last_pointer.x = pointer.x;
            update.width = true;
        }
        if self.outline.height() + dy >= min.height {
            self.outline.bottom += dy;
            self.last_pointer.y = pointer.y;
            update.height = true;
        }
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HWND_A: WindowHandle = WindowHandle(0xA);

    #[test]
    fn test_drag_translates_by_delta() {
        let mut s = Session::new(HWND_A, Rect::new(100, 100, 500, 400), ScreenPoint::new(150, 120));
        s.drag_to(ScreenPoint::new(160, 100));
        assert_eq!(s.outline, Rect::new(110, 80, 510, 380));
        s.drag_to(ScreenPoint::new(60, 100));
        assert_eq!(s.outline, Rect::new(10, 80, 410, 380));
        assert_eq!(s.last_pointer, ScreenPoint::new(60, 100));
        assert_eq!(s.start_rect, Rect::new(100, 100, 500, 400));
    }

    #[test]
    fn test_resize_rejects_both_axes_below_minimum() {
        let min = TrackSize { width: 200, height: 100 };
        let start = ScreenPoint::new(300, 250);
        let mut s = Session::new(HWND_A, Rect::new(100, 100, 300, 250), start);

        let update = s.resize_to(ScreenPoint::new(250, 170), min);
        assert_eq!(update, AxisUpdate { width: false, height: false });
        assert_eq!(s.outline, Rect::new(100, 100, 300, 250));
        assert_eq!(s.last_pointer, start);
    }

    #[test]
    fn test_resize_accepts_growth_on_both_axes() {
        let min = TrackSize { width: 200, height: 100 };
        let mut s = Session::new(HWND_A, Rect::new(100, 100, 300, 250), ScreenPoint::new(300, 250));

        let update = s.resize_to(ScreenPoint::new(310, 260), min);
        assert_eq!(update, AxisUpdate { width: true, height: true });
        assert_eq!(s.outline, Rect::new(100, 100, 310, 260));
        assert_eq!(s.last_pointer, ScreenPoint::new(310, 260));
    }

    #[test]
    fn test_resize_axes_are_independent() {
        let min = TrackSize { width: 200, height: 100 };
        let mut s = Session::new(HWND_A, Rect::new(0, 0, 400, 150), ScreenPoint::new(400, 150));

        // Width shrinks fine, height would drop to 70.
        let update = s.resize_to(ScreenPoint::new(350, 70), min);
        assert_eq!(update, AxisUpdate { width: true, height: false });
        assert_eq!(s.outline, Rect::new(0, 0, 350, 150));
        assert_eq!(s.last_pointer, ScreenPoint::new(350, 150));

        // The rejected axis measures the next delta from its old reference.
        let update = s.resize_to(ScreenPoint::new(350, 30), min);
        assert_eq!(update, AxisUpdate { width: true, height: false });
        assert_eq!(s.outline.height(), 150);
        let update = s.resize_to(ScreenPoint::new(350, 170), min);
        assert_eq!(update, AxisUpdate { width: true, height: true });
        assert_eq!(s.outline, Rect::new(0, 0, 350, 170));
    }

    #[test]
    fn test_restored_outline_keeps_relative_grab_point() {
        let maximized = Rect::new(0, 0, 1920, 1080);
        let restored = Rect::new(100, 100, 900, 700);
        let pointer = ScreenPoint::new(480, 540);

        let s = Session::from_restored(HWND_A, maximized, restored, pointer);
        assert!((s.anchor_x - 0.25).abs() < 1e-9);
        assert!((s.anchor_y - 0.5).abs() < 1e-9);
        assert_eq!(s.outline.width(), 800);
        assert_eq!(s.outline.height(), 600);
        assert_eq!(s.outline, Rect::new(280, 240, 1080, 840));

        let (ax, ay) = s.outline.anchor_of(pointer);
        assert!((ax - 0.25).abs() < 1e-9);
        assert!((ay - 0.5).abs() < 1e-9);
        assert_eq!(s.last_pointer, pointer);
    }
}
