// --- WIN TYPES ---
// Send-able wrappers around Win32 handles and conversions to crate geometry.

use crate::geometry::{Rect, ScreenPoint};
use crate::platform::WindowHandle;
use windows::Win32::Foundation::{HANDLE, HWND, POINT, RECT};

/// HWND that may cross threads. Window handles are process-global values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendHwnd(pub HWND);
unsafe impl Send for SendHwnd {}
unsafe impl Sync for SendHwnd {}

#[derive(Debug)]
pub struct SendHandle(pub HANDLE);
unsafe impl Send for SendHandle {}
unsafe impl Sync for SendHandle {}

impl From<HWND> for WindowHandle {
    fn from(hwnd: HWND) -> Self {
        WindowHandle(hwnd.0 as isize)
    }
}

impl From<WindowHandle> for HWND {
    fn from(handle: WindowHandle) -> Self {
        HWND(handle.0 as *mut _)
    }
}

impl From<POINT> for ScreenPoint {
    fn from(pt: POINT) -> Self {
        ScreenPoint { x: pt.x, y: pt.y }
    }
}

impl From<ScreenPoint> for POINT {
    fn from(p: ScreenPoint) -> Self {
        POINT { x: p.x, y: p.y }
    }
}

impl From<RECT> for Rect {
    fn from(r: RECT) -> Self {
        Rect::new(r.left, r.top, r.right, r.bottom)
    }
}

impl From<Rect> for RECT {
    fn from(r: Rect) -> Self {
        RECT {
            left: r.left,
            top: r.top,
            right: r.right,
            bottom: r.bottom,
        }
    }
}
