// --- WIN32 DESKTOP ---
// Window locator, modifier polling and geometry calls on real windows.

use super::{Desktop, TrackSize, WindowHandle};
use crate::config::ModifierKey;
use crate::geometry::{Rect, ScreenPoint};
use windows::Win32::Foundation::{HWND, LPARAM, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{RedrawWindow, RDW_FRAME, RDW_INVALIDATE, RDW_UPDATENOW};
use windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;
use windows::Win32::UI::WindowsAndMessaging::{
    GetParent, GetSystemMetrics, GetWindowLongW, GetWindowRect, IsWindow, IsWindowVisible,
    IsZoomed, MoveWindow, SendMessageTimeoutW, SetForegroundWindow, ShowWindow,
    WindowFromPoint, GWL_STYLE, MINMAXINFO, SMTO_ABORTIFHUNG, SM_CXMINTRACK, SM_CYMINTRACK,
    SW_RESTORE, WM_GETMINMAXINFO, WS_CAPTION,
};

/// WM_GETMINMAXINFO is answered by the target app; don't let a hung one stall the worker.
const MINMAXINFO_TIMEOUT_MS: u32 = 50;

pub fn key_down(vk: i32) -> bool {
    unsafe { (GetAsyncKeyState(vk) as u16 & 0x8000) != 0 }
}

/// Real-time state of the configured gate modifier.
pub fn modifier_held(modifier: ModifierKey) -> bool {
    modifier.vk_codes().iter().any(|&vk| key_down(i32::from(vk)))
}

/// Walks parent/owner links up to the top-level window.
fn top_level(mut hwnd: HWND) -> HWND {
    unsafe {
        while let Ok(parent) = GetParent(hwnd) {
            if parent.is_invalid() {
                break;
            }
            hwnd = parent;
        }
    }
    hwnd
}

/// Topmost visible, captioned window under `point`.
pub fn locate_window(point: ScreenPoint) -> Option<WindowHandle> {
    unsafe {
        let hit = WindowFromPoint(POINT::from(point));
        if hit.is_invalid() {
            return None;
        }
        let hwnd = top_level(hit);
        let style = GetWindowLongW(hwnd, GWL_STYLE) as u32;
        if IsWindow(Some(hwnd)).as_bool()
            && IsWindowVisible(hwnd).as_bool()
            && (style & WS_CAPTION.0) != 0
        {
            Some(WindowHandle::from(hwnd))
        } else {
            None
        }
    }
}

pub struct Win32Desktop {
    modifier: ModifierKey,
}

impl Win32Desktop {
    pub fn new(modifier: ModifierKey) -> Self {
        Win32Desktop { modifier }
    }
}

impl Desktop for Win32Desktop {
    fn locate(&self, point: ScreenPoint) -> Option<WindowHandle> {
        locate_window(point)
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        unsafe { IsWindow(Some(HWND::from(window))).as_bool() }
    }

    fn window_rect(&self, window: WindowHandle) -> Option<Rect> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(HWND::from(window), &mut rect) }
            .ok()
            .map(|_| Rect::from(rect).normalized())
    }

    fn is_maximized(&self, window: WindowHandle) -> bool {
        unsafe { IsZoomed(HWND::from(window)).as_bool() }
    }

    fn restore(&mut self, window: WindowHandle) {
        unsafe {
            let _ = ShowWindow(HWND::from(window), SW_RESTORE);
        }
    }

    fn min_track_size(&self, window: WindowHandle) -> TrackSize {
        let mut info = MINMAXINFO::default();
        unsafe {
            let _ = SendMessageTimeoutW(
                HWND::from(window),
                WM_GETMINMAXINFO,
                WPARAM(0),
                LPARAM(&mut info as *mut MINMAXINFO as isize),
                SMTO_ABORTIFHUNG,
                MINMAXINFO_TIMEOUT_MS,
                None,
            );
        }
        let (mut width, mut height) = (info.ptMinTrackSize.x, info.ptMinTrackSize.y);
        if width <= 0 {
            width = unsafe { GetSystemMetrics(SM_CXMINTRACK) };
        }
        if height <= 0 {
            height = unsafe { GetSystemMetrics(SM_CYMINTRACK) };
        }
        TrackSize { width, height }
    }

    fn move_window(&mut self, window: WindowHandle, rect: Rect) {
        let hwnd = HWND::from(window);
        unsafe {
            let _ = MoveWindow(
                hwnd,
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                true,
            );
            let _ = RedrawWindow(
                Some(hwnd),
                None,
                None,
                RDW_INVALIDATE | RDW_UPDATENOW | RDW_FRAME,
            );
        }
    }

    fn bring_to_front(&mut self, window: WindowHandle) {
        unsafe {
            let _ = SetForegroundWindow(HWND::from(window));
        }
    }

    fn modifier_held(&self) -> bool {
        modifier_held(self.modifier)
    }
}
