// --- OUTLINE WINDOW ---
// Layered, click-through, topmost window painted as a hollow accent-colored frame.

use super::accent::get_accent_color;
use super::OverlayRenderer;
use crate::geometry::{Rect, ScreenPoint};
use crate::platform::WindowHandle;
use crate::win_types::SendHwnd;
use anyhow::Context;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};
use std::sync::Once;
use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::*;
use windows::Win32::System::LibraryLoader::*;
use windows::Win32::UI::WindowsAndMessaging::*;

const WM_DWMCOLORIZATIONCOLORCHANGED: u32 = 0x0320;

/// Black is the color key: painted black pixels are fully transparent.
const COLOR_KEY: u32 = 0x0000_0000;
const NEAR_BLACK: u32 = 0x0001_0101;

static REGISTER_OUTLINE_CLASS: Once = Once::new();
static OUTLINE_COLOR: AtomicU32 = AtomicU32::new(super::accent::FALLBACK_ACCENT);
static OUTLINE_THICKNESS: AtomicI32 = AtomicI32::new(2);
/// Set when the config pins a color; accent changes are then ignored.
static COLOR_PINNED: AtomicBool = AtomicBool::new(false);

fn set_color(colorref: u32) {
    let color = if colorref == COLOR_KEY { NEAR_BLACK } else { colorref };
    OUTLINE_COLOR.store(color, Ordering::Relaxed);
}

pub struct OutlineWindow {
    hwnd: SendHwnd,
    target: Option<WindowHandle>,
}

impl OutlineWindow {
    /// Creates the hidden outline window on the calling thread, which must pump
    /// messages for it to paint.
    pub fn create(thickness: i32, pinned_color: Option<u32>) -> anyhow::Result<Self> {
        OUTLINE_THICKNESS.store(thickness, Ordering::Relaxed);
        match pinned_color {
            Some(color) => {
                COLOR_PINNED.store(true, Ordering::Relaxed);
                set_color(color);
            }
            None => {
                COLOR_PINNED.store(false, Ordering::Relaxed);
                set_color(get_accent_color());
            }
        }

        unsafe {
            let instance = GetModuleHandleW(None).context("GetModuleHandleW")?;
            let class_name = w!("WinMoveOutlineClass");

            REGISTER_OUTLINE_CLASS.call_once(|| {
                let wc = WNDCLASSW {
                    style: CS_HREDRAW | CS_VREDRAW,
                    lpfnWndProc: Some(outline_wnd_proc),
                    hInstance: instance.into(),
                    lpszClassName: class_name,
                    ..Default::default()
                };
                let _ = RegisterClassW(&wc);
            });

            let hwnd = CreateWindowExW(
                WS_EX_LAYERED
                    | WS_EX_TRANSPARENT
                    | WS_EX_TOOLWINDOW
                    | WS_EX_TOPMOST
                    | WS_EX_NOACTIVATE,
                class_name,
                w!("WinMoveOutline"),
                WS_POPUP,
                0,
                0,
                0,
                0,
                None,
                None,
                Some(instance.into()),
                None,
            )
            .context("creating outline window")?;

            SetLayeredWindowAttributes(hwnd, COLORREF(COLOR_KEY), 0, LWA_COLORKEY)
                .context("SetLayeredWindowAttributes")?;

            crate::log_info!("[Overlay] Outline window created");
            Ok(OutlineWindow {
                hwnd: SendHwnd(hwnd),
                target: None,
            })
        }
    }

    pub fn hwnd(&self) -> SendHwnd {
        self.hwnd
    }

    fn draw(&self, rect: Rect) {
        let rect = rect.normalized();
        unsafe {
            // Async: the window belongs to the UI thread and the worker must never
            // wait on it.
            let _ = SetWindowPos(
                self.hwnd.0,
                Some(HWND_TOPMOST),
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                SWP_NOACTIVATE | SWP_SHOWWINDOW | SWP_ASYNCWINDOWPOS,
            );
        }
    }

    fn release(&mut self) {
        self.target = None;
    }
}

impl OverlayRenderer for OutlineWindow {
    fn start_drag(&mut self, target: WindowHandle, _point: ScreenPoint, outline: Rect) {
        self.target = Some(target);
        self.draw(outline);
    }

    fn start_resize(&mut self, target: WindowHandle, _point: ScreenPoint, outline: Rect) {
        self.target = Some(target);
        self.draw(outline);
    }

    fn perform_drag(&mut self, _point: ScreenPoint, outline: Rect) {
        if self.target.is_some() {
            self.draw(outline);
        }
    }

    fn perform_resize(&mut self, _point: ScreenPoint, outline: Rect) {
        if self.target.is_some() {
            self.draw(outline);
        }
    }

    fn stop_drag(&mut self) {
        self.release();
    }

    fn stop_resize(&mut self) {
        self.release();
    }

    fn hide(&mut self) {
        unsafe {
            let _ = ShowWindowAsync(self.hwnd.0, SW_HIDE);
        }
    }
}

unsafe extern "system" fn outline_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        match msg {
            WM_PAINT => {
                let mut ps = PAINTSTRUCT::default();
                let hdc = BeginPaint(hwnd, &mut ps);

                let mut client = RECT::default();
                let _ = GetClientRect(hwnd, &mut client);

                let background = CreateSolidBrush(COLORREF(COLOR_KEY));
                FillRect(hdc, &client, background);
                let _ = DeleteObject(background.into());

                let pen = CreatePen(
                    PS_INSIDEFRAME,
                    OUTLINE_THICKNESS.load(Ordering::Relaxed),
                    COLORREF(OUTLINE_COLOR.load(Ordering::Relaxed)),
                );
                let old_pen = SelectObject(hdc, pen.into());
                let old_brush = SelectObject(hdc, GetStockObject(NULL_BRUSH));

                let _ = Rectangle(hdc, client.left, client.top, client.right, client.bottom);

                SelectObject(hdc, old_pen);
                SelectObject(hdc, old_brush);
                let _ = DeleteObject(pen.into());

                let _ = EndPaint(hwnd, &ps);
                LRESULT(0)
            }
            WM_ERASEBKGND => LRESULT(1),
            WM_DWMCOLORIZATIONCOLORCHANGED => {
                if !COLOR_PINNED.load(Ordering::Relaxed) {
                    set_color(get_accent_color());
                    let _ = InvalidateRect(Some(hwnd), None, true);
                }
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
