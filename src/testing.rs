// --- TEST DOUBLES ---
// In-memory desktop and a recording overlay for driving the controller in tests.

use crate::geometry::{Rect, ScreenPoint};
use crate::overlay::OverlayRenderer;
use crate::platform::{Desktop, TrackSize, WindowHandle};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct FakeWindow {
    pub rect: Rect,
    pub maximized: bool,
    /// Bounds the window takes when restored from maximized.
    pub restored: Rect,
    pub min_track: TrackSize,
    pub alive: bool,
}

impl FakeWindow {
    pub fn normal(rect: Rect) -> Self {
        FakeWindow {
            rect,
            maximized: false,
            restored: rect,
            min_track: TrackSize { width: 1, height: 1 },
            alive: true,
        }
    }

    pub fn maximized(rect: Rect, restored: Rect) -> Self {
        FakeWindow {
            maximized: true,
            restored,
            ..FakeWindow::normal(rect)
        }
    }

    pub fn with_min_track(mut self, min_track: TrackSize) -> Self {
        self.min_track = min_track;
        self
    }
}

#[derive(Default)]
struct DesktopState {
    /// Z-order, topmost first.
    windows: Vec<(WindowHandle, FakeWindow)>,
    modifier: bool,
    moves: Vec<(WindowHandle, Rect)>,
    raised: Vec<WindowHandle>,
}

/// Cloneable handle; clones share state so a test can inspect what the
/// controller did through its own copy.
#[derive(Clone, Default)]
pub struct FakeDesktop {
    state: Arc<Mutex<DesktopState>>,
}

impl FakeDesktop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_window(&self, handle: WindowHandle, window: FakeWindow) {
        self.state.lock().windows.push((handle, window));
    }

    pub fn close_window(&self, handle: WindowHandle) {
        if let Some((_, w)) = self.state.lock().windows.iter_mut().find(|(h, _)| *h == handle) {
            w.alive = false;
        }
    }

    pub fn set_modifier(&self, held: bool) {
        self.state.lock().modifier = held;
    }

    pub fn window(&self, handle: WindowHandle) -> FakeWindow {
        self.state
            .lock()
            .windows
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, w)| w.clone())
            .expect("unknown fake window")
    }

    pub fn moves(&self) -> Vec<(WindowHandle, Rect)> {
        self.state.lock().moves.clone()
    }

    pub fn raised(&self) -> Vec<WindowHandle> {
        self.state.lock().raised.clone()
    }

    fn with_live<T>(&self, handle: WindowHandle, f: impl FnOnce(&mut FakeWindow) -> T) -> Option<T> {
        let mut state = self.state.lock();
        state
            .windows
            .iter_mut()
            .find(|(h, w)| *h == handle && w.alive)
            .map(|(_, w)| f(w))
    }
}

impl Desktop for FakeDesktop {
    fn locate(&self, point: ScreenPoint) -> Option<WindowHandle> {
        self.state
            .lock()
            .windows
            .iter()
            .find(|(_, w)| {
                w.alive
                    && point.x >= w.rect.left
                    && point.x <= w.rect.right
                    && point.y >= w.rect.top
                    && point.y <= w.rect.bottom
            })
            .map(|(h, _)| *h)
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        self.with_live(window, |_| ()).is_some()
    }

    fn window_rect(&self, window: WindowHandle) -> Option<Rect> {
        self.with_live(window, |w| w.rect)
    }

    fn is_maximized(&self, window: WindowHandle) -> bool {
        self.with_live(window, |w| w.maximized).unwrap_or(false)
    }

    fn restore(&mut self, window: WindowHandle) {
        self.with_live(window, |w| {
            if w.maximized {
                w.maximized = false;
                w.rect = w.restored;
            }
        });
    }

    fn min_track_size(&self, window: WindowHandle) -> TrackSize {
        self.with_live(window, |w| w.min_track).unwrap_or_default()
    }

    fn move_window(&mut self, window: WindowHandle, rect: Rect) {
        if self.with_live(window, |w| w.rect = rect).is_some() {
            self.state.lock().moves.push((window, rect));
        }
    }

    fn bring_to_front(&mut self, window: WindowHandle) {
        if self.is_window(window) {
            self.state.lock().raised.push(window);
        }
    }

    fn modifier_held(&self) -> bool {
        self.state.lock().modifier
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayCommand {
    StartDrag {
        target: WindowHandle,
        point: ScreenPoint,
        outline: Rect,
    },
    StartResize {
        target: WindowHandle,
        point: ScreenPoint,
        outline: Rect,
    },
    PerformDrag {
        point: ScreenPoint,
        outline: Rect,
    },
    PerformResize {
        point: ScreenPoint,
        outline: Rect,
    },
    StopDrag,
    StopResize,
    Hide,
}

impl OverlayCommand {
    pub fn name(&self) -> &'static str {
        match self {
            OverlayCommand::StartDrag { .. } => "StartDrag",
            OverlayCommand::StartResize { .. } => "StartResize",
            OverlayCommand::PerformDrag { .. } => "PerformDrag",
            OverlayCommand::PerformResize { .. } => "PerformResize",
            OverlayCommand::StopDrag => "StopDrag",
            OverlayCommand::StopResize => "StopResize",
            OverlayCommand::Hide => "Hide",
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingOverlay {
    commands: Arc<Mutex<Vec<OverlayCommand>>>,
}

impl RecordingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<OverlayCommand> {
        self.commands.lock().clone()
    }

    fn push(&self, cmd: OverlayCommand) {
        self.commands.lock().push(cmd);
    }
}

impl OverlayRenderer for RecordingOverlay {
    fn start_drag(&mut self, target: WindowHandle, point: ScreenPoint, outline: Rect) {
        self.push(OverlayCommand::StartDrag { target, point, outline });
    }

    fn start_resize(&mut self, target: WindowHandle, point: ScreenPoint, outline: Rect) {
        self.push(OverlayCommand::StartResize { target, point, outline });
    }

    fn perform_drag(&mut self, point: ScreenPoint, outline: Rect) {
        self.push(OverlayCommand::PerformDrag { point, outline });
    }

    fn perform_resize(&mut self, point: ScreenPoint, outline: Rect) {
        self.push(OverlayCommand::PerformResize { point, outline });
    }

    fn stop_drag(&mut self) {
        self.push(OverlayCommand::StopDrag);
    }

    fn stop_resize(&mut self) {
        self.push(OverlayCommand::StopResize);
    }

    fn hide(&mut self) {
        self.push(OverlayCommand::Hide);
    }
}
