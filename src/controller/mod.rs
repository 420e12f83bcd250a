// --- DRAG/RESIZE CONTROLLER ---
// State machine turning captured button/move events into overlay commands and
// window geometry commits.

mod session;
mod worker;

pub use session::Session;
pub use worker::DragWorker;

use crate::capture::{ButtonEvent, ButtonKind, EventChannel};
use crate::geometry::ScreenPoint;
use crate::overlay::OverlayRenderer;
use crate::platform::Desktop;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Session),
    Resizing(Session),
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(s) | DragState::Resizing(s) => Some(s),
        }
    }
}

/// How a session leaves the active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ending {
    /// Button-up or modifier release: write the outline to the window.
    Commit,
    /// Target vanished or the worker is shutting down: just clear the overlay.
    Abandon,
}

pub struct Controller<D, R> {
    desktop: D,
    overlay: R,
    state: DragState,
    bring_to_front: bool,
    scratch: Vec<ButtonEvent>,
}

impl<D: Desktop, R: OverlayRenderer> Controller<D, R> {
    pub fn new(desktop: D, overlay: R, bring_to_front: bool) -> Self {
        Controller {
            desktop,
            overlay,
            state: DragState::Idle,
            bring_to_front,
            scratch: Vec::with_capacity(crate::capture::CHANNEL_CAPACITY),
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// One worker tick: all pending buttons in order, then at most one move,
    /// then the modifier-release check.
    pub fn tick(&mut self, channel: &EventChannel) {
        let mut events = std::mem::take(&mut self.scratch);
        let report = channel.drain_buttons(&mut events);
        if report.lost > 0 {
            crate::log_info!(
                "[Worker] Button ring overflowed, {} event(s) dropped",
                report.lost
            );
        }
        for event in events.drain(..) {
            self.handle_button(event);
        }
        self.scratch = events;

        if let Some(pointer) = channel.take_move() {
            self.handle_move(pointer);
        }

        if !self.state.is_idle() && !self.desktop.modifier_held() {
            self.end_session(Ending::Commit);
        }
    }

    pub fn handle_button(&mut self, event: ButtonEvent) {
        let p = event.position;
        match (&self.state, event.kind) {
            (DragState::Idle, ButtonKind::PrimaryDown) => self.begin_drag(p),
            (DragState::Idle, ButtonKind::SecondaryDown) => self.begin_resize(p),
            (DragState::Dragging(_), ButtonKind::PrimaryUp)
            | (DragState::Resizing(_), ButtonKind::SecondaryUp) => {
                self.end_session(Ending::Commit)
            }
            // Stray ups, the other button, or a second down mid-session.
            _ => {}
        }
    }

    pub fn handle_move(&mut self, pointer: ScreenPoint) {
        let Some(target) = self.state.session().map(|s| s.target) else {
            return;
        };
        if !self.desktop.is_window(target) {
            crate::log_info!("[Worker] Target window {:?} vanished mid-session", target);
            self.end_session(Ending::Abandon);
            return;
        }

        match &mut self.state {
            DragState::Dragging(session) => {
                session.drag_to(pointer);
                self.overlay.perform_drag(pointer, session.outline);
            }
            DragState::Resizing(session) => {
                let min = self.desktop.min_track_size(session.target);
                session.resize_to(pointer, min);
                self.overlay.perform_resize(pointer, session.outline);
            }
            DragState::Idle => {}
        }
    }

    /// Drops any live session without touching the target window.
    pub fn cancel(&mut self) {
        self.end_session(Ending::Abandon);
    }

    fn begin_drag(&mut self, p: ScreenPoint) {
        let Some(target) = self.desktop.locate(p) else {
            return;
        };
        let Some(rect) = self.desktop.window_rect(target) else {
            return;
        };
        if self.bring_to_front {
            self.desktop.bring_to_front(target);
        }

        let session = if self.desktop.is_maximized(target) {
            self.desktop.restore(target);
            let restored = self.desktop.window_rect(target).unwrap_or(rect);
            Session::from_restored(target, rect, restored, p)
        } else {
            Session::new(target, rect, p)
        };

        self.overlay.start_drag(target, p, session.outline);
        self.state = DragState::Dragging(session);
    }

    fn begin_resize(&mut self, p: ScreenPoint) {
        let Some(target) = self.desktop.locate(p) else {
            return;
        };
        let Some(rect) = self.desktop.window_rect(target) else {
            return;
        };
        if self.bring_to_front {
            self.desktop.bring_to_front(target);
        }

        let session = Session::new(target, rect, p);
        self.overlay.start_resize(target, p, session.outline);
        self.state = DragState::Resizing(session);
    }

    fn end_session(&mut self, ending: Ending) {
        let (session, dragging) = match std::mem::take(&mut self.state) {
            DragState::Idle => return,
            DragState::Dragging(s) => (s, true),
            DragState::Resizing(s) => (s, false),
        };

        if dragging {
            self.overlay.stop_drag();
        } else {
            self.overlay.stop_resize();
        }

        if ending == Ending::Commit && self.desktop.is_window(session.target) {
            let outline = session.outline.normalized();
            self.desktop.move_window(session.target, outline);
            crate::log_info!(
                "[Worker] {} {:?}: {:?} -> {:?}",
                if dragging { "Moved" } else { "Resized" },
                session.target,
                session.start_rect,
                outline
            );
        }

        self.overlay.hide();
    }
}
