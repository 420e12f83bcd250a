// --- MOUSE HOOK ---
// WH_MOUSE_LL installation on a dedicated pump thread, and the hook procedure itself.

use super::registration::{InstallHandshake, TargetSlot};
use super::{route, ButtonEvent, ButtonKind, Disposition, EventChannel, HookStats, MouseInput};
use crate::config::ModifierKey;
use crate::geometry::ScreenPoint;
use crate::platform::win32::modifier_held;
use anyhow::{anyhow, bail};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PeekMessageW, PostThreadMessageW,
    SetWindowsHookExW, TranslateMessage, UnhookWindowsHookEx, HC_ACTION, MSG, MSLLHOOKSTRUCT,
    PM_NOREMOVE, WH_MOUSE_LL, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE, WM_QUIT,
    WM_RBUTTONDOWN, WM_RBUTTONUP, WM_USER,
};

const INSTALL_TIMEOUT: Duration = Duration::from_secs(2);

/// What the hook procedure reaches through `ACTIVE_TARGET`. The OS callback
/// carries no user context, so exactly one of these is registered while a
/// `MouseHook` is alive.
struct HookTarget {
    channel: Arc<EventChannel>,
    stats: Arc<HookStats>,
    modifier: ModifierKey,
}

static ACTIVE_TARGET: TargetSlot<HookTarget> = TargetSlot::new();

pub struct MouseHook {
    thread_id: u32,
    thread: Option<JoinHandle<()>>,
}

impl MouseHook {
    /// Installs the global mouse hook. Fails if the OS refuses the hook, if it
    /// does not come up in time, or if another `MouseHook` is already registered.
    /// On failure no hook is left behind.
    pub fn install(
        channel: Arc<EventChannel>,
        stats: Arc<HookStats>,
        modifier: ModifierKey,
    ) -> anyhow::Result<Self> {
        let target = Box::new(HookTarget {
            channel,
            stats,
            modifier,
        });
        if ACTIVE_TARGET.register(target).is_err() {
            bail!("a mouse hook is already installed");
        }

        let handshake = Arc::new(InstallHandshake::new());
        let (ready_tx, ready_rx) = mpsc::channel::<anyhow::Result<u32>>();
        let thread_handshake = Arc::clone(&handshake);
        let handle = thread::Builder::new()
            .name("winmove-hook".into())
            .spawn(move || unsafe {
                let thread_id = GetCurrentThreadId();

                // Make sure the queue exists before anyone posts WM_QUIT to it.
                let mut msg = MSG::default();
                let _ = PeekMessageW(&mut msg, None, WM_USER, WM_USER, PM_NOREMOVE);
                thread_handshake.publish_thread(thread_id);

                let h_instance = GetModuleHandleW(None).ok().map(Into::into);
                let hook = match SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_hook_proc), h_instance, 0) {
                    Ok(hook) => hook,
                    Err(err) => {
                        let _ = ready_tx.send(Err(anyhow!("SetWindowsHookExW failed: {err}")));
                        return;
                    }
                };

                if thread_handshake.is_abandoned() {
                    let _ = UnhookWindowsHookEx(hook);
                    return;
                }
                let _ = ready_tx.send(Ok(thread_id));

                while GetMessageW(&mut msg, None, 0, 0).as_bool() {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }

                let _ = UnhookWindowsHookEx(hook);
            });

        let handle = match handle {
            Ok(handle) => handle,
            Err(err) => {
                ACTIVE_TARGET.clear();
                return Err(anyhow!("failed to spawn hook thread: {err}"));
            }
        };

        let outcome = ready_rx.recv_timeout(INSTALL_TIMEOUT);
        match outcome {
            Ok(Ok(thread_id)) => {
                crate::log_info!("[Hook] Low-level mouse hook installed (thread {})", thread_id);
                Ok(MouseHook {
                    thread_id,
                    thread: Some(handle),
                })
            }
            Ok(Err(err)) => {
                let _ = handle.join();
                ACTIVE_TARGET.clear();
                Err(err)
            }
            Err(_) => {
                // Give up, but make sure a hook that lands late is removed again
                // before the target goes away.
                if let Some(thread_id) = handshake.abandon() {
                    unsafe {
                        let _ = PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
                    }
                }
                let _ = handle.join();
                ACTIVE_TARGET.clear();
                Err(anyhow!("timed out while installing the mouse hook"))
            }
        }
    }

    pub fn is_installed(&self) -> bool {
        self.thread.is_some()
    }

    /// Removes the hook and joins its thread. Safe to call more than once.
    pub fn uninstall(&mut self) {
        let Some(handle) = self.thread.take() else {
            return;
        };
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = handle.join();
        // The hook only ever ran on the joined thread, nothing can still hold the target.
        ACTIVE_TARGET.clear();
        crate::log_info!("[Hook] Low-level mouse hook removed");
    }
}

impl Drop for MouseHook {
    fn drop(&mut self) {
        self.uninstall();
    }
}

fn translate(message: u32, pt: ScreenPoint) -> MouseInput {
    let kind = match message {
        WM_MOUSEMOVE => return MouseInput::Move(pt),
        WM_LBUTTONDOWN => ButtonKind::PrimaryDown,
        WM_LBUTTONUP => ButtonKind::PrimaryUp,
        WM_RBUTTONDOWN => ButtonKind::SecondaryDown,
        WM_RBUTTONUP => ButtonKind::SecondaryUp,
        _ => return MouseInput::Other,
    };
    MouseInput::Button(ButtonEvent { kind, position: pt })
}

/// Low-Level Mouse Hook Procedure.
unsafe extern "system" fn mouse_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code != HC_ACTION as i32 || lparam.0 == 0 {
        return unsafe { CallNextHookEx(None, code, wparam, lparam) };
    }
    // SAFETY: registered for as long as this hook is installed (see `uninstall`).
    let Some(target) = (unsafe { ACTIVE_TARGET.get() }) else {
        return unsafe { CallNextHookEx(None, code, wparam, lparam) };
    };

    let started = Instant::now();
    let info = unsafe { &*(lparam.0 as *const MSLLHOOKSTRUCT) };

    let input = translate(wparam.0 as u32, ScreenPoint::from(info.pt));
    let held = !matches!(input, MouseInput::Other) && modifier_held(target.modifier);
    let disposition = route(&target.channel, held, input);
    target.stats.record(started.elapsed());

    match disposition {
        Disposition::Suppress => LRESULT(1),
        Disposition::PassThrough => unsafe { CallNextHookEx(None, code, wparam, lparam) },
    }
}
