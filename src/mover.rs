// --- WINDOW MOVER ---
// Owns the hook and the drag worker; the single start/stop point for the feature.

use crate::capture::{EventChannel, HookStats, MouseHook};
use crate::config::Config;
use crate::controller::{Controller, DragWorker};
use crate::overlay::OutlineWindow;
use crate::platform::win32::Win32Desktop;
use std::sync::Arc;

pub struct WindowMover {
    hook: Option<MouseHook>,
    worker: Option<DragWorker>,
}

impl WindowMover {
    /// Installs the hook and starts the worker. If either fails the mover is
    /// returned inert: the failure is logged and mouse input is left alone.
    pub fn start(config: &Config, overlay: OutlineWindow) -> Self {
        let channel = Arc::new(EventChannel::new());
        let stats = Arc::new(HookStats::new());

        let controller = Controller::new(
            Win32Desktop::new(config.modifier),
            overlay,
            config.bring_to_front,
        );
        let worker = match DragWorker::spawn(
            controller,
            Arc::clone(&channel),
            Arc::clone(&stats),
            config.poll_interval(),
        ) {
            Ok(worker) => worker,
            Err(err) => {
                crate::log_info!("[Worker] {:#}", err);
                return WindowMover::inert();
            }
        };

        let hook = match MouseHook::install(channel, stats, config.modifier) {
            Ok(hook) => hook,
            Err(err) => {
                crate::log_info!("[Hook] Install failed, window moving disabled: {:#}", err);
                let mut mover = WindowMover {
                    hook: None,
                    worker: Some(worker),
                };
                mover.shutdown();
                return mover;
            }
        };

        crate::log_info!(
            "[Hook] Ready: hold {} and drag with the left button to move, right button to resize",
            config.modifier.label()
        );
        WindowMover {
            hook: Some(hook),
            worker: Some(worker),
        }
    }

    fn inert() -> Self {
        WindowMover {
            hook: None,
            worker: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.hook.as_ref().is_some_and(MouseHook::is_installed)
            && self.worker.as_ref().is_some_and(DragWorker::is_running)
    }

    /// Stops the worker (cancelling any live session) and removes the hook.
    /// Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(mut worker) = self.worker.take() {
            worker.stop();
        }
        if let Some(mut hook) = self.hook.take() {
            hook.uninstall();
        }
    }
}

impl Drop for WindowMover {
    fn drop(&mut self) {
        self.shutdown();
    }
}
