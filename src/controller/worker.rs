// --- DRAG WORKER ---
// Fixed-interval polling thread that owns the controller.

use super::Controller;
use crate::capture::{EventChannel, HookStats};
use crate::overlay::OverlayRenderer;
use crate::platform::Desktop;
use anyhow::Context;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often accumulated hook latency warnings are flushed to the log.
const STATS_REPORT_INTERVAL: Duration = Duration::from_secs(30);

pub struct DragWorker {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl DragWorker {
    pub fn spawn<D, R>(
        mut controller: Controller<D, R>,
        channel: Arc<EventChannel>,
        stats: Arc<HookStats>,
        interval: Duration,
    ) -> anyhow::Result<Self>
    where
        D: Desktop + Send + 'static,
        R: OverlayRenderer + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let thread = thread::Builder::new()
            .name("winmove-worker".into())
            .spawn(move || {
                crate::log_info!("[Worker] Started ({} ms interval)", interval.as_millis());
                let mut last_report = Instant::now();

                while flag.load(Ordering::Acquire) {
                    controller.tick(&channel);

                    if last_report.elapsed() >= STATS_REPORT_INTERVAL {
                        report_hook_stats(&stats);
                        last_report = Instant::now();
                    }

                    thread::park_timeout(interval);
                }

                // Never leave an outline on screen or a half-finished move behind.
                controller.cancel();
                report_hook_stats(&stats);
                crate::log_info!("[Worker] Stopped");
            })
            .context("failed to spawn drag worker thread")?;

        Ok(DragWorker {
            running,
            thread: Some(thread),
        })
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Signals the worker and waits for its current tick to finish. Safe to call
    /// more than once.
    pub fn stop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        self.running.store(false, Ordering::Release);
        thread.thread().unpark();
        if thread.join().is_err() {
            crate::log_info!("[Worker] Worker thread panicked");
        }
    }
}

impl Drop for DragWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn report_hook_stats(stats: &HookStats) {
    let (slow_calls, slowest_micros) = stats.take();
    if slow_calls > 0 {
        crate::log_info!(
            "[Hook] {} callback(s) exceeded the latency budget (slowest {} us)",
            slow_calls,
            slowest_micros
        );
    }
}
