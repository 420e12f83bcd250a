// --- INITIALIZATION ---
// Process bootstrap: crash reporting, DPI awareness, single-instance guard.

use crate::win_types::SendHandle;
use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::System::Threading::CreateMutexW;
use windows::Win32::UI::HiDpi::{
    SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows::Win32::UI::WindowsAndMessaging::*;

/// Set up crash handler to log the panic and show a message box.
pub fn setup_crash_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = if let Some(location) = panic_info.location() {
            format!("File: {}\nLine: {}", location.file(), location.line())
        } else {
            "Unknown location".to_string()
        };

        let payload = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic payload".to_string()
        };

        let thread = std::thread::current();
        let thread_name = thread.name().unwrap_or("unnamed");
        crate::log_info!("PANIC on thread '{}': {} ({})", thread_name, payload, location);

        let error_msg = format!(
            "CRASH DETECTED!\n\nThread: {}\nError: {}\n\nLocation:\n{}",
            thread_name, payload, location
        );
        let wide_msg: Vec<u16> = error_msg.encode_utf16().chain(std::iter::once(0)).collect();

        unsafe {
            MessageBoxW(
                None,
                PCWSTR(wide_msg.as_ptr()),
                w!("WinMove Crash Report"),
                MB_ICONERROR | MB_OK,
            );
        }
    }));
}

/// Per-Monitor V2 so hook coordinates and window rects are physical pixels.
pub fn init_dpi_awareness() {
    unsafe {
        if SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2).is_err() {
            crate::log_info!("DPI awareness already set, keeping the existing context");
        }
    }
}

/// Holds the named single-instance mutex for the life of the process.
pub struct SingleInstance {
    handle: SendHandle,
}

impl Drop for SingleInstance {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.handle.0);
        }
    }
}

/// Returns `None` when another instance already owns the mutex.
pub fn acquire_single_instance() -> Option<SingleInstance> {
    unsafe {
        let handle = CreateMutexW(None, true, w!("Global\\WinMoveSingleInstanceMutex")).ok()?;
        if GetLastError() == ERROR_ALREADY_EXISTS {
            let _ = CloseHandle(handle);
            return None;
        }
        Some(SingleInstance {
            handle: SendHandle(handle),
        })
    }
}
