// --- DEBUG LOG ---
// Session log: every `log_info!` line goes to stdout and to a timestamped file.

use chrono::Local;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

lazy_static::lazy_static! {
    static ref LOG_MUTEX: Mutex<()> = Mutex::new(());
}

/// Directory holding `session.log`.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("WinMove")
        .join("logs")
}

pub fn log_debug(msg: &str) {
    let _lock = LOG_MUTEX.lock();
    let path = log_dir();
    let _ = std::fs::create_dir_all(&path);

    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.join("session.log"))
    {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(file, "[{}] {}", timestamp, msg);
    }
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        {
            let msg = format!($($arg)*);
            println!("{}", msg);
            $crate::debug_log::log_debug(&msg);
        }
    };
}
