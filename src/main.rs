#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![cfg_attr(not(windows), allow(dead_code))]

mod capture;
mod config;
mod controller;
mod debug_log;
mod geometry;
mod overlay;
mod platform;
#[cfg(test)]
mod testing;

#[cfg(windows)]
mod icon_gen;
#[cfg(windows)]
mod initialization;
#[cfg(windows)]
mod mover;
#[cfg(windows)]
mod tray;
#[cfg(windows)]
pub mod win_types;

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use windows::Win32::UI::WindowsAndMessaging::{
        DestroyWindow, DispatchMessageW, GetMessageW, TranslateMessage, MSG,
    };

    initialization::setup_crash_handler();
    initialization::init_dpi_awareness();

    let Some(_single_instance) = initialization::acquire_single_instance() else {
        crate::log_info!("Another WinMove instance is already running, exiting");
        return Ok(());
    };

    crate::log_info!("========================================");
    crate::log_info!("WinMove v{} STARTUP", env!("CARGO_PKG_VERSION"));
    crate::log_info!("========================================");

    let config = config::load_config();
    crate::log_info!("[Config] {:?}", config);

    let outline = overlay::OutlineWindow::create(
        config.outline_thickness(),
        config.outline_color.map(|c| c.to_colorref()),
    )
    .context("creating the outline window")?;
    let outline_hwnd = outline.hwnd();

    let mut mover = mover::WindowMover::start(&config, outline);
    if !mover.is_active() {
        crate::log_info!("Window moving is unavailable this session");
    }

    let _tray = match tray::Tray::create(config.modifier) {
        Ok(tray) => Some(tray),
        Err(err) => {
            crate::log_info!("[Tray] {:#}", err);
            None
        }
    };

    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    crate::log_info!("Shutting down");
    mover.shutdown();
    unsafe {
        let _ = DestroyWindow(outline_hwnd.0);
    }
    crate::log_info!("WinMove exited cleanly");
    Ok(())
}

#[cfg(not(windows))]
fn main() {
    crate::log_info!(
        "WinMove v{} only runs on Windows; nothing to do on this platform",
        env!("CARGO_PKG_VERSION")
    );
}
