// --- TRAY ---
// Notification-area icon with a single Exit item.

use crate::config::ModifierKey;
use anyhow::{anyhow, Context};
use tray_icon::menu::{Menu, MenuEvent, MenuItem};
use tray_icon::{TrayIcon, TrayIconBuilder};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{PostThreadMessageW, WM_QUIT};

/// Keeps the icon alive; dropping it removes the icon.
pub struct Tray {
    _icon: TrayIcon,
}

impl Tray {
    /// Builds the tray icon on the calling thread. Choosing Exit posts `WM_QUIT`
    /// to that thread, so it must be the thread running the message loop.
    pub fn create(modifier: ModifierKey) -> anyhow::Result<Self> {
        let menu = Menu::new();
        let quit_item = MenuItem::with_id("1001", "Exit", true, None);
        menu.append(&quit_item)
            .map_err(|err| anyhow!("adding tray menu item: {err}"))?;

        let ui_thread = unsafe { GetCurrentThreadId() };
        let quit_id = quit_item.id().clone();
        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            if event.id == quit_id {
                crate::log_info!("[Tray] Exit requested");
                unsafe {
                    let _ = PostThreadMessageW(ui_thread, WM_QUIT, WPARAM(0), LPARAM(0));
                }
            }
        }));

        let icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip(format!(
                "WinMove v{} ({}+drag to move, {}+right-drag to resize)",
                env!("CARGO_PKG_VERSION"),
                modifier.label(),
                modifier.label()
            ))
            .with_icon(crate::icon_gen::generate_icon()?)
            .build()
            .context("creating tray icon")?;

        crate::log_info!("[Tray] Icon created");
        Ok(Tray { _icon: icon })
    }
}
