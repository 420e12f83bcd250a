// --- ACCENT COLOR ---
// Windows accent color lookup for the outline pen.

use winreg::enums::HKEY_CURRENT_USER;
use winreg::RegKey;

/// Windows default blue (#0078D4) as a COLORREF.
pub const FALLBACK_ACCENT: u32 = 0x00D4_7800;

/// The user's accent color as a COLORREF (0x00BBGGRR).
pub fn get_accent_color() -> u32 {
    RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey("Software\\Microsoft\\Windows\\DWM")
        .and_then(|dwm| dwm.get_value::<u32, _>("AccentColor"))
        .map(|abgr| abgr & 0x00FF_FFFF)
        .unwrap_or(FALLBACK_ACCENT)
}
