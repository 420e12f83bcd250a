//! Core config types: the gate modifier and outline color.

use serde::{Deserialize, Serialize};

// Virtual-key codes
const VK_SHIFT: u16 = 0x10;
const VK_CONTROL: u16 = 0x11;
const VK_MENU: u16 = 0x12;
const VK_LWIN: u16 = 0x5B;
const VK_RWIN: u16 = 0x5C;

/// The key that must be held for drag/resize capture to activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    #[default]
    Alt,
    Ctrl,
    Shift,
    Win,
}

impl ModifierKey {
    /// Virtual-key codes that count as "held" for this modifier.
    pub fn vk_codes(self) -> &'static [u16] {
        match self {
            ModifierKey::Alt => &[VK_MENU],
            ModifierKey::Ctrl => &[VK_CONTROL],
            ModifierKey::Shift => &[VK_SHIFT],
            ModifierKey::Win => &[VK_LWIN, VK_RWIN],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModifierKey::Alt => "Alt",
            ModifierKey::Ctrl => "Ctrl",
            ModifierKey::Shift => "Shift",
            ModifierKey::Win => "Win",
        }
    }
}

/// An `#RRGGBB` color as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OutlineColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl OutlineColor {
    /// GDI `COLORREF` layout (0x00BBGGRR).
    pub fn to_colorref(self) -> u32 {
        u32::from(self.r) | (u32::from(self.g) << 8) | (u32::from(self.b) << 16)
    }
}

impl TryFrom<String> for OutlineColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("expected #RRGGBB, got {:?}", value));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(OutlineColor {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl From<OutlineColor> for String {
    fn from(c: OutlineColor) -> Self {
        format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
    }
}
