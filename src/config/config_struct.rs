//! Config struct definition.

use super::types::{ModifierKey, OutlineColor};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MIN_POLL_INTERVAL_MS: u64 = 1;
pub const MAX_POLL_INTERVAL_MS: u64 = 100;
pub const MAX_OUTLINE_THICKNESS: i32 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub modifier: ModifierKey,
    /// Drag worker tick.
    pub poll_interval_ms: u64,
    /// Raise the target window when a drag or resize starts.
    pub bring_to_front: bool,
    pub outline_thickness: i32,
    /// Overrides the system accent color when set.
    pub outline_color: Option<OutlineColor>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            modifier: ModifierKey::Alt,
            poll_interval_ms: 10,
            bring_to_front: true,
            outline_thickness: 2,
            outline_color: None,
        }
    }
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.poll_interval_ms
                .clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS),
        )
    }

    pub fn outline_thickness(&self) -> i32 {
        self.outline_thickness.clamp(1, MAX_OUTLINE_THICKNESS)
    }
}
