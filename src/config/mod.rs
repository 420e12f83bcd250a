//! Configuration module for winmove.
//!
//! This module is split into several sub-modules:
//! - `types`: Modifier key and outline color types
//! - `config_struct`: Config struct definition and defaults
//! - `io`: Config loading and saving

mod config_struct;
mod io;
mod types;

// Re-export public types for external use
pub use config_struct::Config;
pub use io::load_config;
pub use types::ModifierKey;
