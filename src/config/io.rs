//! Config I/O operations: load and save.

use std::path::{Path, PathBuf};

use super::config_struct::Config;

pub fn get_config_path() -> PathBuf {
    let config_dir = dirs::config_dir().unwrap_or_default().join("winmove");
    let _ = std::fs::create_dir_all(&config_dir);
    config_dir.join("config.json")
}

pub fn load_config() -> Config {
    let path = get_config_path();
    if path.exists() {
        load_config_from(&path)
    } else {
        let config = Config::default();
        // Write the defaults out so the file is discoverable and editable.
        if let Err(err) = save_config(&config) {
            crate::log_info!("[Config] Could not write default config: {:#}", err);
        }
        config
    }
}

pub fn load_config_from(path: &Path) -> Config {
    let data = std::fs::read_to_string(path).unwrap_or_default();
    match serde_json::from_str(&data) {
        Ok(config) => config,
        Err(err) => {
            crate::log_info!(
                "[Config] Ignoring invalid config {}: {}",
                path.display(),
                err
            );
            Config::default()
        }
    }
}

pub fn save_config(config: &Config) -> anyhow::Result<()> {
    save_config_to(config, &get_config_path())
}

pub fn save_config_to(config: &Config, path: &Path) -> anyhow::Result<()> {
    use anyhow::Context;

    let data = serde_json::to_string_pretty(config)?;
    std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))
}
