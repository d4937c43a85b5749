//! Where strand keeps its files
//!
//! Everything lives in one per-user directory: `$XDG_CONFIG_HOME/strand`
//! (falling back to `~/.config/strand`) on Unix, `%APPDATA%\strand` on Windows.

use std::path::PathBuf;

/// The per-user strand directory, if a home can be determined
pub fn config_dir() -> Option<PathBuf> {
    let base = if cfg!(windows) {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
    };
    base.map(|dir| dir.join("strand"))
}

fn entry(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(name))
}

/// User themes, one `<id>.yaml` per theme
pub fn themes_dir() -> Option<PathBuf> {
    entry("themes")
}

pub fn config_file() -> Option<PathBuf> {
    entry("config.yaml")
}

pub fn keymap_file() -> Option<PathBuf> {
    entry("keymap.yaml")
}

/// The log directory, created on demand
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = entry("logs").ok_or("No config directory available")?;
    std::fs::create_dir_all(&logs)
        .map_err(|e| format!("Cannot create {}: {}", logs.display(), e))?;
    Ok(logs)
}
