//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/strand/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::file_browser::{MAX_BROWSER_WIDTH, MIN_BROWSER_WIDTH};

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Selected theme id (e.g., "default-dark", "solarized-light")
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_true")]
    pub show_line_numbers: bool,
    /// File browser width in columns (20..=80)
    #[serde(default = "default_file_browser_width")]
    pub file_browser_width: usize,
    /// Spaces inserted by Indent
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
    /// Terminal panel rows; 0 means a third of the screen
    #[serde(default)]
    pub terminal_height: usize,
    #[serde(default)]
    pub show_hidden_files: bool,
    /// Offer the SSH dialog when an `ssh` binary is present
    #[serde(default = "default_true")]
    pub enable_ssh: bool,
}

fn default_theme() -> String {
    "default-dark".to_string()
}

fn default_true() -> bool {
    true
}

fn default_file_browser_width() -> usize {
    30
}

fn default_tab_width() -> usize {
    4
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            show_line_numbers: true,
            file_browser_width: default_file_browser_width(),
            tab_width: default_tab_width(),
            terminal_height: 0,
            show_hidden_files: false,
            enable_ssh: true,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<EditorConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.normalized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that have a valid range
    fn normalized(mut self) -> Self {
        self.file_browser_width = self
            .file_browser_width
            .clamp(MIN_BROWSER_WIDTH, MAX_BROWSER_WIDTH);
        self.tab_width = self.tab_width.clamp(1, 16);
        self
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Update theme and save
    pub fn set_theme(&mut self, theme_id: &str) -> Result<(), String> {
        self.theme = theme_id.to_string();
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: EditorConfig = serde_yaml::from_str("theme: solarized-light\n").unwrap();
        assert_eq!(config.theme, "solarized-light");
        assert_eq!(config.file_browser_width, 30);
        assert_eq!(config.tab_width, 4);
        assert!(config.show_line_numbers);
        assert!(config.enable_ssh);
    }

    #[test]
    fn test_load_clamps_browser_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "file_browser_width: 500\n").unwrap();
        assert_eq!(EditorConfig::load_from(&path).file_browser_width, MAX_BROWSER_WIDTH);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "tab_width: [oops").unwrap();
        assert_eq!(EditorConfig::load_from(&path), EditorConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = EditorConfig {
            theme: "github-light".to_string(),
            tab_width: 2,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(EditorConfig::load_from(&path), config);
    }
}
