//! YAML configuration parsing for keymap overrides
//!
//! ```yaml
//! bindings:
//!   - key: ctrl_e
//!     action: toggle_file_browser
//! unbind:
//!   - ctrl_b
//! ```

use std::path::Path;

use serde::Deserialize;

use super::action::Action;
use super::table::KeyBindingTable;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Root structure of a keymap YAML file
#[derive(Debug, Default, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
    #[serde(default)]
    pub unbind: Vec<String>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub action: String,
}

/// Load keymap overrides from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<KeymapConfig, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse keymap overrides from a YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<KeymapConfig, KeymapError> {
    serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))
}

/// Parse a token like `ctrl_shift_z` into a Keystroke.
///
/// The token must follow `(ctrl_)?(alt_)?(shift_)?<keyname>` and must name a
/// bindable key: a bare printable character is text, not a binding.
pub fn parse_token(token: &str) -> Result<Keystroke, KeymapError> {
    let mut rest = token;
    let mut mods = Modifiers::NONE;

    if let Some(r) = rest.strip_prefix("ctrl_") {
        mods = mods | Modifiers::CTRL;
        rest = r;
    }
    if let Some(r) = rest.strip_prefix("alt_") {
        mods = mods | Modifiers::ALT;
        rest = r;
    }
    if let Some(r) = rest.strip_prefix("shift_") {
        mods = mods | Modifiers::SHIFT;
        rest = r;
    }

    let key =
        KeyCode::from_token_name(rest).ok_or_else(|| KeymapError::InvalidToken(token.to_string()))?;
    let stroke = Keystroke::new(key, mods);

    // Reject anything that would not normalize back to itself
    // (wrong modifier order, unchorded printable characters).
    match stroke.token() {
        Some(canonical) if canonical == token => Ok(stroke),
        _ => Err(KeymapError::InvalidToken(token.to_string())),
    }
}

/// Apply overrides to `table`. Invalid entries are logged and skipped.
///
/// Returns the number of entries applied.
pub fn apply_overrides(table: &mut KeyBindingTable, config: &KeymapConfig) -> usize {
    let mut applied = 0;

    for token in &config.unbind {
        match parse_token(token) {
            Ok(_) => {
                table.unbind(token);
                applied += 1;
            }
            Err(e) => tracing::warn!("Skipping unbind entry: {}", e),
        }
    }

    for entry in &config.bindings {
        if let Err(e) = parse_token(&entry.key) {
            tracing::warn!("Skipping binding: {}", e);
            continue;
        }
        let Some(action) = Action::from_name(&entry.action) else {
            tracing::warn!(
                "Skipping binding: {}",
                KeymapError::InvalidAction(entry.action.clone())
            );
            continue;
        };
        table.bind(entry.key.clone(), action);
        applied += 1;
    }

    applied
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidToken(String),
    InvalidAction(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidToken(k) => write!(f, "Invalid key token: {}", k),
            KeymapError::InvalidAction(a) => write!(f, "Invalid action: {}", a),
        }
    }
}

impl std::error::Error for KeymapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_valid() {
        let stroke = parse_token("ctrl_shift_z").unwrap();
        assert!(stroke.mods.ctrl());
        assert!(stroke.mods.shift());
        assert_eq!(stroke.key, KeyCode::Char('z'));

        let stroke = parse_token("alt_arrow_left").unwrap();
        assert_eq!(stroke.key, KeyCode::Left);
        assert!(stroke.mods.alt());

        assert!(parse_token("f12").is_ok());
        assert!(parse_token("shift_tab").is_ok());
        assert!(parse_token("alt_=").is_ok());
    }

    #[test]
    fn test_parse_token_rejects_malformed() {
        assert!(parse_token("").is_err());
        assert!(parse_token("x").is_err());
        assert!(parse_token("shift_x").is_err());
        assert!(parse_token("shift_ctrl_s").is_err());
        assert!(parse_token("ctrl_").is_err());
        assert!(parse_token("ctrl_f13").is_err());
        assert!(parse_token("ctrl_S").is_err());
        assert!(parse_token("hyper_s").is_err());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
bindings:
  - key: ctrl_e
    action: toggle_file_browser
unbind:
  - ctrl_b
"#;
        let config = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(config.bindings.len(), 1);
        assert_eq!(config.unbind, vec!["ctrl_b".to_string()]);
    }

    #[test]
    fn test_parse_yaml_error() {
        let err = parse_keymap_yaml("bindings: [").unwrap_err();
        assert!(matches!(err, KeymapError::ParseError(_)));
    }

    #[test]
    fn test_apply_overrides_skips_invalid_entries() {
        let yaml = r#"
bindings:
  - key: ctrl_e
    action: toggle_file_browser
  - key: not a token
    action: save_file
  - key: ctrl_k
    action: does_not_exist
unbind:
  - ctrl_b
"#;
        let config = parse_keymap_yaml(yaml).unwrap();
        let mut table = KeyBindingTable::with_defaults();
        let applied = apply_overrides(&mut table, &config);

        assert_eq!(applied, 2);
        assert_eq!(table.get_action("ctrl_e"), Action::ToggleFileBrowser);
        assert_eq!(table.get_action("ctrl_b"), Action::Unknown);
        assert_eq!(table.get_action("ctrl_k"), Action::Unknown);
    }
}
