//! Color themes
//!
//! A theme is a small YAML file. Lookup order for an id is the user's
//! `themes/` config directory first, then the themes compiled into the binary.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

/// Themes shipped inside the binary, as `(id, yaml)` pairs
pub const BUILTIN_THEMES: &[(&str, &str)] = &[
    ("default-dark", include_str!("../themes/dark.yaml")),
    ("github-dark", include_str!("../themes/github-dark.yaml")),
    ("github-light", include_str!("../themes/github-light.yaml")),
];

fn builtin_yaml(id: &str) -> Option<&'static str> {
    BUILTIN_THEMES
        .iter()
        .find(|(builtin, _)| *builtin == id)
        .map(|(_, yaml)| *yaml)
}

fn user_theme_ids(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut ids: Vec<String> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| matches!(path.extension().and_then(|e| e.to_str()), Some("yaml" | "yml")))
        .filter_map(|path| path.file_stem()?.to_str().map(String::from))
        .collect();
    ids.sort();
    ids
}

/// Every selectable theme id; user themes sort first and shadow builtins of the same id
pub fn available_theme_ids() -> Vec<String> {
    let mut ids = crate::config_paths::themes_dir()
        .map(|dir| user_theme_ids(&dir))
        .unwrap_or_default();
    for (id, _) in BUILTIN_THEMES {
        if !ids.iter().any(|known| known == id) {
            ids.push((*id).to_string());
        }
    }
    ids
}

/// Resolve a theme id, preferring a user file over the builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(path) = crate::config_paths::themes_dir().map(|d| d.join(format!("{id}.yaml"))) {
        if path.is_file() {
            tracing::info!(path = %path.display(), "loading user theme");
            let yaml = std::fs::read_to_string(&path)
                .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
            return Theme::from_yaml(&yaml);
        }
    }
    let yaml = builtin_yaml(id).ok_or_else(|| format!("Unknown theme id: {id}"))?;
    tracing::info!(id, "loading builtin theme");
    Theme::from_yaml(yaml)
}

/// 24-bit color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepts `#RRGGBB` or bare `RRGGBB`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("Bad color '{s}', expected #RRGGBB"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("Bad color '{s}'"))
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(de)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl From<Color> for ratatui::style::Color {
    fn from(c: Color) -> Self {
        ratatui::style::Color::Rgb(c.r, c.g, c.b)
    }
}

const SELECTION_BLUE: Color = Color::rgb(0x26, 0x4F, 0x78);

/// Text area colors
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditorTheme {
    pub background: Color,
    pub foreground: Color,
    pub current_line_background: Color,
    pub cursor_color: Color,
    #[serde(default = "selection_blue")]
    pub selection_background: Color,
}

fn selection_blue() -> Color {
    SELECTION_BLUE
}

/// Line number column
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GutterTheme {
    pub background: Color,
    pub foreground: Color,
    pub foreground_active: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusBarTheme {
    pub background: Color,
    pub foreground: Color,
}

/// Dialogs, panels, the tab strip and search highlights; any key may be omitted
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OverlayTheme {
    pub border: Color,
    pub background: Color,
    pub foreground: Color,
    pub selection_background: Color,
    pub highlight: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for OverlayTheme {
    fn default() -> Self {
        Self {
            border: Color::rgb(0x3C, 0x3C, 0x3C),
            background: Color::rgb(0x2B, 0x2D, 0x30),
            foreground: Color::rgb(0xE0, 0xE0, 0xE0),
            selection_background: SELECTION_BLUE,
            highlight: Color::rgb(0x80, 0xFF, 0x80),
            warning: Color::rgb(0xFF, 0xFF, 0x80),
            error: Color::rgb(0xFF, 0x80, 0x80),
        }
    }
}

#[derive(Deserialize)]
struct ThemeFile {
    #[allow(dead_code)]
    version: u32,
    name: String,
    ui: ThemeSections,
}

#[derive(Deserialize)]
struct ThemeSections {
    editor: EditorTheme,
    gutter: GutterTheme,
    status_bar: StatusBarTheme,
    #[serde(default)]
    overlay: OverlayTheme,
}

/// A fully resolved theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub editor: EditorTheme,
    pub gutter: GutterTheme,
    pub status_bar: StatusBarTheme,
    pub overlay: OverlayTheme,
}

impl Theme {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let file: ThemeFile =
            serde_yaml::from_str(yaml).map_err(|e| format!("Theme parse error: {e}"))?;
        let ThemeSections {
            editor,
            gutter,
            status_bar,
            overlay,
        } = file.ui;
        Ok(Theme {
            name: file.name,
            editor,
            gutter,
            status_bar,
            overlay,
        })
    }

    pub fn builtin(id: &str) -> Result<Self, String> {
        builtin_yaml(id)
            .ok_or_else(|| format!("Unknown theme id: {id}"))
            .and_then(Theme::from_yaml)
    }
}

impl Default for Theme {
    /// Used when the configured theme cannot be loaded
    fn default() -> Self {
        Self {
            name: "Default Dark".to_string(),
            editor: EditorTheme {
                background: Color::rgb(0x1E, 0x1E, 0x1E),
                foreground: Color::rgb(0xD4, 0xD4, 0xD4),
                current_line_background: Color::rgb(0x2A, 0x2A, 0x2A),
                cursor_color: Color::rgb(0xFF, 0xFF, 0xFF),
                selection_background: SELECTION_BLUE,
            },
            gutter: GutterTheme {
                background: Color::rgb(0x1E, 0x1E, 0x1E),
                foreground: Color::rgb(0x85, 0x85, 0x85),
                foreground_active: Color::rgb(0xC6, 0xC6, 0xC6),
            },
            status_bar: StatusBarTheme {
                background: Color::rgb(0x00, 0x7A, 0xCC),
                foreground: Color::rgb(0xFF, 0xFF, 0xFF),
            },
            overlay: OverlayTheme::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r##"
version: 1
name: "Minimal"
ui:
  editor:
    background: "#000000"
    foreground: "#FFFFFF"
    current_line_background: "#111111"
    cursor_color: "#FFFFFF"
  gutter:
    background: "#000000"
    foreground: "#888888"
    foreground_active: "#FFFFFF"
  status_bar:
    background: "#000000"
    foreground: "#FFFFFF"
"##;

    #[test]
    fn test_every_builtin_parses() {
        for (id, _) in BUILTIN_THEMES {
            let theme = Theme::builtin(id);
            assert!(theme.is_ok(), "{} failed: {:?}", id, theme.err());
        }
    }

    #[test]
    fn test_unknown_theme() {
        assert!(Theme::builtin("no-such-theme").is_err());
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!("#0D1117".parse::<Color>(), Ok(Color::rgb(0x0D, 0x11, 0x17)));
        assert_eq!("ffffff".parse::<Color>(), Ok(Color::rgb(0xFF, 0xFF, 0xFF)));
        assert!("#123".parse::<Color>().is_err());
        assert!("#GGGGGG".parse::<Color>().is_err());
    }

    #[test]
    fn test_optional_sections_default() {
        let theme = Theme::from_yaml(MINIMAL).unwrap();
        assert_eq!(theme.name, "Minimal");
        assert_eq!(theme.overlay, OverlayTheme::default());
        assert_eq!(theme.editor.selection_background, SELECTION_BLUE);
    }

    #[test]
    fn test_bad_color_is_an_error() {
        let broken = MINIMAL.replace("#111111", "#11");
        assert!(Theme::from_yaml(&broken).is_err());
    }

    #[test]
    fn test_builtins_listed() {
        let ids = available_theme_ids();
        for (id, _) in BUILTIN_THEMES {
            assert!(ids.iter().any(|known| known == id));
        }
    }
}
