//! Core input types: Modifiers, KeyCode, Keystroke, mouse events, and the
//! canonical key token each keystroke normalizes to.

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b001);
    pub const ALT: Modifiers = Modifiers(0b010);
    pub const SHIFT: Modifiers = Modifiers(0b100);

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, alt: bool, shift: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b001;
        }
        if alt {
            bits |= 0b010;
        }
        if shift {
            bits |= 0b100;
        }
        Modifiers(bits)
    }

    /// Check if ctrl is held
    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b001 != 0
    }

    /// Check if alt is held
    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b010 != 0
    }

    /// Check if shift is held
    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b100 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Ctrl or Alt held, i.e. the keystroke is a chord rather than text
    #[inline]
    pub const fn is_chord(self) -> bool {
        self.ctrl() || self.alt()
    }

    /// Token prefix in the fixed ctrl → alt → shift order
    fn token_prefix(self) -> String {
        let mut prefix = String::new();
        if self.ctrl() {
            prefix.push_str("ctrl_");
        }
        if self.alt() {
            prefix.push_str("alt_");
        }
        if self.shift() {
            prefix.push_str("shift_");
        }
        prefix
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.shift() {
            parts.push("Shift");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key code representing a logical key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key, kept as typed (case preserved for text input)
    Char(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,

    // Function keys
    F(u8),
}

impl KeyCode {
    /// Canonical key name used inside tokens.
    ///
    /// Characters are lowercased; space and slash get names so that
    /// `ctrl_space` and `ctrl_slash` stay inside the token grammar.
    pub fn token_name(self) -> Option<String> {
        let name = match self {
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char('/') => "slash".to_string(),
            KeyCode::Char(c) => c.to_lowercase().to_string(),
            KeyCode::Enter => "return".to_string(),
            KeyCode::Escape => "escape".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::Backspace => "backspace".to_string(),
            KeyCode::Delete => "delete".to_string(),
            KeyCode::Insert => "insert".to_string(),
            KeyCode::Up => "arrow_up".to_string(),
            KeyCode::Down => "arrow_down".to_string(),
            KeyCode::Left => "arrow_left".to_string(),
            KeyCode::Right => "arrow_right".to_string(),
            KeyCode::Home => "home".to_string(),
            KeyCode::End => "end".to_string(),
            KeyCode::PageUp => "pageup".to_string(),
            KeyCode::PageDown => "pagedown".to_string(),
            KeyCode::F(n @ 1..=12) => format!("f{}", n),
            KeyCode::F(_) => return None,
        };
        Some(name)
    }

    /// Inverse of [`KeyCode::token_name`]
    pub fn from_token_name(name: &str) -> Option<KeyCode> {
        let key = match name {
            "space" => KeyCode::Char(' '),
            "slash" => KeyCode::Char('/'),
            "return" => KeyCode::Enter,
            "escape" => KeyCode::Escape,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" => KeyCode::Delete,
            "insert" => KeyCode::Insert,
            "arrow_up" => KeyCode::Up,
            "arrow_down" => KeyCode::Down,
            "arrow_left" => KeyCode::Left,
            "arrow_right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            _ => {
                if let Some(num) = name.strip_prefix('f') {
                    if let Ok(n) = num.parse::<u8>() {
                        if (1..=12).contains(&n) {
                            return Some(KeyCode::F(n));
                        }
                        return None;
                    }
                }
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_uppercase() && !c.is_control() => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{}", c.to_uppercase()),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Escape => write!(f, "Esc"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Insert => write!(f, "Insert"),
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::Left => write!(f, "←"),
            KeyCode::Right => write!(f, "→"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PageUp"),
            KeyCode::PageDown => write!(f, "PageDown"),
            KeyCode::F(n) => write!(f, "F{}", n),
        }
    }
}

/// A single keystroke: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    /// Create a new keystroke
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// Create a keystroke with no modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    /// Create a keystroke for a typed character
    pub const fn char(c: char) -> Self {
        Self {
            key: KeyCode::Char(c),
            mods: Modifiers::NONE,
        }
    }

    /// Create a keystroke with a character and modifiers
    pub const fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self {
            key: KeyCode::Char(c),
            mods,
        }
    }

    /// The character this keystroke would insert as literal text, if any.
    ///
    /// Only unchorded, non-control characters qualify.
    pub fn printable(&self) -> Option<char> {
        match self.key {
            KeyCode::Char(c) if !self.mods.is_chord() && !c.is_control() => Some(c),
            _ => None,
        }
    }

    /// Canonical token for this keystroke, e.g. `ctrl_s`, `alt_shift_arrow_up`.
    ///
    /// Printable characters without a ctrl/alt chord return `None`: they are
    /// text input, not bindable keys. An uppercase letter under a chord
    /// implies shift.
    pub fn token(&self) -> Option<String> {
        if self.printable().is_some() {
            return None;
        }

        let mut mods = self.mods;
        if let KeyCode::Char(c) = self.key {
            if c.is_uppercase() {
                mods = mods | Modifiers::SHIFT;
            }
        }

        let name = self.key.token_name()?;
        Some(format!("{}{}", mods.token_prefix(), name))
    }

    /// Human-readable form for help and status text, e.g. `Ctrl+Shift+Z`
    pub fn display_string(&self) -> String {
        let mut out = String::new();
        if self.mods.ctrl() {
            out.push_str("Ctrl+");
        }
        if self.mods.alt() {
            out.push_str("Alt+");
        }
        if self.mods.shift() {
            out.push_str("Shift+");
        }
        out.push_str(&self.key.to_string());
        out
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.mods.is_empty() {
            write!(f, "{}+{}", self.mods, self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}

// ============================================================================
// Mouse and composite input events
// ============================================================================

/// Mouse button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// What happened with the mouse
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseKind {
    Press(MouseButton),
    Release(MouseButton),
    Drag(MouseButton),
    Moved,
    ScrollUp,
    ScrollDown,
}

/// A mouse event in screen cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseKind,
    pub column: u16,
    pub row: u16,
    pub mods: Modifiers,
}

impl MouseEvent {
    pub const fn new(kind: MouseKind, column: u16, row: u16) -> Self {
        Self {
            kind,
            column,
            row,
            mods: Modifiers::NONE,
        }
    }
}

/// Every event the input router accepts
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(Keystroke),
    Mouse(MouseEvent),
    /// Bracketed paste
    Paste(String),
    /// Terminal resized to (columns, rows)
    Resize(u16, u16),
}

impl InputEvent {
    pub fn is_mouse(&self) -> bool {
        matches!(self, InputEvent::Mouse(_))
    }

    pub fn keystroke(&self) -> Option<&Keystroke> {
        match self {
            InputEvent::Key(k) => Some(k),
            _ => None,
        }
    }
}

impl From<Keystroke> for InputEvent {
    fn from(stroke: Keystroke) -> Self {
        InputEvent::Key(stroke)
    }
}

/// Normalize an input event into its canonical token.
///
/// Mouse, paste, and resize events never produce a token.
pub fn normalize(event: &InputEvent) -> Option<String> {
    match event {
        InputEvent::Key(stroke) => stroke.token(),
        _ => None,
    }
}
