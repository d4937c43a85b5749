//! Configurable keyboard mapping system
//!
//! This module provides a data-driven keybinding system that:
//! - Normalizes raw input into canonical tokens (`ctrl_s`, `alt_arrow_left`)
//! - Maps tokens to editor actions through a bidirectional binding table
//! - Enables user customization via a YAML keymap file
//!
//! # Architecture
//!
//! ```text
//! crossterm::Event → InputEvent → token → KeyBindingTable::get_action() → Action → Msg
//! ```

mod action;
mod config;
mod crossterm_adapter;
mod defaults;
mod table;
mod types;

pub use action::{Action, ActionGroup, ActionInfo, ACTIONS};
pub use config::{
    apply_overrides, load_keymap_file, parse_keymap_yaml, parse_token, BindingConfig,
    KeymapConfig, KeymapError,
};
pub use crossterm_adapter::{input_from_crossterm, keystroke_from_crossterm, mouse_from_crossterm};
pub use defaults::{load_keymap, seed_defaults};
pub use table::KeyBindingTable;
pub use types::{
    normalize, InputEvent, KeyCode, Keystroke, Modifiers, MouseButton, MouseEvent, MouseKind,
};

#[cfg(test)]
mod tests;
