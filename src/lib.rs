//! strand - a keyboard-driven terminal text editor
//!
//! This crate provides the core types and logic of the editor, built on the
//! Elm Architecture: input events are routed to messages, `update` applies
//! them to the `AppModel`, and the view renders the model.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod input;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod util;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use theme::Theme;
