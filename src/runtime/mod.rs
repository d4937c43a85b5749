//! Runtime module - terminal integration
//!
//! This module contains the code that owns the real terminal:
//! - `app` - the event loop driving `route` and the view
//! - `terminal` - raw mode / alternate screen setup and teardown

pub mod app;
pub mod terminal;

pub use app::App;
