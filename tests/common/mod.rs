//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use strand::config::EditorConfig;
use strand::input::route;
use strand::keymap::{InputEvent, KeyCode, Keystroke, Modifiers};
use strand::model::{AppModel, Document};

/// Create an 80x24 test model holding `text`, cursor at (row, col)
pub fn test_model(text: &str, row: usize, col: usize) -> AppModel {
    let mut model = AppModel::with_config(EditorConfig::default(), 80, 24);
    if let Some(slot) = model.documents.current_mut() {
        slot.document = Document::with_text(text);
        let document = &slot.document;
        slot.editor.set_cursor(document, row, col);
    }
    model.sync_layout();
    model.ensure_cursor_visible();
    model
}

/// `count` lines named `line0`, `line1`, ...
pub fn numbered_lines(count: usize) -> String {
    (0..count)
        .map(|i| format!("line{}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// An unmodified named key
pub fn key(code: KeyCode) -> InputEvent {
    Keystroke::key(code).into()
}

/// A typed character
pub fn ch(c: char) -> InputEvent {
    Keystroke::char(c).into()
}

pub fn ctrl(c: char) -> InputEvent {
    Keystroke::char_with_mods(c, Modifiers::CTRL).into()
}

pub fn alt(c: char) -> InputEvent {
    Keystroke::char_with_mods(c, Modifiers::ALT).into()
}

/// A named key with ctrl held
pub fn ctrl_key(code: KeyCode) -> InputEvent {
    Keystroke::new(code, Modifiers::CTRL).into()
}

/// Route a sequence of events
pub fn send(model: &mut AppModel, events: &[InputEvent]) {
    for event in events {
        route(model, event);
    }
}

/// Type `text` character by character
pub fn type_str(model: &mut AppModel, text: &str) {
    for c in text.chars() {
        route(model, &ch(c));
    }
}

pub fn cursor(model: &AppModel) -> (usize, usize) {
    model
        .current()
        .map(|slot| slot.editor.position())
        .unwrap_or_default()
}

pub fn offset_row(model: &AppModel) -> usize {
    model
        .current()
        .map(|slot| slot.editor.viewport.offset_row)
        .unwrap_or_default()
}

pub fn text(model: &AppModel) -> String {
    model
        .current()
        .map(|slot| slot.document.text())
        .unwrap_or_default()
}
