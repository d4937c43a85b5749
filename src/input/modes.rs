//! Code-area mode handlers
//!
//! Normal mode turns literal keys into text edits. The text-entry modes
//! (search, replace, goto line) own every event while active and edit the
//! mode buffer instead of the document.

use crate::commands::Cmd;
use crate::keymap::{InputEvent, KeyCode, Keystroke};
use crate::messages::{DocumentMsg, EditorMsg, Msg};
use crate::model::{AppModel, Mode, ReplaceStage};
use crate::update::editor::{clear_search, jump_to_current_match, live_search};
use crate::update::update;

use super::Dispatch;

/// Literal input handling for one code-area mode
pub trait ModeHandler: Sync {
    fn mode(&self) -> Mode;

    /// Consume an event that no earlier routing stage claimed
    fn handle_input(&self, model: &mut AppModel, event: &InputEvent) -> Dispatch;
}

pub struct NormalMode;
pub struct SearchMode;
pub struct ReplaceMode;
pub struct GotoLineMode;

/// The handler for a mode
pub fn handler_for(mode: Mode) -> &'static dyn ModeHandler {
    match mode {
        Mode::Normal => &NormalMode,
        Mode::Search => &SearchMode,
        Mode::Replace => &ReplaceMode,
        Mode::GotoLine => &GotoLineMode,
    }
}

/// An unmodified named key
fn plain_key(stroke: &Keystroke) -> Option<KeyCode> {
    stroke.mods.is_empty().then_some(stroke.key)
}

/// Line-edit step shared by the text-entry modes
enum BufferEdit {
    Changed,
    Submit,
    Cancel,
    Ignored,
}

fn edit_buffer(buffer: &mut String, event: &InputEvent) -> BufferEdit {
    match event {
        InputEvent::Paste(text) => {
            let before = buffer.len();
            buffer.extend(text.chars().filter(|c| !c.is_control()));
            if buffer.len() == before {
                BufferEdit::Ignored
            } else {
                BufferEdit::Changed
            }
        }
        InputEvent::Key(stroke) => {
            if let Some(c) = stroke.printable() {
                buffer.push(c);
                return BufferEdit::Changed;
            }
            match plain_key(stroke) {
                Some(KeyCode::Backspace) => {
                    if buffer.pop().is_some() {
                        BufferEdit::Changed
                    } else {
                        BufferEdit::Ignored
                    }
                }
                Some(KeyCode::Enter) => BufferEdit::Submit,
                Some(KeyCode::Escape) => BufferEdit::Cancel,
                _ => BufferEdit::Ignored,
            }
        }
        _ => BufferEdit::Ignored,
    }
}

impl ModeHandler for NormalMode {
    fn mode(&self) -> Mode {
        Mode::Normal
    }

    fn handle_input(&self, model: &mut AppModel, event: &InputEvent) -> Dispatch {
        let msg = match event {
            InputEvent::Paste(text) => Msg::Document(DocumentMsg::InsertText(text.clone())),
            InputEvent::Key(stroke) => {
                if let Some(c) = stroke.printable() {
                    Msg::Document(DocumentMsg::InsertChar(c))
                } else {
                    match plain_key(stroke) {
                        Some(KeyCode::Enter) => Msg::Document(DocumentMsg::InsertNewline),
                        Some(KeyCode::Backspace) => Msg::Document(DocumentMsg::DeleteBackward),
                        Some(KeyCode::Delete) => Msg::Document(DocumentMsg::DeleteForward),
                        Some(KeyCode::PageUp) => Msg::Editor(EditorMsg::PageUp),
                        Some(KeyCode::PageDown) => Msg::Editor(EditorMsg::PageDown),
                        Some(KeyCode::Escape) => Msg::Editor(EditorMsg::ClearSelection),
                        _ => return Dispatch::Declined,
                    }
                }
            }
            _ => return Dispatch::Declined,
        };
        Dispatch::Consumed(update(model, msg))
    }
}

impl ModeHandler for SearchMode {
    fn mode(&self) -> Mode {
        Mode::Search
    }

    fn handle_input(&self, model: &mut AppModel, event: &InputEvent) -> Dispatch {
        match edit_buffer(&mut model.mode.buffer, event) {
            BufferEdit::Changed => {
                let pattern = model.mode.buffer.clone();
                live_search(model, &pattern);
            }
            BufferEdit::Submit => {
                let pattern = model.mode.buffer.clone();
                model.mode.exit();
                if pattern.is_empty() {
                    model.ui.set_status("Empty search pattern");
                } else if live_search(model, &pattern) > 0 {
                    jump_to_current_match(model);
                }
            }
            BufferEdit::Cancel => {
                model.mode.exit();
                clear_search(model);
                model.ui.set_status("Search cancelled");
            }
            BufferEdit::Ignored => {}
        }
        Dispatch::Consumed(Some(Cmd::Redraw))
    }
}

impl ModeHandler for ReplaceMode {
    fn mode(&self) -> Mode {
        Mode::Replace
    }

    fn handle_input(&self, model: &mut AppModel, event: &InputEvent) -> Dispatch {
        match edit_buffer(&mut model.mode.buffer, event) {
            BufferEdit::Changed | BufferEdit::Ignored => {}
            BufferEdit::Submit => match model.mode.replace_stage {
                ReplaceStage::Find => {
                    if model.mode.buffer.is_empty() {
                        model.mode.exit();
                        model.ui.set_status("Empty search pattern");
                    } else {
                        model.mode.replace_pattern = std::mem::take(&mut model.mode.buffer);
                        model.mode.replace_stage = ReplaceStage::With;
                        model.ui.set_status("Replace: with what?");
                    }
                }
                ReplaceStage::With => {
                    let find = std::mem::take(&mut model.mode.replace_pattern);
                    let replace = std::mem::take(&mut model.mode.buffer);
                    model.mode.exit();
                    return Dispatch::Consumed(update(
                        model,
                        Msg::Document(DocumentMsg::ReplaceAll { find, replace }),
                    ));
                }
            },
            BufferEdit::Cancel => {
                model.mode.exit();
                model.ui.set_status("Replace cancelled");
            }
        }
        Dispatch::Consumed(Some(Cmd::Redraw))
    }
}

impl ModeHandler for GotoLineMode {
    fn mode(&self) -> Mode {
        Mode::GotoLine
    }

    fn handle_input(&self, model: &mut AppModel, event: &InputEvent) -> Dispatch {
        match edit_buffer(&mut model.mode.buffer, event) {
            BufferEdit::Changed | BufferEdit::Ignored => {}
            BufferEdit::Submit => {
                let input = std::mem::take(&mut model.mode.buffer);
                model.mode.exit();
                match input.trim().parse::<usize>() {
                    Ok(line) => {
                        return Dispatch::Consumed(update(
                            model,
                            Msg::Editor(EditorMsg::GotoLine(line)),
                        ));
                    }
                    Err(_) => model.ui.set_status("Invalid line number"),
                }
            }
            BufferEdit::Cancel => {
                model.mode.exit();
                model.ui.set_status("Goto line cancelled");
            }
        }
        Dispatch::Consumed(Some(Cmd::Redraw))
    }
}
