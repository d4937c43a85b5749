//! App message handlers (file operations, lifecycle, resize)

use std::path::Path;

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::{AppModel, DialogPurpose, DialogState, Document, PromptState};
use crate::util::{filename_for_display, validate_file_for_opening};

/// Handle app messages (file operations, lifecycle)
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Resize(cols, rows) => {
            model.screen = (cols, rows);
            model.sync_layout();
            model.ensure_cursor_visible();
            Some(Cmd::Redraw)
        }

        AppMsg::SaveFile => {
            let Some(slot) = model.documents.current_mut() else {
                model.ui.set_status("No document open");
                return Some(Cmd::Redraw);
            };
            let Some(path) = slot.document.file_path.clone() else {
                model.ui.dialogs.save_as = Some(PromptState::default());
                model.ui.set_status("Save as: enter a file name");
                return Some(Cmd::Redraw);
            };
            match slot.document.save() {
                Ok(()) => {
                    tracing::info!("Saved {}", path.display());
                    model.ui.set_status(format!("Saved: {}", path.display()));
                }
                Err(e) => {
                    tracing::warn!("Failed to save {}: {}", path.display(), e);
                    model.ui.set_status(format!(
                        "Failed to save {}: {}",
                        filename_for_display(&path),
                        e
                    ));
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::SaveFileAs(path) => {
            let Some(slot) = model.documents.current_mut() else {
                model.ui.set_status("No document open");
                return Some(Cmd::Redraw);
            };
            match slot.document.save_as(&path) {
                Ok(()) => {
                    tracing::info!("Saved as {}", path.display());
                    model.ui.set_status(format!("Saved: {}", path.display()));
                    refresh_browser_if_showing(model, &path);
                }
                Err(e) => {
                    tracing::warn!("Failed to save {}: {}", path.display(), e);
                    model.ui.set_status(format!(
                        "Failed to save {}: {}",
                        filename_for_display(&path),
                        e
                    ));
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::NewFile => {
            let index = model.documents.new_document();
            model.switch_document(index);
            let name = model
                .current()
                .map(|slot| slot.document.display_name())
                .unwrap_or_default();
            model.ui.set_status(format!("New file: {}", name));
            Some(Cmd::Redraw)
        }

        AppMsg::OpenFile(path) => {
            let name = filename_for_display(&path);
            if let Err(e) = validate_file_for_opening(&path) {
                model.ui.set_status(format!("Cannot open {}: {}", name, e));
                return Some(Cmd::Redraw);
            }
            match model.documents.open_file(&path) {
                Ok(index) => {
                    tracing::info!("Opened {}", path.display());
                    model.switch_document(index);
                    model.ensure_cursor_visible();
                    model.ui.set_status(format!("Opened: {}", name));
                }
                Err(e) => {
                    tracing::warn!("Failed to open {}: {}", path.display(), e);
                    model
                        .ui
                        .set_status(format!("Error opening {}: {}", name, e));
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::OpenRemote { name, content } => {
            let mut document = Document::with_text(&content);
            document.untitled_name = Some(name.clone());
            let index = model.documents.add(document);
            model.switch_document(index);
            model.ui.set_status(format!("Opened remote: {}", name));
            Some(Cmd::Redraw)
        }

        AppMsg::CloseTab => {
            let index = model.documents.current_index();
            let Some(slot) = model.documents.current() else {
                model.ui.set_status("No document open");
                return Some(Cmd::Redraw);
            };
            if slot.document.is_modified {
                let message = format!(
                    "Discard changes to {}? (y/n)",
                    slot.document.display_name()
                );
                model.ui.dialogs.dialog = Some(DialogState::confirm(
                    DialogPurpose::CloseModifiedTab(index),
                    message,
                ));
                return Some(Cmd::Redraw);
            }
            close_document(model, index);
            Some(Cmd::Redraw)
        }

        AppMsg::ForceCloseTab => {
            let index = model.documents.current_index();
            close_document(model, index);
            Some(Cmd::Redraw)
        }

        AppMsg::Quit => {
            if model.documents.any_modified() && !model.ui.quit_armed {
                model.ui.quit_armed = true;
                model
                    .ui
                    .set_status("Unsaved changes, press Ctrl+Q again to quit");
                return Some(Cmd::Redraw);
            }
            tracing::info!("Quit requested");
            Some(Cmd::Quit)
        }
    }
}

/// Close the document at `index`, keeping split panes pointed at valid slots
pub fn close_document(model: &mut AppModel, index: usize) {
    let Some(closed) = model.documents.close(index) else {
        model.ui.set_status("No document open");
        return;
    };
    let remaining = model.documents.document_count();
    model.split_view.on_document_closed(index, remaining);
    if remaining == 0 {
        model.split_view.reset();
    }
    tracing::info!("Closed {}", closed.document.display_name());

    let current = model.documents.current_index();
    model.switch_document(current);
    model.ui.set_status(if remaining == 0 {
        format!("Closed: {} | No document open", closed.document.display_name())
    } else {
        format!("Closed: {}", closed.document.display_name())
    });
}

fn refresh_browser_if_showing(model: &mut AppModel, saved: &Path) {
    if !model.file_browser.visible || saved.parent() != Some(model.file_browser.dir.as_path()) {
        return;
    }
    if model.file_browser.refresh().is_ok() {
        model.file_browser.select_path(saved);
    }
}
