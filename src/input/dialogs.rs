//! Modal dialog input handlers
//!
//! Only the topmost open dialog sees an event. Every handler edits its own
//! dialog state and closes the dialog before running the resulting message,
//! so the update functions never observe a half-finished dialog.

use std::path::{Path, PathBuf};

use crate::commands::{filter_actions, help_lines, Cmd};
use crate::keymap::{InputEvent, KeyCode};
use crate::messages::{AppMsg, LayoutMsg, Msg};
use crate::model::file_browser::read_entries;
use crate::model::{
    AppModel, DialogKind, DialogLayer, DialogPurpose, RemoteTarget, Region, SshField,
};
use crate::theme::{available_theme_ids, load_theme};
use crate::update::{close_document, update};
use crate::util::{filename_for_display, validate_entry_name, INVALID_NAME_CHARS};

use super::{executor, Dispatch};

/// Route an event to the dialog identified by `layer`
pub fn handle(model: &mut AppModel, layer: DialogLayer, event: &InputEvent) -> Dispatch {
    match layer {
        DialogLayer::CommandPalette => command_palette(model, event),
        DialogLayer::Ssh => ssh(model, event),
        DialogLayer::SaveAs => save_as(model, event),
        DialogLayer::CreateFolder => create_folder(model, event),
        DialogLayer::Help => help(model, event),
        DialogLayer::ThemeMenu => theme_menu(model, event),
        DialogLayer::Dialog => dialog(model, event),
        DialogLayer::FilePicker => file_picker(model, event),
        DialogLayer::SplitDialog => split_dialog(model, event),
    }
}

/// What a key means to a one-line text field
enum FieldKey {
    Char(char),
    Text(String),
    Backspace,
    Submit,
    Cancel,
    Other(Option<KeyCode>),
}

fn field_key(event: &InputEvent) -> FieldKey {
    match event {
        InputEvent::Paste(text) => {
            FieldKey::Text(text.chars().filter(|c| !c.is_control()).collect())
        }
        InputEvent::Key(stroke) => {
            if let Some(c) = stroke.printable() {
                return FieldKey::Char(c);
            }
            if !stroke.mods.is_empty() {
                return FieldKey::Other(None);
            }
            match stroke.key {
                KeyCode::Backspace => FieldKey::Backspace,
                KeyCode::Enter => FieldKey::Submit,
                KeyCode::Escape => FieldKey::Cancel,
                key => FieldKey::Other(Some(key)),
            }
        }
        _ => FieldKey::Other(None),
    }
}

fn redraw() -> Dispatch {
    Dispatch::Consumed(Some(Cmd::Redraw))
}

/// Step a list selection up or down, clamped to `len`
fn step(selected: usize, len: usize, down: bool) -> usize {
    if down {
        (selected + 1).min(len.saturating_sub(1))
    } else {
        selected.saturating_sub(1)
    }
}

// ============================================================================
// Command palette
// ============================================================================

fn command_palette(model: &mut AppModel, event: &InputEvent) -> Dispatch {
    let Some(palette) = model.ui.dialogs.command_palette.as_mut() else {
        return Dispatch::Declined;
    };
    match field_key(event) {
        FieldKey::Char(c) => {
            palette.input.push(c);
            palette.selected = 0;
        }
        FieldKey::Text(text) => {
            palette.input.push_str(&text);
            palette.selected = 0;
        }
        FieldKey::Backspace => {
            palette.input.pop();
            palette.selected = 0;
        }
        FieldKey::Other(Some(key @ (KeyCode::Up | KeyCode::Down))) => {
            let count = filter_actions(&palette.input).len();
            palette.selected = step(palette.selected, count, key == KeyCode::Down);
        }
        FieldKey::Submit => {
            let chosen = filter_actions(&palette.input)
                .get(palette.selected)
                .map(|info| info.action);
            model.ui.dialogs.command_palette = None;
            return match chosen {
                Some(action) => Dispatch::Consumed(executor::dispatch(model, action)),
                None => {
                    model.ui.set_status("No matching command");
                    redraw()
                }
            };
        }
        FieldKey::Cancel => {
            model.ui.dialogs.command_palette = None;
        }
        FieldKey::Other(_) => return Dispatch::Declined,
    }
    redraw()
}

// ============================================================================
// SSH remote file
// ============================================================================

fn ssh(model: &mut AppModel, event: &InputEvent) -> Dispatch {
    let Some(state) = model.ui.dialogs.ssh.as_mut() else {
        return Dispatch::Declined;
    };
    let accepts = |field: SshField, c: char| field != SshField::Port || c.is_ascii_digit();
    match field_key(event) {
        FieldKey::Char(c) => {
            if accepts(state.field, c) {
                state.field_mut().push(c);
            }
        }
        FieldKey::Text(text) => {
            let field = state.field;
            state
                .field_mut()
                .extend(text.chars().filter(|&c| accepts(field, c)));
        }
        FieldKey::Backspace => {
            state.field_mut().pop();
        }
        FieldKey::Other(Some(KeyCode::Tab)) => state.field = state.field.next(),
        FieldKey::Submit => return ssh_fetch(model),
        FieldKey::Cancel => {
            model.ui.dialogs.ssh = None;
            model.ui.set_status("SSH cancelled");
        }
        FieldKey::Other(_) => return Dispatch::Declined,
    }
    redraw()
}

fn ssh_fetch(model: &mut AppModel) -> Dispatch {
    let Some(state) = model.ui.dialogs.ssh.as_ref() else {
        return Dispatch::Declined;
    };
    let Ok(port) = state.port.trim().parse::<u16>() else {
        model.ui.set_status("Invalid port");
        return redraw();
    };
    if state.host.trim().is_empty() || state.path.trim().is_empty() {
        model.ui.set_status("SSH: host and path are required");
        return redraw();
    }
    let target = RemoteTarget {
        host: state.host.trim().to_string(),
        user: state.user.trim().to_string(),
        port,
        path: state.path.trim().to_string(),
    };
    let Some(client) = model.ssh.clone() else {
        model.ui.dialogs.ssh = None;
        model.ui.set_status("SSH not available");
        return redraw();
    };

    tracing::info!(destination = %target.destination(), path = %target.path, "fetching remote file");
    match client.fetch(&target) {
        Ok(content) => {
            model.ui.dialogs.ssh = None;
            let name = target.display_name();
            Dispatch::Consumed(update(model, Msg::App(AppMsg::OpenRemote { name, content })))
        }
        Err(e) => {
            tracing::warn!("SSH fetch failed: {}", e);
            model.ui.set_status(format!("SSH fetch failed: {}", e));
            redraw()
        }
    }
}

// ============================================================================
// Save-As and Create-Folder prompts
// ============================================================================

fn save_as(model: &mut AppModel, event: &InputEvent) -> Dispatch {
    let Some(prompt) = model.ui.dialogs.save_as.as_mut() else {
        return Dispatch::Declined;
    };
    match field_key(event) {
        FieldKey::Char(c) if c.is_ascii() => prompt.input.push(c),
        FieldKey::Char(_) => {}
        FieldKey::Text(text) => prompt.input.extend(text.chars().filter(char::is_ascii)),
        FieldKey::Backspace => {
            prompt.input.pop();
        }
        FieldKey::Submit => {
            let name = prompt.input.trim().to_string();
            if name.is_empty() {
                model.ui.set_status("Enter a file name");
                return redraw();
            }
            model.ui.dialogs.save_as = None;
            let path = resolve_save_path(model, &name);
            return Dispatch::Consumed(update(model, Msg::App(AppMsg::SaveFileAs(path))));
        }
        FieldKey::Cancel => {
            model.ui.dialogs.save_as = None;
            model.ui.set_status("Save as cancelled");
        }
        FieldKey::Other(_) => return Dispatch::Declined,
    }
    redraw()
}

/// Relative names land next to the current file, else in the browser directory
fn resolve_save_path(model: &AppModel, name: &str) -> PathBuf {
    let path = PathBuf::from(name);
    if path.is_absolute() {
        return path;
    }
    let base = model
        .current()
        .and_then(|slot| slot.document.file_path.as_deref())
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| model.browser_dir());
    base.join(path)
}

fn create_folder(model: &mut AppModel, event: &InputEvent) -> Dispatch {
    let Some(prompt) = model.ui.dialogs.create_folder.as_mut() else {
        return Dispatch::Declined;
    };
    match field_key(event) {
        FieldKey::Char(c) if INVALID_NAME_CHARS.contains(&c) => {
            model
                .ui
                .set_status(format!("Invalid character in folder name: {}", c));
        }
        FieldKey::Char(c) => prompt.input.push(c),
        FieldKey::Text(text) => prompt
            .input
            .extend(text.chars().filter(|c| !INVALID_NAME_CHARS.contains(c))),
        FieldKey::Backspace => {
            prompt.input.pop();
        }
        FieldKey::Submit => {
            let name = prompt.input.trim().to_string();
            if let Err(e) = validate_entry_name(&name) {
                model.ui.set_status(e);
                return redraw();
            }
            model.ui.dialogs.create_folder = None;
            let path = model.browser_dir().join(&name);
            match std::fs::create_dir(&path) {
                Ok(()) => {
                    tracing::info!("Created folder {}", path.display());
                    if model.file_browser.refresh().is_ok() {
                        model.file_browser.select_path(&path);
                    }
                    model.ui.set_status(format!("Folder created: {}", name));
                }
                Err(e) => {
                    tracing::warn!("Failed to create folder {}: {}", path.display(), e);
                    model
                        .ui
                        .set_status(format!("Failed to create folder: {} ({})", name, e));
                }
            }
        }
        FieldKey::Cancel => {
            model.ui.dialogs.create_folder = None;
            model.ui.set_status("Folder creation cancelled");
        }
        FieldKey::Other(_) => return Dispatch::Declined,
    }
    redraw()
}

// ============================================================================
// Help window
// ============================================================================

fn help(model: &mut AppModel, event: &InputEvent) -> Dispatch {
    let total = help_lines(&model.keymap).len();
    let page = model.code_area_size().1;
    let Some(state) = model.ui.dialogs.help.as_mut() else {
        return Dispatch::Declined;
    };
    let last = total.saturating_sub(1);
    match field_key(event) {
        FieldKey::Other(Some(KeyCode::Up)) => state.scroll = state.scroll.saturating_sub(1),
        FieldKey::Other(Some(KeyCode::Down)) => state.scroll = (state.scroll + 1).min(last),
        FieldKey::Other(Some(KeyCode::PageUp)) => {
            state.scroll = state.scroll.saturating_sub(page)
        }
        FieldKey::Other(Some(KeyCode::PageDown)) => {
            state.scroll = (state.scroll + page).min(last)
        }
        FieldKey::Cancel | FieldKey::Other(Some(KeyCode::F(1))) => {
            model.ui.dialogs.help = None;
            model.regions.set(Region::CodeArea);
            model.ui.set_status("Help closed | Region: Code Area");
        }
        _ => return Dispatch::Declined,
    }
    redraw()
}

// ============================================================================
// Theme menu
// ============================================================================

fn theme_menu(model: &mut AppModel, event: &InputEvent) -> Dispatch {
    let ids = available_theme_ids();
    let Some(menu) = model.ui.dialogs.theme_menu.as_mut() else {
        return Dispatch::Declined;
    };
    match field_key(event) {
        FieldKey::Other(Some(KeyCode::Up)) | FieldKey::Char('k') => {
            menu.selected = step(menu.selected, ids.len(), false)
        }
        FieldKey::Other(Some(KeyCode::Down)) | FieldKey::Char('j') => {
            menu.selected = step(menu.selected, ids.len(), true)
        }
        FieldKey::Submit => {
            let Some(id) = ids.get(menu.selected).cloned() else {
                return redraw();
            };
            model.ui.dialogs.theme_menu = None;
            apply_theme(model, &id);
        }
        FieldKey::Cancel => {
            model.ui.dialogs.theme_menu = None;
            model.ui.set_status("Theme selection cancelled");
        }
        _ => return Dispatch::Declined,
    }
    redraw()
}

fn apply_theme(model: &mut AppModel, id: &str) {
    match load_theme(id) {
        Ok(theme) => {
            model.theme = theme;
            model.config.theme = id.to_string();
            if model.persist_config {
                if let Err(e) = model.config.save() {
                    tracing::warn!("Failed to save config: {}", e);
                }
            }
            model.ui.set_status(format!("Theme: {}", model.theme.name));
        }
        Err(e) => {
            tracing::warn!("Failed to load theme '{}': {}", id, e);
            model
                .ui
                .set_status(format!("Failed to load theme {}: {}", id, e));
        }
    }
}

// ============================================================================
// Generic confirm / input dialog
// ============================================================================

fn dialog(model: &mut AppModel, event: &InputEvent) -> Dispatch {
    let Some(state) = model.ui.dialogs.dialog.as_mut() else {
        return Dispatch::Declined;
    };
    let key = field_key(event);
    let answer = match state.kind {
        DialogKind::Confirm => match key {
            FieldKey::Char('y') | FieldKey::Char('Y') | FieldKey::Submit => Some(true),
            FieldKey::Char('n') | FieldKey::Char('N') | FieldKey::Cancel => Some(false),
            FieldKey::Other(_) => return Dispatch::Declined,
            _ => None,
        },
        DialogKind::Input => match key {
            FieldKey::Char(c) => {
                state.input.push(c);
                None
            }
            FieldKey::Text(text) => {
                state.input.push_str(&text);
                None
            }
            FieldKey::Backspace => {
                state.input.pop();
                None
            }
            FieldKey::Submit => Some(true),
            FieldKey::Cancel => Some(false),
            FieldKey::Other(_) => return Dispatch::Declined,
        },
    };

    match answer {
        Some(true) => {
            if let Some(state) = model.ui.dialogs.dialog.take() {
                return Dispatch::Consumed(resolve_dialog(model, state.purpose, state.input));
            }
        }
        Some(false) => {
            model.ui.dialogs.dialog = None;
            model.ui.set_status("Cancelled");
        }
        None => {}
    }
    redraw()
}

fn resolve_dialog(model: &mut AppModel, purpose: DialogPurpose, input: String) -> Option<Cmd> {
    match purpose {
        DialogPurpose::CloseModifiedTab(index) => close_document(model, index),
        DialogPurpose::DeleteFile(path) => delete_entry(model, &path),
        DialogPurpose::RenameFile(path) => rename_entry(model, &path, input.trim()),
    }
    Some(Cmd::Redraw)
}

fn delete_entry(model: &mut AppModel, path: &Path) {
    let name = filename_for_display(path);
    let result = if path.is_dir() {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    };
    match result {
        Ok(()) => {
            tracing::info!("Deleted {}", path.display());
            let _ = model.file_browser.refresh();
            model.ui.set_status(format!("Deleted: {}", name));
        }
        Err(e) => {
            tracing::warn!("Failed to delete {}: {}", path.display(), e);
            model
                .ui
                .set_status(format!("Failed to delete {}: {}", name, e));
        }
    }
}

fn rename_entry(model: &mut AppModel, path: &Path, new_name: &str) {
    if let Err(e) = validate_entry_name(new_name) {
        model.ui.set_status(e);
        return;
    }
    let target = path.with_file_name(new_name);
    let old_name = filename_for_display(path);
    if target.exists() {
        model
            .ui
            .set_status(format!("Failed to rename {}: {} already exists", old_name, new_name));
        return;
    }
    match std::fs::rename(path, &target) {
        Ok(()) => {
            tracing::info!("Renamed {} to {}", path.display(), target.display());
            if let Some(index) = model.documents.find_by_path(path) {
                if let Some(slot) = model.documents.get_mut(index) {
                    slot.document.file_path = Some(target.clone());
                }
            }
            if model.file_browser.refresh().is_ok() {
                model.file_browser.select_path(&target);
            }
            model
                .ui
                .set_status(format!("Renamed: {} -> {}", old_name, new_name));
        }
        Err(e) => {
            tracing::warn!("Failed to rename {}: {}", path.display(), e);
            model
                .ui
                .set_status(format!("Failed to rename {}: {}", old_name, e));
        }
    }
}

// ============================================================================
// File picker
// ============================================================================

fn file_picker(model: &mut AppModel, event: &InputEvent) -> Dispatch {
    let show_hidden = model.file_browser.show_hidden;
    let Some(picker) = model.ui.dialogs.file_picker.as_mut() else {
        return Dispatch::Declined;
    };
    match field_key(event) {
        FieldKey::Char(c) => {
            picker.filter.push(c);
            picker.selected = 0;
        }
        FieldKey::Text(text) => {
            picker.filter.push_str(&text);
            picker.selected = 0;
        }
        FieldKey::Backspace => {
            if picker.filter.pop().is_none() {
                if let Some(parent) = picker.dir.parent().map(Path::to_path_buf) {
                    let previous = picker.dir.clone();
                    match read_entries(&parent, show_hidden) {
                        Ok(entries) => {
                            picker.entries = entries;
                            picker.dir = parent;
                            picker.selected = picker
                                .visible_entries()
                                .iter()
                                .position(|e| e.path == previous)
                                .unwrap_or(0);
                        }
                        // `picker` still borrows the dialog
                        Err(e) => model.ui.status_message = format!("Cannot read directory: {}", e),
                    }
                }
            }
            picker.selected = picker.selected.min(picker.visible_entries().len().saturating_sub(1));
        }
        FieldKey::Other(Some(key @ (KeyCode::Up | KeyCode::Down))) => {
            let count = picker.visible_entries().len();
            picker.selected = step(picker.selected, count, key == KeyCode::Down);
        }
        FieldKey::Other(Some(KeyCode::Tab)) => {
            if let Some(name) = picker
                .visible_entries()
                .get(picker.selected)
                .map(|e| e.name.clone())
            {
                picker.filter = name;
                picker.selected = 0;
            }
        }
        FieldKey::Submit => {
            let Some(entry) = picker.visible_entries().get(picker.selected).map(|e| (*e).clone())
            else {
                model.ui.set_status("No matching file");
                return redraw();
            };
            if entry.is_dir {
                match read_entries(&entry.path, show_hidden) {
                    Ok(entries) => {
                        picker.dir = entry.path;
                        picker.entries = entries;
                        picker.filter.clear();
                        picker.selected = 0;
                    }
                    Err(e) => model
                        .ui
                        .set_status(format!("Cannot read {}: {}", entry.name, e)),
                }
                return redraw();
            }
            model.ui.dialogs.file_picker = None;
            return Dispatch::Consumed(update(model, Msg::App(AppMsg::OpenFile(entry.path))));
        }
        FieldKey::Cancel => {
            model.ui.dialogs.file_picker = None;
            model.ui.set_status("File picker closed");
        }
        FieldKey::Other(_) => return Dispatch::Declined,
    }
    redraw()
}

// ============================================================================
// Split dialog
// ============================================================================

/// Entries offered by the split dialog, as (label, message) pairs
pub fn split_dialog_items(model: &AppModel) -> Vec<(String, LayoutMsg)> {
    let mut items = vec![
        ("Split vertical".to_string(), LayoutMsg::SplitVertical),
        ("Split horizontal".to_string(), LayoutMsg::SplitHorizontal),
    ];
    if model.split_view.has_splits() {
        for (index, region) in model.split_view.regions().iter().enumerate() {
            let name = model
                .documents
                .get(region.document_index)
                .map(|slot| slot.document.display_name())
                .unwrap_or_default();
            items.push((
                format!("Close region {}: {}", index + 1, name),
                LayoutMsg::CloseSplit(index),
            ));
        }
        items.push(("Close all splits".to_string(), LayoutMsg::CloseAllSplits));
    }
    items
}

fn split_dialog(model: &mut AppModel, event: &InputEvent) -> Dispatch {
    let mut items = split_dialog_items(model);
    let Some(state) = model.ui.dialogs.split_dialog.as_mut() else {
        return Dispatch::Declined;
    };
    match field_key(event) {
        FieldKey::Other(Some(key @ (KeyCode::Up | KeyCode::Down))) => {
            state.selected = step(state.selected, items.len(), key == KeyCode::Down);
        }
        FieldKey::Submit => {
            let selected = state.selected.min(items.len().saturating_sub(1));
            model.ui.dialogs.split_dialog = None;
            let (_, msg) = items.swap_remove(selected);
            return Dispatch::Consumed(update(model, Msg::Layout(msg)));
        }
        FieldKey::Cancel => {
            model.ui.dialogs.split_dialog = None;
            model.ui.set_status("Split dialog closed");
        }
        _ => return Dispatch::Declined,
    }
    redraw()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::keymap::Keystroke;
    use crate::model::{
        CommandPaletteState, DialogState, Document, HelpState, PromptState, SplitDialogState,
        ThemeMenuState,
    };

    fn model() -> AppModel {
        AppModel::with_config(EditorConfig::default(), 80, 24)
    }

    fn key(code: KeyCode) -> InputEvent {
        Keystroke::key(code).into()
    }

    fn type_into(model: &mut AppModel, layer: DialogLayer, text: &str) {
        for c in text.chars() {
            handle(model, layer, &Keystroke::char(c).into());
        }
    }

    #[test]
    fn test_palette_runs_selected_action() {
        let mut model = model();
        model.ui.dialogs.command_palette = Some(CommandPaletteState::default());
        type_into(&mut model, DialogLayer::CommandPalette, "line numbers");
        handle(&mut model, DialogLayer::CommandPalette, &key(KeyCode::Enter));
        assert!(model.ui.dialogs.command_palette.is_none());
        assert!(!model.ui.show_line_numbers);
    }

    #[test]
    fn test_palette_without_match() {
        let mut model = model();
        model.ui.dialogs.command_palette = Some(CommandPaletteState::default());
        type_into(&mut model, DialogLayer::CommandPalette, "zzzzqq");
        handle(&mut model, DialogLayer::CommandPalette, &key(KeyCode::Enter));
        assert_eq!(model.ui.status_message, "No matching command");
    }

    #[test]
    fn test_save_as_relative_to_browser_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model();
        model.file_browser.dir = dir.path().to_path_buf();
        model.ui.dialogs.save_as = Some(PromptState::default());
        type_into(&mut model, DialogLayer::SaveAs, "new.txt");
        handle(&mut model, DialogLayer::SaveAs, &key(KeyCode::Enter));
        assert!(model.ui.dialogs.save_as.is_none());
        assert!(dir.path().join("new.txt").exists());
    }

    #[test]
    fn test_save_as_empty_name_stays_open() {
        let mut model = model();
        model.ui.dialogs.save_as = Some(PromptState::default());
        handle(&mut model, DialogLayer::SaveAs, &key(KeyCode::Enter));
        assert!(model.ui.dialogs.save_as.is_some());
        assert_eq!(model.ui.status_message, "Enter a file name");
    }

    #[test]
    fn test_create_folder_rejects_slash_and_creates() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model();
        model.file_browser.dir = dir.path().to_path_buf();
        model.ui.dialogs.create_folder = Some(PromptState::default());
        type_into(&mut model, DialogLayer::CreateFolder, "a/b");
        assert_eq!(model.ui.dialogs.create_folder.as_ref().unwrap().input, "ab");
        handle(&mut model, DialogLayer::CreateFolder, &key(KeyCode::Enter));
        assert!(dir.path().join("ab").is_dir());
        assert_eq!(model.ui.status_message, "Folder created: ab");
    }

    #[test]
    fn test_create_folder_failure_reports_reason() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("taken")).unwrap();
        let mut model = model();
        model.file_browser.dir = dir.path().to_path_buf();
        model.ui.dialogs.create_folder = Some(PromptState::default());
        type_into(&mut model, DialogLayer::CreateFolder, "taken");
        handle(&mut model, DialogLayer::CreateFolder, &key(KeyCode::Enter));
        assert!(model
            .ui
            .status_message
            .starts_with("Failed to create folder: taken ("));
    }

    #[test]
    fn test_help_scroll_and_close() {
        let mut model = model();
        model.ui.dialogs.help = Some(HelpState::default());
        model.regions.set(Region::HelpWindow);
        handle(&mut model, DialogLayer::Help, &key(KeyCode::Down));
        handle(&mut model, DialogLayer::Help, &key(KeyCode::Down));
        handle(&mut model, DialogLayer::Help, &key(KeyCode::Up));
        assert_eq!(model.ui.dialogs.help.unwrap().scroll, 1);
        handle(&mut model, DialogLayer::Help, &key(KeyCode::F(1)));
        assert!(model.ui.dialogs.help.is_none());
        assert_eq!(model.regions.current(), Region::CodeArea);
    }

    #[test]
    fn test_theme_menu_applies_without_persisting() {
        let mut model = model();
        let ids = available_theme_ids();
        let target = ids.iter().position(|id| id == "github-light").unwrap();
        model.ui.dialogs.theme_menu = Some(ThemeMenuState { selected: target });
        handle(&mut model, DialogLayer::ThemeMenu, &key(KeyCode::Enter));
        assert_eq!(model.config.theme, "github-light");
        assert!(model.ui.status_message.starts_with("Theme: "));
    }

    #[test]
    fn test_theme_menu_cancel() {
        let mut model = model();
        model.ui.dialogs.theme_menu = Some(ThemeMenuState::default());
        handle(&mut model, DialogLayer::ThemeMenu, &Keystroke::char('j').into());
        handle(&mut model, DialogLayer::ThemeMenu, &key(KeyCode::Escape));
        assert_eq!(model.ui.status_message, "Theme selection cancelled");
        assert_eq!(model.config.theme, "default-dark");
    }

    #[test]
    fn test_confirm_close_modified_tab() {
        let mut model = model();
        model.documents.add(Document::with_text("x"));
        model.ui.dialogs.dialog = Some(DialogState::confirm(
            DialogPurpose::CloseModifiedTab(1),
            "Discard?",
        ));
        handle(&mut model, DialogLayer::Dialog, &Keystroke::char('y').into());
        assert_eq!(model.documents.document_count(), 1);
        assert!(model.ui.dialogs.dialog.is_none());
    }

    #[test]
    fn test_confirm_no_cancels() {
        let mut model = model();
        model.ui.dialogs.dialog = Some(DialogState::confirm(
            DialogPurpose::CloseModifiedTab(0),
            "Discard?",
        ));
        handle(&mut model, DialogLayer::Dialog, &Keystroke::char('n').into());
        assert_eq!(model.documents.document_count(), 1);
        assert_eq!(model.ui.status_message, "Cancelled");
    }

    #[test]
    fn test_rename_updates_open_document() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        std::fs::write(&old, "x").unwrap();
        let mut model = model();
        let index = model.documents.open_file(&old).unwrap();
        model.file_browser.dir = dir.path().to_path_buf();
        model.ui.dialogs.dialog = Some(DialogState::input(
            DialogPurpose::RenameFile(old.clone()),
            "Rename",
            "",
        ));
        type_into(&mut model, DialogLayer::Dialog, "new.txt");
        handle(&mut model, DialogLayer::Dialog, &key(KeyCode::Enter));

        let renamed = dir.path().join("new.txt");
        assert!(renamed.exists());
        assert!(!old.exists());
        assert_eq!(
            model.documents.get(index).unwrap().document.file_path.as_deref(),
            Some(renamed.as_path())
        );
    }

    #[test]
    fn test_delete_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.txt");
        std::fs::write(&path, "x").unwrap();
        let mut model = model();
        model.ui.dialogs.dialog = Some(DialogState::confirm(
            DialogPurpose::DeleteFile(path.clone()),
            "Delete?",
        ));
        handle(&mut model, DialogLayer::Dialog, &key(KeyCode::Enter));
        assert!(!path.exists());
        assert_eq!(model.ui.status_message, "Deleted: gone.txt");
    }

    #[test]
    fn test_split_dialog_items() {
        let mut model = model();
        let labels: Vec<String> = split_dialog_items(&model).into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Split vertical", "Split horizontal"]);

        model.ui.dialogs.split_dialog = Some(SplitDialogState::default());
        handle(&mut model, DialogLayer::SplitDialog, &key(KeyCode::Enter));
        assert!(model.split_view.has_splits());

        let labels: Vec<String> = split_dialog_items(&model).into_iter().map(|(l, _)| l).collect();
        assert_eq!(
            labels,
            vec![
                "Split vertical",
                "Split horizontal",
                "Close region 1: Untitled",
                "Close region 2: Untitled",
                "Close all splits",
            ]
        );
    }

    #[test]
    fn test_file_picker_enters_directories_and_opens_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("inner.txt"), "hello").unwrap();
        let mut model = model();
        model.ui.dialogs.file_picker = Some(crate::model::FilePickerState {
            dir: dir.path().to_path_buf(),
            filter: String::new(),
            entries: read_entries(dir.path(), false).unwrap(),
            selected: 0,
        });

        handle(&mut model, DialogLayer::FilePicker, &key(KeyCode::Enter));
        let picker = model.ui.dialogs.file_picker.as_ref().unwrap();
        assert_eq!(picker.dir, dir.path().join("sub"));

        type_into(&mut model, DialogLayer::FilePicker, "inn");
        handle(&mut model, DialogLayer::FilePicker, &key(KeyCode::Enter));
        assert!(model.ui.dialogs.file_picker.is_none());
        assert_eq!(model.current().unwrap().document.text(), "hello");
    }

    #[test]
    fn test_file_picker_backspace_on_empty_filter_goes_up() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let mut model = model();
        model.ui.dialogs.file_picker = Some(crate::model::FilePickerState {
            dir: sub.clone(),
            filter: String::new(),
            entries: Vec::new(),
            selected: 0,
        });
        handle(&mut model, DialogLayer::FilePicker, &key(KeyCode::Backspace));
        let picker = model.ui.dialogs.file_picker.as_ref().unwrap();
        assert_eq!(picker.dir, dir.path());
        assert_eq!(picker.visible_entries()[picker.selected].path, sub);
    }

    #[test]
    fn test_file_picker_unreadable_parent_reports() {
        let dir = tempfile::tempdir().unwrap();
        let orphan = dir.path().join("missing").join("child");
        let mut model = model();
        model.ui.dialogs.file_picker = Some(crate::model::FilePickerState {
            dir: orphan.clone(),
            filter: String::new(),
            entries: Vec::new(),
            selected: 0,
        });
        handle(&mut model, DialogLayer::FilePicker, &key(KeyCode::Backspace));

        assert!(model.ui.status_message.starts_with("Cannot read directory: "));
        let picker = model.ui.dialogs.file_picker.as_ref().unwrap();
        assert_eq!(picker.dir, orphan);
    }
}
