//! UI update functions for dialogs, panels and code-area modes

use crate::commands::Cmd;
use crate::messages::UiMsg;
use crate::model::file_browser::read_entries;
use crate::model::{
    AppModel, CommandPaletteState, FilePickerState, HelpState, Mode, PromptState, Region,
    SplitDialogState, SshDialogState, ThemeMenuState,
};
use crate::theme::available_theme_ids;

/// Handle UI messages
pub fn update_ui(model: &mut AppModel, msg: UiMsg) -> Option<Cmd> {
    match msg {
        UiMsg::SetStatus(message) => {
            model.ui.set_status(message);
            Some(Cmd::Redraw)
        }

        UiMsg::OpenSaveAs => {
            if model.documents.is_empty() {
                model.ui.set_status("No document open");
                return Some(Cmd::Redraw);
            }
            model.ui.dialogs.save_as = Some(PromptState::default());
            model.ui.set_status("Save as: enter a file name");
            Some(Cmd::Redraw)
        }

        UiMsg::OpenCreateFolder => {
            model.ui.dialogs.create_folder = Some(PromptState::default());
            model.ui.set_status(format!(
                "Create folder in {}",
                model.file_browser.dir.display()
            ));
            Some(Cmd::Redraw)
        }

        UiMsg::OpenFilePicker => {
            let dir = model
                .current()
                .and_then(|slot| slot.document.file_path.as_ref())
                .and_then(|path| path.parent().map(|p| p.to_path_buf()))
                .filter(|dir| dir.is_dir())
                .unwrap_or_else(|| model.browser_dir());
            match read_entries(&dir, model.file_browser.show_hidden) {
                Ok(entries) => {
                    model.ui.set_status(format!("Open file: {}", dir.display()));
                    model.ui.dialogs.file_picker = Some(FilePickerState {
                        dir,
                        filter: String::new(),
                        entries,
                        selected: 0,
                    });
                }
                Err(e) => {
                    model
                        .ui
                        .set_status(format!("Cannot read {}: {}", dir.display(), e));
                }
            }
            Some(Cmd::Redraw)
        }

        UiMsg::ToggleThemeMenu => {
            if model.ui.dialogs.theme_menu.take().is_some() {
                model.ui.set_status("Theme selection cancelled");
            } else {
                let selected = available_theme_ids()
                    .iter()
                    .position(|id| *id == model.config.theme)
                    .unwrap_or(0);
                model.ui.dialogs.theme_menu = Some(ThemeMenuState { selected });
                model.ui.set_status("Select a theme");
            }
            Some(Cmd::Redraw)
        }

        UiMsg::ToggleHelp => {
            if model.ui.dialogs.help.take().is_some() {
                model.regions.set(Region::CodeArea);
                model.ui.set_status("Help closed | Region: Code Area");
            } else {
                model.ui.dialogs.help = Some(HelpState::default());
                model.regions.set(Region::HelpWindow);
                model.ui.set_status("Help | Esc or F1 to close");
            }
            Some(Cmd::Redraw)
        }

        UiMsg::ToggleLineNumbers => {
            model.ui.show_line_numbers = !model.ui.show_line_numbers;
            model.sync_layout();
            model.ensure_cursor_visible();
            model.ui.set_status(if model.ui.show_line_numbers {
                "Line numbers: on"
            } else {
                "Line numbers: off"
            });
            Some(Cmd::Redraw)
        }

        UiMsg::ToggleCommandPalette => {
            if model.ui.dialogs.command_palette.take().is_none() {
                model.ui.dialogs.command_palette = Some(CommandPaletteState::default());
            }
            Some(Cmd::Redraw)
        }

        UiMsg::OpenSshDialog => {
            if model.ssh.is_none() {
                model.ui.set_status("SSH not available");
                return Some(Cmd::Redraw);
            }
            model.ui.dialogs.ssh = Some(SshDialogState::default());
            model
                .ui
                .set_status("SSH: Tab to switch fields, Enter to fetch, Esc to cancel");
            Some(Cmd::Redraw)
        }

        UiMsg::OpenSplitDialog => {
            model.ui.dialogs.split_dialog = Some(SplitDialogState::default());
            Some(Cmd::Redraw)
        }

        UiMsg::ShowFileBrowser => {
            show_file_browser(model);
            Some(Cmd::Redraw)
        }

        UiMsg::ToggleFileBrowser => {
            if model.file_browser.visible {
                hide_file_browser(model);
            } else {
                show_file_browser(model);
            }
            Some(Cmd::Redraw)
        }

        UiMsg::ToggleTerminal => {
            model.terminal.visible = !model.terminal.visible;
            model.sync_layout();
            if model.terminal.visible {
                model.regions.set(Region::Terminal);
                model.ui.set_status("Terminal opened | Region: Terminal");
            } else {
                model.regions.set(Region::CodeArea);
                model.ui.set_status("Terminal closed | Region: Code Area");
            }
            model.ensure_cursor_visible();
            Some(Cmd::Redraw)
        }

        UiMsg::ToggleGitPanel => {
            model.git_panel.visible = !model.git_panel.visible;
            model.sync_layout();
            if model.git_panel.visible {
                let dir = model.browser_dir();
                model.git_panel.refresh(&dir);
                model.regions.set(Region::GitPanel);
                model.ui.set_status(match &model.git_panel.error {
                    Some(e) => format!("Git: {}", e),
                    None => format!("Git: {} changed files", model.git_panel.entries.len()),
                });
            } else {
                model.regions.set(Region::CodeArea);
                model.ui.set_status("Git panel closed | Region: Code Area");
            }
            Some(Cmd::Redraw)
        }

        UiMsg::EnterMode(mode) => {
            if mode != Mode::Normal && model.documents.is_empty() {
                model.ui.set_status("No document open");
                return Some(Cmd::Redraw);
            }
            model.mode.enter(mode);
            if mode != Mode::Normal {
                model.regions.set(Region::CodeArea);
            }
            match mode {
                Mode::Normal => {}
                Mode::Search => model.ui.set_status("Search: Enter to find, Esc to cancel"),
                Mode::Replace => model.ui.set_status("Replace: type the text to find"),
                Mode::GotoLine => model.ui.set_status("Go to line: type a number"),
            }
            Some(Cmd::Redraw)
        }
    }
}

/// Show the file browser and give it focus
pub fn show_file_browser(model: &mut AppModel) {
    if let Err(e) = model.file_browser.refresh() {
        model.ui.set_status(format!(
            "Cannot read {}: {}",
            model.file_browser.dir.display(),
            e
        ));
        return;
    }
    model.file_browser.visible = true;
    model.sync_layout();
    model.regions.set(Region::FileBrowser);
    model.ensure_cursor_visible();
    model
        .ui
        .set_status("File browser opened | Region: File Browser");
}

/// Hide the file browser and return focus to the code area
pub fn hide_file_browser(model: &mut AppModel) {
    model.file_browser.visible = false;
    model.sync_layout();
    model.regions.set(Region::CodeArea);
    model.ensure_cursor_visible();
    model
        .ui
        .set_status("File browser closed | Region: Code Area");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    fn model() -> AppModel {
        AppModel::with_config(EditorConfig::default(), 80, 24)
    }

    #[test]
    fn test_help_switches_region() {
        let mut model = model();
        update_ui(&mut model, UiMsg::ToggleHelp);
        assert_eq!(model.regions.current(), Region::HelpWindow);
        update_ui(&mut model, UiMsg::ToggleHelp);
        assert_eq!(model.regions.current(), Region::CodeArea);
        assert_eq!(model.ui.status_message, "Help closed | Region: Code Area");
    }

    #[test]
    fn test_file_browser_narrows_code_area() {
        let mut model = model();
        let (full, _) = model.code_area_size();
        update_ui(&mut model, UiMsg::ToggleFileBrowser);
        assert!(model.file_browser.visible);
        assert_eq!(model.regions.current(), Region::FileBrowser);
        assert_eq!(model.code_area_size().0, full - model.file_browser.width - 1);

        update_ui(&mut model, UiMsg::ToggleFileBrowser);
        assert!(!model.file_browser.visible);
        assert_eq!(model.regions.current(), Region::CodeArea);
    }

    #[test]
    fn test_enter_mode_focuses_code_area() {
        let mut model = model();
        update_ui(&mut model, UiMsg::ToggleTerminal);
        assert_eq!(model.regions.current(), Region::Terminal);
        update_ui(&mut model, UiMsg::EnterMode(Mode::GotoLine));
        assert_eq!(model.mode.current(), Mode::GotoLine);
        assert_eq!(model.regions.current(), Region::CodeArea);
    }

    #[test]
    fn test_ssh_dialog_requires_capability() {
        let mut model = model();
        model.ssh = None;
        update_ui(&mut model, UiMsg::OpenSshDialog);
        assert!(model.ui.dialogs.ssh.is_none());
        assert_eq!(model.ui.status_message, "SSH not available");
    }

    #[test]
    fn test_line_numbers_toggle_changes_text_width() {
        let mut model = model();
        let with_numbers = model.current().unwrap().editor.viewport.width;
        update_ui(&mut model, UiMsg::ToggleLineNumbers);
        let without = model.current().unwrap().editor.viewport.width;
        assert_eq!(without, with_numbers + 4);
    }
}
