//! Region handlers: what each focusable screen area does with input that
//! no global stage claimed, and how focus leaves it

use crate::commands::Cmd;
use crate::keymap::{Action, InputEvent, KeyCode, Modifiers, MouseButton, MouseEvent, MouseKind};
use crate::messages::{AppMsg, Direction, LayoutMsg, Msg, UiMsg};
use crate::model::{AppModel, DialogPurpose, DialogState, Mode, Region};
use crate::update::editor::move_cursor;
use crate::update::{hide_file_browser, update};
use crate::util::visual_col_to_char_col;

use super::{executor, modes, Dispatch};

/// Lines moved per mouse-wheel step in the code area
const SCROLL_LINES: usize = 3;

/// Columns added or removed by one file browser resize step
const BROWSER_RESIZE_STEP: i32 = 5;

/// Input handling for one focusable region
pub trait RegionHandler: Sync {
    fn region(&self) -> Region;

    /// Consume region-scoped input
    fn handle_input(&self, model: &mut AppModel, event: &InputEvent) -> Dispatch;

    /// Leave the region in `direction`. Returns whether focus moved.
    fn handle_navigation(&self, model: &mut AppModel, direction: Direction) -> bool {
        let moved = model.regions.navigate(direction);
        if moved {
            let name = model.regions.region_name();
            model.ui.set_status(format!("Region: {}", name));
        }
        moved
    }

    /// Short key hints shown in the hints row while the region has focus
    fn supported_actions(&self) -> &'static [&'static str];
}

pub struct TabAreaHandler;
pub struct CodeAreaHandler;
pub struct FileBrowserHandler;
pub struct TerminalHandler;
pub struct GitPanelHandler;
pub struct HelpWindowHandler;

/// The handler for a region
pub fn handler_for(region: Region) -> &'static dyn RegionHandler {
    match region {
        Region::TabArea => &TabAreaHandler,
        Region::CodeArea => &CodeAreaHandler,
        Region::FileBrowser => &FileBrowserHandler,
        Region::Terminal => &TerminalHandler,
        Region::GitPanel => &GitPanelHandler,
        Region::HelpWindow => &HelpWindowHandler,
    }
}

/// Region drawn under a screen cell, if it can take focus right now
pub fn region_at(model: &AppModel, column: u16, row: u16) -> Option<Region> {
    let (column, row) = (column as usize, row as usize);
    let (x, y) = model.code_area_origin();
    let (_, height) = model.code_area_size();
    let region = if model.file_browser.visible && column < model.file_browser.width {
        Region::FileBrowser
    } else if row == 0 {
        Region::TabArea
    } else if row >= y && row < y + height && column >= x {
        Region::CodeArea
    } else if model.terminal.visible
        && row >= y + height
        && row < y + height + model.terminal.effective_height(model.screen.1 as usize)
    {
        Region::Terminal
    } else {
        return None;
    };
    model.regions.is_enabled(region).then_some(region)
}

/// Unmodified key, or None for chords and non-key events
fn plain_key(event: &InputEvent) -> Option<KeyCode> {
    match event {
        InputEvent::Key(stroke) if stroke.mods.is_empty() => Some(stroke.key),
        _ => None,
    }
}

fn arrow_direction(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

fn redraw() -> Dispatch {
    Dispatch::Consumed(Some(Cmd::Redraw))
}

// ============================================================================
// Tab strip
// ============================================================================

impl RegionHandler for TabAreaHandler {
    fn region(&self) -> Region {
        Region::TabArea
    }

    fn handle_input(&self, model: &mut AppModel, event: &InputEvent) -> Dispatch {
        match plain_key(event) {
            Some(KeyCode::Left) => Dispatch::Consumed(update(model, Msg::Layout(LayoutMsg::PrevTab))),
            Some(KeyCode::Right) => Dispatch::Consumed(update(model, Msg::Layout(LayoutMsg::NextTab))),
            Some(KeyCode::Down) => {
                self.handle_navigation(model, Direction::Down);
                redraw()
            }
            Some(KeyCode::Enter) | Some(KeyCode::Escape) => {
                model.regions.set(Region::CodeArea);
                model.ui.set_status("Region: Code Area");
                redraw()
            }
            _ => Dispatch::Declined,
        }
    }

    fn supported_actions(&self) -> &'static [&'static str] {
        &["←/→ switch tab", "↓/Enter back to code", "Esc back to code"]
    }
}

// ============================================================================
// Code area
// ============================================================================

impl CodeAreaHandler {
    /// Screen cell of the active pane's top-left text cell
    fn pane_origin(model: &AppModel) -> (usize, usize) {
        let (x, y) = model.code_area_origin();
        match model
            .split_view
            .active_region()
            .filter(|_| model.split_view.has_splits())
        {
            Some(region) => (x + region.rect.x, y + region.rect.y),
            None => (x, y),
        }
    }

    fn arrow(&self, model: &mut AppModel, direction: Direction) -> Dispatch {
        let (row, col, last_row) = model
            .current()
            .map(|slot| {
                (
                    slot.editor.cursor.row,
                    slot.editor.cursor.col,
                    slot.document.line_count().saturating_sub(1),
                )
            })
            .unwrap_or((0, 0, 0));

        let at_edge = match direction {
            Direction::Up => row == 0 && model.regions.tab_count() >= 2,
            Direction::Down => row == last_row && model.terminal.visible,
            Direction::Left => col == 0 && model.file_browser.visible,
            Direction::Right => false,
        };
        if at_edge && self.handle_navigation(model, direction) {
            return redraw();
        }
        move_cursor(model, direction, false);
        redraw()
    }

    fn mouse(&self, model: &mut AppModel, mouse: &MouseEvent) -> Dispatch {
        match mouse.kind {
            MouseKind::ScrollUp | MouseKind::ScrollDown => {
                let direction = if mouse.kind == MouseKind::ScrollUp {
                    Direction::Up
                } else {
                    Direction::Down
                };
                for _ in 0..SCROLL_LINES {
                    move_cursor(model, direction, false);
                }
                redraw()
            }
            MouseKind::Press(MouseButton::Left) | MouseKind::Drag(MouseButton::Left) => {
                let extend = matches!(mouse.kind, MouseKind::Drag(_));
                let (origin_x, origin_y) = Self::pane_origin(model);
                let (column, row) = (mouse.column as usize, mouse.row as usize);
                if row < origin_y || column < origin_x {
                    return Dispatch::Declined;
                }
                let line_count = model
                    .current()
                    .map(|slot| slot.document.line_count())
                    .unwrap_or(1);
                let gutter = model.gutter_width(line_count);
                let Some((doc, editor)) = model.current_parts() else {
                    return Dispatch::Declined;
                };
                if row - origin_y >= editor.viewport.height {
                    return Dispatch::Declined;
                }
                let target_row = editor.viewport.offset_row + row - origin_y;
                let visual = (column - origin_x).saturating_sub(gutter);
                let line = doc.get_line(target_row.min(doc.line_count().saturating_sub(1)));
                let target_col = line
                    .map(|text| {
                        let shown: String = text.chars().skip(editor.viewport.offset_col).collect();
                        editor.viewport.offset_col + visual_col_to_char_col(&shown, visual)
                    })
                    .unwrap_or(0);
                if extend {
                    editor.begin_selection();
                } else {
                    editor.clear_selection();
                }
                editor.set_cursor(doc, target_row, target_col);
                model.ensure_cursor_visible();
                redraw()
            }
            _ => Dispatch::Declined,
        }
    }
}

impl RegionHandler for CodeAreaHandler {
    fn region(&self) -> Region {
        Region::CodeArea
    }

    fn handle_input(&self, model: &mut AppModel, event: &InputEvent) -> Dispatch {
        let mode = model.mode.current();
        if mode == Mode::Normal {
            match event {
                InputEvent::Mouse(mouse) => return self.mouse(model, mouse),
                InputEvent::Key(stroke) => {
                    if let Some(direction) = arrow_direction(stroke.key) {
                        if stroke.mods.is_empty() {
                            return self.arrow(model, direction);
                        }
                        if stroke.mods == Modifiers::SHIFT {
                            move_cursor(model, direction, true);
                            return redraw();
                        }
                    }
                }
                _ => {}
            }
        }
        modes::handler_for(mode).handle_input(model, event)
    }

    fn supported_actions(&self) -> &'static [&'static str] {
        &["Type to edit", "Shift+Arrows select", "Ctrl+F search", "F1 help"]
    }
}

// ============================================================================
// File browser
// ============================================================================

impl FileBrowserHandler {
    fn open_selected(&self, model: &mut AppModel) -> Dispatch {
        let Some(entry) = model.file_browser.selected_entry().cloned() else {
            model.ui.set_status("Directory is empty");
            return redraw();
        };
        if entry.is_dir {
            if let Err(e) = model.file_browser.enter_dir(entry.path.clone()) {
                model
                    .ui
                    .set_status(format!("Cannot read {}: {}", entry.name, e));
            }
            return redraw();
        }

        update(model, Msg::App(AppMsg::OpenFile(entry.path.clone())));
        if model.documents.find_by_path(&entry.path).is_some() {
            hide_file_browser(model);
            model.ui.set_status(format!("Opened: {}", entry.name));
        }
        redraw()
    }

    fn split_selected(&self, model: &mut AppModel) -> Dispatch {
        match model.file_browser.selected_entry().cloned() {
            Some(entry) if !entry.is_dir => {
                update(model, Msg::App(AppMsg::OpenFile(entry.path.clone())));
                if model.documents.find_by_path(&entry.path).is_none() {
                    return redraw();
                }
                hide_file_browser(model);
                Dispatch::Consumed(update(model, Msg::Ui(UiMsg::OpenSplitDialog)))
            }
            _ if model.split_view.has_splits() => {
                Dispatch::Consumed(update(model, Msg::Ui(UiMsg::OpenSplitDialog)))
            }
            _ => {
                model
                    .ui
                    .set_status("Please select a file first, then press Ctrl+L to split");
                redraw()
            }
        }
    }

    fn rename_selected(&self, model: &mut AppModel) {
        if let Some(entry) = model.file_browser.selected_entry().cloned() {
            let message = format!("Rename {} to:", entry.name);
            model.ui.dialogs.dialog = Some(DialogState::input(
                DialogPurpose::RenameFile(entry.path),
                message,
                entry.name,
            ));
        }
    }

    fn delete_selected(&self, model: &mut AppModel) {
        if let Some(entry) = model.file_browser.selected_entry().cloned() {
            let message = format!("Delete {}? (y/n)", entry.name);
            model.ui.dialogs.dialog =
                Some(DialogState::confirm(DialogPurpose::DeleteFile(entry.path), message));
        }
    }

    fn resize(&self, model: &mut AppModel, delta: i32) {
        model.file_browser.resize(delta);
        model.sync_layout();
        model.ensure_cursor_visible();
        model.ui.set_status(format!(
            "File browser width: {}",
            model.file_browser.width
        ));
    }

    fn mouse(&self, model: &mut AppModel, mouse: &MouseEvent) -> Dispatch {
        match mouse.kind {
            MouseKind::Press(MouseButton::Left) => {
                if mouse.column as usize > model.file_browser.width {
                    if let Some(region) = region_at(model, mouse.column, mouse.row) {
                        model.regions.set(region);
                        return handler_for(region).handle_input(model, &InputEvent::Mouse(*mouse));
                    }
                    return redraw();
                }
                // Row 1 holds the directory header
                let row = mouse.row as usize;
                if row >= 2 {
                    let rows = model.browser_list_rows();
                    let index = model.file_browser.scroll_top(rows) + row - 2;
                    if index < model.file_browser.entries.len() {
                        model.file_browser.selected = index;
                    }
                }
                redraw()
            }
            MouseKind::ScrollUp => {
                model.file_browser.select_up();
                redraw()
            }
            MouseKind::ScrollDown => {
                model.file_browser.select_down();
                redraw()
            }
            _ => redraw(),
        }
    }
}

impl RegionHandler for FileBrowserHandler {
    fn region(&self) -> Region {
        Region::FileBrowser
    }

    /// Hard capture: every event is consumed, known or not
    fn handle_input(&self, model: &mut AppModel, event: &InputEvent) -> Dispatch {
        let stroke = match event {
            InputEvent::Key(stroke) => *stroke,
            InputEvent::Mouse(mouse) => return self.mouse(model, mouse),
            _ => return redraw(),
        };

        if let Some(c) = stroke.printable() {
            match c {
                'h' => {
                    if let Err(e) = model.file_browser.toggle_hidden() {
                        model.ui.set_status(format!("Cannot read directory: {}", e));
                    } else {
                        model.ui.set_status(if model.file_browser.show_hidden {
                            "Showing hidden files"
                        } else {
                            "Hiding hidden files"
                        });
                    }
                }
                'r' => match model.file_browser.refresh() {
                    Ok(()) => model.ui.set_status("File browser refreshed"),
                    Err(e) => model.ui.set_status(format!("Cannot read directory: {}", e)),
                },
                _ => {}
            }
            return redraw();
        }

        let token = stroke.token().unwrap_or_default();
        match token.as_str() {
            "arrow_up" => {
                if model.file_browser.at_first() && model.regions.tab_count() >= 2 {
                    self.handle_navigation(model, Direction::Up);
                } else {
                    model.file_browser.select_up();
                }
            }
            "arrow_down" => {
                if model.file_browser.at_last() {
                    self.handle_navigation(model, Direction::Down);
                } else {
                    model.file_browser.select_down();
                }
            }
            "arrow_right" => {
                self.handle_navigation(model, Direction::Right);
            }
            "return" => return self.open_selected(model),
            "backspace" => {
                if let Err(e) = model.file_browser.enter_parent() {
                    model.ui.set_status(format!("Cannot read parent directory: {}", e));
                }
            }
            "alt_d" => self.resize(model, BROWSER_RESIZE_STEP),
            "alt_s" => self.resize(model, -BROWSER_RESIZE_STEP),
            "f2" => self.rename_selected(model),
            "delete" => self.delete_selected(model),
            "ctrl_o" | "ctrl_b" | "escape" => hide_file_browser(model),
            "ctrl_l" => return self.split_selected(model),
            "ctrl_q" => return Dispatch::Consumed(executor::dispatch(model, Action::Quit)),
            _ => {}
        }
        redraw()
    }

    fn supported_actions(&self) -> &'static [&'static str] {
        &[
            "Enter open",
            "Backspace parent",
            "h hidden",
            "r refresh",
            "F2 rename",
            "Del delete",
            "Ctrl+L split",
            "Esc close",
        ]
    }
}

// ============================================================================
// Terminal panel
// ============================================================================

impl TerminalHandler {
    fn hide(&self, model: &mut AppModel) -> Dispatch {
        Dispatch::Consumed(update(model, Msg::Ui(UiMsg::ToggleTerminal)))
    }

    fn page(&self, model: &AppModel) -> usize {
        model
            .terminal
            .effective_height(model.screen.1 as usize)
            .saturating_sub(1)
            .max(1)
    }
}

impl RegionHandler for TerminalHandler {
    fn region(&self) -> Region {
        Region::Terminal
    }

    fn handle_input(&self, model: &mut AppModel, event: &InputEvent) -> Dispatch {
        if let InputEvent::Paste(text) = event {
            let line = text.lines().next().unwrap_or_default();
            for c in line.chars().filter(|c| !c.is_control()) {
                model.terminal.insert_char(c);
            }
            return redraw();
        }
        if let InputEvent::Key(stroke) = event {
            if let Some(c) = stroke.printable() {
                model.terminal.insert_char(c);
                return redraw();
            }
        }

        let rows = model.screen.1 as usize;
        match plain_key(event) {
            Some(KeyCode::Backspace) => model.terminal.backspace(),
            Some(KeyCode::Delete) => model.terminal.delete(),
            Some(KeyCode::Home) => model.terminal.move_home(),
            Some(KeyCode::End) => model.terminal.move_end(),
            Some(KeyCode::Left) => {
                if !model.terminal.move_left() {
                    self.handle_navigation(model, Direction::Left);
                }
            }
            Some(KeyCode::Right) => {
                if !model.terminal.move_right() {
                    self.handle_navigation(model, Direction::Right);
                }
            }
            Some(KeyCode::Up) => {
                if model.terminal.history.is_empty() {
                    self.handle_navigation(model, Direction::Up);
                } else {
                    model.terminal.history_prev();
                }
            }
            Some(KeyCode::Down) => model.terminal.history_next(),
            Some(KeyCode::Enter) => {
                let command = model.terminal.take_input();
                match command.trim() {
                    "exit" | "quit" => return self.hide(model),
                    "" => model.terminal.append_output(["$".to_string()]),
                    _ => {
                        tracing::info!(command = %command.trim(), "terminal command");
                        model.terminal.run(&command);
                    }
                }
            }
            Some(KeyCode::PageUp) => {
                let page = self.page(model);
                model.terminal.scroll_up(page);
            }
            Some(KeyCode::PageDown) => {
                let page = self.page(model);
                model.terminal.scroll_down(page);
            }
            Some(KeyCode::F(5)) => {
                model.terminal.grow(rows);
                model.sync_layout();
                model.ensure_cursor_visible();
            }
            Some(KeyCode::F(6)) => {
                model.terminal.shrink(rows);
                model.sync_layout();
                model.ensure_cursor_visible();
            }
            Some(KeyCode::Escape) => return self.hide(model),
            _ => return Dispatch::Declined,
        }
        redraw()
    }

    fn supported_actions(&self) -> &'static [&'static str] {
        &["Enter run", "↑/↓ history", "PgUp/PgDn scroll", "F5/F6 resize", "Esc hide"]
    }
}

// ============================================================================
// Git panel
// ============================================================================

impl RegionHandler for GitPanelHandler {
    fn region(&self) -> Region {
        Region::GitPanel
    }

    fn handle_input(&self, model: &mut AppModel, event: &InputEvent) -> Dispatch {
        if let InputEvent::Key(stroke) = event {
            if stroke.printable() == Some('r') {
                let dir = model.browser_dir();
                model.git_panel.refresh(&dir);
                model.ui.set_status(match &model.git_panel.error {
                    Some(e) => format!("Git: {}", e),
                    None => format!("Git: {} changed files", model.git_panel.entries.len()),
                });
                return redraw();
            }
        }

        match plain_key(event) {
            Some(KeyCode::Up) => model.git_panel.select_up(),
            Some(KeyCode::Down) => model.git_panel.select_down(),
            Some(KeyCode::Enter) => {
                let Some(entry) = model.git_panel.entries.get(model.git_panel.selected) else {
                    return redraw();
                };
                let path = model.browser_dir().join(&entry.path);
                return Dispatch::Consumed(update(model, Msg::App(AppMsg::OpenFile(path))));
            }
            Some(KeyCode::Tab) | Some(KeyCode::Escape) => {
                model.regions.set(Region::CodeArea);
                model.ui.set_status("Region: Code Area");
            }
            _ => return Dispatch::Declined,
        }
        redraw()
    }

    fn supported_actions(&self) -> &'static [&'static str] {
        &["↑/↓ select", "Enter open", "r refresh", "Tab/Esc back to code"]
    }
}

// ============================================================================
// Help window
// ============================================================================

impl RegionHandler for HelpWindowHandler {
    fn region(&self) -> Region {
        Region::HelpWindow
    }

    fn handle_input(&self, model: &mut AppModel, event: &InputEvent) -> Dispatch {
        match plain_key(event) {
            Some(KeyCode::Escape) | Some(KeyCode::F(1)) => {
                model.ui.dialogs.help = None;
                model.regions.set(Region::CodeArea);
                model.ui.set_status("Help closed | Region: Code Area");
                redraw()
            }
            _ => Dispatch::Declined,
        }
    }

    fn supported_actions(&self) -> &'static [&'static str] {
        &["↑/↓ scroll", "Esc/F1 close"]
    }
}
