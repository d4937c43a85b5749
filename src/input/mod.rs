//! Input routing
//!
//! Every terminal event passes through a fixed sequence of stages. The first
//! stage that consumes the event ends routing:
//!
//! 1. file actions that work everywhere (save as, new folder, open file)
//! 2. split resize chords (alt =/+/-)
//! 3. the topmost open dialog
//! 4. split separator mouse drags
//! 5. split dialog shortcut (ctrl+l) while splits exist
//! 6. split focus movement
//! 7. the file browser whenever it is visible
//! 8. bound actions from the keymap
//! 9. the focused region's handler (and, in the code area, the mode)

mod dialogs;
pub mod executor;
pub mod modes;
pub mod regions;

pub use dialogs::split_dialog_items;

use crate::commands::Cmd;
use crate::keymap::{normalize, Action, InputEvent, MouseButton, MouseKind};
use crate::messages::{AppMsg, LayoutMsg, Msg, UiMsg};
use crate::model::{AppModel, Mode, Region};
use crate::update::layout::split_position_status;
use crate::update::update;

use regions::RegionHandler;

/// Outcome of offering an event to one routing stage
#[derive(Debug)]
pub enum Dispatch {
    /// The stage handled the event; stop routing
    Consumed(Option<Cmd>),
    /// Not for this stage; try the next one
    Declined,
}

/// An input event with its token and bound action resolved once
struct RoutedEvent<'a> {
    event: &'a InputEvent,
    token: Option<String>,
    action: Action,
}

impl RoutedEvent<'_> {
    fn token_is(&self, candidates: &[&str]) -> bool {
        self.token
            .as_deref()
            .is_some_and(|token| candidates.contains(&token))
    }
}

type Stage = fn(&mut AppModel, &RoutedEvent) -> Dispatch;

const STAGES: &[(&str, Stage)] = &[
    ("global file action", global_file_action),
    ("split resize", split_resize),
    ("dialog", dialog),
    ("split drag", split_drag),
    ("split dialog", split_dialog_shortcut),
    ("split focus", split_focus),
    ("file browser", file_browser),
    ("keymap action", keymap_action),
    ("region", region),
];

/// Route one input event to whoever should handle it
pub fn route(model: &mut AppModel, event: &InputEvent) -> Option<Cmd> {
    if let InputEvent::Resize(cols, rows) = *event {
        return update(model, Msg::App(AppMsg::Resize(cols, rows)));
    }

    model.sync_layout();
    if !event.is_mouse() {
        model.split_view.cancel_drag();
    }

    let token = normalize(event);
    let action = token
        .as_deref()
        .map(|t| model.keymap.get_action(t))
        .unwrap_or(Action::Unknown);
    let routed = RoutedEvent {
        event,
        token,
        action,
    };

    let token = routed.token.as_deref().unwrap_or("");
    for (name, stage) in STAGES {
        match stage(model, &routed) {
            Dispatch::Consumed(cmd) => {
                tracing::debug!(stage = name, token, action = routed.action.name(), "input consumed");
                return cmd;
            }
            Dispatch::Declined => tracing::trace!(stage = name, token, "stage declined"),
        }
    }
    tracing::trace!(token, "no stage claimed the event");
    None
}

fn global_file_action(model: &mut AppModel, ev: &RoutedEvent) -> Dispatch {
    match ev.action {
        Action::SaveAs | Action::CreateFolder | Action::FilePicker => {
            Dispatch::Consumed(executor::dispatch(model, ev.action))
        }
        _ => Dispatch::Declined,
    }
}

fn split_resize(model: &mut AppModel, ev: &RoutedEvent) -> Dispatch {
    let delta = if ev.token_is(&["alt_=", "alt_+", "alt_shift_=", "alt_shift_+"]) {
        1
    } else if ev.token_is(&["alt_-"]) {
        -1
    } else {
        return Dispatch::Declined;
    };
    Dispatch::Consumed(update(model, Msg::Layout(LayoutMsg::ResizeActive(delta))))
}

fn dialog(model: &mut AppModel, ev: &RoutedEvent) -> Dispatch {
    let Some(layer) = model.ui.dialogs.top() else {
        return Dispatch::Declined;
    };
    // An open dialog is modal: whatever it declines is dropped
    match dialogs::handle(model, layer, ev.event) {
        Dispatch::Consumed(cmd) => Dispatch::Consumed(cmd),
        Dispatch::Declined => Dispatch::Consumed(None),
    }
}

fn split_drag(model: &mut AppModel, ev: &RoutedEvent) -> Dispatch {
    let InputEvent::Mouse(mouse) = ev.event else {
        return Dispatch::Declined;
    };
    if !model.split_view.has_splits() {
        return Dispatch::Declined;
    }
    let (width, height) = model.code_area_size();
    let (x_offset, y_offset) = model.code_area_origin();
    if !model
        .split_view
        .handle_mouse_event(mouse, width, height, x_offset, y_offset)
    {
        return Dispatch::Declined;
    }
    model.sync_layout();
    Dispatch::Consumed(Some(Cmd::Redraw))
}

fn split_dialog_shortcut(model: &mut AppModel, ev: &RoutedEvent) -> Dispatch {
    if !model.split_view.has_splits() || !ev.token_is(&["ctrl_l"]) {
        return Dispatch::Declined;
    }
    Dispatch::Consumed(update(model, Msg::Ui(UiMsg::OpenSplitDialog)))
}

fn split_focus(model: &mut AppModel, ev: &RoutedEvent) -> Dispatch {
    let Some(direction) = ev.action.focus_direction() else {
        return Dispatch::Declined;
    };
    if !model.split_view.has_splits() || !model.focus_split(direction) {
        return Dispatch::Declined;
    }
    let status = split_position_status(model);
    model.ui.set_status(status);
    model.ensure_cursor_visible();
    Dispatch::Consumed(Some(Cmd::Redraw))
}

fn file_browser(model: &mut AppModel, ev: &RoutedEvent) -> Dispatch {
    if !model.file_browser.visible {
        return Dispatch::Declined;
    }
    // A visible browser owns focus whatever region was left current
    model.regions.set(Region::FileBrowser);
    regions::FileBrowserHandler.handle_input(model, ev.event)
}

fn keymap_action(model: &mut AppModel, ev: &RoutedEvent) -> Dispatch {
    if matches!(ev.action, Action::Unknown | Action::SplitView) {
        return Dispatch::Declined;
    }
    let region = model.regions.current();
    // Text-entry modes keep their keys; only escape and return may reach a binding
    if model.mode.current() != Mode::Normal
        && region == Region::CodeArea
        && !ev.token_is(&["escape", "return"])
    {
        return Dispatch::Declined;
    }
    if ev.action.is_code_area_only() && region != Region::CodeArea {
        return Dispatch::Declined;
    }
    Dispatch::Consumed(executor::dispatch(model, ev.action))
}

fn region(model: &mut AppModel, ev: &RoutedEvent) -> Dispatch {
    if let InputEvent::Mouse(mouse) = ev.event {
        if mouse.kind == MouseKind::Press(MouseButton::Left) {
            if let Some(target) = regions::region_at(model, mouse.column, mouse.row) {
                model.regions.set(target);
            }
        }
    }
    regions::handler_for(model.regions.current()).handle_input(model, ev.event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::keymap::{KeyCode, Keystroke, Modifiers, MouseEvent};
    use crate::model::{CommandPaletteState, Document};

    fn model_with(text: &str) -> AppModel {
        let mut model = AppModel::with_config(EditorConfig::default(), 80, 24);
        model.documents.current_mut().unwrap().document = Document::with_text(text);
        model.sync_layout();
        model
    }

    fn ctrl(c: char) -> InputEvent {
        Keystroke::char_with_mods(c, Modifiers::CTRL).into()
    }

    fn alt(c: char) -> InputEvent {
        Keystroke::char_with_mods(c, Modifiers::ALT).into()
    }

    #[test]
    fn test_resize_updates_screen() {
        let mut model = model_with("");
        route(&mut model, &InputEvent::Resize(100, 40));
        assert_eq!(model.screen, (100, 40));
    }

    #[test]
    fn test_dialog_swallows_bound_keys() {
        let mut model = model_with("abc");
        model.ui.dialogs.command_palette = Some(CommandPaletteState::default());
        route(&mut model, &ctrl('a'));
        assert!(model.ui.dialogs.command_palette.is_some());
        assert!(model.current().unwrap().editor.selection_range().is_none());
    }

    #[test]
    fn test_save_as_chord_opens_over_palette() {
        let mut model = model_with("abc");
        model.ui.dialogs.command_palette = Some(CommandPaletteState::default());
        route(&mut model, &alt('a'));
        assert!(model.ui.dialogs.save_as.is_some());
        assert!(model.ui.dialogs.command_palette.is_some());
    }

    #[test]
    fn test_typing_inserts_in_code_area() {
        let mut model = model_with("");
        route(&mut model, &Keystroke::char('h').into());
        route(&mut model, &Keystroke::char('i').into());
        assert_eq!(model.current().unwrap().document.text(), "hi");
    }

    #[test]
    fn test_bound_action_runs() {
        let mut model = model_with("abc");
        route(&mut model, &ctrl('a'));
        assert!(model.current().unwrap().editor.selection_range().is_some());
    }

    #[test]
    fn test_search_mode_keeps_chords_out() {
        let mut model = model_with("abc");
        model.mode.enter(Mode::Search);
        route(&mut model, &ctrl('a'));
        assert_eq!(model.mode.current(), Mode::Search);
        assert!(model.current().unwrap().editor.selection_range().is_none());
    }

    #[test]
    fn test_code_area_only_action_outside_code_area() {
        let mut model = model_with("abc");
        model.terminal.visible = true;
        model.regions.set_enabled(Region::Terminal, true);
        model.regions.set(Region::Terminal);
        model.sync_layout();
        route(&mut model, &Keystroke::key(KeyCode::Home).into());
        // Home edits the terminal line instead of moving the document cursor
        assert_eq!(model.regions.current(), Region::Terminal);
        assert_eq!(model.current().unwrap().editor.position(), (0, 0));
    }

    struct LogSink(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_every_stage_decision_is_traced() {
        let captured = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || LogSink(sink.clone()))
            .finish();

        let mut model = model_with("abc");
        tracing::subscriber::with_default(subscriber, || {
            route(&mut model, &Keystroke::char('x').into());
        });

        let log = String::from_utf8(captured.lock().unwrap().clone()).unwrap();
        assert!(log.contains("stage declined"));
        assert!(log.contains("file browser"));
        assert!(log.contains("input consumed"));
        assert_eq!(model.current().unwrap().document.text(), "xabc");
    }

    #[test]
    fn test_visible_browser_reclaims_focus() {
        let mut model = model_with("abc");
        model.file_browser.visible = true;
        model.regions.set(Region::CodeArea);
        route(&mut model, &Keystroke::char('x').into());
        assert_eq!(model.regions.current(), Region::FileBrowser);
        assert_eq!(model.current().unwrap().document.text(), "abc");
    }

    #[test]
    fn test_file_browser_swallows_printables() {
        let mut model = model_with("abc");
        model.file_browser.visible = true;
        model.regions.set(Region::FileBrowser);
        route(&mut model, &Keystroke::char('x').into());
        assert_eq!(model.current().unwrap().document.text(), "abc");
    }

    #[test]
    fn test_split_resize_without_splits_reports() {
        let mut model = model_with("");
        route(&mut model, &alt('='));
        assert!(model.ui.status_message.starts_with("No splits to resize"));
    }

    #[test]
    fn test_split_focus_moves_between_regions() {
        let mut model = model_with("abc");
        update(&mut model, Msg::Layout(LayoutMsg::SplitVertical));
        assert_eq!(model.split_view.active_index(), Some(1));
        let left = Keystroke::new(KeyCode::Left, Modifiers::CTRL);
        route(&mut model, &left.into());
        assert_eq!(model.split_view.active_index(), Some(0));
        assert_eq!(model.ui.status_message, "Split view: Region 1/2");
    }

    #[test]
    fn test_ctrl_l_opens_split_dialog_with_splits() {
        let mut model = model_with("abc");
        update(&mut model, Msg::Layout(LayoutMsg::SplitVertical));
        route(&mut model, &ctrl('l'));
        assert!(model.ui.dialogs.split_dialog.is_some());
    }

    #[test]
    fn test_click_focuses_region() {
        let mut model = model_with("abc");
        model.regions.set(Region::TabArea);
        let click = MouseEvent::new(MouseKind::Press(MouseButton::Left), 10, 2);
        route(&mut model, &InputEvent::Mouse(click));
        assert_eq!(model.regions.current(), Region::CodeArea);
    }
}
