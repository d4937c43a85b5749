//! Layout update functions for tabs and split regions

use crate::commands::Cmd;
use crate::messages::LayoutMsg;
use crate::model::AppModel;

/// Handle layout messages (tabs, splits)
pub fn update_layout(model: &mut AppModel, msg: LayoutMsg) -> Option<Cmd> {
    match msg {
        LayoutMsg::NextTab | LayoutMsg::PrevTab => {
            if model.documents.document_count() < 2 {
                model.ui.set_status("No other tabs");
                return Some(Cmd::Redraw);
            }
            let index = if matches!(msg, LayoutMsg::NextTab) {
                model.regions.next_tab()
            } else {
                model.regions.previous_tab()
            };
            switch_tab(model, index);
            Some(Cmd::Redraw)
        }

        LayoutMsg::SwitchToTab(index) => {
            if index >= model.documents.document_count() {
                model.ui.set_status(format!("No tab {}", index + 1));
                return Some(Cmd::Redraw);
            }
            switch_tab(model, index);
            Some(Cmd::Redraw)
        }

        LayoutMsg::SplitVertical | LayoutMsg::SplitHorizontal => {
            let vertical = matches!(msg, LayoutMsg::SplitVertical);
            split(model, vertical);
            Some(Cmd::Redraw)
        }

        LayoutMsg::CloseSplit(index) => {
            close_split(model, index);
            Some(Cmd::Redraw)
        }

        LayoutMsg::CloseAllSplits => {
            if !model.split_view.has_splits() {
                model.ui.set_status("No splits to close");
                return Some(Cmd::Redraw);
            }
            model.split_view.reset();
            model.sync_layout();
            model.ensure_cursor_visible();
            tracing::info!("Closed all splits");
            model.ui.set_status("All splits closed");
            Some(Cmd::Redraw)
        }

        LayoutMsg::FocusRegion(direction) => {
            if !model.split_view.has_splits() {
                model.ui.set_status("No splits");
                return Some(Cmd::Redraw);
            }
            if model.focus_split(direction) {
                model.ui.set_status(split_position_status(model));
            } else {
                model.ui.set_status("No split in that direction");
            }
            Some(Cmd::Redraw)
        }

        LayoutMsg::ResizeActive(delta) => {
            if !model.split_view.has_splits() {
                model
                    .ui
                    .set_status("No splits to resize | Create splits first (Ctrl+L in file browser)");
                return Some(Cmd::Redraw);
            }
            if model.split_view.resize_active(delta) {
                model.sync_layout();
                model.ensure_cursor_visible();
                model.ui.set_status(if delta > 0 {
                    "Split: Increased active region size | Alt+=/- to resize"
                } else {
                    "Split: Decreased active region size | Alt+=/- to resize"
                });
            } else {
                model.ui.set_status("Split: Cannot resize further");
            }
            Some(Cmd::Redraw)
        }
    }
}

/// "Split view: Region i/n" for the active pane
pub fn split_position_status(model: &AppModel) -> String {
    let count = model.split_view.regions().len();
    let active = model.split_view.active_index().unwrap_or(0);
    format!("Split view: Region {}/{}", active + 1, count)
}

fn switch_tab(model: &mut AppModel, index: usize) {
    model.switch_document(index);
    model.ensure_cursor_visible();
    let count = model.documents.document_count();
    let name = model
        .current()
        .map(|slot| slot.document.display_name())
        .unwrap_or_default();
    model
        .ui
        .set_status(format!("Tab {}/{}: {}", index + 1, count, name));
}

fn split(model: &mut AppModel, vertical: bool) {
    if model.documents.is_empty() {
        model.ui.set_status("No document open");
        return;
    }
    let (width, height) = model.code_area_size();
    let document_index = model.documents.current_index();
    let previous = model.split_view.active_index().unwrap_or(0);
    let view = model.current().map(|slot| slot.editor.clone());

    let done = if vertical {
        model.split_view.split_vertical(width, height, document_index)
    } else {
        model.split_view.split_horizontal(width, height, document_index)
    };
    if !done {
        model.ui.set_status("Region too small to split");
        return;
    }

    if let Some(region) = model.split_view.region_mut(previous) {
        region.saved_view = view;
    }
    model.sync_layout();
    model.ensure_cursor_visible();
    model.ui.set_status(format!(
        "Split {}: {} regions | Ctrl+Arrow to move focus",
        if vertical { "vertical" } else { "horizontal" },
        model.split_view.regions().len()
    ));
}

fn close_split(model: &mut AppModel, index: usize) {
    let Some(region) = model.split_view.regions().get(index) else {
        model.ui.set_status("No such split");
        return;
    };
    let modified = model
        .documents
        .get(region.document_index)
        .is_some_and(|slot| slot.document.is_modified);
    if modified {
        model
            .ui
            .set_status("Cannot close split: document has unsaved changes");
        return;
    }

    let closing_active = model.split_view.active_index() == Some(index);
    // Closing down to one pane drops the regions, so remember the survivor
    let survivor = match model.split_view.regions() {
        [a, b] => {
            let r = if index == 0 { b } else { a };
            Some((r.document_index, r.saved_view.clone()))
        }
        _ => None,
    };
    if !model.split_view.close_region(index) {
        model.ui.set_status("Cannot close this split");
        return;
    }

    // Only a change of active pane swaps the live editor
    let restore = if closing_active {
        model
            .split_view
            .active_region_mut()
            .map(|r| (r.document_index, r.saved_view.take()))
            .or(survivor)
    } else {
        None
    };
    if let Some((document_index, saved)) = restore {
        model.documents.switch_to(document_index);
        if let (Some(saved), Some(slot)) = (saved, model.documents.current_mut()) {
            slot.editor = saved;
            slot.editor.clamp_cursor(&slot.document);
        }
    }
    model.sync_layout();
    model.ensure_cursor_visible();
    model.ui.set_status(if model.split_view.has_splits() {
        format!("Split closed | {}", split_position_status(model))
    } else {
        "Split view closed".to_string()
    });
}
