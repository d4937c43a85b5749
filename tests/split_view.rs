//! Split view tests - pane focus, per-pane documents and views, the split dialog

mod common;

use common::{alt, ctrl, ctrl_key, cursor, key, send, test_model};
use strand::input::{route, split_dialog_items};
use strand::keymap::KeyCode;
use strand::messages::{LayoutMsg, Msg};
use strand::model::{AppModel, Document};
use strand::update::update;

/// Two documents in a vertical split: left shows "left", right shows "right",
/// right pane active
fn two_pane_model() -> AppModel {
    let mut model = test_model("left\nfile", 0, 0);
    model.documents.add(Document::with_text("right\nfile\nhere"));
    model.switch_document(0);
    update(&mut model, Msg::Layout(LayoutMsg::SplitVertical));
    update(&mut model, Msg::Layout(LayoutMsg::SwitchToTab(1)));
    model
}

fn pane_documents(model: &AppModel) -> Vec<usize> {
    model
        .split_view
        .regions()
        .iter()
        .map(|r| r.document_index)
        .collect()
}

#[test]
fn test_split_assigns_documents_per_pane() {
    let model = two_pane_model();
    assert_eq!(model.split_view.regions().len(), 2);
    assert_eq!(model.split_view.active_index(), Some(1));
    assert_eq!(pane_documents(&model), vec![0, 1]);
    assert_eq!(model.documents.current_index(), 1);
}

#[test]
fn test_focus_right_switches_document() {
    let mut model = two_pane_model();
    route(&mut model, &ctrl_key(KeyCode::Left));
    assert_eq!(model.split_view.active_index(), Some(0));
    assert_eq!(model.documents.current_index(), 0);

    route(&mut model, &ctrl_key(KeyCode::Right));

    let active = model.split_view.active_region().unwrap();
    assert_eq!(model.split_view.active_index(), Some(1));
    assert_eq!(model.documents.current_index(), active.document_index);
    assert_eq!(model.ui.status_message, "Split view: Region 2/2");
}

#[test]
fn test_focus_without_neighbour_reports() {
    let mut model = two_pane_model();
    route(&mut model, &ctrl_key(KeyCode::Right));
    assert_eq!(model.split_view.active_index(), Some(1));
    assert_eq!(model.ui.status_message, "No split in that direction");
}

#[test]
fn test_each_pane_keeps_its_cursor() {
    let mut model = two_pane_model();
    send(&mut model, &[key(KeyCode::Down), key(KeyCode::Right)]);
    assert_eq!(cursor(&model), (1, 1));

    route(&mut model, &ctrl_key(KeyCode::Left));
    send(&mut model, &[key(KeyCode::End)]);
    assert_eq!(cursor(&model), (0, 4));

    route(&mut model, &ctrl_key(KeyCode::Right));
    assert_eq!(cursor(&model), (1, 1));
}

#[test]
fn test_same_document_in_both_panes() {
    let mut model = test_model("shared", 0, 0);
    update(&mut model, Msg::Layout(LayoutMsg::SplitHorizontal));
    assert_eq!(pane_documents(&model), vec![0, 0]);

    route(&mut model, &ctrl_key(KeyCode::Up));
    assert_eq!(model.split_view.active_index(), Some(0));
    assert_eq!(model.documents.current_index(), 0);
}

#[test]
fn test_resize_chords() {
    let mut model = test_model("text", 0, 0);
    route(&mut model, &alt('='));
    assert!(model.ui.status_message.starts_with("No splits to resize"));

    update(&mut model, Msg::Layout(LayoutMsg::SplitVertical));
    route(&mut model, &alt('-'));
    assert!(model.ui.status_message.starts_with("Split:"));
}

#[test]
fn test_split_dialog_closes_all() {
    let mut model = two_pane_model();
    route(&mut model, &ctrl('l'));
    assert!(model.ui.dialogs.split_dialog.is_some());

    let items = split_dialog_items(&model);
    assert_eq!(items.len(), 5);
    assert_eq!(items[4].0, "Close all splits");

    for _ in 0..4 {
        route(&mut model, &key(KeyCode::Down));
    }
    route(&mut model, &key(KeyCode::Enter));

    assert!(model.ui.dialogs.split_dialog.is_none());
    assert!(!model.split_view.has_splits());
    assert_eq!(model.ui.status_message, "All splits closed");
}

#[test]
fn test_closing_split_keeps_documents_open() {
    let mut model = two_pane_model();
    update(&mut model, Msg::Layout(LayoutMsg::CloseSplit(1)));
    assert!(!model.split_view.has_splits());
    assert_eq!(model.documents.document_count(), 2);
    assert_eq!(model.documents.current_index(), 0);
}

#[test]
fn test_closing_other_pane_keeps_cursor_after_focus_round_trip() {
    let mut model = test_model(&common::numbered_lines(20), 0, 0);
    update(&mut model, Msg::Layout(LayoutMsg::SplitVertical));
    route(&mut model, &ctrl_key(KeyCode::Left));
    route(&mut model, &ctrl_key(KeyCode::Right));
    for _ in 0..5 {
        route(&mut model, &key(KeyCode::Down));
    }
    assert_eq!(cursor(&model), (5, 0));

    update(&mut model, Msg::Layout(LayoutMsg::CloseSplit(0)));

    assert!(!model.split_view.has_splits());
    assert_eq!(cursor(&model), (5, 0));
}
