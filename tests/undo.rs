//! Undo/redo tests - content and cursor restoration through the router

mod common;

use common::{ch, ctrl, ctrl_key, cursor, key, numbered_lines, offset_row, test_model, text, type_str};
use strand::input::route;
use strand::keymap::KeyCode;

#[test]
fn test_undo_then_redo_round_trips_cursor() {
    let mut model = test_model("hello\nworld", 1, 2);
    route(&mut model, &ch('x'));
    assert_eq!(text(&model), "hello\nwoxrld");
    let edited = cursor(&model);
    assert_eq!(edited, (1, 3));

    route(&mut model, &ctrl('z'));
    assert_eq!(text(&model), "hello\nworld");
    assert_eq!(cursor(&model), (1, 2));

    route(&mut model, &ctrl('y'));
    assert_eq!(text(&model), "hello\nwoxrld");
    assert_eq!(cursor(&model), edited);
}

#[test]
fn test_redo_then_undo_round_trips_cursor() {
    let mut model = test_model("abc", 0, 3);
    type_str(&mut model, "de");
    route(&mut model, &ctrl('z'));
    let before_redo = cursor(&model);
    assert_eq!(before_redo, (0, 4));

    route(&mut model, &ctrl('y'));
    assert_eq!(cursor(&model), (0, 5));
    route(&mut model, &ctrl('z'));
    assert_eq!(cursor(&model), before_redo);
    assert_eq!(text(&model), "abcd");
}

#[test]
fn test_undo_newline_and_line_join() {
    let mut model = test_model("ab\ncd", 1, 0);
    route(&mut model, &key(KeyCode::Backspace));
    assert_eq!(text(&model), "abcd");
    assert_eq!(cursor(&model), (0, 2));

    route(&mut model, &ctrl('z'));
    assert_eq!(text(&model), "ab\ncd");
    assert_eq!(cursor(&model), (1, 0));

    route(&mut model, &key(KeyCode::Enter));
    assert_eq!(text(&model), "ab\n\ncd");
    route(&mut model, &ctrl('z'));
    assert_eq!(cursor(&model), (1, 0));
}

#[test]
fn test_undo_scrolls_only_when_change_is_off_screen() {
    let mut model = test_model(&numbered_lines(100), 5, 0);
    type_str(&mut model, "x");

    // Still on screen: the viewport stays put
    for _ in 0..5 {
        route(&mut model, &key(KeyCode::Down));
    }
    assert_eq!(offset_row(&model), 0);
    route(&mut model, &ctrl('z'));
    assert_eq!(cursor(&model), (5, 0));
    assert_eq!(offset_row(&model), 0);

    // Off screen: the viewport follows the restored cursor
    route(&mut model, &ctrl('y'));
    route(&mut model, &ctrl_key(KeyCode::End));
    assert!(offset_row(&model) > 5);
    route(&mut model, &ctrl('z'));
    assert_eq!(cursor(&model), (5, 0));
    let offset = offset_row(&model);
    assert!(offset <= 5 && 5 < offset + model.current().unwrap().editor.viewport.height);
}

#[test]
fn test_exhausted_history_reports() {
    let mut model = test_model("abc", 0, 1);
    route(&mut model, &ctrl('z'));
    assert_eq!(model.ui.status_message, "Nothing to undo");
    route(&mut model, &ctrl('y'));
    assert_eq!(model.ui.status_message, "Nothing to redo");
    assert_eq!(cursor(&model), (0, 1));
}

#[test]
fn test_new_edit_clears_redo() {
    let mut model = test_model("abc", 0, 3);
    type_str(&mut model, "d");
    route(&mut model, &ctrl('z'));
    type_str(&mut model, "e");
    route(&mut model, &ctrl('y'));
    assert_eq!(model.ui.status_message, "Nothing to redo");
    assert_eq!(text(&model), "abce");
}
