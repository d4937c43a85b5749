//! Mode tests - search, two-stage replace, goto line

mod common;

use common::{alt, ctrl, cursor, key, test_model, text, type_str};
use strand::input::route;
use strand::keymap::KeyCode;
use strand::model::{Mode, ReplaceStage};

#[test]
fn test_search_commit_then_step_through_matches() {
    let mut model = test_model("foo bar foo", 0, 0);
    route(&mut model, &ctrl('f'));
    type_str(&mut model, "foo");
    assert_eq!(model.ui.status_message, "Found 2 matches");

    route(&mut model, &key(KeyCode::Enter));
    assert_eq!(model.mode.current(), Mode::Normal);
    assert_eq!(cursor(&model), (0, 0));

    route(&mut model, &alt('n'));
    assert_eq!(cursor(&model), (0, 8));
    assert_eq!(model.ui.status_message, "Match 2 of 2");

    route(&mut model, &alt('n'));
    assert_eq!(cursor(&model), (0, 0));
    assert_eq!(model.ui.status_message, "Match 1 of 2");
}

#[test]
fn test_search_without_matches() {
    let mut model = test_model("foo bar", 0, 4);
    route(&mut model, &ctrl('f'));
    type_str(&mut model, "zzz");
    route(&mut model, &key(KeyCode::Enter));

    assert_eq!(model.ui.status_message, "Pattern not found: zzz");
    assert_eq!(cursor(&model), (0, 4));
}

#[test]
fn test_search_cancel_clears_matches() {
    let mut model = test_model("foo bar foo", 0, 0);
    route(&mut model, &ctrl('f'));
    type_str(&mut model, "foo");
    route(&mut model, &key(KeyCode::Escape));

    assert_eq!(model.mode.current(), Mode::Normal);
    assert_eq!(model.ui.status_message, "Search cancelled");
    assert!(model.current().unwrap().editor.search.matches.is_empty());
}

#[test]
fn test_step_without_search_reports() {
    let mut model = test_model("foo", 0, 0);
    route(&mut model, &alt('n'));
    assert_eq!(model.ui.status_message, "Empty search pattern");
}

#[test]
fn test_replace_is_two_stages_and_one_undo_step() {
    let mut model = test_model("foo bar foo", 0, 0);
    route(&mut model, &ctrl('h'));
    assert_eq!(model.mode.current(), Mode::Replace);

    type_str(&mut model, "foo");
    route(&mut model, &key(KeyCode::Enter));
    assert_eq!(model.mode.current(), Mode::Replace);
    assert_eq!(model.mode.replace_stage, ReplaceStage::With);
    assert_eq!(model.ui.status_message, "Replace: with what?");

    type_str(&mut model, "qux");
    route(&mut model, &key(KeyCode::Enter));
    assert_eq!(model.mode.current(), Mode::Normal);
    assert_eq!(text(&model), "qux bar qux");
    assert_eq!(model.ui.status_message, "Replaced 2 occurrences");

    route(&mut model, &ctrl('z'));
    assert_eq!(text(&model), "foo bar foo");
}

#[test]
fn test_replace_with_empty_pattern_exits() {
    let mut model = test_model("foo", 0, 0);
    route(&mut model, &ctrl('h'));
    route(&mut model, &key(KeyCode::Enter));
    assert_eq!(model.mode.current(), Mode::Normal);
    assert_eq!(model.ui.status_message, "Empty search pattern");
    assert_eq!(text(&model), "foo");
}

#[test]
fn test_goto_line() {
    let mut model = test_model("a\nb\nc\nd", 0, 0);
    route(&mut model, &ctrl('g'));
    assert_eq!(model.mode.current(), Mode::GotoLine);
    type_str(&mut model, "3");
    route(&mut model, &key(KeyCode::Enter));

    assert_eq!(model.mode.current(), Mode::Normal);
    assert_eq!(cursor(&model), (2, 0));
    assert_eq!(model.ui.status_message, "Jumped to line 3");
}

#[test]
fn test_goto_line_rejects_bad_input() {
    let mut model = test_model("a\nb", 1, 1);

    route(&mut model, &ctrl('g'));
    type_str(&mut model, "9");
    route(&mut model, &key(KeyCode::Enter));
    assert_eq!(model.ui.status_message, "Line number out of range (1-2)");
    assert_eq!(cursor(&model), (1, 1));

    route(&mut model, &ctrl('g'));
    type_str(&mut model, "x1");
    route(&mut model, &key(KeyCode::Enter));
    assert_eq!(model.ui.status_message, "Invalid line number");
    assert_eq!(cursor(&model), (1, 1));
}

#[test]
fn test_mode_prompt_shows_buffer() {
    let mut model = test_model("a", 0, 0);
    route(&mut model, &ctrl('g'));
    type_str(&mut model, "12");
    let prompt = model.mode.prompt().unwrap();
    assert!(prompt.ends_with("12"));
}
