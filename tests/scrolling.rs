//! Scrolling tests - scroll margin, hard snaps, page navigation

mod common;

use common::{cursor, ctrl_key, key, numbered_lines, offset_row, send, test_model};
use strand::input::route;
use strand::keymap::KeyCode;
use strand::messages::{EditorMsg, Msg};
use strand::model::{AppModel, SCROLLOFF};
use strand::update::update;

fn visible_height(model: &AppModel) -> usize {
    model.current().unwrap().editor.viewport.height
}

/// Offset bounds, cursor visibility, and the scroll margin away from the
/// document edges
fn assert_scroll_invariants(model: &AppModel) {
    let slot = model.current().unwrap();
    let total = slot.document.line_count();
    let height = slot.editor.viewport.height;
    let offset = slot.editor.viewport.offset_row;
    let row = slot.editor.cursor.row;

    if total <= height {
        assert_eq!(offset, 0, "short document must not scroll");
        return;
    }
    assert!(offset <= total - height, "offset {} past the end", offset);
    assert!(row >= offset && row - offset < height, "row {} off screen", row);
    if row >= SCROLLOFF && row + SCROLLOFF < total {
        let relative = row - offset;
        assert!(
            (SCROLLOFF..=height - 1 - SCROLLOFF).contains(&relative),
            "row {} at relative {} breaks the margin",
            row,
            relative
        );
    }
}

#[test]
fn test_short_document_never_scrolls() {
    let mut model = test_model("a\nb\nc", 0, 0);
    for _ in 0..5 {
        route(&mut model, &key(KeyCode::Down));
        assert_eq!(offset_row(&model), 0);
    }
    assert_eq!(cursor(&model), (2, 0));
}

#[test]
fn test_invariants_hold_walking_down_and_up() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    for _ in 0..99 {
        route(&mut model, &key(KeyCode::Down));
        assert_scroll_invariants(&model);
    }
    assert_eq!(cursor(&model).0, 99);
    assert_eq!(offset_row(&model), 100 - visible_height(&model));

    for _ in 0..99 {
        route(&mut model, &key(KeyCode::Up));
        assert_scroll_invariants(&model);
    }
    assert_eq!(cursor(&model).0, 0);
    assert_eq!(offset_row(&model), 0);
}

#[test]
fn test_margin_starts_scrolling_before_the_edge() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    let height = visible_height(&model);

    // The last row that keeps the margin without scrolling
    let last_still = height - 1 - SCROLLOFF;
    for _ in 0..last_still {
        route(&mut model, &key(KeyCode::Down));
    }
    assert_eq!(offset_row(&model), 0);

    route(&mut model, &key(KeyCode::Down));
    assert_eq!(offset_row(&model), 1);
}

#[test]
fn test_jump_below_view_snaps_then_keeps_margin() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    update(&mut model, Msg::Editor(EditorMsg::GotoLine(51)));
    assert_eq!(cursor(&model), (50, 0));
    assert_scroll_invariants(&model);

    update(&mut model, Msg::Editor(EditorMsg::GotoLine(1)));
    assert_eq!(offset_row(&model), 0);
}

#[test]
fn test_document_end_pins_offset() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    route(&mut model, &ctrl_key(KeyCode::End));
    assert_eq!(cursor(&model).0, 99);
    assert_eq!(offset_row(&model), 100 - visible_height(&model));
}

#[test]
fn test_page_down_keeps_place_then_snaps_to_last_line() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    let height = visible_height(&model);

    route(&mut model, &key(KeyCode::PageDown));
    assert_eq!(cursor(&model).0, height);
    assert_scroll_invariants(&model);

    for _ in 0..10 {
        route(&mut model, &key(KeyCode::PageDown));
    }
    assert_eq!(cursor(&model).0, 99);
    assert_eq!(offset_row(&model), 100 - height);
}

#[test]
fn test_page_up_at_top_snaps_to_first_line() {
    let mut model = test_model(&numbered_lines(100), 2, 3);
    route(&mut model, &key(KeyCode::PageUp));
    assert_eq!(cursor(&model), (0, 3));
    assert_eq!(offset_row(&model), 0);
}

#[test]
fn test_vertical_move_remembers_column() {
    let text = format!("{}\nx\n{}", "long line here", numbered_lines(60));
    let mut model = test_model(&text, 0, 10);
    send(&mut model, &[key(KeyCode::Down)]);
    assert_eq!(cursor(&model), (1, 1));
    send(&mut model, &[key(KeyCode::Up)]);
    assert_eq!(cursor(&model), (0, 10));
}
