//! Editor update functions for cursor movement, selection, search and viewport scrolling.

use crate::commands::Cmd;
use crate::messages::{Direction, EditorMsg};
use crate::model::{AppModel, Selection};
use crate::util::word_range_at;

/// Handle editor messages (cursor movement, viewport scrolling)
pub fn update_editor(model: &mut AppModel, msg: EditorMsg) -> Option<Cmd> {
    if model.documents.is_empty() {
        model.ui.set_status("No document open");
        return Some(Cmd::Redraw);
    }

    match msg {
        EditorMsg::MoveCursor(direction) => {
            if let Some((doc, editor)) = model.current_parts() {
                editor.clear_selection();
                editor.move_cursor(doc, direction);
            }
            model.ensure_cursor_visible();
            Some(Cmd::Redraw)
        }

        EditorMsg::MoveCursorLineStart => {
            if let Some((doc, editor)) = model.current_parts() {
                editor.clear_selection();
                let row = editor.cursor.row;
                // Smart home: first non-blank, then column 0
                let indent = doc.leading_whitespace(row);
                let col = if editor.cursor.col == indent { 0 } else { indent };
                editor.set_cursor(doc, row, col);
            }
            model.ensure_cursor_visible();
            Some(Cmd::Redraw)
        }

        EditorMsg::MoveCursorLineEnd => {
            if let Some((doc, editor)) = model.current_parts() {
                editor.clear_selection();
                let row = editor.cursor.row;
                editor.set_cursor(doc, row, doc.line_length(row));
            }
            model.ensure_cursor_visible();
            Some(Cmd::Redraw)
        }

        EditorMsg::MoveCursorDocumentStart => {
            if let Some((doc, editor)) = model.current_parts() {
                editor.clear_selection();
                editor.set_cursor(doc, 0, 0);
            }
            model.ensure_cursor_visible();
            Some(Cmd::Redraw)
        }

        EditorMsg::MoveCursorDocumentEnd => {
            if let Some((doc, editor)) = model.current_parts() {
                editor.clear_selection();
                let last = doc.line_count().saturating_sub(1);
                editor.set_cursor(doc, last, doc.line_length(last));
            }
            model.ensure_cursor_visible();
            Some(Cmd::Redraw)
        }

        EditorMsg::PageUp => {
            if let Some((doc, editor)) = model.current_parts() {
                editor.clear_selection();
                editor.page_up(doc);
            }
            Some(Cmd::Redraw)
        }

        EditorMsg::PageDown => {
            if let Some((doc, editor)) = model.current_parts() {
                editor.clear_selection();
                editor.page_down(doc);
            }
            Some(Cmd::Redraw)
        }

        EditorMsg::GotoLine(line) => {
            let Some((doc, editor)) = model.current_parts() else {
                return Some(Cmd::Redraw);
            };
            let count = doc.line_count();
            if line == 0 || line > count {
                model
                    .ui
                    .set_status(format!("Line number out of range (1-{})", count));
                return Some(Cmd::Redraw);
            }
            editor.clear_selection();
            editor.set_cursor(doc, line - 1, 0);
            model.ensure_cursor_visible();
            model.ui.set_status(format!("Jumped to line {}", line));
            Some(Cmd::Redraw)
        }

        EditorMsg::SetCursorPosition { row, col } => {
            if let Some((doc, editor)) = model.current_parts() {
                editor.clear_selection();
                editor.set_cursor(doc, row, col);
            }
            model.ensure_cursor_visible();
            Some(Cmd::Redraw)
        }

        EditorMsg::MoveCursorWithSelection(direction) => {
            if let Some((doc, editor)) = model.current_parts() {
                editor.begin_selection();
                editor.move_cursor(doc, direction);
            }
            model.ensure_cursor_visible();
            Some(Cmd::Redraw)
        }

        EditorMsg::SelectAll => {
            if let Some((doc, editor)) = model.current_parts() {
                let last = doc.line_count().saturating_sub(1);
                editor.selection = Selection {
                    active: true,
                    anchor_row: 0,
                    anchor_col: 0,
                };
                editor.set_cursor(doc, last, doc.line_length(last));
            }
            model.ensure_cursor_visible();
            model.ui.set_status("Selected all");
            Some(Cmd::Redraw)
        }

        EditorMsg::SelectWord => {
            let Some((doc, editor)) = model.current_parts() else {
                return Some(Cmd::Redraw);
            };
            let row = editor.cursor.row;
            let line = doc.get_line(row).unwrap_or_default();
            match word_range_at(&line, editor.cursor.col) {
                Some((start, end)) => {
                    editor.selection = Selection {
                        active: true,
                        anchor_row: row,
                        anchor_col: start,
                    };
                    editor.set_cursor(doc, row, end);
                    let word: String = line.chars().skip(start).take(end - start).collect();
                    model.ensure_cursor_visible();
                    model.ui.set_status(format!("Selected: {}", word));
                }
                None => model.ui.set_status("No word at cursor"),
            }
            Some(Cmd::Redraw)
        }

        EditorMsg::ClearSelection => {
            if let Some((_, editor)) = model.current_parts() {
                editor.clear_selection();
            }
            Some(Cmd::Redraw)
        }

        EditorMsg::SearchNext => step_search(model, true),
        EditorMsg::SearchPrev => step_search(model, false),
    }
}

// ============================================================================
// Search helpers (shared with the search and replace modes)
// ============================================================================

/// Re-run the search for `pattern` without moving the cursor.
///
/// The current match becomes the first one at or after the cursor.
/// Returns the number of matches.
pub fn live_search(model: &mut AppModel, pattern: &str) -> usize {
    let Some((doc, editor)) = model.current_parts() else {
        return 0;
    };
    let matches = doc.find_all(pattern);
    let cursor = editor.position();
    let current = if matches.is_empty() {
        None
    } else {
        Some(matches.iter().position(|&m| m >= cursor).unwrap_or(0))
    };
    let count = matches.len();
    editor.search.pattern = pattern.to_string();
    editor.search.matches = matches;
    editor.search.current = current;

    if !pattern.is_empty() {
        model.ui.set_status(if count == 0 {
            format!("Pattern not found: {}", pattern)
        } else {
            format!("Found {} matches", count)
        });
    }
    count
}

/// Move the cursor to the current match. Returns false when there is none.
pub fn jump_to_current_match(model: &mut AppModel) -> bool {
    let Some((doc, editor)) = model.current_parts() else {
        return false;
    };
    let Some(target) = editor
        .search
        .current
        .and_then(|i| editor.search.matches.get(i).copied())
    else {
        return false;
    };
    editor.clear_selection();
    editor.set_cursor(doc, target.0, target.1);
    model.ensure_cursor_visible();
    true
}

/// Forget the matches of the current document
pub fn clear_search(model: &mut AppModel) {
    if let Some((_, editor)) = model.current_parts() {
        editor.search = Default::default();
    }
}

fn step_search(model: &mut AppModel, forward: bool) -> Option<Cmd> {
    let Some((doc, editor)) = model.current_parts() else {
        return Some(Cmd::Redraw);
    };
    if editor.search.pattern.is_empty() {
        model.ui.set_status("Empty search pattern");
        return Some(Cmd::Redraw);
    }
    // The buffer may have changed since the search ran
    editor.search.matches = doc.find_all(&editor.search.pattern);
    let count = editor.search.matches.len();
    if count == 0 {
        let pattern = editor.search.pattern.clone();
        editor.search.current = None;
        model.ui.set_status(format!("Pattern not found: {}", pattern));
        return Some(Cmd::Redraw);
    }

    let cursor = editor.position();
    let next = if forward {
        editor
            .search
            .matches
            .iter()
            .position(|&m| m > cursor)
            .unwrap_or(0)
    } else {
        editor
            .search
            .matches
            .iter()
            .rposition(|&m| m < cursor)
            .unwrap_or(count - 1)
    };
    editor.search.current = Some(next);
    jump_to_current_match(model);
    model
        .ui
        .set_status(format!("Match {} of {}", next + 1, count));
    Some(Cmd::Redraw)
}

/// Direction helper for callers that only know arrow keys
pub fn move_cursor(model: &mut AppModel, direction: Direction, extend_selection: bool) -> bool {
    let Some((doc, editor)) = model.current_parts() else {
        return false;
    };
    if extend_selection {
        editor.begin_selection();
    } else {
        editor.clear_selection();
    }
    let moved = editor.move_cursor(doc, direction);
    model.ensure_cursor_visible();
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::model::Document;

    fn model_with(text: &str) -> AppModel {
        let mut model = AppModel::with_config(EditorConfig::default(), 80, 30);
        let index = model.documents.add(Document::with_text(text));
        model.switch_document(index);
        model
    }

    fn cursor(model: &AppModel) -> (usize, usize) {
        model.current().map(|s| s.editor.position()).unwrap_or_default()
    }

    #[test]
    fn test_goto_line_bounds() {
        let mut model = model_with("a\nb\nc");
        update_editor(&mut model, EditorMsg::GotoLine(3));
        assert_eq!(cursor(&model), (2, 0));
        assert_eq!(model.ui.status_message, "Jumped to line 3");

        update_editor(&mut model, EditorMsg::GotoLine(4));
        assert_eq!(cursor(&model), (2, 0));
        assert_eq!(model.ui.status_message, "Line number out of range (1-3)");
    }

    #[test]
    fn test_smart_home_toggles() {
        let mut model = model_with("    indented");
        update_editor(&mut model, EditorMsg::SetCursorPosition { row: 0, col: 9 });
        update_editor(&mut model, EditorMsg::MoveCursorLineStart);
        assert_eq!(cursor(&model), (0, 4));
        update_editor(&mut model, EditorMsg::MoveCursorLineStart);
        assert_eq!(cursor(&model), (0, 0));
    }

    #[test]
    fn test_shift_move_extends_then_plain_move_clears() {
        let mut model = model_with("hello");
        update_editor(&mut model, EditorMsg::MoveCursorWithSelection(Direction::Right));
        update_editor(&mut model, EditorMsg::MoveCursorWithSelection(Direction::Right));
        let range = model.current().and_then(|s| s.editor.selection_range());
        assert_eq!(range, Some(((0, 0), (0, 2))));

        update_editor(&mut model, EditorMsg::MoveCursor(Direction::Right));
        assert!(model.current().unwrap().editor.selection_range().is_none());
    }

    #[test]
    fn test_select_word() {
        let mut model = model_with("foo bar_baz qux");
        update_editor(&mut model, EditorMsg::SetCursorPosition { row: 0, col: 6 });
        update_editor(&mut model, EditorMsg::SelectWord);
        let slot = model.current().unwrap();
        assert_eq!(slot.editor.selected_text(&slot.document).as_deref(), Some("bar_baz"));
    }

    #[test]
    fn test_search_next_wraps() {
        let mut model = model_with("x\nfoo\nx\nfoo");
        assert_eq!(live_search(&mut model, "foo"), 2);
        update_editor(&mut model, EditorMsg::SearchNext);
        assert_eq!(cursor(&model), (1, 0));
        update_editor(&mut model, EditorMsg::SearchNext);
        assert_eq!(cursor(&model), (3, 0));
        update_editor(&mut model, EditorMsg::SearchNext);
        assert_eq!(cursor(&model), (1, 0));
        assert_eq!(model.ui.status_message, "Match 1 of 2");

        update_editor(&mut model, EditorMsg::SearchPrev);
        assert_eq!(cursor(&model), (3, 0));
    }

    #[test]
    fn test_search_next_without_pattern() {
        let mut model = model_with("abc");
        update_editor(&mut model, EditorMsg::SearchNext);
        assert_eq!(model.ui.status_message, "Empty search pattern");
    }

    #[test]
    fn test_live_search_does_not_move_cursor() {
        let mut model = model_with("abc\nabc");
        live_search(&mut model, "bc");
        assert_eq!(cursor(&model), (0, 0));
        assert_eq!(model.ui.status_message, "Found 2 matches");
        live_search(&mut model, "zz");
        assert_eq!(model.ui.status_message, "Pattern not found: zz");
    }
}
