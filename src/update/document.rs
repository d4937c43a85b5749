//! Document update functions for text editing, clipboard and undo/redo

use crate::commands::Cmd;
use crate::messages::DocumentMsg;
use crate::model::{AppModel, Document, EditorState, Position};
use crate::util::word_start_before;

/// Handle document messages (text editing, undo/redo)
pub fn update_document(model: &mut AppModel, msg: DocumentMsg) -> Option<Cmd> {
    let tab_width = model.config.tab_width.max(1);

    match msg {
        DocumentMsg::InsertChar(ch) => edit(model, |doc, editor| {
            let group = doc.begin_group();
            delete_selection(doc, editor);
            let (row, col) = editor.position();
            let (row, col) = doc.insert_char(row, col, ch);
            editor.set_cursor(doc, row, col);
            doc.end_group(group, (row, col));
            None
        }),

        DocumentMsg::InsertNewline => edit(model, |doc, editor| {
            let group = doc.begin_group();
            delete_selection(doc, editor);
            let (row, col) = editor.position();
            let (row, col) = doc.insert_newline(row, col);
            editor.set_cursor(doc, row, col);
            doc.end_group(group, (row, col));
            None
        }),

        DocumentMsg::InsertText(text) => edit(model, |doc, editor| {
            insert_replacing_selection(doc, editor, &text);
            None
        }),

        DocumentMsg::DeleteBackward => edit(model, |doc, editor| {
            if delete_selection(doc, editor) {
                return None;
            }
            let (row, col) = editor.position();
            if let Some((row, col)) = doc.delete_char(row, col) {
                editor.set_cursor(doc, row, col);
            }
            None
        }),

        DocumentMsg::DeleteForward => edit(model, |doc, editor| {
            if delete_selection(doc, editor) {
                return None;
            }
            let (row, col) = editor.position();
            doc.delete_forward(row, col);
            editor.set_cursor(doc, row, col);
            None
        }),

        DocumentMsg::DeleteWordBackward => edit(model, |doc, editor| {
            if delete_selection(doc, editor) {
                return None;
            }
            let (row, col) = editor.position();
            if col == 0 {
                if let Some((row, col)) = doc.delete_char(row, col) {
                    editor.set_cursor(doc, row, col);
                }
                return None;
            }
            let line = doc.get_line(row).unwrap_or_default();
            let start = word_start_before(&line, col);
            doc.delete_range((row, start), (row, col), (row, col));
            editor.set_cursor(doc, row, start);
            None
        }),

        // === Line Operations ===
        DocumentMsg::DuplicateLine => edit(model, |doc, editor| {
            let (row, col) = editor.position();
            let line = doc.get_line(row).unwrap_or_default();
            let end = doc.line_length(row);
            doc.insert_text(row, end, &format!("\n{}", line));
            editor.clear_selection();
            editor.set_cursor(doc, row + 1, col);
            Some("Line duplicated".to_string())
        }),

        DocumentMsg::DeleteLine => edit(model, |doc, editor| {
            let (row, col) = editor.position();
            delete_line(doc, row, (row, col));
            editor.clear_selection();
            editor.set_cursor(doc, row, col);
            Some("Line deleted".to_string())
        }),

        DocumentMsg::MoveLineUp => edit(model, |doc, editor| {
            let (row, col) = editor.position();
            if row == 0 {
                return None;
            }
            swap_lines(doc, row - 1, (row, col), (row - 1, col));
            editor.clear_selection();
            editor.set_cursor(doc, row - 1, col);
            None
        }),

        DocumentMsg::MoveLineDown => edit(model, |doc, editor| {
            let (row, col) = editor.position();
            if row + 1 >= doc.line_count() {
                return None;
            }
            swap_lines(doc, row, (row, col), (row + 1, col));
            editor.clear_selection();
            editor.set_cursor(doc, row + 1, col);
            None
        }),

        DocumentMsg::IndentLine => edit(model, |doc, editor| {
            let (first, last) = covered_rows(editor);
            let indent = " ".repeat(tab_width);
            let group = doc.begin_group();
            for row in first..=last {
                doc.insert_text(row, 0, &indent);
            }
            editor.cursor.col += tab_width;
            if editor.selection.active {
                editor.selection.anchor_col += tab_width;
            }
            editor.clamp_cursor(doc);
            doc.end_group(group, editor.position());
            None
        }),

        DocumentMsg::UnindentLine => edit(model, |doc, editor| {
            let (first, last) = covered_rows(editor);
            let before = editor.position();
            let group = doc.begin_group();
            for row in first..=last {
                let removable = unindent_width(&doc.get_line(row).unwrap_or_default(), tab_width);
                if removable > 0 {
                    doc.delete_range((row, 0), (row, removable), before);
                }
                if row == editor.cursor.row {
                    editor.cursor.col = editor.cursor.col.saturating_sub(removable);
                }
                if editor.selection.active && row == editor.selection.anchor_row {
                    editor.selection.anchor_col =
                        editor.selection.anchor_col.saturating_sub(removable);
                }
            }
            editor.clamp_cursor(doc);
            doc.end_group(group, editor.position());
            None
        }),

        DocumentMsg::ToggleComment => edit(model, |doc, editor| {
            let (first, last) = covered_rows(editor);
            toggle_comment(doc, editor, first, last)
        }),

        // === Undo/Redo ===
        DocumentMsg::Undo => restore_history(model, true),
        DocumentMsg::Redo => restore_history(model, false),

        // === Clipboard ===
        DocumentMsg::Copy => {
            let Some(slot) = model.documents.current() else {
                model.ui.set_status("No document open");
                return Some(Cmd::Redraw);
            };
            let (text, status) = match slot.editor.selected_text(&slot.document) {
                Some(text) => {
                    let status = format!("Copied {} characters", text.chars().count());
                    (text, status)
                }
                None => {
                    let line = slot.document.get_line(slot.editor.cursor.row).unwrap_or_default();
                    (format!("{}\n", line), "Copied line".to_string())
                }
            };
            model.clipboard.set_text(&text);
            model.ui.set_status(status);
            Some(Cmd::Redraw)
        }

        DocumentMsg::Cut => {
            let Some(slot) = model.documents.current() else {
                model.ui.set_status("No document open");
                return Some(Cmd::Redraw);
            };
            let selected = slot.editor.selected_text(&slot.document);
            let text = selected.clone().unwrap_or_else(|| {
                let line = slot.document.get_line(slot.editor.cursor.row).unwrap_or_default();
                format!("{}\n", line)
            });
            model.clipboard.set_text(&text);
            edit(model, |doc, editor| {
                if selected.is_some() {
                    delete_selection(doc, editor);
                    Some(format!("Cut {} characters", text.chars().count()))
                } else {
                    let (row, col) = editor.position();
                    delete_line(doc, row, (row, col));
                    editor.set_cursor(doc, row, 0);
                    Some("Cut line".to_string())
                }
            })
        }

        DocumentMsg::Paste => {
            let text = model.clipboard.get_text();
            if text.is_empty() {
                model.ui.set_status("Clipboard is empty");
                return Some(Cmd::Redraw);
            }
            edit(model, |doc, editor| {
                insert_replacing_selection(doc, editor, &text);
                Some(format!("Pasted {} characters", text.chars().count()))
            })
        }

        // === Replace ===
        DocumentMsg::ReplaceAll { find, replace } => {
            if find.is_empty() {
                model.ui.set_status("Empty search pattern");
                return Some(Cmd::Redraw);
            }
            edit(model, |doc, editor| {
                let matches = doc.find_all(&find);
                if matches.is_empty() {
                    return Some(format!("Pattern not found: {}", find));
                }
                let width = find.chars().count();
                let before = editor.position();
                let group = doc.begin_group();
                for &(row, col) in matches.iter().rev() {
                    doc.delete_range((row, col), (row, col + width), before);
                    doc.insert_text(row, col, &replace);
                }
                editor.clear_selection();
                editor.clamp_cursor(doc);
                doc.end_group(group, editor.position());
                editor.search = Default::default();
                Some(format!("Replaced {} occurrences", matches.len()))
            })
        }
    }
}

/// Run an edit against the current document, then keep the cursor visible.
///
/// The closure may return a status message.
fn edit<F>(model: &mut AppModel, f: F) -> Option<Cmd>
where
    F: FnOnce(&mut Document, &mut EditorState) -> Option<String>,
{
    let Some((doc, editor)) = model.current_parts() else {
        model.ui.set_status("No document open");
        return Some(Cmd::Redraw);
    };
    let status = f(doc, editor);
    model.ensure_cursor_visible();
    if let Some(status) = status {
        model.ui.set_status(status);
    }
    Some(Cmd::Redraw)
}

/// Undo or redo one step, restoring the recorded cursor.
///
/// The viewport is only re-derived when the restored row is off screen.
fn restore_history(model: &mut AppModel, undo: bool) -> Option<Cmd> {
    let Some((doc, editor)) = model.current_parts() else {
        model.ui.set_status("No document open");
        return Some(Cmd::Redraw);
    };
    let restored = if undo { doc.undo() } else { doc.redo() };
    match restored {
        Some((row, col)) => {
            editor.clear_selection();
            editor.set_cursor(doc, row, col);
            if !editor.viewport.is_row_visible(editor.cursor.row) {
                editor.adjust_viewport(doc.line_count());
            }
            model.ui.set_status(if undo { "Undo" } else { "Redo" });
        }
        None => {
            model
                .ui
                .set_status(if undo { "Nothing to undo" } else { "Nothing to redo" });
        }
    }
    Some(Cmd::Redraw)
}

/// Delete the selected text. Returns false when nothing is selected.
fn delete_selection(doc: &mut Document, editor: &mut EditorState) -> bool {
    let Some((start, end)) = editor.selection_range() else {
        editor.clear_selection();
        return false;
    };
    doc.delete_range(start, end, editor.position());
    editor.clear_selection();
    editor.set_cursor(doc, start.0, start.1);
    true
}

fn insert_replacing_selection(doc: &mut Document, editor: &mut EditorState, text: &str) {
    let group = doc.begin_group();
    delete_selection(doc, editor);
    let (row, col) = editor.position();
    let (row, col) = doc.insert_text(row, col, text);
    editor.set_cursor(doc, row, col);
    doc.end_group(group, (row, col));
}

/// Rows touched by the selection, or the cursor row.
///
/// A selection ending at column 0 does not include that last row.
fn covered_rows(editor: &EditorState) -> (usize, usize) {
    match editor.selection_range() {
        Some((start, end)) if end.1 == 0 && end.0 > start.0 => (start.0, end.0 - 1),
        Some((start, end)) => (start.0, end.0),
        None => (editor.cursor.row, editor.cursor.row),
    }
}

/// Remove a whole line including one line break
fn delete_line(doc: &mut Document, row: usize, cursor_before: Position) {
    let count = doc.line_count();
    if count <= 1 {
        let len = doc.line_length(0);
        doc.delete_range((0, 0), (0, len), cursor_before);
    } else if row + 1 < count {
        doc.delete_range((row, 0), (row + 1, 0), cursor_before);
    } else {
        let prev_len = doc.line_length(row - 1);
        let len = doc.line_length(row);
        doc.delete_range((row - 1, prev_len), (row, len), cursor_before);
    }
}

/// Swap line `upper` with the line below it as one undo step
fn swap_lines(doc: &mut Document, upper: usize, cursor_before: Position, cursor_after: Position) {
    let a = doc.get_line(upper).unwrap_or_default();
    let b = doc.get_line(upper + 1).unwrap_or_default();
    let group = doc.begin_group();
    doc.delete_range((upper, 0), (upper + 1, b.chars().count()), cursor_before);
    doc.insert_text(upper, 0, &format!("{}\n{}", b, a));
    doc.end_group(group, cursor_after);
}

/// Leading characters removed by one unindent step
fn unindent_width(line: &str, tab_width: usize) -> usize {
    if line.starts_with('\t') {
        return 1;
    }
    line.chars().take(tab_width).take_while(|&c| c == ' ').count()
}

const COMMENT_PREFIX: &str = "//";

fn toggle_comment(
    doc: &mut Document,
    editor: &mut EditorState,
    first: usize,
    last: usize,
) -> Option<String> {
    let lines: Vec<(usize, String)> = (first..=last)
        .map(|row| (row, doc.get_line(row).unwrap_or_default()))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return None;
    }

    let uncomment = lines
        .iter()
        .all(|(_, line)| line.trim_start().starts_with(COMMENT_PREFIX));
    let min_indent = lines
        .iter()
        .map(|(row, _)| doc.leading_whitespace(*row))
        .min()
        .unwrap_or(0);

    let before = editor.position();
    let group = doc.begin_group();
    for (row, line) in &lines {
        let row = *row;
        if uncomment {
            let indent = doc.leading_whitespace(row);
            let rest: String = line.chars().skip(indent).collect();
            let width = if rest.starts_with("// ") { 3 } else { 2 };
            doc.delete_range((row, indent), (row, indent + width), before);
            if row == editor.cursor.row && editor.cursor.col > indent {
                editor.cursor.col -= width.min(editor.cursor.col - indent);
            }
        } else {
            doc.insert_text(row, min_indent, "// ");
            if row == editor.cursor.row && editor.cursor.col >= min_indent {
                editor.cursor.col += 3;
            }
        }
    }
    editor.clamp_cursor(doc);
    doc.end_group(group, editor.position());

    Some(format!(
        "{} {} line{}",
        if uncomment { "Uncommented" } else { "Commented" },
        lines.len(),
        if lines.len() == 1 { "" } else { "s" }
    ))
}
