//! Code area rendering: one pane per split region, or the whole area

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::model::{AppModel, Document, EditorState, Position, Region};
use crate::util::{char_col_to_visual_col, TABULATOR_WIDTH};

use super::helpers::term_color;

/// Which highlight a character cell gets
#[derive(Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Plain,
    Selected,
    Match,
    CurrentMatch,
}

/// Draw the code area. Returns the screen position of the active cursor
/// when it is inside a pane.
pub fn render_code_area(buf: &mut Buffer, model: &AppModel, area: Rect) -> Option<(u16, u16)> {
    let background = Style::default().bg(term_color(model.theme.editor.background));
    buf.set_style(area, background);

    let Some(current) = model.current() else {
        let message = "No document open | Ctrl+N new file, Ctrl+O open";
        buf.set_stringn(
            area.x + 1,
            area.y,
            message,
            area.width.saturating_sub(1) as usize,
            background.fg(term_color(model.theme.editor.foreground)),
        );
        return None;
    };

    if !model.split_view.has_splits() {
        return render_pane(buf, model, area, &current.document, &current.editor, true);
    }

    let mut cursor = None;
    for region in model.split_view.regions() {
        let Some(slot) = model.documents.get(region.document_index) else {
            continue;
        };
        let pane = pane_rect(area, region.rect.x, region.rect.y, region.rect.width, region.rect.height);
        if pane.width == 0 || pane.height == 0 {
            continue;
        }
        let editor = if region.is_active {
            &current.editor
        } else {
            region.saved_view.as_ref().unwrap_or(&slot.editor)
        };
        let document = if region.is_active {
            &current.document
        } else {
            &slot.document
        };
        let at = render_pane(buf, model, pane, document, editor, region.is_active);
        if region.is_active {
            cursor = at;
        }
        // Mark horizontal boundaries on the upper pane's last row
        if pane.bottom() < area.bottom() {
            let last = Rect::new(pane.x, pane.bottom() - 1, pane.width, 1);
            buf.set_style(last, Style::default().add_modifier(Modifier::UNDERLINED));
        }
    }
    cursor
}

fn pane_rect(area: Rect, x: usize, y: usize, width: usize, height: usize) -> Rect {
    let x = area.x.saturating_add(x as u16).min(area.right());
    let y = area.y.saturating_add(y as u16).min(area.bottom());
    Rect::new(
        x,
        y,
        (width as u16).min(area.right() - x),
        (height as u16).min(area.bottom() - y),
    )
}

fn render_pane(
    buf: &mut Buffer,
    model: &AppModel,
    area: Rect,
    document: &Document,
    editor: &EditorState,
    active: bool,
) -> Option<(u16, u16)> {
    let theme = &model.theme;
    let gutter = model.gutter_width(document.line_count()) as u16;
    let text_width = area.width.saturating_sub(gutter) as usize;
    let (cursor_row, cursor_col) = editor.position();
    let selection = editor.selection_range();
    let pattern_len = editor.search.pattern.chars().count();
    let current_match = editor
        .search
        .current
        .and_then(|i| editor.search.matches.get(i).copied());

    let gutter_style = Style::default()
        .bg(term_color(theme.gutter.background))
        .fg(term_color(theme.gutter.foreground));
    let text_style = Style::default()
        .bg(term_color(theme.editor.background))
        .fg(term_color(theme.editor.foreground));

    for screen_row in 0..area.height {
        let y = area.y + screen_row;
        let row = editor.viewport.offset_row + screen_row as usize;
        let is_cursor_line = active && row == cursor_row;
        let row_style = if is_cursor_line {
            text_style.bg(term_color(theme.editor.current_line_background))
        } else {
            text_style
        };

        if gutter > 0 {
            let number = if row < document.line_count() {
                format!("{:>width$} ", row + 1, width = gutter as usize - 1)
            } else {
                " ".repeat(gutter as usize)
            };
            let style = if is_cursor_line {
                gutter_style.fg(term_color(theme.gutter.foreground_active))
            } else {
                gutter_style
            };
            buf.set_stringn(area.x, y, number, gutter as usize, style);
        }
        buf.set_style(Rect::new(area.x + gutter, y, text_width as u16, 1), row_style);

        let Some(line) = document.get_line(row) else {
            continue;
        };
        let skip = char_col_to_visual_col(&line, editor.viewport.offset_col);
        let mut visual = 0;
        for (col, ch) in line.chars().enumerate() {
            let cells = if ch == '\t' {
                TABULATOR_WIDTH - (visual % TABULATOR_WIDTH)
            } else {
                1
            };
            let kind = cell_kind((row, col), selection, &editor.search.matches, pattern_len, current_match);
            let style = match kind {
                CellKind::Plain => row_style,
                CellKind::Selected => row_style.bg(term_color(theme.editor.selection_background)),
                CellKind::Match => row_style.bg(term_color(theme.overlay.highlight)),
                CellKind::CurrentMatch => row_style.bg(term_color(theme.overlay.warning)),
            };
            for cell in 0..cells {
                let v = visual + cell;
                if v < skip {
                    continue;
                }
                let x = v - skip;
                if x >= text_width {
                    break;
                }
                let symbol = if ch == '\t' { ' ' } else { ch };
                if let Some(target) = buf.cell_mut((area.x + gutter + x as u16, y)) {
                    target.set_char(symbol).set_style(style);
                }
            }
            visual += cells;
            if visual >= skip + text_width {
                break;
            }
        }
    }

    if !active || model.regions.current() != Region::CodeArea {
        return None;
    }
    let line = document.get_line(cursor_row).unwrap_or_default();
    let visual = char_col_to_visual_col(&line, cursor_col);
    let skip = char_col_to_visual_col(&line, editor.viewport.offset_col);
    let screen_row = cursor_row.checked_sub(editor.viewport.offset_row)?;
    let screen_col = visual.checked_sub(skip)?;
    if screen_row >= area.height as usize || screen_col >= text_width {
        return None;
    }
    Some((area.x + gutter + screen_col as u16, area.y + screen_row as u16))
}

fn cell_kind(
    at: Position,
    selection: Option<(Position, Position)>,
    matches: &[Position],
    pattern_len: usize,
    current: Option<Position>,
) -> CellKind {
    if let Some((start, end)) = selection {
        if at >= start && at < end {
            return CellKind::Selected;
        }
    }
    if pattern_len == 0 {
        return CellKind::Plain;
    }
    let (row, col) = at;
    let covers = |&(r, c): &Position| r == row && col >= c && col < c + pattern_len;
    if current.as_ref().is_some_and(covers) {
        CellKind::CurrentMatch
    } else if matches.iter().any(covers) {
        CellKind::Match
    } else {
        CellKind::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_kind_selection_wins() {
        let selection = Some(((0, 1), (0, 3)));
        let matches = [(0, 0)];
        assert!(cell_kind((0, 1), selection, &matches, 2, None) == CellKind::Selected);
        assert!(cell_kind((0, 0), selection, &matches, 2, None) == CellKind::Match);
        assert!(cell_kind((0, 3), selection, &matches, 2, None) == CellKind::Plain);
    }

    #[test]
    fn test_cell_kind_current_match() {
        let matches = [(1, 2), (3, 0)];
        assert!(cell_kind((1, 3), None, &matches, 2, Some((1, 2))) == CellKind::CurrentMatch);
        assert!(cell_kind((3, 1), None, &matches, 2, Some((1, 2))) == CellKind::Match);
    }

    #[test]
    fn test_pane_rect_clamps_to_area() {
        let area = Rect::new(5, 1, 40, 20);
        assert_eq!(pane_rect(area, 20, 0, 20, 20), Rect::new(25, 1, 20, 20));
        assert_eq!(pane_rect(area, 30, 10, 20, 20), Rect::new(35, 11, 10, 10));
    }
}
