//! View module - renders the model into a ratatui frame
//!
//! Rendering only reads the model. The screen is laid out as:
//!
//! ```text
//! row 0           tab strip
//! rows 1..        file browser | code area (panes)
//!                              | terminal panel
//! rows-5          separator
//! rows-4          mode prompt
//! rows-3          status message
//! rows-2          region hints
//! rows-1          region / mode / cursor bar
//! ```

mod dialogs;
pub mod helpers;
mod panels;
mod panes;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use ratatui::Frame;

use crate::input::regions::handler_for;
use crate::model::{AppModel, Mode, Region, CHROME_ROWS};

use helpers::{tab_display_name, term_color, truncate};

/// Rows below the middle band
const BOTTOM_ROWS: u16 = CHROME_ROWS as u16 - 1;

/// Draw the whole editor
pub fn render(frame: &mut Frame, model: &AppModel) {
    let screen = frame.area();
    let cursor = render_to_buffer(frame.buffer_mut(), model, screen);
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}

/// Draw into `buf`, returning where the terminal cursor belongs
pub fn render_to_buffer(buf: &mut Buffer, model: &AppModel, screen: Rect) -> Option<(u16, u16)> {
    if screen.height <= BOTTOM_ROWS + 1 || screen.width < 10 {
        buf.set_stringn(screen.x, screen.y, "Terminal too small", screen.width as usize, Style::default());
        return None;
    }

    let band = Rect::new(0, 1, screen.width, screen.height - BOTTOM_ROWS - 1);
    let (code_width, code_height) = model.code_area_size();
    let (code_x, code_y) = model.code_area_origin();
    let code_area = Rect::new(code_x as u16, code_y as u16, code_width as u16, code_height as u16)
        .intersection(band);

    render_tabs(buf, model, Rect::new(0, 0, screen.width, 1));

    if model.file_browser.visible {
        let width = (model.file_browser.width as u16 + 1).min(screen.width);
        panels::render_file_browser(buf, model, Rect::new(0, band.y, width, band.height));
    }

    let mut cursor = panes::render_code_area(buf, model, code_area);

    if model.terminal.visible {
        let height = model.terminal.effective_height(screen.height as usize) as u16;
        let area = Rect::new(code_area.x, code_area.bottom(), code_area.width, height).intersection(band);
        let terminal_cursor = panels::render_terminal(buf, model, area);
        cursor = cursor.or(terminal_cursor);
    }

    if model.git_panel.visible {
        panels::render_git_panel(buf, model, code_area);
        if model.regions.current() == Region::GitPanel {
            cursor = None;
        }
    }

    let bottom = Rect::new(0, screen.height - BOTTOM_ROWS, screen.width, BOTTOM_ROWS);
    if let Some(prompt_cursor) = render_bottom(buf, model, bottom) {
        cursor = Some(prompt_cursor);
    }

    if model.ui.dialogs.any_open() {
        cursor = dialogs::render_dialog(buf, model, screen);
    }
    cursor
}

fn render_tabs(buf: &mut Buffer, model: &AppModel, area: Rect) {
    let bar = Style::default()
        .bg(term_color(model.theme.status_bar.background))
        .fg(term_color(model.theme.status_bar.foreground));
    buf.set_style(area, bar);

    let count = model.documents.document_count();
    let current = model.documents.current_index();
    let focused = model.regions.current() == Region::TabArea;
    let labels: Vec<String> = (0..count)
        .map(|i| format!(" {} ", tab_display_name(model, i)))
        .collect();

    // Scroll the strip so the current tab is visible
    let mut first = current.min(count.saturating_sub(1));
    let mut used = labels.get(first).map_or(0, |l| l.chars().count() + 1);
    while first > 0 && used + labels[first - 1].chars().count() + 1 <= area.width as usize {
        first -= 1;
        used += labels[first].chars().count() + 1;
    }

    let active = bar
        .bg(term_color(model.theme.editor.background))
        .fg(term_color(model.theme.editor.foreground))
        .add_modifier(Modifier::BOLD);
    let spans: Vec<Span> = labels
        .into_iter()
        .enumerate()
        .skip(first)
        .flat_map(|(i, label)| {
            let style = if i == current && focused {
                active.add_modifier(Modifier::UNDERLINED)
            } else if i == current {
                active
            } else {
                bar
            };
            [Span::styled(label, style), Span::styled("│", bar)]
        })
        .collect();
    Paragraph::new(Line::from(spans)).render(area, buf);
}

/// Separator, prompt, status, hints and the region bar. Returns the prompt
/// cursor while a text-entry mode is active.
fn render_bottom(buf: &mut Buffer, model: &AppModel, area: Rect) -> Option<(u16, u16)> {
    let width = area.width as usize;
    let plain = Style::default()
        .bg(term_color(model.theme.editor.background))
        .fg(term_color(model.theme.editor.foreground));
    let bar = Style::default()
        .bg(term_color(model.theme.status_bar.background))
        .fg(term_color(model.theme.status_bar.foreground));
    let dim = plain.add_modifier(Modifier::DIM);
    buf.set_style(area, plain);

    buf.set_stringn(area.x, area.y, "─".repeat(width), width, dim);

    let prompt = model.mode.prompt();
    if let Some(prompt) = &prompt {
        buf.set_stringn(area.x, area.y + 1, prompt, width, plain.add_modifier(Modifier::BOLD));
    }

    buf.set_stringn(area.x, area.y + 2, truncate(&model.ui.status_message, width), width, plain);

    let hints = handler_for(model.regions.current())
        .supported_actions()
        .join(" | ");
    buf.set_stringn(area.x, area.y + 3, truncate(&hints, width), width, dim);

    let bar_row = Rect::new(area.x, area.y + 4, area.width, 1);
    buf.set_style(bar_row, bar);
    buf.set_stringn(area.x, bar_row.y, truncate(&region_bar(model), width), width, bar);

    let prompt = prompt.filter(|_| model.mode.current() != Mode::Normal)?;
    let x = prompt.chars().count();
    (x < width).then_some((area.x + x as u16, area.y + 1))
}

/// `Region: Code Area | Mode: NORMAL | Ln 3, Col 7 | main.rs*`
fn region_bar(model: &AppModel) -> String {
    let mut parts = vec![
        format!("Region: {}", model.regions.region_name()),
        format!("Mode: {}", model.mode.current().name()),
    ];
    if let Some(slot) = model.current() {
        let (row, col) = slot.editor.position();
        parts.push(format!("Ln {}, Col {}", row + 1, col + 1));
        parts.push(tab_display_name(model, model.documents.current_index()));
    }
    if model.split_view.has_splits() {
        let active = model.split_view.active_index().unwrap_or(0);
        parts.push(format!(
            "Split {}/{}",
            active + 1,
            model.split_view.regions().len()
        ));
    }
    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::model::Document;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
    }

    #[test]
    fn test_region_bar() {
        let mut model = AppModel::with_config(EditorConfig::default(), 80, 24);
        model.documents.current_mut().unwrap().document = Document::with_text("ab\ncd");
        model.documents.current_mut().unwrap().editor.cursor.row = 1;
        assert_eq!(
            region_bar(&model),
            "Region: Code Area | Mode: NORMAL | Ln 2, Col 1 | Untitled"
        );
    }

    #[test]
    fn test_code_and_gutter_rows() {
        let mut model = AppModel::with_config(EditorConfig::default(), 40, 12);
        model.documents.current_mut().unwrap().document = Document::with_text("hello\nworld");
        model.sync_layout();
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        let cursor = render_to_buffer(&mut buf, &model, area);

        assert!(row_text(&buf, 0).contains("Untitled"));
        assert!(row_text(&buf, 1).starts_with("  1 hello"));
        assert!(row_text(&buf, 2).starts_with("  2 world"));
        assert!(row_text(&buf, 11).starts_with("Region: Code Area"));
        assert_eq!(cursor, Some((4, 1)));
    }

    #[test]
    fn test_too_small() {
        let model = AppModel::with_config(EditorConfig::default(), 20, 4);
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        assert_eq!(render_to_buffer(&mut buf, &model, area), None);
        assert!(row_text(&buf, 0).starts_with("Terminal too small"));
    }
}
