//! File browser, terminal panel and git panel rendering

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Widget};

use crate::model::{AppModel, Region};

use super::helpers::{term_color, truncate};

fn panel_style(model: &AppModel) -> Style {
    Style::default()
        .bg(term_color(model.theme.editor.background))
        .fg(term_color(model.theme.editor.foreground))
}

fn header_style(model: &AppModel, focused: bool) -> Style {
    let style = Style::default()
        .bg(term_color(model.theme.status_bar.background))
        .fg(term_color(model.theme.status_bar.foreground));
    if focused {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Directory header, entry list and the separator column on the right
pub fn render_file_browser(buf: &mut Buffer, model: &AppModel, area: Rect) {
    let browser = &model.file_browser;
    let focused = model.regions.current() == Region::FileBrowser;
    let width = area.width.saturating_sub(1);
    buf.set_style(area, panel_style(model));

    let dir = browser.dir.display().to_string();
    let header = Rect::new(area.x, area.y, width, 1);
    buf.set_style(header, header_style(model, focused));
    buf.set_stringn(
        area.x,
        area.y,
        truncate(&dir, width as usize),
        width as usize,
        header_style(model, focused),
    );

    let rows = model.browser_list_rows();
    let top = browser.scroll_top(rows);
    let selected_style = panel_style(model).bg(term_color(model.theme.editor.selection_background));
    for (i, entry) in browser.entries.iter().skip(top).take(rows).enumerate() {
        let y = area.y + 1 + i as u16;
        if y >= area.bottom() {
            break;
        }
        let label = if entry.is_dir {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        let style = if top + i == browser.selected {
            selected_style
        } else {
            panel_style(model)
        };
        if top + i == browser.selected {
            buf.set_style(Rect::new(area.x, y, width, 1), style);
        }
        buf.set_stringn(area.x + 1, y, truncate(&label, width.saturating_sub(1) as usize), width as usize, style);
    }
    if browser.entries.is_empty() && area.height > 1 {
        buf.set_stringn(area.x + 1, area.y + 1, "(empty)", width as usize, panel_style(model));
    }

    let border = header_style(model, false);
    for y in area.y..area.bottom() {
        if let Some(cell) = buf.cell_mut((area.right() - 1, y)) {
            cell.set_char('│').set_style(border);
        }
    }
}

/// Header row, scrolled output, and the command line. Returns the input
/// cursor position when the terminal has focus.
pub fn render_terminal(buf: &mut Buffer, model: &AppModel, area: Rect) -> Option<(u16, u16)> {
    let terminal = &model.terminal;
    let focused = model.regions.current() == Region::Terminal;
    if area.height < 2 {
        return None;
    }
    buf.set_style(area, panel_style(model));

    let header = format!("Terminal: {}", terminal.cwd.display());
    buf.set_style(Rect::new(area.x, area.y, area.width, 1), header_style(model, focused));
    buf.set_stringn(area.x, area.y, header, area.width as usize, header_style(model, focused));

    let output_rows = area.height.saturating_sub(2) as usize;
    let end = terminal.output.len().saturating_sub(terminal.scroll);
    let start = end.saturating_sub(output_rows);
    for (i, line) in terminal.output[start..end].iter().enumerate() {
        buf.set_stringn(
            area.x,
            area.y + 1 + i as u16,
            line,
            area.width as usize,
            panel_style(model),
        );
    }

    let input_y = area.bottom() - 1;
    let prompt = format!("$ {}", terminal.input);
    buf.set_stringn(area.x, input_y, prompt, area.width as usize, panel_style(model));
    if !focused {
        return None;
    }
    let x = area.x + 2 + terminal.cursor as u16;
    (x < area.right()).then_some((x, input_y))
}

/// Floating status list on the right side of the code area
pub fn render_git_panel(buf: &mut Buffer, model: &AppModel, code_area: Rect) {
    let panel = &model.git_panel;
    let focused = model.regions.current() == Region::GitPanel;
    let width = code_area.width.min(40);
    if width < 10 || code_area.height < 3 {
        return;
    }
    let area = Rect::new(code_area.right() - width, code_area.y, width, code_area.height);
    Clear.render(area, buf);

    let border_style = if focused {
        Style::default().fg(term_color(model.theme.overlay.highlight))
    } else {
        Style::default().fg(term_color(model.theme.overlay.border))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Git ")
        .border_style(border_style)
        .style(panel_style(model));

    let items: Vec<ListItem> = if let Some(error) = &panel.error {
        vec![ListItem::new(Line::from(error.clone()))]
    } else if panel.entries.is_empty() {
        vec![ListItem::new("Working tree clean")]
    } else {
        let inner_rows = area.height.saturating_sub(2) as usize;
        let top = (panel.selected + 1).saturating_sub(inner_rows);
        panel
            .entries
            .iter()
            .enumerate()
            .skip(top)
            .map(|(i, entry)| {
                let text = format!("{} {}", entry.status, entry.path);
                let style = if i == panel.selected {
                    panel_style(model).bg(term_color(model.theme.editor.selection_background))
                } else {
                    panel_style(model)
                };
                ListItem::new(text).style(style)
            })
            .collect()
    };
    List::new(items).block(block).render(area, buf);
}
