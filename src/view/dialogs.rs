//! Rendering for the topmost open dialog

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::commands::{filter_actions, help_lines, key_display};
use crate::input::split_dialog_items;
use crate::model::{AppModel, DialogKind, DialogLayer, SshField};
use crate::theme::available_theme_ids;

use super::helpers::{centered_rect, term_color, truncate};

/// Rows listed by list-style dialogs
const LIST_ROWS: usize = 12;

struct DialogStyles {
    body: Style,
    border: Style,
    selected: Style,
    dim: Style,
}

impl DialogStyles {
    fn new(model: &AppModel) -> Self {
        let overlay = &model.theme.overlay;
        let body = Style::default()
            .bg(term_color(overlay.background))
            .fg(term_color(overlay.foreground));
        Self {
            body,
            border: body.fg(term_color(overlay.border)),
            selected: body
                .bg(term_color(overlay.selection_background))
                .add_modifier(Modifier::BOLD),
            dim: body.add_modifier(Modifier::DIM),
        }
    }
}

/// A selectable list window: the rows around `selected`, styled
fn list_lines<'a>(
    items: impl IntoIterator<Item = String>,
    selected: usize,
    rows: usize,
    styles: &DialogStyles,
) -> Vec<Line<'a>> {
    let top = (selected + 1).saturating_sub(rows);
    items
        .into_iter()
        .enumerate()
        .skip(top)
        .take(rows)
        .map(|(i, text)| {
            if i == selected {
                Line::styled(format!("> {}", text), styles.selected)
            } else {
                Line::styled(format!("  {}", text), styles.body)
            }
        })
        .collect()
}

fn draw(buf: &mut Buffer, area: Rect, title: &str, lines: Vec<Line>, styles: &DialogStyles) -> Rect {
    Clear.render(area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(styles.border)
        .style(styles.body);
    let inner = block.inner(area);
    Paragraph::new(lines).block(block).render(area, buf);
    inner
}

/// Draw the topmost dialog over `screen`. Returns the text cursor position
/// for dialogs with an input line.
pub fn render_dialog(buf: &mut Buffer, model: &AppModel, screen: Rect) -> Option<(u16, u16)> {
    let layer = model.ui.dialogs.top()?;
    let styles = DialogStyles::new(model);
    let dialogs = &model.ui.dialogs;
    let width = screen.width.saturating_sub(4).min(70);

    match layer {
        DialogLayer::CommandPalette => {
            let palette = dialogs.command_palette.as_ref()?;
            let matches = filter_actions(&palette.input);
            let inner_width = width.saturating_sub(4) as usize;
            let mut lines = vec![Line::styled(format!("> {}", palette.input), styles.body)];
            let entries = matches.iter().map(|info| {
                let keys = key_display(&model.keymap, info.action);
                let label = format!("{:<32} {}", info.description, keys);
                truncate(&label, inner_width)
            });
            lines.extend(list_lines(entries, palette.selected, LIST_ROWS, &styles));
            if matches.is_empty() {
                lines.push(Line::styled("  No matching command", styles.dim));
            }
            let area = centered_rect(screen, width, LIST_ROWS as u16 + 3);
            let inner = draw(buf, area, "Command Palette", lines, &styles);
            input_cursor(inner, 2 + palette.input.chars().count())
        }
        DialogLayer::Ssh => {
            let ssh = dialogs.ssh.as_ref()?;
            let fields = [
                (SshField::Host, "Host", &ssh.host),
                (SshField::User, "User", &ssh.user),
                (SshField::Port, "Port", &ssh.port),
                (SshField::Path, "Path", &ssh.path),
            ];
            let mut cursor_row = 0;
            let mut lines: Vec<Line> = Vec::new();
            for (row, (field, label, value)) in fields.iter().enumerate() {
                let style = if *field == ssh.field {
                    cursor_row = row;
                    styles.selected
                } else {
                    styles.body
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<6}", label), styles.dim),
                    Span::styled(value.to_string(), style),
                ]));
            }
            lines.push(Line::styled("Tab next field | Enter fetch | Esc cancel", styles.dim));
            let area = centered_rect(screen, width, 7);
            let inner = draw(buf, area, "Open Remote File (SSH)", lines, &styles);
            let value = fields[cursor_row].2.chars().count();
            let (x, y) = input_cursor(inner, 6 + value)?;
            Some((x, y + cursor_row as u16))
        }
        DialogLayer::SaveAs | DialogLayer::CreateFolder => {
            let (title, prompt) = if layer == DialogLayer::SaveAs {
                ("Save As", dialogs.save_as.as_ref()?)
            } else {
                ("New Folder", dialogs.create_folder.as_ref()?)
            };
            let lines = vec![
                Line::styled(format!("> {}", prompt.input), styles.body),
                Line::styled(format!("in {}", model.browser_dir().display()), styles.dim),
            ];
            let area = centered_rect(screen, width, 4);
            let inner = draw(buf, area, title, lines, &styles);
            input_cursor(inner, 2 + prompt.input.chars().count())
        }
        DialogLayer::Help => {
            let help = dialogs.help.as_ref()?;
            let all = help_lines(&model.keymap);
            let height = screen.height.saturating_sub(2);
            let rows = height.saturating_sub(2) as usize;
            let lines: Vec<Line> = all
                .into_iter()
                .skip(help.scroll)
                .take(rows)
                .map(|line| Line::styled(line, styles.body))
                .collect();
            let area = centered_rect(screen, width.max(60).min(screen.width), height);
            draw(buf, area, "Help (Esc/F1 to close)", lines, &styles);
            None
        }
        DialogLayer::ThemeMenu => {
            let menu = dialogs.theme_menu.as_ref()?;
            let ids = available_theme_ids();
            let current = model.config.theme.clone();
            let entries = ids.into_iter().map(|id| {
                if id == current {
                    format!("{} (current)", id)
                } else {
                    id
                }
            });
            let lines = list_lines(entries, menu.selected, LIST_ROWS, &styles);
            let height = lines.len() as u16 + 2;
            let area = centered_rect(screen, width.min(40), height);
            draw(buf, area, "Theme", lines, &styles);
            None
        }
        DialogLayer::Dialog => {
            let dialog = dialogs.dialog.as_ref()?;
            let mut lines = vec![Line::styled(dialog.message.clone(), styles.body)];
            match dialog.kind {
                DialogKind::Confirm => {
                    lines.push(Line::styled("y / Enter: yes    n / Esc: no", styles.dim));
                }
                DialogKind::Input => {
                    lines.push(Line::styled(format!("> {}", dialog.input), styles.body));
                }
            }
            let title = match dialog.kind {
                DialogKind::Confirm => "Confirm",
                DialogKind::Input => "Input",
            };
            let area = centered_rect(screen, width, 4);
            let inner = draw(buf, area, title, lines, &styles);
            match dialog.kind {
                DialogKind::Confirm => None,
                DialogKind::Input => {
                    let (x, y) = input_cursor(inner, 2 + dialog.input.chars().count())?;
                    Some((x, y + 1))
                }
            }
        }
        DialogLayer::FilePicker => {
            let picker = dialogs.file_picker.as_ref()?;
            let visible = picker.visible_entries();
            let mut lines = vec![
                Line::styled(picker.dir.display().to_string(), styles.dim),
                Line::styled(format!("> {}", picker.filter), styles.body),
            ];
            let entries = visible.iter().map(|entry| {
                if entry.is_dir {
                    format!("{}/", entry.name)
                } else {
                    entry.name.clone()
                }
            });
            lines.extend(list_lines(entries, picker.selected, LIST_ROWS, &styles));
            let area = centered_rect(screen, width, LIST_ROWS as u16 + 4);
            let inner = draw(buf, area, "Open File", lines, &styles);
            let (x, y) = input_cursor(inner, 2 + picker.filter.chars().count())?;
            Some((x, y + 1))
        }
        DialogLayer::SplitDialog => {
            let state = dialogs.split_dialog.as_ref()?;
            let labels = split_dialog_items(model).into_iter().map(|(label, _)| label);
            let lines = list_lines(labels, state.selected, LIST_ROWS, &styles);
            let height = lines.len() as u16 + 2;
            let area = centered_rect(screen, width.min(50), height);
            draw(buf, area, "Split View", lines, &styles);
            None
        }
    }
}

fn input_cursor(inner: Rect, column: usize) -> Option<(u16, u16)> {
    let x = inner.x as usize + column;
    (x < inner.right() as usize && inner.height > 0).then_some((x as u16, inner.y))
}
