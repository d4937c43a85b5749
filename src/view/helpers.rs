//! Shared helper functions for the view layer.

use ratatui::layout::Rect;
use ratatui::style::Color as TermColor;

use crate::model::AppModel;
use crate::theme::Color;

/// Theme color as a true-color terminal color
#[inline]
pub fn term_color(color: Color) -> TermColor {
    TermColor::Rgb(color.r, color.g, color.b)
}

/// Get the display title for a tab.
///
/// Modified documents get a trailing `*`. Returns "Untitled" if the index
/// is out of range.
pub fn tab_display_name(model: &AppModel, index: usize) -> String {
    model
        .documents
        .get(index)
        .map(|slot| {
            let name = slot.document.display_name();
            if slot.document.is_modified {
                format!("{}*", name)
            } else {
                name
            }
        })
        .unwrap_or_else(|| "Untitled".to_string())
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Keep at most `width` characters, marking the cut with `…`
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(area, 40, 10), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_rect(area, 100, 30), area);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 6), "hello…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_tab_display_name_marks_modified() {
        let mut model = AppModel::with_config(EditorConfig::default(), 80, 24);
        assert_eq!(tab_display_name(&model, 0), "Untitled");
        model.documents.current_mut().unwrap().document.set_modified(true);
        assert_eq!(tab_display_name(&model, 0), "Untitled*");
        assert_eq!(tab_display_name(&model, 9), "Untitled");
    }
}
