//! Editor state - cursor, viewport, selection, and the scroll algorithm

use super::document::{Document, Position};
use crate::messages::Direction;

/// Lines kept visible above and below the cursor when scrolling is possible
pub const SCROLLOFF: usize = 3;

/// Cursor position in the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Line number (0-indexed)
    pub row: usize,
    /// Column number (0-indexed, in characters)
    pub col: usize,
    /// Desired column for vertical movement (preserves position when moving through short lines)
    pub desired_col: Option<usize>,
}

impl Cursor {
    /// Create a cursor at a specific position
    pub fn at(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            desired_col: None,
        }
    }

    pub fn position(&self) -> Position {
        (self.row, self.col)
    }
}

/// Selection anchor; the selected range is `[anchor, cursor)` in document order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub active: bool,
    pub anchor_row: usize,
    pub anchor_col: usize,
}

/// Viewport state - what portion of the document is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible line (0-indexed)
    pub offset_row: usize,
    /// First visible column (for horizontal scrolling)
    pub offset_col: usize,
    /// Number of lines that fit in the viewport
    pub height: usize,
    /// Number of text columns that fit in the viewport
    pub width: usize,
}

impl Viewport {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            offset_row: 0,
            offset_col: 0,
            height,
            width,
        }
    }

    /// Whether a row falls inside the visible window
    pub fn is_row_visible(&self, row: usize) -> bool {
        row >= self.offset_row && row < self.offset_row + self.height.max(1)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(24, 80)
    }
}

/// Committed search results for one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub pattern: String,
    pub matches: Vec<Position>,
    /// Index into `matches` of the current match
    pub current: Option<usize>,
}

/// Per-document editor state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub cursor: Cursor,
    pub selection: Selection,
    pub viewport: Viewport,
    pub search: SearchState,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create editor state with specific viewport dimensions
    pub fn with_viewport(height: usize, width: usize) -> Self {
        Self {
            viewport: Viewport::new(height, width),
            ..Self::default()
        }
    }

    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    pub fn resize_viewport(&mut self, height: usize, width: usize) {
        self.viewport.height = height.max(1);
        self.viewport.width = width.max(1);
    }

    // ========================================================================
    // Cursor placement
    // ========================================================================

    /// Clamp the cursor into the document
    pub fn clamp_cursor(&mut self, document: &Document) {
        let (row, col) = document.clamp_position(self.cursor.position());
        self.cursor.row = row;
        self.cursor.col = col;
    }

    /// Place the cursor (clamped) and forget the desired column
    pub fn set_cursor(&mut self, document: &Document, row: usize, col: usize) {
        let (row, col) = document.clamp_position((row, col));
        self.cursor = Cursor::at(row, col);
    }

    /// Move the cursor one step. Returns false when already at the edge.
    pub fn move_cursor(&mut self, document: &Document, direction: Direction) -> bool {
        let before = self.cursor.position();
        match direction {
            Direction::Up | Direction::Down => {
                let target = match direction {
                    Direction::Up if self.cursor.row > 0 => self.cursor.row - 1,
                    Direction::Down if self.cursor.row + 1 < document.line_count() => {
                        self.cursor.row + 1
                    }
                    _ => return false,
                };
                let desired = *self.cursor.desired_col.get_or_insert(self.cursor.col);
                self.cursor.row = target;
                self.cursor.col = desired.min(document.line_length(target));
            }
            Direction::Left => {
                if self.cursor.col > 0 {
                    self.cursor.col -= 1;
                } else if self.cursor.row > 0 {
                    self.cursor.row -= 1;
                    self.cursor.col = document.line_length(self.cursor.row);
                }
                self.cursor.desired_col = None;
            }
            Direction::Right => {
                if self.cursor.col < document.line_length(self.cursor.row) {
                    self.cursor.col += 1;
                } else if self.cursor.row + 1 < document.line_count() {
                    self.cursor.row += 1;
                    self.cursor.col = 0;
                }
                self.cursor.desired_col = None;
            }
        }
        self.cursor.position() != before
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Anchor a selection at the cursor unless one is already active
    pub fn begin_selection(&mut self) {
        if !self.selection.active {
            self.selection = Selection {
                active: true,
                anchor_row: self.cursor.row,
                anchor_col: self.cursor.col,
            };
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.active = false;
    }

    /// Selected range in document order, None when empty or inactive
    pub fn selection_range(&self) -> Option<(Position, Position)> {
        if !self.selection.active {
            return None;
        }
        let anchor = (self.selection.anchor_row, self.selection.anchor_col);
        let cursor = self.cursor.position();
        match anchor.cmp(&cursor) {
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Less => Some((anchor, cursor)),
            std::cmp::Ordering::Greater => Some((cursor, anchor)),
        }
    }

    /// Text covered by the selection
    pub fn selected_text(&self, document: &Document) -> Option<String> {
        let (start, end) = self.selection_range()?;
        let from = document.cursor_to_offset(start.0, start.1);
        let to = document.cursor_to_offset(end.0, end.1);
        Some(document.buffer.slice(from..to).to_string())
    }

    // ========================================================================
    // Viewport
    // ========================================================================

    /// Re-derive the scroll offsets so the cursor stays visible with a
    /// `SCROLLOFF` margin wherever the document allows it.
    pub fn adjust_viewport(&mut self, total_lines: usize) {
        let height = self.viewport.height.max(1);
        let row = self.cursor.row;
        let max_offset = total_lines.saturating_sub(height);
        let mut offset = self.viewport.offset_row;

        if row >= offset + height {
            offset = row + 1 - height;
        } else if row < offset {
            offset = row;
        }

        // A window of 2 * SCROLLOFF lines or fewer cannot honor the margin
        if height > 2 * SCROLLOFF {
            let relative = row - offset;
            if relative < SCROLLOFF {
                offset = row.saturating_sub(SCROLLOFF);
            } else if relative >= height - SCROLLOFF {
                let target = (row + SCROLLOFF + 1).saturating_sub(height).min(max_offset);
                offset = offset.max(target);
            }
        }

        self.viewport.offset_row = if total_lines <= height {
            0
        } else {
            offset.min(max_offset)
        };

        let width = self.viewport.width.max(1);
        let col = self.cursor.col;
        if col < self.viewport.offset_col {
            self.viewport.offset_col = col;
        } else if col >= self.viewport.offset_col + width {
            self.viewport.offset_col = col + 1 - width;
        }
    }

    /// Scroll one page up, keeping the cursor's place on the page
    pub fn page_up(&mut self, document: &Document) {
        let height = self.viewport.height.max(1);
        let old_offset = self.viewport.offset_row;
        let new_offset = old_offset.saturating_sub(height);
        let visible = self.cursor.row.saturating_sub(old_offset);

        let row = if old_offset == 0 && new_offset == 0 {
            0
        } else if visible < height / 2 {
            new_offset
        } else {
            new_offset + visible
        };

        self.viewport.offset_row = new_offset;
        self.move_to_row(document, row);
    }

    /// Scroll one page down, keeping the cursor's place on the page
    pub fn page_down(&mut self, document: &Document) {
        let height = self.viewport.height.max(1);
        let total = document.line_count();
        let last = total.saturating_sub(1);
        let max_offset = total.saturating_sub(height);
        let old_offset = self.viewport.offset_row;
        let new_offset = (old_offset + height).min(max_offset);
        let visible = self.cursor.row.saturating_sub(old_offset);

        let row = if total <= height || (new_offset == max_offset && old_offset == max_offset) {
            last
        } else if visible >= height / 2 {
            new_offset + height - 1
        } else {
            new_offset + visible
        };

        self.viewport.offset_row = new_offset;
        self.move_to_row(document, row);
    }

    fn move_to_row(&mut self, document: &Document, row: usize) {
        let desired = *self.cursor.desired_col.get_or_insert(self.cursor.col);
        let row = row.min(document.line_count().saturating_sub(1));
        self.cursor.row = row;
        self.cursor.col = desired.min(document.line_length(row));
        self.adjust_viewport(document.line_count());
    }

    /// Check that cursor and viewport invariants hold (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self, document: &Document) {
        debug_assert!(self.cursor.row < document.line_count());
        debug_assert!(self.cursor.col <= document.line_length(self.cursor.row));
    }

    #[cfg(not(debug_assertions))]
    pub fn assert_invariants(&self, _document: &Document) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Document {
        let text: Vec<String> = (0..n).map(|i| format!("line {}", i)).collect();
        Document::with_text(&text.join("\n"))
    }

    fn state_at(row: usize, height: usize) -> EditorState {
        let mut editor = EditorState::with_viewport(height, 80);
        editor.cursor = Cursor::at(row, 0);
        editor
    }

    #[test]
    fn test_short_document_pins_offset() {
        let mut editor = state_at(5, 20);
        editor.viewport.offset_row = 4;
        editor.adjust_viewport(10);
        assert_eq!(editor.viewport.offset_row, 0);
    }

    #[test]
    fn test_snap_when_cursor_below_view_keeps_margin() {
        let mut editor = state_at(50, 10);
        editor.adjust_viewport(100);
        let rel = 50 - editor.viewport.offset_row;
        assert!((SCROLLOFF..=10 - 1 - SCROLLOFF).contains(&rel));
    }

    #[test]
    fn test_snap_when_cursor_above_view_keeps_margin() {
        let mut editor = state_at(20, 10);
        editor.viewport.offset_row = 60;
        editor.adjust_viewport(100);
        assert_eq!(editor.viewport.offset_row, 20 - SCROLLOFF);
    }

    #[test]
    fn test_margin_near_document_end() {
        let mut editor = state_at(99, 10);
        editor.adjust_viewport(100);
        assert_eq!(editor.viewport.offset_row, 90);
    }

    #[test]
    fn test_margin_near_document_start() {
        let mut editor = state_at(1, 10);
        editor.viewport.offset_row = 1;
        editor.adjust_viewport(100);
        assert_eq!(editor.viewport.offset_row, 0);
    }

    #[test]
    fn test_viewport_properties_hold_for_every_row() {
        for height in [1, 5, 7, 10, 24] {
            for total in [1, 3, 10, 30, 100] {
                let mut editor = EditorState::with_viewport(height, 80);
                for row in (0..total).chain((0..total).rev()) {
                    editor.cursor = Cursor::at(row, 0);
                    editor.adjust_viewport(total);
                    let off = editor.viewport.offset_row;
                    if total <= height {
                        assert_eq!(off, 0);
                    } else {
                        assert!(off <= total - height);
                        assert!(row >= off && row - off < height);
                        let interior = row >= SCROLLOFF && row + SCROLLOFF < total;
                        if interior && height > 2 * SCROLLOFF {
                            let rel = row - off;
                            assert!(rel >= SCROLLOFF && rel <= height - 1 - SCROLLOFF);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_horizontal_scroll_follows_cursor() {
        let mut editor = EditorState::with_viewport(10, 20);
        editor.cursor = Cursor::at(0, 30);
        editor.adjust_viewport(1);
        assert_eq!(editor.viewport.offset_col, 11);
        editor.cursor.col = 5;
        editor.adjust_viewport(1);
        assert_eq!(editor.viewport.offset_col, 5);
    }

    #[test]
    fn test_page_down_moves_one_screen() {
        let doc = lines(100);
        let mut editor = state_at(2, 10);
        editor.page_down(&doc);
        assert_eq!(editor.cursor.row, 12);
        // one page down, then the margin pulls the offset back by one line
        assert_eq!(editor.viewport.offset_row, 12 - SCROLLOFF);
    }

    #[test]
    fn test_page_down_at_bottom_snaps_to_last_line() {
        let doc = lines(100);
        let mut editor = state_at(95, 10);
        editor.viewport.offset_row = 90;
        editor.page_down(&doc);
        assert_eq!(editor.cursor.row, 99);
        assert_eq!(editor.viewport.offset_row, 90);
    }

    #[test]
    fn test_page_down_short_document() {
        let doc = lines(5);
        let mut editor = state_at(1, 10);
        editor.page_down(&doc);
        assert_eq!(editor.cursor.row, 4);
        assert_eq!(editor.viewport.offset_row, 0);
    }

    #[test]
    fn test_page_up_at_top_snaps_to_first_line() {
        let doc = lines(100);
        let mut editor = state_at(4, 10);
        editor.page_up(&doc);
        assert_eq!(editor.cursor.row, 0);
        assert_eq!(editor.viewport.offset_row, 0);
    }

    #[test]
    fn test_page_up_preserves_relative_row() {
        let doc = lines(100);
        let mut editor = state_at(56, 10);
        editor.viewport.offset_row = 50;
        editor.page_up(&doc);
        assert_eq!(editor.cursor.row, 46);
        assert!(editor.viewport.is_row_visible(46));
    }

    #[test]
    fn test_page_clamps_column() {
        let doc = Document::with_text("a long first line\nx\n");
        let mut editor = state_at(0, 10);
        editor.cursor.col = 10;
        editor.page_down(&doc);
        assert_eq!(editor.cursor.row, 2);
        assert_eq!(editor.cursor.col, 0);
    }

    #[test]
    fn test_move_cursor_keeps_desired_column() {
        let doc = Document::with_text("abcdef\nab\nabcdef");
        let mut editor = EditorState::new();
        editor.cursor = Cursor::at(0, 5);
        editor.move_cursor(&doc, Direction::Down);
        assert_eq!(editor.position(), (1, 2));
        editor.move_cursor(&doc, Direction::Down);
        assert_eq!(editor.position(), (2, 5));
    }

    #[test]
    fn test_move_cursor_wraps_lines() {
        let doc = Document::with_text("ab\ncd");
        let mut editor = EditorState::new();
        editor.cursor = Cursor::at(0, 2);
        assert!(editor.move_cursor(&doc, Direction::Right));
        assert_eq!(editor.position(), (1, 0));
        assert!(editor.move_cursor(&doc, Direction::Left));
        assert_eq!(editor.position(), (0, 2));
        editor.cursor = Cursor::at(0, 0);
        assert!(!editor.move_cursor(&doc, Direction::Up));
    }

    #[test]
    fn test_selection_range_is_ordered() {
        let doc = Document::with_text("hello world");
        let mut editor = EditorState::new();
        editor.cursor = Cursor::at(0, 8);
        editor.begin_selection();
        editor.cursor.col = 2;
        assert_eq!(editor.selection_range(), Some(((0, 2), (0, 8))));
        assert_eq!(editor.selected_text(&doc).as_deref(), Some("llo wo"));
        editor.clear_selection();
        assert_eq!(editor.selection_range(), None);
    }
}
