//! Document model - represents the text buffer, file state and undo history

use ropey::Rope;
use std::path::{Path, PathBuf};

/// A (row, column) position. Columns count characters, not bytes.
pub type Position = (usize, usize);

/// Represents an edit operation for undo/redo functionality
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    Insert {
        position: usize,
        text: String,
        cursor_before: Position,
        cursor_after: Position,
    },
    Delete {
        position: usize,
        text: String,
        cursor_before: Position,
        cursor_after: Position,
    },
    /// Batch operation - groups edits so compound commands undo atomically
    Batch {
        /// Individual operations (applied in order for redo, reverse order for undo)
        operations: Vec<EditOperation>,
        cursor_before: Position,
        cursor_after: Position,
    },
}

impl EditOperation {
    pub fn cursor_before(&self) -> Position {
        match self {
            EditOperation::Insert { cursor_before, .. }
            | EditOperation::Delete { cursor_before, .. }
            | EditOperation::Batch { cursor_before, .. } => *cursor_before,
        }
    }

    pub fn cursor_after(&self) -> Position {
        match self {
            EditOperation::Insert { cursor_after, .. }
            | EditOperation::Delete { cursor_after, .. }
            | EditOperation::Batch { cursor_after, .. } => *cursor_after,
        }
    }

    fn set_cursor_after(&mut self, pos: Position) {
        match self {
            EditOperation::Insert { cursor_after, .. }
            | EditOperation::Delete { cursor_after, .. }
            | EditOperation::Batch { cursor_after, .. } => *cursor_after = pos,
        }
    }

    fn apply(&self, buffer: &mut Rope) {
        match self {
            EditOperation::Insert { position, text, .. } => {
                buffer.insert(*position, text);
            }
            EditOperation::Delete { position, text, .. } => {
                let end = *position + text.chars().count();
                buffer.remove(*position..end);
            }
            EditOperation::Batch { operations, .. } => {
                for op in operations {
                    op.apply(buffer);
                }
            }
        }
    }

    fn revert(&self, buffer: &mut Rope) {
        match self {
            EditOperation::Insert { position, text, .. } => {
                let end = *position + text.chars().count();
                buffer.remove(*position..end);
            }
            EditOperation::Delete { position, text, .. } => {
                buffer.insert(*position, text);
            }
            EditOperation::Batch { operations, .. } => {
                for op in operations.iter().rev() {
                    op.revert(buffer);
                }
            }
        }
    }
}

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for new/unsaved files)
    pub file_path: Option<PathBuf>,
    /// Display name for documents without a path (e.g., "Untitled-2", "host:/etc/hosts")
    pub untitled_name: Option<String>,
    /// Whether the buffer has unsaved changes
    pub is_modified: bool,
    /// Undo stack
    pub undo_stack: Vec<EditOperation>,
    /// Redo stack
    pub redo_stack: Vec<EditOperation>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            file_path: None,
            untitled_name: None,
            is_modified: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: PathBuf) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;
        let mut doc = Self::with_text(&content);
        doc.file_path = Some(path);
        Ok(doc)
    }

    /// Create a new empty document with a target file path
    ///
    /// The file will be created when the user saves.
    pub fn new_with_path(path: PathBuf) -> Self {
        let mut doc = Self::new();
        doc.file_path = Some(path);
        doc.is_modified = true;
        doc
    }

    /// Get the display name for this document.
    pub fn display_name(&self) -> String {
        if let Some(path) = &self.file_path {
            if let Some(name) = path.file_name() {
                return name.to_string_lossy().to_string();
            }
        }
        if let Some(name) = &self.untitled_name {
            return name.clone();
        }
        "Untitled".to_string()
    }

    /// Full text of the buffer
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Get the number of lines in the document (never 0)
    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Get a line by index without its trailing newline
    pub fn get_line(&self, row: usize) -> Option<String> {
        if row >= self.buffer.len_lines() {
            return None;
        }
        let line = self.buffer.line(row).to_string();
        Some(
            line.strip_suffix('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l))
                .unwrap_or(&line)
                .to_string(),
        )
    }

    /// Get the length of a line in characters (excluding newline)
    pub fn line_length(&self, row: usize) -> usize {
        if row >= self.buffer.len_lines() {
            return 0;
        }
        let line = self.buffer.line(row);
        let mut len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && line.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }

    /// Convert a (row, col) position to a buffer offset, clamping both
    pub fn cursor_to_offset(&self, row: usize, col: usize) -> usize {
        if row >= self.buffer.len_lines() {
            return self.buffer.len_chars();
        }
        self.buffer.line_to_char(row) + col.min(self.line_length(row))
    }

    /// Convert a buffer offset to a (row, col) position
    pub fn offset_to_cursor(&self, offset: usize) -> Position {
        let clamped = offset.min(self.buffer.len_chars());
        let row = self.buffer.char_to_line(clamped);
        let line_start = self.buffer.line_to_char(row);
        (row, clamped - line_start)
    }

    /// Clamp a position into the document
    pub fn clamp_position(&self, (row, col): Position) -> Position {
        let row = row.min(self.line_count().saturating_sub(1));
        (row, col.min(self.line_length(row)))
    }

    /// Number of leading spaces/tabs on a line
    pub fn leading_whitespace(&self, row: usize) -> usize {
        self.get_line(row)
            .map(|l| l.chars().take_while(|c| *c == ' ' || *c == '\t').count())
            .unwrap_or(0)
    }

    // ========================================================================
    // Editing primitives (all recorded for undo)
    // ========================================================================

    /// Push an edit operation onto the undo stack and clear redo stack
    pub fn push_edit(&mut self, op: EditOperation) {
        self.undo_stack.push(op);
        self.redo_stack.clear();
        self.is_modified = true;
    }

    /// Insert text at a position. Returns the position after the inserted text.
    pub fn insert_text(&mut self, row: usize, col: usize, text: &str) -> Position {
        let cursor_before = self.clamp_position((row, col));
        if text.is_empty() {
            return cursor_before;
        }
        let position = self.cursor_to_offset(cursor_before.0, cursor_before.1);
        self.buffer.insert(position, text);
        let cursor_after = self.offset_to_cursor(position + text.chars().count());
        self.push_edit(EditOperation::Insert {
            position,
            text: text.to_string(),
            cursor_before,
            cursor_after,
        });
        cursor_after
    }

    /// Insert a character at a position
    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) -> Position {
        let mut buf = [0u8; 4];
        self.insert_text(row, col, ch.encode_utf8(&mut buf))
    }

    /// Split the line at a position
    pub fn insert_newline(&mut self, row: usize, col: usize) -> Position {
        self.insert_text(row, col, "\n")
    }

    /// Remove the text between two positions (in either order).
    ///
    /// The recorded cursor goes from `cursor_before` to the start of the range.
    pub fn delete_range(&mut self, a: Position, b: Position, cursor_before: Position) -> String {
        let start = self.cursor_to_offset(a.0, a.1);
        let end = self.cursor_to_offset(b.0, b.1);
        let (start, end) = (start.min(end), start.max(end));
        if start == end {
            return String::new();
        }
        let text = self.buffer.slice(start..end).to_string();
        self.buffer.remove(start..end);
        let cursor_after = self.offset_to_cursor(start);
        self.push_edit(EditOperation::Delete {
            position: start,
            text: text.clone(),
            cursor_before,
            cursor_after,
        });
        text
    }

    /// Delete the character before a position (Backspace).
    ///
    /// At column 0 the line joins the previous one. Returns the new cursor,
    /// or None at the start of the document.
    pub fn delete_char(&mut self, row: usize, col: usize) -> Option<Position> {
        let (row, col) = self.clamp_position((row, col));
        let offset = self.cursor_to_offset(row, col);
        if offset == 0 {
            return None;
        }
        let start = self.offset_to_cursor(offset - 1);
        self.delete_range(start, (row, col), (row, col));
        Some(start)
    }

    /// Delete the character after a position (Delete). Returns false at the end.
    pub fn delete_forward(&mut self, row: usize, col: usize) -> bool {
        let (row, col) = self.clamp_position((row, col));
        let offset = self.cursor_to_offset(row, col);
        if offset >= self.buffer.len_chars() {
            return false;
        }
        let end = self.offset_to_cursor(offset + 1);
        self.delete_range((row, col), end, (row, col));
        true
    }

    /// Mark the start of a compound edit
    pub fn begin_group(&self) -> usize {
        self.undo_stack.len()
    }

    /// Fold every edit recorded since `start` into one undo step
    pub fn end_group(&mut self, start: usize, cursor_after: Position) {
        if self.undo_stack.len() <= start {
            return;
        }
        let mut operations = self.undo_stack.split_off(start);
        if operations.len() == 1 {
            let mut op = operations.remove(0);
            op.set_cursor_after(cursor_after);
            self.undo_stack.push(op);
            return;
        }
        let cursor_before = operations[0].cursor_before();
        self.undo_stack.push(EditOperation::Batch {
            operations,
            cursor_before,
            cursor_after,
        });
    }

    /// Undo the last edit. Returns where the cursor belongs afterwards:
    /// the position recorded before the undone change.
    pub fn undo(&mut self) -> Option<Position> {
        let op = self.undo_stack.pop()?;
        op.revert(&mut self.buffer);
        let pos = op.cursor_before();
        self.redo_stack.push(op);
        self.is_modified = true;
        Some(self.clamp_position(pos))
    }

    /// Redo the last undone edit. Returns the position recorded after the change.
    pub fn redo(&mut self) -> Option<Position> {
        let op = self.redo_stack.pop()?;
        op.apply(&mut self.buffer);
        let pos = op.cursor_after();
        self.undo_stack.push(op);
        self.is_modified = true;
        Some(self.clamp_position(pos))
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.is_modified = modified;
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Start positions of every non-overlapping occurrence of `needle`
    pub fn find_all(&self, needle: &str) -> Vec<Position> {
        if needle.is_empty() {
            return Vec::new();
        }
        let mut results = Vec::new();
        for row in 0..self.line_count() {
            let Some(line) = self.get_line(row) else {
                continue;
            };
            let mut from = 0;
            while let Some(rel) = line[from..].find(needle) {
                let byte = from + rel;
                results.push((row, line[..byte].chars().count()));
                from = byte + needle.len();
            }
        }
        results
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Write the buffer to its file path
    pub fn save(&mut self) -> std::io::Result<()> {
        let path = self.file_path.clone().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "document has no file path")
        })?;
        self.save_as(&path)
    }

    /// Write the buffer to `path` and adopt it as the document's path
    pub fn save_as(&mut self, path: &Path) -> std::io::Result<()> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.buffer.write_to(&mut file)?;
        std::io::Write::flush(&mut file)?;
        self.file_path = Some(path.to_path_buf());
        self.untitled_name = None;
        self.is_modified = false;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
