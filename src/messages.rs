//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::model::Mode;

/// Direction for cursor movement and region focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Editor-specific messages (cursor movement, viewport, selection, search)
#[derive(Debug, Clone)]
pub enum EditorMsg {
    // === Basic Movement ===
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor to start of line (Home key)
    MoveCursorLineStart,
    /// Move cursor to end of line (End key)
    MoveCursorLineEnd,
    /// Move cursor to start of document (Ctrl+Home)
    MoveCursorDocumentStart,
    /// Move cursor to end of document (Ctrl+End)
    MoveCursorDocumentEnd,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Jump to a 1-indexed line, column 0
    GotoLine(usize),
    /// Set cursor to specific position (clamped)
    SetCursorPosition { row: usize, col: usize },

    // === Selection ===
    /// Move cursor with selection (Shift+Arrow)
    MoveCursorWithSelection(Direction),
    /// Select all text
    SelectAll,
    /// Select word at cursor
    SelectWord,
    /// Clear the selection
    ClearSelection,

    // === Search ===
    /// Jump to the next match of the committed search
    SearchNext,
    /// Jump to the previous match of the committed search
    SearchPrev,
}

/// Document-specific messages (text editing, clipboard, undo)
#[derive(Debug, Clone)]
pub enum DocumentMsg {
    // === Text Insertion ===
    /// Insert a character at cursor position
    InsertChar(char),
    /// Insert a newline at cursor position
    InsertNewline,
    /// Insert a block of text (bracketed paste)
    InsertText(String),

    // === Deletion ===
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Delete character after cursor (Delete)
    DeleteForward,
    /// Delete the word before the cursor
    DeleteWordBackward,

    // === Line Operations ===
    DuplicateLine,
    DeleteLine,
    MoveLineUp,
    MoveLineDown,
    IndentLine,
    UnindentLine,
    ToggleComment,

    // === Undo/Redo ===
    Undo,
    Redo,

    // === Clipboard ===
    Copy,
    Cut,
    Paste,

    // === Replace ===
    /// Replace every occurrence of `find` with `replace` as one undo step
    ReplaceAll { find: String, replace: String },
}

/// Application lifecycle and file messages
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Save the current document (untitled → Save-As prompt)
    SaveFile,
    /// Save the current document under a new path
    SaveFileAs(PathBuf),
    /// Create a new untitled document
    NewFile,
    /// Open a file in a new tab (or switch to it if open)
    OpenFile(PathBuf),
    /// Open a document fetched from elsewhere (SSH)
    OpenRemote { name: String, content: String },
    /// Close the current tab, asking first when modified
    CloseTab,
    /// Close the current tab, discarding changes
    ForceCloseTab,
    /// Terminal resized to (columns, rows)
    Resize(u16, u16),
    /// Quit, refused once when documents are modified
    Quit,
}

/// UI messages (dialogs, panels, modes, status)
#[derive(Debug, Clone)]
pub enum UiMsg {
    /// Set the status message
    SetStatus(String),
    OpenSaveAs,
    OpenCreateFolder,
    OpenFilePicker,
    ToggleThemeMenu,
    ToggleHelp,
    ToggleLineNumbers,
    ToggleCommandPalette,
    OpenSshDialog,
    OpenSplitDialog,
    ShowFileBrowser,
    ToggleFileBrowser,
    ToggleTerminal,
    ToggleGitPanel,
    /// Enter a code-area text-entry mode (or Normal)
    EnterMode(Mode),
}

/// Layout messages (tabs, split regions)
#[derive(Debug, Clone)]
pub enum LayoutMsg {
    NextTab,
    PrevTab,
    /// Switch to the document at this index
    SwitchToTab(usize),
    SplitVertical,
    SplitHorizontal,
    /// Close the split region at this index
    CloseSplit(usize),
    CloseAllSplits,
    /// Move focus to the adjacent split region
    FocusRegion(Direction),
    /// Grow (positive) or shrink (negative) the active split region
    ResizeActive(i32),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Editor messages (cursor, viewport, selection, search)
    Editor(EditorMsg),
    /// Document messages (text editing, undo, clipboard)
    Document(DocumentMsg),
    /// Application messages (files, lifecycle)
    App(AppMsg),
    /// UI messages (dialogs, panels, modes)
    Ui(UiMsg),
    /// Layout messages (tabs, splits)
    Layout(LayoutMsg),
}
