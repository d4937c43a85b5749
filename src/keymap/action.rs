//! Action enum representing every bindable editor intent
//!
//! Actions are the bridge between key tokens and the message system.
//! Each action maps to exactly one `Msg` for the Elm-style update loop.

use crate::messages::{AppMsg, Direction, DocumentMsg, EditorMsg, LayoutMsg, Msg, UiMsg};
use crate::model::Mode;

/// Category an action belongs to; defaults are seeded per group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionGroup {
    FileOps,
    EditOps,
    SearchNav,
    ViewOps,
    TabOps,
    SplitNav,
}

/// All bindable editor actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // ========================================================================
    // File operations
    // ========================================================================
    /// Save the current document (untitled documents open Save-As)
    Save,
    /// Open the Save-As prompt
    SaveAs,
    /// Quit the editor
    Quit,
    /// Create a new untitled document
    New,
    /// Open the file browser
    Open,
    /// Close the current tab
    CloseTab,
    /// Open the Create-Folder prompt
    CreateFolder,
    /// Open the file picker
    FilePicker,

    // ========================================================================
    // Edit operations
    // ========================================================================
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    /// Select the word under the cursor
    SelectWord,
    SelectExtendUp,
    SelectExtendDown,
    SelectExtendLeft,
    SelectExtendRight,
    DuplicateLine,
    DeleteLine,
    /// Delete the word before the cursor
    DeleteWord,
    MoveLineUp,
    MoveLineDown,
    IndentLine,
    UnindentLine,
    ToggleComment,

    // ========================================================================
    // Search and navigation
    // ========================================================================
    /// Enter search mode
    Search,
    /// Enter replace mode
    Replace,
    /// Enter goto-line mode
    GotoLine,
    SearchNext,
    SearchPrev,
    GotoFileStart,
    GotoFileEnd,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,

    // ========================================================================
    // View operations
    // ========================================================================
    ToggleThemeMenu,
    ToggleFileBrowser,
    ToggleHelp,
    ToggleLineNumbers,
    CommandPalette,
    SshConnect,
    /// Open the split dialog (reserved for the file browser and Ctrl+L paths)
    SplitView,
    ToggleTerminal,
    ToggleGitPanel,

    // ========================================================================
    // Tabs
    // ========================================================================
    NextTab,
    PrevTab,

    // ========================================================================
    // Split navigation
    // ========================================================================
    FocusLeftRegion,
    FocusRightRegion,
    FocusUpRegion,
    FocusDownRegion,

    /// Sentinel for unbound tokens
    Unknown,
}

/// Immutable descriptor for an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionInfo {
    pub action: Action,
    pub group: ActionGroup,
    /// Symbolic snake_case name, used in keymap files
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Default key tokens, first one is the primary binding
    pub default_keys: &'static [&'static str],
}

const fn info(
    action: Action,
    group: ActionGroup,
    name: &'static str,
    description: &'static str,
    default_keys: &'static [&'static str],
) -> ActionInfo {
    ActionInfo {
        action,
        group,
        name,
        description,
        default_keys,
    }
}

use ActionGroup::*;

/// The action registry, in group order
pub static ACTIONS: &[ActionInfo] = &[
    // File
    info(Action::Save, FileOps, "save_file", "Save file", &["ctrl_s"]),
    info(Action::SaveAs, FileOps, "save_as", "Save as", &["alt_a"]),
    info(Action::Quit, FileOps, "quit", "Quit editor", &["ctrl_q"]),
    info(Action::New, FileOps, "new_file", "New file", &["ctrl_n"]),
    info(Action::Open, FileOps, "open_file", "Open file browser", &["ctrl_o"]),
    info(Action::CloseTab, FileOps, "close_tab", "Close tab", &["ctrl_w"]),
    info(Action::CreateFolder, FileOps, "create_folder", "Create folder", &["alt_f"]),
    info(Action::FilePicker, FileOps, "file_picker", "Open file picker", &["alt_m"]),
    // Edit
    info(Action::Undo, EditOps, "undo", "Undo", &["ctrl_z"]),
    info(Action::Redo, EditOps, "redo", "Redo", &["ctrl_y", "ctrl_shift_z"]),
    info(Action::Cut, EditOps, "cut", "Cut", &["ctrl_x"]),
    info(Action::Copy, EditOps, "copy", "Copy", &["ctrl_c", "ctrl_p"]),
    info(Action::Paste, EditOps, "paste", "Paste", &["ctrl_v"]),
    info(Action::SelectAll, EditOps, "select_all", "Select all", &["ctrl_a"]),
    info(Action::SelectWord, EditOps, "select_word", "Select word", &["alt_d"]),
    info(Action::SelectExtendUp, EditOps, "select_extend_up", "Extend selection up", &["alt_shift_arrow_up"]),
    info(Action::SelectExtendDown, EditOps, "select_extend_down", "Extend selection down", &["alt_shift_arrow_down"]),
    info(Action::SelectExtendLeft, EditOps, "select_extend_left", "Extend selection left", &["alt_shift_arrow_left"]),
    info(Action::SelectExtendRight, EditOps, "select_extend_right", "Extend selection right", &["alt_shift_arrow_right"]),
    info(Action::DuplicateLine, EditOps, "duplicate_line", "Duplicate line", &["ctrl_d"]),
    info(Action::DeleteLine, EditOps, "delete_line", "Delete line", &["ctrl_shift_k"]),
    info(Action::DeleteWord, EditOps, "delete_word", "Delete word", &["ctrl_backspace"]),
    info(Action::MoveLineUp, EditOps, "move_line_up", "Move line up", &["alt_arrow_up"]),
    info(Action::MoveLineDown, EditOps, "move_line_down", "Move line down", &["alt_arrow_down"]),
    info(Action::IndentLine, EditOps, "indent_line", "Indent line", &["tab"]),
    info(Action::UnindentLine, EditOps, "unindent_line", "Unindent line", &["shift_tab"]),
    info(Action::ToggleComment, EditOps, "toggle_comment", "Toggle comment", &["ctrl_slash"]),
    // Search / navigation
    info(Action::Search, SearchNav, "search", "Search", &["ctrl_f"]),
    info(Action::Replace, SearchNav, "replace", "Replace", &["ctrl_h"]),
    info(Action::GotoLine, SearchNav, "goto_line", "Go to line", &["ctrl_g"]),
    info(Action::SearchNext, SearchNav, "search_next", "Next match", &["ctrl_f3", "alt_n"]),
    info(Action::SearchPrev, SearchNav, "search_prev", "Previous match", &["ctrl_shift_f3", "alt_shift_n"]),
    info(Action::GotoFileStart, SearchNav, "goto_file_start", "Go to file start", &["ctrl_home"]),
    info(Action::GotoFileEnd, SearchNav, "goto_file_end", "Go to file end", &["ctrl_end"]),
    info(Action::LineStart, SearchNav, "goto_line_start", "Go to line start", &["home"]),
    info(Action::LineEnd, SearchNav, "goto_line_end", "Go to line end", &["end"]),
    info(Action::PageUp, SearchNav, "page_up", "Page up", &["pageup"]),
    info(Action::PageDown, SearchNav, "page_down", "Page down", &["pagedown"]),
    // View
    info(Action::ToggleThemeMenu, ViewOps, "toggle_theme_menu", "Toggle theme menu", &["ctrl_t"]),
    info(Action::ToggleFileBrowser, ViewOps, "toggle_file_browser", "Toggle file browser", &["ctrl_b"]),
    info(Action::ToggleHelp, ViewOps, "toggle_help", "Toggle help window", &["f1"]),
    info(Action::ToggleLineNumbers, ViewOps, "toggle_line_numbers", "Toggle line numbers", &["ctrl_shift_l"]),
    info(Action::CommandPalette, ViewOps, "command_palette", "Command palette", &["f3"]),
    info(Action::SshConnect, ViewOps, "ssh_connect", "SSH remote file editor", &["f4"]),
    info(Action::SplitView, ViewOps, "split_view", "Split view", &[]),
    info(Action::ToggleTerminal, ViewOps, "toggle_terminal", "Toggle terminal", &["alt_t"]),
    info(Action::ToggleGitPanel, ViewOps, "toggle_git_panel", "Toggle git panel", &["alt_g"]),
    // Tabs
    info(Action::NextTab, TabOps, "next_tab", "Next tab", &["alt_tab", "ctrl_pagedown"]),
    info(Action::PrevTab, TabOps, "prev_tab", "Previous tab", &["alt_shift_tab", "ctrl_pageup"]),
    // Split navigation
    info(Action::FocusLeftRegion, SplitNav, "focus_left_region", "Focus split on the left", &["ctrl_arrow_left"]),
    info(Action::FocusRightRegion, SplitNav, "focus_right_region", "Focus split on the right", &["ctrl_arrow_right"]),
    info(Action::FocusUpRegion, SplitNav, "focus_up_region", "Focus split above", &["ctrl_arrow_up"]),
    info(Action::FocusDownRegion, SplitNav, "focus_down_region", "Focus split below", &["ctrl_arrow_down"]),
];

static UNKNOWN_INFO: ActionInfo = info(Action::Unknown, ViewOps, "unknown", "Unknown action", &[]);

impl Action {
    /// Descriptor for this action
    pub fn info(self) -> &'static ActionInfo {
        ACTIONS
            .iter()
            .find(|info| info.action == self)
            .unwrap_or(&UNKNOWN_INFO)
    }

    /// Symbolic snake_case name
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Human-readable description
    pub fn description(self) -> &'static str {
        self.info().description
    }

    /// Look up an action by its symbolic name
    pub fn from_name(name: &str) -> Option<Action> {
        ACTIONS
            .iter()
            .find(|info| info.name == name)
            .map(|info| info.action)
    }

    /// Text-editing and cursor actions that only make sense while the code
    /// area has focus; other regions get the raw key instead
    pub fn is_code_area_only(self) -> bool {
        matches!(
            self,
            Action::Copy
                | Action::Paste
                | Action::Cut
                | Action::Undo
                | Action::Redo
                | Action::SelectAll
                | Action::SelectWord
                | Action::SelectExtendUp
                | Action::SelectExtendDown
                | Action::SelectExtendLeft
                | Action::SelectExtendRight
                | Action::DuplicateLine
                | Action::DeleteLine
                | Action::DeleteWord
                | Action::MoveLineUp
                | Action::MoveLineDown
                | Action::IndentLine
                | Action::UnindentLine
                | Action::ToggleComment
                | Action::LineStart
                | Action::LineEnd
                | Action::PageUp
                | Action::PageDown
                | Action::GotoFileStart
                | Action::GotoFileEnd
        )
    }

    /// Split-focus actions
    pub fn focus_direction(self) -> Option<Direction> {
        match self {
            Action::FocusLeftRegion => Some(Direction::Left),
            Action::FocusRightRegion => Some(Direction::Right),
            Action::FocusUpRegion => Some(Direction::Up),
            Action::FocusDownRegion => Some(Direction::Down),
            _ => None,
        }
    }

    /// Convert this action to its message for the Elm update loop
    pub fn to_msg(self) -> Option<Msg> {
        use Action::*;

        let msg = match self {
            // File
            Save => Msg::App(AppMsg::SaveFile),
            SaveAs => Msg::Ui(UiMsg::OpenSaveAs),
            Quit => Msg::App(AppMsg::Quit),
            New => Msg::App(AppMsg::NewFile),
            Open => Msg::Ui(UiMsg::ShowFileBrowser),
            CloseTab => Msg::App(AppMsg::CloseTab),
            CreateFolder => Msg::Ui(UiMsg::OpenCreateFolder),
            FilePicker => Msg::Ui(UiMsg::OpenFilePicker),

            // Edit
            Undo => Msg::Document(DocumentMsg::Undo),
            Redo => Msg::Document(DocumentMsg::Redo),
            Cut => Msg::Document(DocumentMsg::Cut),
            Copy => Msg::Document(DocumentMsg::Copy),
            Paste => Msg::Document(DocumentMsg::Paste),
            SelectAll => Msg::Editor(EditorMsg::SelectAll),
            SelectWord => Msg::Editor(EditorMsg::SelectWord),
            SelectExtendUp => Msg::Editor(EditorMsg::MoveCursorWithSelection(Direction::Up)),
            SelectExtendDown => Msg::Editor(EditorMsg::MoveCursorWithSelection(Direction::Down)),
            SelectExtendLeft => Msg::Editor(EditorMsg::MoveCursorWithSelection(Direction::Left)),
            SelectExtendRight => {
                Msg::Editor(EditorMsg::MoveCursorWithSelection(Direction::Right))
            }
            DuplicateLine => Msg::Document(DocumentMsg::DuplicateLine),
            DeleteLine => Msg::Document(DocumentMsg::DeleteLine),
            DeleteWord => Msg::Document(DocumentMsg::DeleteWordBackward),
            MoveLineUp => Msg::Document(DocumentMsg::MoveLineUp),
            MoveLineDown => Msg::Document(DocumentMsg::MoveLineDown),
            IndentLine => Msg::Document(DocumentMsg::IndentLine),
            UnindentLine => Msg::Document(DocumentMsg::UnindentLine),
            ToggleComment => Msg::Document(DocumentMsg::ToggleComment),

            // Search / navigation
            Search => Msg::Ui(UiMsg::EnterMode(Mode::Search)),
            Replace => Msg::Ui(UiMsg::EnterMode(Mode::Replace)),
            GotoLine => Msg::Ui(UiMsg::EnterMode(Mode::GotoLine)),
            SearchNext => Msg::Editor(EditorMsg::SearchNext),
            SearchPrev => Msg::Editor(EditorMsg::SearchPrev),
            GotoFileStart => Msg::Editor(EditorMsg::MoveCursorDocumentStart),
            GotoFileEnd => Msg::Editor(EditorMsg::MoveCursorDocumentEnd),
            LineStart => Msg::Editor(EditorMsg::MoveCursorLineStart),
            LineEnd => Msg::Editor(EditorMsg::MoveCursorLineEnd),
            PageUp => Msg::Editor(EditorMsg::PageUp),
            PageDown => Msg::Editor(EditorMsg::PageDown),

            // View
            ToggleThemeMenu => Msg::Ui(UiMsg::ToggleThemeMenu),
            ToggleFileBrowser => Msg::Ui(UiMsg::ToggleFileBrowser),
            ToggleHelp => Msg::Ui(UiMsg::ToggleHelp),
            ToggleLineNumbers => Msg::Ui(UiMsg::ToggleLineNumbers),
            CommandPalette => Msg::Ui(UiMsg::ToggleCommandPalette),
            SshConnect => Msg::Ui(UiMsg::OpenSshDialog),
            SplitView => Msg::Ui(UiMsg::OpenSplitDialog),
            ToggleTerminal => Msg::Ui(UiMsg::ToggleTerminal),
            ToggleGitPanel => Msg::Ui(UiMsg::ToggleGitPanel),

            // Tabs
            NextTab => Msg::Layout(LayoutMsg::NextTab),
            PrevTab => Msg::Layout(LayoutMsg::PrevTab),

            // Split navigation
            FocusLeftRegion => Msg::Layout(LayoutMsg::FocusRegion(Direction::Left)),
            FocusRightRegion => Msg::Layout(LayoutMsg::FocusRegion(Direction::Right)),
            FocusUpRegion => Msg::Layout(LayoutMsg::FocusRegion(Direction::Up)),
            FocusDownRegion => Msg::Layout(LayoutMsg::FocusRegion(Direction::Down)),

            Unknown => return None,
        };
        Some(msg)
    }
}
