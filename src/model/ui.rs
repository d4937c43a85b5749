//! UI state - status message and the modal dialog stack

use std::path::PathBuf;

use super::file_browser::FileEntry;

// ============================================================================
// Dialog states
// ============================================================================

/// State for the command palette
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandPaletteState {
    /// Current filter text
    pub input: String,
    /// Index of selected action in the filtered list
    pub selected: usize,
}

/// Which SSH dialog field has focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SshField {
    #[default]
    Host,
    User,
    Port,
    Path,
}

impl SshField {
    pub fn next(self) -> Self {
        match self {
            SshField::Host => SshField::User,
            SshField::User => SshField::Port,
            SshField::Port => SshField::Path,
            SshField::Path => SshField::Host,
        }
    }
}

/// State for the SSH remote-file dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshDialogState {
    pub host: String,
    pub user: String,
    pub port: String,
    pub path: String,
    pub field: SshField,
}

impl Default for SshDialogState {
    fn default() -> Self {
        Self {
            host: String::new(),
            user: String::new(),
            port: "22".to_string(),
            path: String::new(),
            field: SshField::Host,
        }
    }
}

impl SshDialogState {
    pub fn field_mut(&mut self) -> &mut String {
        match self.field {
            SshField::Host => &mut self.host,
            SshField::User => &mut self.user,
            SshField::Port => &mut self.port,
            SshField::Path => &mut self.path,
        }
    }
}

/// Single-line text prompt (Save-As, Create-Folder)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptState {
    pub input: String,
}

/// Help window scroll position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelpState {
    pub scroll: usize,
}

/// Theme menu selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeMenuState {
    pub selected: usize,
}

/// What a generic dialog decides
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogPurpose {
    /// Discard changes and close the tab at this index
    CloseModifiedTab(usize),
    RenameFile(PathBuf),
    DeleteFile(PathBuf),
}

/// Yes/no question or free-text answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Confirm,
    Input,
}

/// Generic confirm/input dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogState {
    pub kind: DialogKind,
    pub purpose: DialogPurpose,
    pub message: String,
    pub input: String,
}

impl DialogState {
    pub fn confirm(purpose: DialogPurpose, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Confirm,
            purpose,
            message: message.into(),
            input: String::new(),
        }
    }

    pub fn input(purpose: DialogPurpose, message: impl Into<String>, initial: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Input,
            purpose,
            message: message.into(),
            input: initial.into(),
        }
    }
}

/// File picker: a filtered directory listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePickerState {
    pub dir: PathBuf,
    pub filter: String,
    pub entries: Vec<FileEntry>,
    pub selected: usize,
}

impl FilePickerState {
    /// Entries whose name contains the filter (case-insensitive)
    pub fn visible_entries(&self) -> Vec<&FileEntry> {
        let filter = self.filter.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&filter))
            .collect()
    }
}

/// Split dialog selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitDialogState {
    pub selected: usize,
}

/// Identifies an open dialog, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogLayer {
    CommandPalette,
    Ssh,
    SaveAs,
    CreateFolder,
    Help,
    ThemeMenu,
    Dialog,
    FilePicker,
    SplitDialog,
}

/// Every modal dialog; several may be open at once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialogs {
    pub command_palette: Option<CommandPaletteState>,
    pub ssh: Option<SshDialogState>,
    pub save_as: Option<PromptState>,
    pub create_folder: Option<PromptState>,
    pub help: Option<HelpState>,
    pub theme_menu: Option<ThemeMenuState>,
    pub dialog: Option<DialogState>,
    pub file_picker: Option<FilePickerState>,
    pub split_dialog: Option<SplitDialogState>,
}

impl Dialogs {
    /// The highest-precedence open dialog; only it receives input
    pub fn top(&self) -> Option<DialogLayer> {
        if self.save_as.is_some() {
            Some(DialogLayer::SaveAs)
        } else if self.create_folder.is_some() {
            Some(DialogLayer::CreateFolder)
        } else if self.file_picker.is_some() {
            Some(DialogLayer::FilePicker)
        } else if self.command_palette.is_some() {
            Some(DialogLayer::CommandPalette)
        } else if self.ssh.is_some() {
            Some(DialogLayer::Ssh)
        } else if self.help.is_some() {
            Some(DialogLayer::Help)
        } else if self.theme_menu.is_some() {
            Some(DialogLayer::ThemeMenu)
        } else if self.dialog.is_some() {
            Some(DialogLayer::Dialog)
        } else if self.split_dialog.is_some() {
            Some(DialogLayer::SplitDialog)
        } else {
            None
        }
    }

    pub fn any_open(&self) -> bool {
        self.top().is_some()
    }
}

// ============================================================================
// UI state
// ============================================================================

/// UI state - status message, dialogs, and display toggles
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Message displayed in the status bar
    pub status_message: String,
    pub dialogs: Dialogs,
    /// Set by a refused quit; the next quit goes through
    pub quit_armed: bool,
    pub show_line_numbers: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }
}
