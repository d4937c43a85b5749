//! Application model - the complete state of the editor
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod clipboard;
pub mod document;
pub mod documents;
pub mod editor;
pub mod file_browser;
pub mod git_panel;
pub mod mode;
pub mod region;
pub mod split_view;
pub mod ssh;
pub mod terminal;
pub mod ui;

pub use clipboard::Clipboard;
pub use document::{Document, EditOperation, Position};
pub use documents::{DocumentManager, OpenDocument, TabInfo};
pub use editor::{Cursor, EditorState, SearchState, Selection, Viewport, SCROLLOFF};
pub use file_browser::{FileBrowser, FileEntry};
pub use git_panel::{GitPanel, GitStatusEntry};
pub use mode::{Mode, ModeState, ReplaceStage};
pub use region::{Region, RegionManager};
pub use split_view::{Rect, SplitLine, SplitViewManager, ViewRegion};
pub use ssh::{RemoteTarget, SshClient};
pub use terminal::TerminalPanel;
pub use ui::{
    CommandPaletteState, DialogKind, DialogLayer, DialogPurpose, DialogState, Dialogs,
    FilePickerState, HelpState, PromptState, SplitDialogState, SshDialogState, SshField,
    ThemeMenuState, UiState,
};

use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::keymap::{load_keymap, KeyBindingTable};
use crate::messages::Direction;
use crate::theme::{load_theme, Theme};

/// Rows outside the code area: tab strip, separator, prompt, status, hints, region bar
pub const CHROME_ROWS: usize = 6;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    pub documents: DocumentManager,
    pub regions: RegionManager,
    pub split_view: SplitViewManager,
    pub mode: ModeState,
    pub ui: UiState,
    pub file_browser: FileBrowser,
    pub terminal: TerminalPanel,
    pub git_panel: GitPanel,
    /// None when SSH is disabled by config or no `ssh` binary exists
    pub ssh: Option<SshClient>,
    pub clipboard: Clipboard,
    pub keymap: KeyBindingTable,
    pub config: EditorConfig,
    pub theme: Theme,
    /// Terminal size in (columns, rows)
    pub screen: (u16, u16),
    /// Write config changes (theme) back to disk
    pub persist_config: bool,
}

impl AppModel {
    /// Create the model from the user's config and keymap files
    pub fn new(cols: u16, rows: u16, file_paths: Vec<PathBuf>) -> Self {
        let config = EditorConfig::load();
        let keymap = load_keymap(crate::config_paths::keymap_file().as_deref());
        let mut model = Self::from_parts(config, keymap, Clipboard::new(), cols, rows);
        model.persist_config = true;
        model.open_initial_files(file_paths);
        model
    }

    /// Create the model from explicit parts; nothing is read from disk
    pub fn from_parts(
        config: EditorConfig,
        keymap: KeyBindingTable,
        clipboard: Clipboard,
        cols: u16,
        rows: u16,
    ) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let theme = load_theme(&config.theme).unwrap_or_else(|e| {
            tracing::warn!(
                "Failed to load theme '{}': {}, using default",
                config.theme,
                e
            );
            Theme::default()
        });
        let ssh = if config.enable_ssh {
            SshClient::detect()
        } else {
            None
        };

        let mut ui = UiState::new();
        ui.show_line_numbers = config.show_line_numbers;

        let mut model = Self {
            documents: DocumentManager::new(),
            regions: RegionManager::new(),
            split_view: SplitViewManager::new(),
            mode: ModeState::default(),
            ui,
            file_browser: FileBrowser::new(
                cwd.clone(),
                config.file_browser_width,
                config.show_hidden_files,
            ),
            terminal: TerminalPanel::new(cwd, config.terminal_height),
            git_panel: GitPanel::default(),
            ssh,
            clipboard,
            keymap,
            config,
            theme,
            screen: (cols, rows),
            persist_config: false,
        };
        model.documents.new_document();
        model.sync_layout();
        model
    }

    /// Defaults everywhere, register-only clipboard, one empty document
    pub fn with_config(config: EditorConfig, cols: u16, rows: u16) -> Self {
        Self::from_parts(
            config,
            KeyBindingTable::with_defaults(),
            Clipboard::internal(),
            cols,
            rows,
        )
    }

    /// Replace the initial untitled document with the given files
    pub fn open_initial_files(&mut self, file_paths: Vec<PathBuf>) {
        if file_paths.is_empty() {
            return;
        }
        let untouched = self.documents.document_count() == 1
            && self
                .documents
                .current()
                .is_some_and(|slot| slot.document.file_path.is_none() && !slot.document.is_modified);

        let mut opened = 0;
        for path in &file_paths {
            match self.documents.open_file(path) {
                Ok(_) => {
                    tracing::info!("Opened {}", path.display());
                    opened += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to open {}: {}", path.display(), e);
                    self.ui
                        .set_status(format!("Error loading {}: {}", path.display(), e));
                }
            }
        }
        if opened > 0 && untouched {
            self.documents.close(0);
        }
        if opened > 0 {
            self.documents.switch_to(0);
            self.ui.set_status(if opened > 1 {
                format!("Opened {} files", opened)
            } else {
                format!("Loaded: {}", file_paths[0].display())
            });
        }
        self.sync_layout();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn current(&self) -> Option<&OpenDocument> {
        self.documents.current()
    }

    /// The current document and its editor state, borrowed together
    pub fn current_parts(&mut self) -> Option<(&mut Document, &mut EditorState)> {
        self.documents
            .current_mut()
            .map(|slot| (&mut slot.document, &mut slot.editor))
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.ui.set_status(message);
    }

    /// Directory used for relative paths: the browser's directory
    pub fn browser_dir(&self) -> PathBuf {
        self.file_browser.dir.clone()
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Code-area size in cells (width, height)
    pub fn code_area_size(&self) -> (usize, usize) {
        let (cols, rows) = (self.screen.0 as usize, self.screen.1 as usize);
        let browser = if self.file_browser.visible {
            self.file_browser.width + 1
        } else {
            0
        };
        let terminal = if self.terminal.visible {
            self.terminal.effective_height(rows)
        } else {
            0
        };
        (
            cols.saturating_sub(browser).max(1),
            rows.saturating_sub(CHROME_ROWS + terminal).max(1),
        )
    }

    /// Screen offset of the code area's top-left cell
    pub fn code_area_origin(&self) -> (usize, usize) {
        let x = if self.file_browser.visible {
            self.file_browser.width + 1
        } else {
            0
        };
        (x, 1)
    }

    /// File browser entries that fit below its directory header
    pub fn browser_list_rows(&self) -> usize {
        (self.screen.1 as usize).saturating_sub(CHROME_ROWS + 1).max(1)
    }

    /// Line-number gutter width for a document, 0 when numbers are hidden
    pub fn gutter_width(&self, line_count: usize) -> usize {
        if !self.ui.show_line_numbers {
            return 0;
        }
        line_count.to_string().len().max(3) + 1
    }

    /// Bring derived state in line with the model: tab count, region
    /// enabled flags, split geometry, and viewport sizes.
    pub fn sync_layout(&mut self) {
        let count = self.documents.document_count();
        self.regions.set_tab_count(count);
        self.regions.set_tab_index(self.documents.current_index());
        self.regions
            .set_enabled(Region::FileBrowser, self.file_browser.visible);
        self.regions.set_enabled(Region::Terminal, self.terminal.visible);
        self.regions.set_enabled(Region::GitPanel, self.git_panel.visible);
        if !self.regions.is_enabled(self.regions.current()) {
            self.regions.set(Region::CodeArea);
        }

        let (width, height) = self.code_area_size();
        if !self.split_view.regions().is_empty() {
            self.split_view.update_region_sizes(width, height);
        }
        let pane = self
            .split_view
            .active_region()
            .filter(|_| self.split_view.has_splits())
            .map(|r| (r.rect.width, r.rect.height));

        let show_numbers = self.ui.show_line_numbers;
        let current = self.documents.current_index();
        for (index, slot) in self.documents.iter_mut().enumerate() {
            let (w, h) = match pane {
                Some(size) if index == current => size,
                _ => (width, height),
            };
            let gutter = if show_numbers {
                slot.document.line_count().to_string().len().max(3) + 1
            } else {
                0
            };
            slot.editor.resize_viewport(h, w.saturating_sub(gutter));
        }
    }

    /// Re-run the scroll algorithm for the current document
    pub fn ensure_cursor_visible(&mut self) {
        if let Some((document, editor)) = self.current_parts() {
            editor.clamp_cursor(document);
            editor.adjust_viewport(document.line_count());
        }
    }

    /// Make `index` the current document, keeping the tab cursor and the
    /// active split pane in step
    pub fn switch_document(&mut self, index: usize) -> bool {
        if !self.documents.switch_to(index) {
            return false;
        }
        self.regions.set_tab_index(index);
        if self.split_view.has_splits() {
            if let Some(region) = self.split_view.active_region_mut() {
                region.document_index = index;
                region.saved_view = None;
            }
        }
        self.sync_layout();
        true
    }

    /// Move split focus, saving the outgoing pane's view and restoring the
    /// incoming one's
    pub fn focus_split(&mut self, direction: Direction) -> bool {
        let previous = self.split_view.active_index();
        if !self.split_view.focus(direction) {
            return false;
        }

        if let (Some(previous), Some(slot)) = (previous, self.documents.current()) {
            let view = slot.editor.clone();
            if let Some(region) = self.split_view.region_mut(previous) {
                region.saved_view = Some(view);
            }
        }

        // The live editor now owns the incoming view; its saved copy goes stale
        let Some((document_index, saved)) = self
            .split_view
            .active_region_mut()
            .map(|r| (r.document_index, r.saved_view.take()))
        else {
            return false;
        };
        self.documents.switch_to(document_index);
        self.regions.set_tab_index(document_index);
        if let (Some(saved), Some(slot)) = (saved, self.documents.current_mut()) {
            slot.editor = saved;
            slot.editor.clamp_cursor(&slot.document);
        }
        self.sync_layout();
        true
    }
}
