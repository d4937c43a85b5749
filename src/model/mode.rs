//! Code-area modes and their scratch input buffer

/// How literal key input is interpreted while the code area has focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Search,
    Replace,
    GotoLine,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Search => "SEARCH",
            Mode::Replace => "REPLACE",
            Mode::GotoLine => "GOTO",
        }
    }
}

/// Which half of the replace prompt is being typed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplaceStage {
    #[default]
    Find,
    With,
}

/// The active mode plus the buffer it owns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeState {
    pub mode: Mode,
    /// Text typed since the mode was entered
    pub buffer: String,
    pub replace_stage: ReplaceStage,
    /// Pattern captured by the first replace stage
    pub replace_pattern: String,
}

impl ModeState {
    pub fn current(&self) -> Mode {
        self.mode
    }

    /// Switch modes; the scratch buffer always starts empty
    pub fn enter(&mut self, mode: Mode) {
        self.mode = mode;
        self.buffer.clear();
        self.replace_stage = ReplaceStage::Find;
        self.replace_pattern.clear();
    }

    pub fn exit(&mut self) {
        self.enter(Mode::Normal);
    }

    /// Prompt shown in the status bar while a text-entry mode is active
    pub fn prompt(&self) -> Option<String> {
        match self.mode {
            Mode::Normal => None,
            Mode::Search => Some(format!("Search: {}", self.buffer)),
            Mode::GotoLine => Some(format!("Go to line: {}", self.buffer)),
            Mode::Replace => Some(match self.replace_stage {
                ReplaceStage::Find => format!("Replace: find: {}", self.buffer),
                ReplaceStage::With => format!("Replace: with: {}", self.buffer),
            }),
        }
    }
}
