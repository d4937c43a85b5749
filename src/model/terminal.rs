//! Integrated terminal panel - a line editor that runs shell commands

use std::path::{Path, PathBuf};
use std::process::Command;

/// Output lines kept in the scrollback
const MAX_OUTPUT_LINES: usize = 1000;
/// Smallest panel height, prompt included
pub const MIN_TERMINAL_HEIGHT: usize = 3;
/// Rows the rest of the editor keeps when the panel grows
const RESERVED_ROWS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalPanel {
    pub visible: bool,
    /// Command line being edited
    pub input: String,
    /// Cursor within `input`, in characters
    pub cursor: usize,
    pub history: Vec<String>,
    history_pos: Option<usize>,
    pub output: Vec<String>,
    /// Lines scrolled back from the bottom of the output
    pub scroll: usize,
    /// Panel height in rows; 0 means a third of the screen
    pub height: usize,
    pub cwd: PathBuf,
}

impl TerminalPanel {
    pub fn new(cwd: PathBuf, height: usize) -> Self {
        Self {
            visible: false,
            input: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_pos: None,
            output: Vec::new(),
            scroll: 0,
            height,
            cwd,
        }
    }

    /// Rows the panel occupies on a screen with `screen_rows` rows
    pub fn effective_height(&self, screen_rows: usize) -> usize {
        let max = screen_rows.saturating_sub(RESERVED_ROWS).max(MIN_TERMINAL_HEIGHT);
        let wanted = if self.height == 0 {
            screen_rows / 3
        } else {
            self.height
        };
        wanted.clamp(MIN_TERMINAL_HEIGHT, max)
    }

    pub fn grow(&mut self, screen_rows: usize) {
        self.height = (self.effective_height(screen_rows) + 1)
            .min(screen_rows.saturating_sub(RESERVED_ROWS).max(MIN_TERMINAL_HEIGHT));
    }

    pub fn shrink(&mut self, screen_rows: usize) {
        self.height = self
            .effective_height(screen_rows)
            .saturating_sub(1)
            .max(MIN_TERMINAL_HEIGHT);
    }

    // ========================================================================
    // Line editing
    // ========================================================================

    fn byte_index(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.input.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.input.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.input.chars().count() {
            let at = self.byte_index(self.cursor);
            self.input.remove(at);
        }
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.input.chars().count() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    fn set_input(&mut self, text: String) {
        self.cursor = text.chars().count();
        self.input = text;
    }

    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let pos = match self.history_pos {
            Some(0) => 0,
            Some(p) => p - 1,
            None => self.history.len() - 1,
        };
        self.history_pos = Some(pos);
        self.set_input(self.history[pos].clone());
    }

    pub fn history_next(&mut self) {
        match self.history_pos {
            Some(p) if p + 1 < self.history.len() => {
                self.history_pos = Some(p + 1);
                self.set_input(self.history[p + 1].clone());
            }
            Some(_) => {
                self.history_pos = None;
                self.set_input(String::new());
            }
            None => {}
        }
    }

    /// Take the command line, recording it in history
    pub fn take_input(&mut self) -> String {
        let command = std::mem::take(&mut self.input);
        self.cursor = 0;
        self.history_pos = None;
        if !command.trim().is_empty() && self.history.last() != Some(&command) {
            self.history.push(command.clone());
        }
        command
    }

    // ========================================================================
    // Output
    // ========================================================================

    pub fn append_output<I: IntoIterator<Item = String>>(&mut self, lines: I) {
        self.output.extend(lines);
        if self.output.len() > MAX_OUTPUT_LINES {
            let excess = self.output.len() - MAX_OUTPUT_LINES;
            self.output.drain(..excess);
        }
        self.scroll = 0;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.output.len());
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Run a command line. `cd` is handled here; everything else goes
    /// through `sh -c` and blocks until it exits.
    pub fn run(&mut self, command: &str) {
        self.append_output([format!("$ {}", command)]);
        let trimmed = command.trim();

        if trimmed == "cd" || trimmed.starts_with("cd ") {
            let target = trimmed.strip_prefix("cd").unwrap_or("").trim();
            let dir = if target.is_empty() {
                dirs::home_dir().unwrap_or_else(|| self.cwd.clone())
            } else {
                self.cwd.join(target)
            };
            match dir.canonicalize() {
                Ok(dir) if dir.is_dir() => self.cwd = dir,
                Ok(dir) => self.append_output([format!("cd: not a directory: {}", dir.display())]),
                Err(e) => self.append_output([format!("cd: {}: {}", target, e)]),
            }
            return;
        }

        match run_shell(trimmed, &self.cwd) {
            Ok(lines) => self.append_output(lines),
            Err(e) => self.append_output([format!("Failed to run command: {}", e)]),
        }
    }
}

/// Run `sh -c command` in `cwd`, collecting stdout then stderr as lines
pub fn run_shell(command: &str, cwd: &Path) -> std::io::Result<Vec<String>> {
    let output = Command::new("sh").arg("-c").arg(command).current_dir(cwd).output()?;
    let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    lines.extend(String::from_utf8_lossy(&output.stderr).lines().map(str::to_string));
    if !output.status.success() {
        if let Some(code) = output.status.code() {
            lines.push(format!("[exit {}]", code));
        }
    }
    Ok(lines)
}
