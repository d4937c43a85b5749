//! File browser panel - a directory listing beside the code area

use std::io;
use std::path::{Path, PathBuf};

pub const MIN_BROWSER_WIDTH: usize = 20;
pub const MAX_BROWSER_WIDTH: usize = 80;

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl FileEntry {
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: true,
        }
    }
}

/// List a directory: directories first, then files, each sorted by name
pub fn read_entries(dir: &Path, show_hidden: bool) -> io::Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !show_hidden && name.starts_with('.') {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push(FileEntry {
            name,
            path: entry.path(),
            is_dir,
        });
    }
    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}

/// File browser state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBrowser {
    pub visible: bool,
    pub dir: PathBuf,
    pub entries: Vec<FileEntry>,
    pub selected: usize,
    pub show_hidden: bool,
    pub width: usize,
}

impl FileBrowser {
    pub fn new(dir: PathBuf, width: usize, show_hidden: bool) -> Self {
        Self {
            visible: false,
            dir,
            entries: Vec::new(),
            selected: 0,
            show_hidden,
            width: width.clamp(MIN_BROWSER_WIDTH, MAX_BROWSER_WIDTH),
        }
    }

    /// Re-read the current directory, keeping the selection in range
    pub fn refresh(&mut self) -> io::Result<()> {
        self.entries = read_entries(&self.dir, self.show_hidden)?;
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
        Ok(())
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.selected)
    }

    /// First listed entry when `rows` entries fit, keeping the selection in view
    pub fn scroll_top(&self, rows: usize) -> usize {
        let rows = rows.max(1);
        if self.selected >= rows {
            self.selected + 1 - rows
        } else {
            0
        }
    }

    pub fn at_first(&self) -> bool {
        self.selected == 0
    }

    pub fn at_last(&self) -> bool {
        self.selected + 1 >= self.entries.len()
    }

    /// Returns false at the top of the list
    pub fn select_up(&mut self) -> bool {
        if self.at_first() {
            return false;
        }
        self.selected -= 1;
        true
    }

    /// Returns false at the bottom of the list
    pub fn select_down(&mut self) -> bool {
        if self.at_last() {
            return false;
        }
        self.selected += 1;
        true
    }

    /// Select the entry for `path` if it is listed
    pub fn select_path(&mut self, path: &Path) -> bool {
        match self.entries.iter().position(|e| e.path == path) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// Change directory and list it
    pub fn enter_dir(&mut self, dir: PathBuf) -> io::Result<()> {
        let entries = read_entries(&dir, self.show_hidden)?;
        self.dir = dir;
        self.entries = entries;
        self.selected = 0;
        Ok(())
    }

    /// Go to the parent directory, selecting the directory we came from
    pub fn enter_parent(&mut self) -> io::Result<bool> {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return Ok(false);
        };
        let previous = std::mem::replace(&mut self.dir, parent.clone());
        match read_entries(&parent, self.show_hidden) {
            Ok(entries) => {
                self.entries = entries;
                self.selected = 0;
                self.select_path(&previous);
                Ok(true)
            }
            Err(e) => {
                self.dir = previous;
                Err(e)
            }
        }
    }

    pub fn toggle_hidden(&mut self) -> io::Result<()> {
        self.show_hidden = !self.show_hidden;
        self.refresh()
    }

    /// Grow or shrink the panel, clamped to 20..=80 columns
    pub fn resize(&mut self, delta: i32) {
        let width = (self.width as i64 + delta as i64)
            .clamp(MIN_BROWSER_WIDTH as i64, MAX_BROWSER_WIDTH as i64);
        self.width = width as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(dir.path().join("A.txt"), "a").unwrap();
        std::fs::write(dir.path().join(".hidden"), "").unwrap();
        std::fs::create_dir(dir.path().join("zdir")).unwrap();
        dir
    }

    #[test]
    fn test_directories_first_then_sorted() {
        let dir = sample_dir();
        let entries = read_entries(dir.path(), false).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zdir", "A.txt", "b.txt"]);
    }

    #[test]
    fn test_hidden_toggle() {
        let dir = sample_dir();
        let mut browser = FileBrowser::new(dir.path().to_path_buf(), 30, false);
        browser.refresh().unwrap();
        assert_eq!(browser.entries.len(), 3);
        browser.toggle_hidden().unwrap();
        assert_eq!(browser.entries.len(), 4);
    }

    #[test]
    fn test_selection_edges() {
        let dir = sample_dir();
        let mut browser = FileBrowser::new(dir.path().to_path_buf(), 30, false);
        browser.refresh().unwrap();
        assert!(!browser.select_up());
        assert!(browser.select_down());
        assert!(browser.select_down());
        assert!(browser.at_last());
        assert!(!browser.select_down());
    }

    #[test]
    fn test_enter_and_leave_directory() {
        let dir = sample_dir();
        let mut browser = FileBrowser::new(dir.path().to_path_buf(), 30, false);
        browser.refresh().unwrap();
        let sub = browser.selected_entry().unwrap().path.clone();
        browser.enter_dir(sub.clone()).unwrap();
        assert!(browser.entries.is_empty());
        assert!(browser.enter_parent().unwrap());
        assert_eq!(browser.selected_entry().map(|e| e.path.clone()), Some(sub));
    }

    #[test]
    fn test_width_clamped() {
        let mut browser = FileBrowser::new(PathBuf::from("."), 5, false);
        assert_eq!(browser.width, MIN_BROWSER_WIDTH);
        browser.resize(100);
        assert_eq!(browser.width, MAX_BROWSER_WIDTH);
        browser.resize(-5);
        assert_eq!(browser.width, 75);
    }
}
