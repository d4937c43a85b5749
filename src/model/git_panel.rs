//! Git panel - working tree status from `git status --porcelain`

use std::path::Path;
use std::process::Command;

/// One changed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitStatusEntry {
    /// Two-letter porcelain status, e.g. " M", "??"
    pub status: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitPanel {
    pub visible: bool,
    pub entries: Vec<GitStatusEntry>,
    pub selected: usize,
    /// Why the last refresh produced no listing
    pub error: Option<String>,
}

/// Parse porcelain v1 output
pub fn parse_porcelain(output: &str) -> Vec<GitStatusEntry> {
    output
        .lines()
        .filter(|line| line.len() > 3)
        .map(|line| GitStatusEntry {
            status: line[..2].to_string(),
            path: line[3..].to_string(),
        })
        .collect()
}

impl GitPanel {
    /// Re-run `git status` in `dir`
    pub fn refresh(&mut self, dir: &Path) {
        match Command::new("git")
            .args(["status", "--porcelain"])
            .current_dir(dir)
            .output()
        {
            Ok(output) if output.status.success() => {
                self.entries = parse_porcelain(&String::from_utf8_lossy(&output.stdout));
                self.error = None;
            }
            Ok(output) => {
                self.entries.clear();
                self.error = Some(String::from_utf8_lossy(&output.stderr).trim().to_string());
            }
            Err(e) => {
                self.entries.clear();
                self.error = Some(format!("Failed to run git: {}", e));
            }
        }
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
        tracing::debug!("Git status: {} entries", self.entries.len());
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_porcelain() {
        let entries = parse_porcelain(" M src/main.rs\n?? notes.txt\nA  lib.rs\n\n");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].status, " M");
        assert_eq!(entries[0].path, "src/main.rs");
        assert_eq!(entries[1].status, "??");
        assert_eq!(entries[2].path, "lib.rs");
    }

    #[test]
    fn test_selection_bounds() {
        let mut panel = GitPanel {
            entries: parse_porcelain(" M a\n M b"),
            ..Default::default()
        };
        panel.select_up();
        assert_eq!(panel.selected, 0);
        panel.select_down();
        panel.select_down();
        assert_eq!(panel.selected, 1);
    }

    #[test]
    fn test_refresh_outside_repository_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = GitPanel::default();
        panel.refresh(dir.path());
        assert!(panel.entries.is_empty());
    }
}
