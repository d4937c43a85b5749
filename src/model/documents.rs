//! Document manager - the open document slots shown as tabs

use std::path::{Path, PathBuf};

use super::document::Document;
use super::editor::EditorState;

/// A document together with its own cursor and viewport
#[derive(Debug, Clone)]
pub struct OpenDocument {
    pub document: Document,
    pub editor: EditorState,
}

impl OpenDocument {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            editor: EditorState::new(),
        }
    }
}

/// What the tab strip needs to know about a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub filepath: Option<PathBuf>,
    pub filename: String,
    pub is_modified: bool,
}

/// Owns every open document; one of them is current
#[derive(Debug, Clone, Default)]
pub struct DocumentManager {
    slots: Vec<OpenDocument>,
    current: usize,
    untitled_counter: usize,
}

impl DocumentManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Make `index` current. Returns false when out of range.
    pub fn switch_to(&mut self, index: usize) -> bool {
        if index >= self.slots.len() {
            return false;
        }
        self.current = index;
        true
    }

    pub fn current(&self) -> Option<&OpenDocument> {
        self.slots.get(self.current)
    }

    pub fn current_mut(&mut self) -> Option<&mut OpenDocument> {
        self.slots.get_mut(self.current)
    }

    pub fn get(&self, index: usize) -> Option<&OpenDocument> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut OpenDocument> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OpenDocument> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut OpenDocument> {
        self.slots.iter_mut()
    }

    pub fn all_tabs(&self) -> Vec<TabInfo> {
        self.slots
            .iter()
            .map(|slot| TabInfo {
                filepath: slot.document.file_path.clone(),
                filename: slot.document.display_name(),
                is_modified: slot.document.is_modified,
            })
            .collect()
    }

    pub fn any_modified(&self) -> bool {
        self.slots.iter().any(|slot| slot.document.is_modified)
    }

    /// Index of the slot holding `path`, if open
    pub fn find_by_path(&self, path: &Path) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.document.file_path.as_deref() == Some(path))
    }

    /// Add a document and make it current
    pub fn add(&mut self, document: Document) -> usize {
        self.slots.push(OpenDocument::new(document));
        self.current = self.slots.len() - 1;
        self.current
    }

    /// Create an untitled document ("Untitled", "Untitled-2", ...) and make it current
    pub fn new_document(&mut self) -> usize {
        self.untitled_counter += 1;
        let mut document = Document::new();
        document.untitled_name = Some(if self.untitled_counter == 1 {
            "Untitled".to_string()
        } else {
            format!("Untitled-{}", self.untitled_counter)
        });
        self.add(document)
    }

    /// Open `path`, or switch to it when it is already open.
    ///
    /// A path that does not exist yet opens as an empty, modified document.
    pub fn open_file(&mut self, path: &Path) -> std::io::Result<usize> {
        if let Some(index) = self.find_by_path(path) {
            self.current = index;
            return Ok(index);
        }
        let document = if path.exists() {
            Document::from_file(path.to_path_buf())?
        } else {
            Document::new_with_path(path.to_path_buf())
        };
        Ok(self.add(document))
    }

    /// Remove a slot. The current index moves to the previous neighbour.
    pub fn close(&mut self, index: usize) -> Option<OpenDocument> {
        if index >= self.slots.len() {
            return None;
        }
        let removed = self.slots.remove(index);
        if self.current > index || self.current >= self.slots.len() {
            self.current = self.current.saturating_sub(1);
        }
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_names() {
        let mut docs = DocumentManager::new();
        docs.new_document();
        docs.new_document();
        let names: Vec<String> = docs.all_tabs().into_iter().map(|t| t.filename).collect();
        assert_eq!(names, vec!["Untitled", "Untitled-2"]);
        assert_eq!(docs.current_index(), 1);
    }

    #[test]
    fn test_switch_to_out_of_range() {
        let mut docs = DocumentManager::new();
        docs.new_document();
        assert!(!docs.switch_to(3));
        assert!(docs.switch_to(0));
    }

    #[test]
    fn test_open_file_twice_switches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "hello").unwrap();

        let mut docs = DocumentManager::new();
        let first = docs.open_file(&path).unwrap();
        docs.new_document();
        let again = docs.open_file(&path).unwrap();
        assert_eq!(first, again);
        assert_eq!(docs.document_count(), 2);
        assert_eq!(docs.current_index(), first);
    }

    #[test]
    fn test_open_missing_file_creates_modified_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut docs = DocumentManager::new();
        docs.open_file(&dir.path().join("new.txt")).unwrap();
        assert!(docs.current().unwrap().document.is_modified);
    }

    #[test]
    fn test_close_adjusts_current() {
        let mut docs = DocumentManager::new();
        docs.new_document();
        docs.new_document();
        docs.new_document();
        docs.switch_to(2);
        docs.close(2);
        assert_eq!(docs.current_index(), 1);
        docs.switch_to(1);
        docs.close(0);
        assert_eq!(docs.current_index(), 0);
        docs.close(0);
        assert!(docs.is_empty());
        assert!(docs.current().is_none());
    }
}
