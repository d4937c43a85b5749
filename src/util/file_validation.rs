//! Checks run before opening a file or creating an entry from the file browser

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Largest file the editor will load (50 MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Characters refused in folder and file names typed into prompts
pub const INVALID_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Why a path cannot be opened as a text document
#[derive(Debug, Clone, PartialEq)]
pub enum FileOpenError {
    IsDirectory,
    BinaryFile,
    TooLarge { size_mb: f64 },
    Io(String),
}

impl std::fmt::Display for FileOpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IsDirectory => write!(f, "is a directory"),
            Self::BinaryFile => write!(f, "binary file"),
            Self::TooLarge { size_mb } => write!(
                f,
                "file too large ({:.1} MB, max {} MB)",
                size_mb,
                MAX_FILE_SIZE / (1024 * 1024)
            ),
            Self::Io(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FileOpenError {}

/// Validate a path before loading it.
///
/// A path that does not exist yet is fine: it opens as a new, unsaved file.
pub fn validate_file_for_opening(path: &Path) -> Result<(), FileOpenError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(FileOpenError::Io(e.to_string())),
    };
    if metadata.is_dir() {
        return Err(FileOpenError::IsDirectory);
    }
    if metadata.len() > MAX_FILE_SIZE {
        return Err(FileOpenError::TooLarge {
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
        });
    }
    if is_likely_binary(path) {
        return Err(FileOpenError::BinaryFile);
    }
    Ok(())
}

/// Scan the first 8KB for null bytes. Read errors count as text so the
/// real open reports them.
pub fn is_likely_binary(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return false;
    };
    let mut buffer = [0u8; 8192];
    let Ok(bytes_read) = file.read(&mut buffer) else {
        return false;
    };
    buffer[..bytes_read].contains(&0)
}

/// Validate a single path component typed by the user
pub fn validate_entry_name(name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    if name == "." || name == ".." {
        return Err(format!("'{}' is reserved", name));
    }
    if let Some(bad) = name.chars().find(|c| INVALID_NAME_CHARS.contains(c)) {
        return Err(format!("invalid character '{}'", bad));
    }
    Ok(())
}

/// Final path component for status messages
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}
