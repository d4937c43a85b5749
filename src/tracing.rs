//! Debug tracing infrastructure for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=strand::input=trace` - router stage decisions
//!
//! # Log Files
//!
//! Logs are written to `~/.config/strand/logs/strand.log` with daily rotation.
//! The terminal belongs to the editor while it runs, so there is no console layer.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{AppModel, Mode, Region};

/// Initialize the file logger.
///
/// `level` (from `--log-level`) wins over RUST_LOG; the default is `strand=info`.
pub fn init(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(format!("strand={}", level)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("strand=info")),
    };

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "strand.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(filter),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry().with(file_layer).init();
}

/// Lightweight snapshot of focus, mode, cursor and viewport for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub region: Region,
    pub mode: Mode,
    pub document: usize,
    pub cursor: (usize, usize),
    pub offset_row: usize,
    pub split_active: Option<usize>,
}

impl ViewSnapshot {
    pub fn from_model(model: &AppModel) -> Self {
        let (cursor, offset_row) = model
            .documents
            .current()
            .map(|slot| (slot.editor.position(), slot.editor.viewport.offset_row))
            .unwrap_or_default();
        Self {
            region: model.regions.current(),
            mode: model.mode.current(),
            document: model.documents.current_index(),
            cursor,
            offset_row,
            split_active: model
                .split_view
                .has_splits()
                .then(|| model.split_view.active_index())
                .flatten(),
        }
    }

    /// Describe the fields that changed between two snapshots
    pub fn diff(&self, other: &ViewSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.region != other.region {
            changes.push(format!("region: {:?} → {:?}", self.region, other.region));
        }
        if self.mode != other.mode {
            changes.push(format!("mode: {:?} → {:?}", self.mode, other.mode));
        }
        if self.document != other.document {
            changes.push(format!("document: {} → {}", self.document, other.document));
        }
        if self.cursor != other.cursor {
            changes.push(format!(
                "cursor: ({},{}) → ({},{})",
                self.cursor.0, self.cursor.1, other.cursor.0, other.cursor.1
            ));
        }
        if self.offset_row != other.offset_row {
            changes.push(format!("offset: {} → {}", self.offset_row, other.offset_row));
        }
        if self.split_active != other.split_active {
            changes.push(format!(
                "split: {:?} → {:?}",
                self.split_active, other.split_active
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_reports_changed_fields_only() {
        let before = ViewSnapshot {
            region: Region::CodeArea,
            mode: Mode::Normal,
            document: 0,
            cursor: (1, 2),
            offset_row: 0,
            split_active: None,
        };
        let mut after = before.clone();
        assert_eq!(before.diff(&after), None);

        after.cursor = (3, 0);
        after.mode = Mode::Search;
        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("mode: Normal → Search"));
        assert!(diff.contains("cursor: (1,2) → (3,0)"));
        assert!(!diff.contains("region"));
    }
}
