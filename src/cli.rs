//! Command-line argument parsing for the editor
//!
//! Supports:
//! - Opening files as tabs (missing paths open as new files)
//! - Jump to line/column in the first file
//! - Running without the config and keymap files
//! - Overriding the log level

use clap::Parser;
use std::path::PathBuf;

/// A keyboard-driven terminal text editor
#[derive(Parser, Debug)]
#[command(name = "strand", version, about = "A keyboard-driven terminal text editor")]
pub struct CliArgs {
    /// Files to open
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Go to line N in the first file
    #[arg(long, value_name = "N")]
    pub line: Option<usize>,

    /// Go to column N (used with --line)
    #[arg(long, value_name = "N")]
    pub column: Option<usize>,

    /// Ignore config.yaml and keymap.yaml
    #[arg(long)]
    pub no_config: bool,

    /// Log level for the log file (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Files to open as tabs, in order
    pub files: Vec<PathBuf>,
    /// Initial cursor position (line, column) - 1-indexed from user, converted to 0-indexed
    pub initial_position: Option<(usize, usize)>,
    /// Read config.yaml and keymap.yaml
    pub use_config: bool,
    pub log_level: Option<String>,
}

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if let Some(dir) = self.files.iter().find(|p| p.is_dir()) {
            return Err(format!("{} is a directory", dir.display()));
        }

        let log_level = match self.log_level {
            Some(level) => {
                let level = level.to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(format!(
                        "Invalid log level '{}' (expected one of: {})",
                        level,
                        LOG_LEVELS.join(", ")
                    ));
                }
                Some(level)
            }
            None => None,
        };

        // Convert from 1-indexed (user input) to 0-indexed (internal)
        let initial_position = self.line.map(|line| {
            let line_0 = line.saturating_sub(1);
            let col_0 = self.column.unwrap_or(1).saturating_sub(1);
            (line_0, col_0)
        });

        Ok(StartupConfig {
            files: self.files,
            initial_position,
            use_config: !self.no_config,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(files: &[&str]) -> CliArgs {
        CliArgs {
            files: files.iter().map(PathBuf::from).collect(),
            line: None,
            column: None,
            no_config: false,
            log_level: None,
        }
    }

    #[test]
    fn test_empty_args() {
        let config = args(&[]).into_config().unwrap();
        assert!(config.files.is_empty());
        assert!(config.use_config);
        assert_eq!(config.initial_position, None);
    }

    #[test]
    fn test_files_keep_order() {
        let config = args(&["b.txt", "a.txt"]).into_config().unwrap();
        assert_eq!(
            config.files,
            vec![PathBuf::from("b.txt"), PathBuf::from("a.txt")]
        );
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            files: vec![dir.path().to_path_buf()],
            ..args(&[])
        };
        assert!(args.into_config().unwrap_err().ends_with("is a directory"));
    }

    #[test]
    fn test_line_column_conversion() {
        let args = CliArgs {
            line: Some(42),
            column: Some(10),
            ..args(&["file.txt"])
        };
        let config = args.into_config().unwrap();
        // 1-indexed to 0-indexed: line 42 → 41, column 10 → 9
        assert_eq!(config.initial_position, Some((41, 9)));
    }

    #[test]
    fn test_line_without_column() {
        let args = CliArgs {
            line: Some(10),
            ..args(&["file.txt"])
        };
        let config = args.into_config().unwrap();
        assert_eq!(config.initial_position, Some((9, 0)));
    }

    #[test]
    fn test_no_config_and_log_level() {
        let args = CliArgs {
            no_config: true,
            log_level: Some("DEBUG".to_string()),
            ..args(&[])
        };
        let config = args.into_config().unwrap();
        assert!(!config.use_config);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_log_level() {
        let args = CliArgs {
            log_level: Some("loud".to_string()),
            ..args(&[])
        };
        assert!(args.into_config().is_err());
    }

    #[test]
    fn test_parse_from_command_line() {
        let parsed = CliArgs::parse_from(["strand", "--line", "3", "--no-config", "x.rs"]);
        assert_eq!(parsed.files, vec![PathBuf::from("x.rs")]);
        assert_eq!(parsed.line, Some(3));
        assert!(parsed.no_config);
    }
}
