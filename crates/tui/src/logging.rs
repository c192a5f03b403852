//! File logging for the terminal UI.
//!
//! The terminal owns stdout and stderr while the UI runs, so tracing output
//! goes to a log file instead.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Overrides the log file location.
pub const TUI_LOG_PATH_ENV: &str = "YOUSMALA_TUI_LOG_PATH";

/// Log file path: the override when set, else `<data dir>/yousmala/tui.log`.
pub fn default_log_path() -> PathBuf {
    if let Ok(path) = std::env::var(TUI_LOG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path.trim());
    }
    dirs_next::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("yousmala")
        .join("tui.log")
}

/// Install a global subscriber appending to the log file. Returns the file path.
///
/// `RUST_LOG` sets the filter (default `info`). A subscriber installed
/// earlier is left in place.
pub fn init_file_tracing() -> Result<PathBuf> {
    let path = default_log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_path_is_used() {
        temp_env::with_var(TUI_LOG_PATH_ENV, Some("/tmp/yousmala-test/tui.log"), || {
            assert_eq!(default_log_path(), PathBuf::from("/tmp/yousmala-test/tui.log"));
        });
    }

    #[test]
    fn blank_override_falls_back_to_data_dir() {
        temp_env::with_var(TUI_LOG_PATH_ENV, Some("  "), || {
            let path = default_log_path();
            assert!(path.ends_with("yousmala/tui.log"));
        });
    }
}
