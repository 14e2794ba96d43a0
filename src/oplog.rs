//! Process-wide operation log.
//!
//! A fire-and-forget side channel recording pipeline stage transitions and
//! terminal outcomes. The sink never participates in the pipeline's result:
//! every write swallows its own failures.

use std::env;
use std::error::Error;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::Local;
use directories::UserDirs;
use tracing::debug;

use crate::error::ExportError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Log sink interface for one export operation at a time.
///
/// `begin` starts a fresh log (truncating any prior content); `line` appends.
/// Implementations must be shareable across concurrent exports and must never
/// surface their own failures to callers.
pub trait OperationLog: Send + Sync {
    /// Starts a fresh log for `operation`, discarding any prior log.
    fn begin(&self, operation: &str);

    /// Appends one timestamped line.
    fn line(&self, message: &str);

    /// Terminal success summary.
    fn success(&self, destination: &Path, byte_size: u64) {
        self.line(&format!("SUCCESS: exported to {}", destination.display()));
        self.line(&format!("  file size: {byte_size} bytes"));
    }

    /// Terminal failure summary with the cause chain.
    fn failure(&self, error: &ExportError) {
        self.line(&format!("ERROR: {}", error.kind()));
        self.line(&format!("  message: {error}"));
        if let Some(source) = error.source() {
            self.line(&format!("  caused by: {source}"));
        }
    }
}

/// Discards everything. Default sink for library consumers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOperationLog;

impl OperationLog for NullOperationLog {
    fn begin(&self, _operation: &str) {}

    fn line(&self, _message: &str) {}
}

/// File-backed sink, one log file reused across operations.
///
/// `begin` overwrites the file with a banner naming the operation and its
/// start time; `line` appends `[YYYY-MM-DD HH:MM:SS] message`. Writes are
/// serialized behind a mutex so concurrent exports interleave whole lines.
#[derive(Debug)]
pub struct FileOperationLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileOperationLog {
    /// Sink writing to an explicit file path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Sink at `<documents>/chart-export/chart-export.log`, falling back to
    /// the desktop and then the temp directory when the documents folder is
    /// unavailable.
    #[must_use]
    pub fn default_location() -> Self {
        let dir = UserDirs::new()
            .and_then(|dirs| {
                dirs.document_dir()
                    .map(|docs| docs.join("chart-export"))
                    .or_else(|| dirs.desktop_dir().map(Path::to_path_buf))
            })
            .unwrap_or_else(env::temp_dir);
        Self::at(dir.join("chart-export.log"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, contents: &str, truncate: bool) {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Err(err) = self.try_write(contents, truncate) {
            // Silent fail: the log must never disturb the pipeline.
            debug!(path = %self.path.display(), error = %err, "operation log write failed");
        }
    }

    fn try_write(&self, contents: &str, truncate: bool) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .truncate(truncate)
            .append(!truncate)
            .write(true)
            .open(&self.path)?;
        file.write_all(contents.as_bytes())
    }
}

impl OperationLog for FileOperationLog {
    fn begin(&self, operation: &str) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let banner = "=".repeat(70);
        let header =
            format!("{banner}\nchart-export operation log\noperation: {operation}\nstarted: {timestamp}\n{banner}\n\n");
        self.write(&header, true);
    }

    fn line(&self, message: &str) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        self.write(&format!("[{timestamp}] {message}\n"), false);
    }
}
