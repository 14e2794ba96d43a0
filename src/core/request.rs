use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::OutputFormat;
use crate::error::ExportResult;

/// One user-triggered export request.
///
/// Carries only the destination path; the format is recomputed from the
/// path's extension on demand (see [`OutputFormat::from_path`]), and the
/// source chart is resolved from the host at execution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub destination: PathBuf,
}

impl ExportRequest {
    #[must_use]
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Format implied by the destination extension.
    pub fn format(&self) -> ExportResult<OutputFormat> {
        OutputFormat::from_path(&self.destination)
    }
}

/// Success payload of one export: what was written, and where.
///
/// Serializable so host applications can record or display it without
/// inventing their own format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOutcome {
    pub format: OutputFormat,
    pub destination: PathBuf,
    pub byte_size: u64,
}

impl ExportOutcome {
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}
