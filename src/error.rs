use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type ExportResult<T> = Result<T, ExportError>;

/// Failure kinds of the export pipeline.
///
/// Every failure is terminal for its export attempt; nothing in this crate
/// retries. A failed request surfaces exactly one of these to the caller.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported destination extension: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("no active chart available in the host")]
    NoActiveChart,

    #[error("host failed to serialize chart to svg: {reason}")]
    ChartExport { reason: String },

    #[error("failed to decode svg at {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("failed to render page to {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },

    #[error("i/o failure on {}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// Stable label for log lines and host-side notifications.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } => "UnsupportedFormat",
            Self::NoActiveChart => "NoActiveChart",
            Self::ChartExport { .. } => "ChartExport",
            Self::Decode { .. } => "Decode",
            Self::Render { .. } => "Render",
            Self::Filesystem { .. } => "Filesystem",
        }
    }

    pub(crate) fn decode(path: &Path, reason: impl Into<String>) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub(crate) fn render(path: &Path, reason: impl Into<String>) -> Self {
        Self::Render {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub(crate) fn filesystem(path: &Path, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}
