use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};

/// Output format of one export request.
///
/// The format is always recomputed from the destination path's extension,
/// never accepted as a caller-asserted enum, so validation stays separate
/// from execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    Pdf,
}

impl OutputFormat {
    /// Derives the format from a destination path.
    ///
    /// Pure and total: matching is case-insensitive on the extension, and any
    /// extension outside `{svg, pdf}` (including a missing one) is rejected
    /// with [`ExportError::UnsupportedFormat`] before any I/O happens.
    pub fn from_path(path: &Path) -> ExportResult<Self> {
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("pdf") => Ok(Self::Pdf),
            _ => Err(ExportError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
