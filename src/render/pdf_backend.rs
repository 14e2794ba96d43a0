use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::core::PageBounds;
use crate::decode::Picture;
use crate::error::{ExportError, ExportResult};
use crate::render::PageRenderer;

/// PDF output backend.
///
/// Converts the decoded picture into a one-page PDF whose page size equals
/// the picture bounds (72 dpi mapping, so one SVG unit is one PDF point),
/// painted at the origin with no scaling or cropping.
///
/// The bytes are staged in a sibling temporary file and renamed over the
/// destination only once complete, so a failed render never leaves a
/// truncated file at the destination.
#[derive(Debug, Default)]
pub struct PdfPageRenderer {
    last_byte_size: Option<u64>,
}

impl PdfPageRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "usvg+svg2pdf"
    }

    /// Byte size of the most recent successful render.
    #[must_use]
    pub fn last_byte_size(&self) -> Option<u64> {
        self.last_byte_size
    }
}

impl PageRenderer for PdfPageRenderer {
    fn render_single_page(
        &mut self,
        picture: &Picture,
        bounds: PageBounds,
        destination: &Path,
    ) -> ExportResult<u64> {
        if !bounds.is_valid() {
            return Err(ExportError::render(
                destination,
                format!(
                    "page bounds must be finite and positive, got {} x {}",
                    bounds.width, bounds.height
                ),
            ));
        }

        // The page size is derived from the tree's intrinsic size, the same
        // source `bounds` was measured from.
        let pdf = svg2pdf::to_pdf(
            picture.tree(),
            svg2pdf::ConversionOptions::default(),
            svg2pdf::PageOptions::default(),
        )
        .map_err(|err| ExportError::render(destination, format!("pdf conversion failed: {err}")))?;

        let byte_size = persist_atomically(&pdf, destination)?;

        debug!(
            byte_size,
            width = bounds.width,
            height = bounds.height,
            destination = %destination.display(),
            "rendered single-page pdf"
        );
        self.last_byte_size = Some(byte_size);
        Ok(byte_size)
    }
}

/// Stages `bytes` next to `destination` and renames into place.
///
/// The temp file lives in the destination's directory so the final rename
/// never crosses a filesystem boundary.
fn persist_atomically(bytes: &[u8], destination: &Path) -> ExportResult<u64> {
    let dir = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut staged = NamedTempFile::new_in(dir).map_err(|err| {
        ExportError::render(
            destination,
            format!("cannot open destination directory for writing: {err}"),
        )
    })?;

    staged
        .write_all(bytes)
        .map_err(|err| ExportError::render(destination, format!("write failed: {err}")))?;

    staged
        .persist(destination)
        .map_err(|err| ExportError::render(destination, format!("rename into place failed: {err}")))?;

    Ok(bytes.len() as u64)
}
