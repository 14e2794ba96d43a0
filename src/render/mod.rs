mod null_renderer;
mod pdf_backend;

pub use null_renderer::NullPageRenderer;
pub use pdf_backend::PdfPageRenderer;

use std::path::Path;

use crate::core::PageBounds;
use crate::decode::Picture;
use crate::error::ExportResult;

/// Contract implemented by any single-page output backend.
///
/// Backends receive an already-decoded picture and its measured bounds so the
/// document plumbing stays isolated from decoding and orchestration logic.
pub trait PageRenderer {
    /// Writes `picture` onto exactly one page sized to `bounds` at
    /// `destination`, returning the byte size written.
    ///
    /// On failure the destination must be left either absent or as the
    /// previously-existing file, never truncated.
    fn render_single_page(
        &mut self,
        picture: &Picture,
        bounds: PageBounds,
        destination: &Path,
    ) -> ExportResult<u64>;
}
