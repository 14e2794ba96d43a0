use std::path::{Path, PathBuf};

use crate::core::PageBounds;
use crate::decode::Picture;
use crate::error::{ExportError, ExportResult};
use crate::render::PageRenderer;

/// No-op backend used by tests and headless pipeline checks.
///
/// It still enforces the bounds contract and records the call so tests can
/// observe what a real backend would have been asked to produce, without
/// touching the filesystem.
#[derive(Debug, Default)]
pub struct NullPageRenderer {
    pub last_bounds: Option<PageBounds>,
    pub last_destination: Option<PathBuf>,
    pub pages_rendered: usize,
}

impl PageRenderer for NullPageRenderer {
    fn render_single_page(
        &mut self,
        _picture: &Picture,
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

        self.last_bounds = Some(bounds);
        self.last_destination = Some(destination.to_path_buf());
        self.pages_rendered += 1;
        Ok(0)
    }
}
