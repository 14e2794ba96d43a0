//! SVG decoding into a paintable picture plus its intrinsic bounds.
//!
//! The decoded tree type comes from the `svg2pdf` re-export of `usvg`, so the
//! picture handed to the PDF backend is exactly the one whose bounds were
//! measured here.

use std::fmt;
use std::fs;
use std::path::Path;

use svg2pdf::usvg;
use tracing::debug;

use crate::core::PageBounds;
use crate::error::{ExportError, ExportResult};

/// Decoder knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Populate the font database from the system so `<text>` content
    /// resolves to real glyphs. Disable for text-free pictures or sandboxed
    /// environments.
    pub load_system_fonts: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
        }
    }
}

/// Decoded, paintable representation of one SVG document.
///
/// Invariant: the wrapped tree is non-empty and its bounds are finite and
/// positive; construction fails otherwise, so a `Picture` is always
/// renderable.
pub struct Picture {
    tree: usvg::Tree,
}

impl fmt::Debug for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picture")
            .field("bounds", &self.bounds())
            .finish()
    }
}

impl Picture {
    /// Decodes the SVG file at `path`.
    ///
    /// A missing or unreadable file, malformed markup, an empty picture, or
    /// non-positive intrinsic bounds all fail with [`ExportError::Decode`];
    /// an undrawable source is a decode failure, never a zero-size export.
    pub fn decode_file(path: &Path, options: &DecodeOptions) -> ExportResult<Self> {
        let markup = fs::read_to_string(path)
            .map_err(|err| ExportError::decode(path, format!("unreadable source: {err}")))?;
        Self::decode_markup(&markup, path, options)
    }

    /// Decodes in-memory SVG markup; `origin` only labels errors.
    pub fn decode_str(markup: &str, origin: &Path, options: &DecodeOptions) -> ExportResult<Self> {
        Self::decode_markup(markup, origin, options)
    }

    fn decode_markup(markup: &str, origin: &Path, options: &DecodeOptions) -> ExportResult<Self> {
        let mut usvg_options = usvg::Options::default();
        if options.load_system_fonts {
            usvg_options.fontdb_mut().load_system_fonts();
        }

        let tree = usvg::Tree::from_str(markup, &usvg_options)
            .map_err(|err| ExportError::decode(origin, format!("malformed svg: {err}")))?;

        if tree.root().children().is_empty() {
            return Err(ExportError::decode(origin, "svg decoded to an empty picture"));
        }

        let picture = Self { tree };
        let bounds = picture.bounds();
        if !bounds.is_valid() {
            return Err(ExportError::decode(
                origin,
                format!(
                    "decoded picture has non-positive bounds: {} x {}",
                    bounds.width, bounds.height
                ),
            ));
        }

        debug!(
            width = bounds.width,
            height = bounds.height,
            "decoded svg picture"
        );
        Ok(picture)
    }

    /// Intrinsic bounds of the decoded picture.
    ///
    /// Read from the tree the backend will paint, not recomputed from
    /// `viewBox` attributes, so it reflects exactly what ends up on the page.
    #[must_use]
    pub fn bounds(&self) -> PageBounds {
        let size = self.tree.size();
        PageBounds::new(f64::from(size.width()), f64::from(size.height()))
    }

    pub(crate) fn tree(&self) -> &usvg::Tree {
        &self.tree
    }
}
