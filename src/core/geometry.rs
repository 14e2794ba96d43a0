use serde::{Deserialize, Serialize};

/// Page dimensions in device-independent units.
///
/// Derived from a decoded picture's intrinsic bounds and used verbatim as the
/// output page size, so the rendered page always matches the source picture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageBounds {
    pub width: f64,
    pub height: f64,
}

impl PageBounds {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Finite and strictly positive on both axes.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
