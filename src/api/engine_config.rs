use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::decode::DecodeOptions;

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist/load export settings
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEngineConfig {
    /// Populate the decoder's font database from the system.
    #[serde(default = "default_load_system_fonts")]
    pub load_system_fonts: bool,

    /// Directory for per-export scratch files. `None` uses the platform
    /// temp directory.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

impl ExportEngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_system_fonts(mut self, load_system_fonts: bool) -> Self {
        self.load_system_fonts = load_system_fonts;
        self
    }

    #[must_use]
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            load_system_fonts: self.load_system_fonts,
        }
    }
}

impl Default for ExportEngineConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: default_load_system_fonts(),
            scratch_dir: None,
        }
    }
}

fn default_load_system_fonts() -> bool {
    true
}
