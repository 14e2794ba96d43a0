use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

/// Scratch file owned by exactly one export operation.
///
/// Acquiring composes a collision-free path; no file is created until a
/// collaborator writes to it. The underlying file is removed exactly once on
/// the first exit from the owning operation: either through the explicit
/// [`release`](Self::release), or through `Drop` when the operation unwinds
/// or returns early. Removing an already-absent file is not an error.
#[derive(Debug)]
pub struct ScratchArtifact {
    path: PathBuf,
    released: bool,
}

impl ScratchArtifact {
    /// Acquires a uniquely named scratch path in the platform temp directory.
    #[must_use]
    pub fn acquire(extension: &str) -> Self {
        Self::acquire_in(&env::temp_dir(), extension)
    }

    /// Acquires a uniquely named scratch path inside `dir`.
    ///
    /// The UUID v4 file stem guarantees concurrent export operations never
    /// share a scratch path.
    #[must_use]
    pub fn acquire_in(dir: &Path, extension: &str) -> Self {
        let file_name = format!("chart-export-{}.{extension}", Uuid::new_v4());
        Self {
            path: dir.join(file_name),
            released: false,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the scratch file and consumes the artifact.
    ///
    /// Idempotent with respect to the filesystem: an absent file is success.
    pub fn release(mut self) -> io::Result<()> {
        self.released = true;
        Self::remove(&self.path)
    }

    fn remove(path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

impl Drop for ScratchArtifact {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(err) = Self::remove(&self.path) {
            warn!(
                path = %self.path.display(),
                error = %err,
                "failed to remove scratch artifact"
            );
        }
    }
}
