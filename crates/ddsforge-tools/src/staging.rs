//! Staging directory shared by every conversion in a run.
//!
//! The encoder writes flat into the staging directory; each result is then
//! moved to its mirrored destination. Files with the same stem in different
//! source folders map to the same staged path, so a run must relocate each
//! result before starting the next conversion.

use std::path::{Path, PathBuf};

use ddsforge_common::paths::{dds_file_name, DDS_EXTENSION};
use ddsforge_common::{Error, Result};

/// Default staging directory, relative to the working directory.
pub const DEFAULT_STAGING_DIR: &str = "temp_dds";

/// Shared encoder output directory for one batch run.
///
/// # Example
///
/// ```no_run
/// use ddsforge_tools::StagingArea;
/// use std::path::Path;
///
/// let staging = StagingArea::create("temp_dds")?;
/// let staged = staging.staged_path(Path::new("in/a/x.png"))?;
/// // ... run the encoder into staging.path() ...
/// staging.relocate(&staged, Path::new("out/a/x.dds"))?;
/// staging.cleanup();
/// # Ok::<(), ddsforge_common::Error>(())
/// ```
#[derive(Debug)]
pub struct StagingArea {
    path: PathBuf,
}

impl StagingArea {
    /// Create the staging directory (and parents) if it does not exist yet.
    ///
    /// An existing directory is reused only if it holds nothing but `.dds`
    /// files left over from an interrupted run, since [`cleanup`](Self::cleanup)
    /// removes the whole tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsafeStagingDir`] if `path` exists with anything else
    /// in it, or is not a directory.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            ensure_only_leftovers(&path)?;
        }
        std::fs::create_dir_all(&path)?;
        tracing::debug!("Staging directory ready: {:?}", path);
        Ok(Self { path })
    }

    /// Path to the staging directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the encoder is expected to leave the DDS for `source`.
    pub fn staged_path(&self, source: &Path) -> Result<PathBuf> {
        let file_name = dds_file_name(source)
            .ok_or_else(|| Error::InvalidInput(format!("no file name in {:?}", source)))?;
        Ok(self.path.join(file_name))
    }

    /// Move a staged file to `dest`, replacing anything already there.
    ///
    /// The destination's parent directories are created first. Returns the
    /// final path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StagedOutputMissing`] if `staged` does not exist, or an
    /// I/O error if the move fails.
    pub fn relocate(&self, staged: &Path, dest: &Path) -> Result<PathBuf> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !staged.is_file() {
            return Err(Error::staged_output_missing(staged));
        }

        // Try rename first (same filesystem), fall back to copy+remove.
        if let Err(rename_err) = std::fs::rename(staged, dest) {
            tracing::debug!("rename {:?} failed ({}), copying instead", staged, rename_err);
            std::fs::copy(staged, dest)?;
            self.discard(staged);
        }

        Ok(dest.to_path_buf())
    }

    /// Remove a staged file: leftovers of a failed run, or the source of a
    /// cross-filesystem copy. Failures are logged.
    pub fn discard(&self, staged: &Path) {
        if staged.exists() {
            if let Err(e) = std::fs::remove_file(staged) {
                tracing::warn!("Could not remove staged file {:?}: {}", staged, e);
            }
        }
    }

    /// Remove the staging directory tree.
    ///
    /// Failures are logged and otherwise ignored. Returns `true` when the
    /// directory is gone afterwards.
    pub fn cleanup(self) -> bool {
        if !self.path.exists() {
            return true;
        }
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed staging directory {:?}", self.path);
                true
            }
            Err(e) => {
                tracing::warn!("Could not remove temp folder {:?}: {}", self.path, e);
                false
            }
        }
    }
}

fn ensure_only_leftovers(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(Error::unsafe_staging_dir(path, "it is not a directory"));
    }
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let is_dds = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(DDS_EXTENSION));
        if !entry.file_type()?.is_file() || !is_dds {
            return Err(Error::unsafe_staging_dir(
                path,
                format!("it already contains {:?}", entry.file_name()),
            ));
        }
    }
    Ok(())
}
