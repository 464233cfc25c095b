//! Recursive discovery of PNG files under an input root.

use ddsforge_common::paths::is_png_file;
use ddsforge_common::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use walkdir::WalkDir;

/// A PNG found by [`ImageWalker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Full path to the image.
    pub path: PathBuf,
    /// Parent directory relative to the walk root.
    pub relative_dir: PathBuf,
}

/// Lazy iterator over every PNG below a root directory, at any depth.
///
/// Order follows the filesystem's enumeration order. Entries that cannot be
/// read are logged and skipped.
pub struct ImageWalker {
    root: PathBuf,
    entries: walkdir::IntoIter,
}

impl ImageWalker {
    /// Start a walk at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputDirMissing`] if `root` is not an existing
    /// directory. Nothing is read before this check.
    pub fn new(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::InputDirMissing {
                path: root.to_path_buf(),
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            entries: WalkDir::new(root).into_iter(),
        })
    }

    fn discovered(&self, path: &Path) -> Option<DiscoveredFile> {
        let parent = path.parent()?;
        let relative_dir = parent.strip_prefix(&self.root).ok()?;
        Some(DiscoveredFile {
            path: path.to_path_buf(),
            relative_dir: relative_dir.to_path_buf(),
        })
    }
}

impl Iterator for ImageWalker {
    type Item = DiscoveredFile;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            // Follows file symlinks; directory symlinks are not descended.
            if !path.is_file() || !is_png_file(path) {
                continue;
            }

            match self.discovered(path) {
                Some(file) => {
                    trace!("Discovered {:?}", file.path);
                    return Some(file);
                }
                None => warn!("Skipping {:?}: not under {:?}", path, self.root),
            }
        }
    }
}
