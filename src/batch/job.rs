//! A single PNG to DDS conversion.

use ddsforge_common::paths::dds_file_name;
use ddsforge_common::{Error, Result};
use std::path::{Path, PathBuf};

/// One discovered image and where its DDS ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// The PNG being converted.
    pub source_path: PathBuf,
    /// The source's parent directory relative to the input root ("" at the root).
    pub relative_dir: PathBuf,
    /// Final location under the output root, extension swapped to `.dds`.
    pub destination_path: PathBuf,
}

impl ConversionJob {
    /// Build a job for `source`, found in `relative_dir` under the input root.
    pub fn new(source: &Path, relative_dir: &Path, output_root: &Path) -> Result<Self> {
        let file_name = dds_file_name(source)
            .ok_or_else(|| Error::InvalidInput(format!("no file name in {:?}", source)))?;

        Ok(Self {
            source_path: source.to_path_buf(),
            relative_dir: relative_dir.to_path_buf(),
            destination_path: output_root.join(relative_dir).join(file_name),
        })
    }

    /// Directory the result is placed in.
    pub fn destination_dir(&self) -> &Path {
        self.destination_path.parent().unwrap_or(Path::new(""))
    }

    /// Source file name for display.
    pub fn display_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.source_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_destination() {
        let job = ConversionJob::new(
            Path::new("/in/a/b/y.PNG"),
            Path::new("a/b"),
            Path::new("/out"),
        )
        .unwrap();

        assert_eq!(job.destination_path, PathBuf::from("/out/a/b/y.dds"));
        assert_eq!(job.destination_dir(), Path::new("/out/a/b"));
        assert_eq!(job.display_name(), "y.PNG");
    }

    #[test]
    fn test_file_at_input_root() {
        let job = ConversionJob::new(Path::new("/in/x.png"), Path::new(""), Path::new("/out"))
            .unwrap();
        assert_eq!(job.destination_path, PathBuf::from("/out/x.dds"));
        assert_eq!(job.relative_dir, PathBuf::new());
    }
}
