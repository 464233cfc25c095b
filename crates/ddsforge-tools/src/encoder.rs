//! Image to DDS encoders.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ddsforge_common::paths::dds_file_name;
use ddsforge_common::{Error, Result};

use crate::command::ToolCommand;
use crate::tools::Shim;

/// Something that can turn one image into one DDS file.
///
/// `convert` writes its result directly into `output_dir` and returns the
/// path of the file it produced. It does not mirror any subdirectories.
pub trait Encoder: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Encode `input` into `output_dir`, returning the produced file's path.
    fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf>;
}

/// Fixed texconv parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexconvSettings {
    /// Output pixel format (`-f`).
    pub format: String,
    /// Number of mip levels to generate (`-m`).
    pub mip_levels: u32,
    /// Resampling filter (`-if`).
    pub filter: String,
    /// Block compression options (`-bc`); "u" is uniform weighting.
    pub block_compression: String,
    /// Overwrite existing output without prompting (`-y`).
    pub overwrite: bool,
}

impl Default for TexconvSettings {
    fn default() -> Self {
        Self {
            format: "DXT5".to_string(),
            mip_levels: 1,
            filter: "CUBIC".to_string(),
            block_compression: "u".to_string(),
            overwrite: true,
        }
    }
}

impl TexconvSettings {
    /// Arguments for converting `input` into `output_dir`.
    pub fn args(&self, output_dir: &Path, input: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            self.format.clone().into(),
            "-m".into(),
            self.mip_levels.to_string().into(),
            "-if".into(),
            self.filter.clone().into(),
            "-bc".into(),
            self.block_compression.clone().into(),
        ];
        if self.overwrite {
            args.push("-y".into());
        }
        args.push("-o".into());
        args.push(output_dir.as_os_str().to_os_string());
        args.push(input.as_os_str().to_os_string());
        args
    }
}

/// Encoder backed by Microsoft's texconv, optionally launched through a shim.
#[derive(Debug, Clone)]
pub struct TexconvEncoder {
    path: PathBuf,
    shim: Option<Shim>,
    settings: TexconvSettings,
}

impl TexconvEncoder {
    /// Create an encoder for the texconv executable at `path`.
    pub fn new(path: PathBuf, shim: Option<Shim>) -> Self {
        Self {
            path,
            shim,
            settings: TexconvSettings::default(),
        }
    }

    /// Build the invocation for one file.
    pub fn command(&self, input: &Path, output_dir: &Path) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.path.clone());
        if let Some(ref shim) = self.shim {
            cmd.via(shim.clone());
        }
        cmd.args(self.settings.args(output_dir, input));
        cmd
    }
}

impl Encoder for TexconvEncoder {
    fn name(&self) -> &str {
        "texconv"
    }

    fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        let file_name = dds_file_name(input)
            .ok_or_else(|| Error::InvalidInput(format!("no file name in {:?}", input)))?;

        self.command(input, output_dir).execute()?;

        // texconv names its output after the input stem, flat in output_dir.
        Ok(output_dir.join(file_name))
    }
}
