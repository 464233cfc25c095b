//! External tool detection.
//!
//! `texconv.exe` ships next to the ddsforge executable rather than on `PATH`,
//! so [`locate_encoder`] looks beside [`std::env::current_exe`]. On anything
//! other than Windows the encoder has to be launched through `wine`, which
//! [`resolve_shim`] finds with [`which::which`].

use ddsforge_common::{Error, Result};
use std::path::{Path, PathBuf};

/// File name of the encoder executable.
pub const ENCODER_EXE: &str = "texconv.exe";

/// Name of the compatibility launcher used off Windows.
pub const WINE: &str = "wine";

/// Environment override that silences wine's own diagnostics.
const WINE_QUIET_ENV: (&str, &str) = ("WINEDEBUG", "-all");

/// A launcher that the encoder invocation is prefixed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shim {
    /// Name of the launcher (e.g. "wine").
    pub name: String,
    /// Resolved path to the launcher executable.
    pub path: PathBuf,
    /// Environment variables set on every wrapped invocation.
    pub env: Vec<(String, String)>,
}

impl Shim {
    /// A wine launcher at `path` with its debug channels turned off.
    pub fn wine(path: impl Into<PathBuf>) -> Self {
        Self {
            name: WINE.to_string(),
            path: path.into(),
            env: vec![(WINE_QUIET_ENV.0.to_string(), WINE_QUIET_ENV.1.to_string())],
        }
    }
}

/// Locate the encoder executable.
///
/// A configured path is used as-is and must exist. Without one, the encoder
/// is expected in the same directory as the running executable.
///
/// # Errors
///
/// Returns [`Error::EncoderNotFound`] if no file exists at the resolved path.
pub fn locate_encoder(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(Error::encoder_not_found(path))
        };
    }

    let exe = std::env::current_exe()?;
    let install_dir = exe
        .parent()
        .ok_or_else(|| Error::InvalidInput(format!("no parent directory for {:?}", exe)))?;
    encoder_in(install_dir)
}

/// Look for [`ENCODER_EXE`] directly inside `dir`.
pub fn encoder_in(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(ENCODER_EXE);
    if path.is_file() {
        tracing::debug!("Found encoder at {:?}", path);
        Ok(path)
    } else {
        Err(Error::encoder_not_found(path))
    }
}

/// Whether the encoder needs a shim on this platform.
///
/// `force` overrides the platform default (Windows runs texconv natively).
pub fn shim_required(force: Option<bool>) -> bool {
    force.unwrap_or(!cfg!(windows))
}

/// Resolve the wine launcher, preferring a configured path over `PATH` lookup.
///
/// # Errors
///
/// Returns [`Error::ShimNotFound`] if wine cannot be found.
pub fn resolve_shim(configured: Option<&Path>) -> Result<Shim> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(Shim::wine(path));
        }
        tracing::warn!("Configured wine path {:?} does not exist, searching PATH", path);
    }

    which::which(WINE)
        .map(Shim::wine)
        .map_err(|_| Error::shim_not_found(WINE))
}
