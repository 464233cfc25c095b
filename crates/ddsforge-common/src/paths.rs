//! Path utilities for detecting input images and naming DDS outputs.
//!
//! The batch walker uses [`is_png_file`] to pick candidates, and both the
//! encoder and the relocator use [`dds_file_name`] so they agree on what a
//! staged or final output is called.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Extensions accepted as encoder input (compared case-insensitively).
const INPUT_EXTENSIONS: &[&str] = &["png"];

/// Extension the encoder writes.
pub const DDS_EXTENSION: &str = "dds";

/// Check if a path has a PNG extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ddsforge_common::paths::is_png_file;
///
/// assert!(is_png_file(Path::new("atlas.png")));
/// assert!(is_png_file(Path::new("/textures/ui/ICON.PNG")));
/// assert!(!is_png_file(Path::new("notes.txt")));
/// ```
pub fn is_png_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| INPUT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// File name of the DDS produced for `source`: its stem plus `.dds`.
///
/// Returns `None` when the path has no file name.
///
/// ```
/// use std::path::Path;
/// use ddsforge_common::paths::dds_file_name;
///
/// assert_eq!(dds_file_name(Path::new("a/b/y.PNG")).unwrap(), "y.dds");
/// ```
pub fn dds_file_name(source: &Path) -> Option<OsString> {
    let mut name = source.file_stem()?.to_os_string();
    name.push(".");
    name.push(DDS_EXTENSION);
    Some(name)
}

/// Absolute form of `path`, for comparing directories that may not exist yet.
///
/// Relative paths are joined onto the working directory and `.`/`..` are
/// folded away. The longest existing prefix is canonicalized so symlinked
/// parents compare equal to their targets.
pub fn resolve_path(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = normalize(&std::env::current_dir()?.join(path));

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(mut resolved) = existing.canonicalize() {
            resolved.extend(missing.iter().rev());
            return Ok(resolved);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }
    Ok(absolute)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
