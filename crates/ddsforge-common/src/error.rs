//! Error types for ddsforge.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting textures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The texconv executable could not be found.
    #[error(
        "encoder not found at {}; download texconv.exe from \
         https://github.com/Microsoft/DirectXTex/releases",
        path.display()
    )]
    EncoderNotFound { path: PathBuf },

    /// The compatibility layer needed to run the encoder is not installed.
    #[error("{shim} not found on this system; install {shim} to run texconv.exe")]
    ShimNotFound { shim: String },

    /// The input root is not an existing directory.
    #[error("input folder does not exist: {}", path.display())]
    InputDirMissing { path: PathBuf },

    /// An external tool failed to spawn or exited with a non-zero status.
    #[error("tool execution failed: {tool}: {message}")]
    Tool { tool: String, message: String },

    /// The encoder returned but its output was not where it was expected.
    #[error("staged output not found: {}", path.display())]
    StagedOutputMissing { path: PathBuf },

    /// The staging directory would delete or overwrite user files on cleanup.
    #[error("refusing to use {path:?} as staging directory: {reason}")]
    UnsafeStagingDir { path: PathBuf, reason: String },

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an encoder not found error.
    pub fn encoder_not_found(path: impl Into<PathBuf>) -> Self {
        Self::EncoderNotFound { path: path.into() }
    }

    /// Create a shim not found error.
    pub fn shim_not_found(shim: impl Into<String>) -> Self {
        Self::ShimNotFound { shim: shim.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a staged output missing error.
    pub fn staged_output_missing(path: impl Into<PathBuf>) -> Self {
        Self::StagedOutputMissing { path: path.into() }
    }

    /// Create an unsafe staging directory error.
    pub fn unsafe_staging_dir(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnsafeStagingDir {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_not_found_points_to_releases() {
        let err = Error::encoder_not_found("/opt/tools/texconv.exe");
        let msg = err.to_string();
        assert!(msg.contains("/opt/tools/texconv.exe"));
        assert!(msg.contains("DirectXTex/releases"));
    }

    #[test]
    fn test_shim_not_found_message() {
        let err = Error::shim_not_found("wine");
        assert_eq!(
            err.to_string(),
            "wine not found on this system; install wine to run texconv.exe"
        );
    }

    #[test]
    fn test_unsafe_staging_dir_message() {
        let err = Error::unsafe_staging_dir("assets", "it contains the input folder");
        assert_eq!(
            err.to_string(),
            "refusing to use \"assets\" as staging directory: it contains the input folder"
        );
    }
}
