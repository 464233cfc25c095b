use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use ddsforge_tools::staging::DEFAULT_STAGING_DIR;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Directory texconv writes into before results are moved into place.
    /// Relative paths resolve against the working directory.
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_staging_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STAGING_DIR)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staging_dir: default_staging_dir(),
            tools: ToolsConfig::default(),
        }
    }
}

/// Paths to external CLI tools.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// texconv.exe location (default: next to the ddsforge executable)
    #[serde(default)]
    pub texconv_path: Option<PathBuf>,

    #[serde(default)]
    pub wine_path: Option<PathBuf>,

    /// Force running texconv through wine on or off (default: off on Windows only)
    #[serde(default)]
    pub use_wine: Option<bool>,
}
