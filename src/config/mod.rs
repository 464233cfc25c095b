mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = ["./ddsforge.toml", "~/.config/ddsforge/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.staging_dir.as_os_str().is_empty() {
        anyhow::bail!("staging_dir cannot be empty");
    }

    if let Some(ref path) = config.tools.texconv_path {
        if !path.exists() {
            tracing::warn!("Configured texconv path does not exist: {:?}", path);
        }
    }

    if config.tools.use_wine == Some(false) && config.tools.wine_path.is_some() {
        tracing::warn!("wine_path is set but use_wine = false; it will be ignored");
    }

    Ok(())
}
