mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    expand_paths(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./docforge.toml",
        "~/.config/docforge/config.toml",
        "/etc/docforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

fn expand_paths(config: &mut Config) {
    config.converter.soffice_path = shellexpand::tilde(&config.converter.soffice_path).into_owned();

    if let Some(dir) = config.output.directory.take() {
        let expanded = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
        config.output.directory = Some(PathBuf::from(expanded));
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.batch.concurrency_limit == 0 {
        anyhow::bail!("batch.concurrency_limit must be at least 1");
    }

    if config.converter.soffice_path.trim().is_empty() {
        anyhow::bail!("converter.soffice_path cannot be empty");
    }

    if let Some(ref dir) = config.output.directory {
        if !dir.exists() {
            tracing::warn!("Output directory does not exist yet: {:?}", dir);
        }
    }

    Ok(())
}
