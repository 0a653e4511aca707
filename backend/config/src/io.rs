//! Config file loading. The format follows the file extension.

use crate::schema::SwitchyardConfig;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "switchyard.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the extension; `None` for anything unrecognised.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Parse into a generic JSON value so later stages are format-agnostic.
    pub fn parse_value(self, raw: &str) -> Result<Value> {
        Ok(match self {
            Self::Yaml => serde_yaml::from_str(raw)?,
            Self::Toml => toml::from_str(raw)?,
            Self::Json => serde_json::from_str(raw)?,
        })
    }
}

/// Resolve the config directory.
/// Priority: `SWITCHYARD_CONFIG_DIR` env > `~/.switchyard/` > `./.switchyard`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SWITCHYARD_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".switchyard"))
        .unwrap_or_else(|| PathBuf::from(".switchyard"))
}

pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Read a config file into a raw JSON value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub async fn load_raw(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(None);
    }
    let Some(format) = ConfigFormat::from_path(path) else {
        bail!("Unsupported config file extension: {}", path.display());
    };

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let value = format
        .parse_value(&raw)
        .with_context(|| format!("Failed to parse {:?} config at: {}", format, path.display()))?;
    Ok(Some(value))
}

/// Load and deserialize the config without env substitution or defaults.
pub async fn load_config(path: &Path) -> Result<SwitchyardConfig> {
    let Some(value) = load_raw(path).await? else {
        return Ok(SwitchyardConfig::default());
    };
    let config: SwitchyardConfig = serde_json::from_value(value)
        .with_context(|| format!("Invalid config structure at: {}", path.display()))?;
    info!(path = %path.display(), commands = config.commands.len(), "Loaded config");
    Ok(config)
}
