//! `switchyard-config`: declarative subcommand configuration.
//!
//! Provides:
//! - Typed schema for commands, entries and groups
//! - YAML / TOML / JSON loading chosen by file extension
//! - `${ENV_VAR}` substitution
//! - Default value application
//! - Structural validation with dotted paths

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use schema::{CommandConfig, EntryConfig, GroupConfig, MappingConfig, SettingsConfig, SwitchyardConfig};
pub use io::{config_dir, config_file_path, load_config, load_raw, ConfigFormat};
pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use defaults::apply_all_defaults;
pub use validation::{validate, ValidationReport, ConfigValidationError};

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Load, substitute env vars, apply defaults and validate a config file.
///
/// Warnings are logged; any validation error fails the load.
pub async fn load_and_prepare(path: &Path) -> Result<SwitchyardConfig> {
    let config = match load_raw(path).await? {
        Some(value) => {
            let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;
            serde_json::from_value(value)
                .with_context(|| format!("Invalid config structure at: {}", path.display()))?
        }
        None => SwitchyardConfig::default(),
    };
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if let Some(first) = report.errors.first() {
        bail!("{} ({} error(s) in {})", first, report.errors.len(), path.display());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn prepares_defaults_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_and_prepare(&dir.path().join("switchyard.yaml")).await.unwrap();
        assert_eq!(config.settings().prefix.as_deref(), Some("!"));
        assert!(config.commands.is_empty());
    }

    #[tokio::test]
    async fn rejects_invalid_config() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"commands:\n  - name: config\n    subcommands:\n      - { name: '', message: m }\n")
            .unwrap();
        let err = load_and_prepare(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Subcommand name cannot be empty"));
    }
}
