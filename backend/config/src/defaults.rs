//! Config defaults: applies sensible default values to parsed config.

use crate::schema::{SettingsConfig, SwitchyardConfig};

/// Default log level filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default broadcast bus capacity.
pub const DEFAULT_EVENT_BUFFER: usize = 64;

/// Default message prefix.
pub const DEFAULT_PREFIX: &str = "!";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: SwitchyardConfig) -> SwitchyardConfig {
    apply_settings_defaults(config)
}

fn apply_settings_defaults(mut config: SwitchyardConfig) -> SwitchyardConfig {
    let settings = config.settings.get_or_insert_with(SettingsConfig::default);
    if settings.log_level.is_none() {
        settings.log_level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if settings.event_buffer.is_none() {
        settings.event_buffer = Some(DEFAULT_EVENT_BUFFER);
    }
    if settings.prefix.is_none() {
        settings.prefix = Some(DEFAULT_PREFIX.to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_missing_settings() {
        let config = apply_all_defaults(SwitchyardConfig::default());
        let settings = config.settings();
        assert_eq!(settings.log_level.as_deref(), Some("info"));
        assert_eq!(settings.event_buffer, Some(64));
        assert_eq!(settings.prefix.as_deref(), Some("!"));
        assert!(settings.log_dir.is_none());
    }

    #[test]
    fn keeps_explicit_values() {
        let config = SwitchyardConfig {
            settings: Some(SettingsConfig {
                prefix: Some("?".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(apply_all_defaults(config).settings().prefix.as_deref(), Some("?"));
    }
}
