//! Config validation: structural checks with dotted-path messages.

use std::collections::HashSet;

use crate::schema::{CommandConfig, EntryConfig, MappingConfig, SwitchyardConfig};
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &SwitchyardConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_settings(config, &mut report);

    let mut seen = HashSet::new();
    for (i, command) in config.commands.iter().enumerate() {
        let path = format!("commands[{i}]");
        if !seen.insert(command.name.as_str()) {
            report.warn(&path, format!("Duplicate command '{}'; the last one wins", command.name));
        }
        validate_command(command, &path, &mut report);
    }
    report
}

fn validate_settings(config: &SwitchyardConfig, report: &mut ValidationReport) {
    let Some(settings) = &config.settings else { return };
    if settings.event_buffer == Some(0) {
        report.error("settings.eventBuffer", "eventBuffer must be > 0");
    }
    if let Some(prefix) = &settings.prefix {
        if prefix.trim().is_empty() {
            report.error("settings.prefix", "Prefix cannot be empty");
        }
    }
}

fn validate_command(command: &CommandConfig, path: &str, report: &mut ValidationReport) {
    if command.name.trim().is_empty() {
        report.error(format!("{path}.name"), "Command name cannot be empty");
    }
    if command.subcommands.is_empty() {
        report.warn(format!("{path}.subcommands"), "Command has no subcommands; every invocation will fail to match");
    }

    let top: Vec<(usize, &EntryConfig)> = command
        .subcommands
        .iter()
        .enumerate()
        .filter_map(|(i, m)| match m {
            MappingConfig::Entry(e) => Some((i, e)),
            MappingConfig::Group(_) => None,
        })
        .collect();
    validate_scope(&top, &format!("{path}.subcommands"), report);

    for (i, mapping) in command.subcommands.iter().enumerate() {
        let MappingConfig::Group(group) = mapping else { continue };
        let group_path = format!("{path}.subcommands[{i}]");
        if group.group.trim().is_empty() {
            report.error(format!("{group_path}.group"), "Group name cannot be empty");
        }
        if group.entries.is_empty() {
            report.warn(&group_path, "Group has no entries");
        }
        if group.entries.iter().any(|e| e.is_default) {
            report.warn(
                &group_path,
                "Group defaults are only reachable from message invocations with a second token",
            );
        }
        let entries: Vec<(usize, &EntryConfig)> = group.entries.iter().enumerate().collect();
        validate_scope(&entries, &format!("{group_path}.entries"), report);
    }
}

/// Checks shared by the top level and each group.
fn validate_scope(entries: &[(usize, &EntryConfig)], path: &str, report: &mut ValidationReport) {
    let mut names = HashSet::new();
    let mut defaults = 0;

    for (i, entry) in entries {
        let entry_path = format!("{path}[{i}]");
        if entry.name.trim().is_empty() {
            report.error(format!("{entry_path}.name"), "Subcommand name cannot be empty");
        }
        if entry.delegate.is_some() && entry.has_handlers() {
            report.error(&entry_path, "An entry cannot both delegate and declare message/chatInput methods");
        }
        if entry.delegate.is_none() && !entry.has_handlers() {
            report.warn(&entry_path, "Entry has no handler; every invocation will report a missing handler");
        }
        if !names.insert(entry.name.as_str()) {
            report.warn(&entry_path, format!("Duplicate name '{}'; only the first can match", entry.name));
        }
        if entry.is_default {
            defaults += 1;
        }
    }

    if defaults > 1 {
        report.warn(path, format!("{defaults} default entries; the last one wins"));
    }
}
