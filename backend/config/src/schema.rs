//! Switchyard configuration schema.
//!
//! Declarative subcommand mappings, typed for serde YAML/TOML/JSON
//! deserialization. Handler references are always method names; turning them
//! into handlers happens when the declarations are built against a
//! `MethodTable`.

use serde::{Deserialize, Serialize};

use switchyard_commands::{
    EntryDecl, MappingBuilder, MappingDecl, MappingModel, MethodTable, PreconditionStore,
};
use switchyard_core::{MappingError, PreconditionSet};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchyardConfig {
    /// Runtime settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsConfig>,

    /// Subcommand-driven commands
    #[serde(default)]
    pub commands: Vec<CommandConfig>,
}

impl SwitchyardConfig {
    pub fn command(&self, name: &str) -> Option<&CommandConfig> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn settings(&self) -> SettingsConfig {
        self.settings.clone().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsConfig {
    /// Log level filter, e.g. "info" or "switchyard=debug"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Directory for rolling JSON log files; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// Capacity of the broadcast event bus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_buffer: Option<usize>,

    /// Message prefix that starts a command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandConfig {
    pub name: String,

    /// Named preconditions checked when another command delegates here
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preconditions: Vec<String>,

    #[serde(default)]
    pub subcommands: Vec<MappingConfig>,
}

/// Either a group (has `group`) or a plain entry (has `name`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingConfig {
    Group(GroupConfig),
    Entry(EntryConfig),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupConfig {
    pub group: String,
    pub entries: Vec<EntryConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryConfig {
    pub name: String,

    #[serde(default, rename = "default", skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,

    /// Method run for message invocations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Method run for chat-input invocations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_input: Option<String>,

    /// Registered command to run instead of methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preconditions: Vec<String>,
}

impl EntryConfig {
    pub fn has_handlers(&self) -> bool {
        self.message.is_some() || self.chat_input.is_some()
    }

    pub fn to_declaration(&self) -> EntryDecl {
        let mut decl = EntryDecl::new(&self.name);
        if self.is_default {
            decl = decl.default_entry();
        }
        if let Some(method) = &self.message {
            decl = decl.text_method(method);
        }
        if let Some(method) = &self.chat_input {
            decl = decl.structured_method(method);
        }
        if let Some(target) = &self.delegate {
            decl = decl.delegate(target);
        }
        for name in &self.preconditions {
            decl = decl.precondition_named(name);
        }
        decl
    }
}

impl CommandConfig {
    /// Builder declarations in document order.
    pub fn to_declarations(&self) -> Vec<MappingDecl> {
        self.subcommands
            .iter()
            .map(|m| match m {
                MappingConfig::Entry(entry) => MappingDecl::Entry(entry.to_declaration()),
                MappingConfig::Group(group) => MappingDecl::Group {
                    name: group.group.clone(),
                    entries: group.entries.iter().map(EntryConfig::to_declaration).collect(),
                },
            })
            .collect()
    }

    /// Build the mapping model, resolving every named method and precondition.
    pub fn build(&self, methods: MethodTable, store: PreconditionStore) -> Result<MappingModel, MappingError> {
        MappingBuilder::new(methods)
            .preconditions(store)
            .declarations(self.to_declarations())
            .build()
    }

    /// The command's own preconditions, looked up by name.
    pub fn precondition_set(&self, store: &PreconditionStore) -> Result<PreconditionSet, MappingError> {
        self.preconditions
            .iter()
            .map(|name| {
                store.get(name).ok_or_else(|| MappingError::UnknownPrecondition {
                    entry: self.name.clone(),
                    name: name.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use switchyard_core::{text_fn, GuildOnly};
    use std::sync::Arc;

    const YAML: &str = r#"
commands:
  - name: config
    preconditions: [guild_only]
    subcommands:
      - name: language
        default: true
        message: show_language
      - group: modroles
        entries:
          - name: add
            message: add_role
            chatInput: add_role
      - name: ping
        delegate: ping
"#;

    #[test]
    fn parses_entries_and_groups() {
        let config: SwitchyardConfig = serde_yaml::from_str(YAML).unwrap();
        let cmd = config.command("config").unwrap();
        assert_eq!(cmd.subcommands.len(), 3);
        match &cmd.subcommands[0] {
            MappingConfig::Entry(e) => {
                assert_eq!(e.name, "language");
                assert!(e.is_default);
            }
            other => panic!("expected entry, got {other:?}"),
        }
        match &cmd.subcommands[1] {
            MappingConfig::Group(g) => {
                assert_eq!(g.group, "modroles");
                assert_eq!(g.entries[0].chat_input.as_deref(), Some("add_role"));
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn builds_against_method_table() {
        let config: SwitchyardConfig = serde_yaml::from_str(YAML).unwrap();
        let cmd = config.command("config").unwrap();
        let methods = MethodTable::new()
            .text("show_language", text_fn(|_, _, _| async { Ok(json!("en")) }))
            .text("add_role", text_fn(|_, _, _| async { Ok(json!("added")) }));

        let err = cmd.build(methods.clone(), PreconditionStore::new()).unwrap_err();
        assert!(matches!(err, MappingError::UnknownMethod { ref method, .. } if method == "add_role"));

        let methods = methods.structured(
            "add_role",
            switchyard_core::structured_fn(|_, _| async { Ok(json!("added")) }),
        );
        let model = cmd.build(methods, PreconditionStore::new()).unwrap();
        assert_eq!(model.entries().len(), 2);
        assert_eq!(model.groups()[0].entries[0].name, "add");
    }

    #[test]
    fn resolves_command_preconditions() {
        let config: SwitchyardConfig = serde_yaml::from_str(YAML).unwrap();
        let cmd = config.command("config").unwrap();
        assert!(cmd.precondition_set(&PreconditionStore::new()).is_err());
        let store = PreconditionStore::new().register(Arc::new(GuildOnly));
        assert_eq!(cmd.precondition_set(&store).unwrap().names(), vec!["guild_only"]);
    }

    #[test]
    fn parses_toml() {
        let raw = r#"
[settings]
prefix = "?"

[[commands]]
name = "config"

[[commands.subcommands]]
name = "show"
default = true
message = "show"

[[commands.subcommands]]
group = "admin"
entries = [{ name = "kick", chatInput = "kick" }]
"#;
        let config: SwitchyardConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.settings().prefix.as_deref(), Some("?"));
        let cmd = &config.commands[0];
        assert!(matches!(cmd.subcommands[1], MappingConfig::Group(_)));
    }
}
