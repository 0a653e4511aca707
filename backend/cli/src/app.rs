//! Wires configuration, sinks and commands into something the CLI can drive.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use switchyard_commands::{
    detect_invocation, CommandRegistry, DispatchOutcome, Dispatcher, PreconditionStore,
    SubcommandCommand,
};
use switchyard_config::SwitchyardConfig;
use switchyard_core::{
    DispatchError, InteractionRef, MessageRef, RunContext, StructuredInvocation, SubcommandEvent,
    TextInvocation,
};
use switchyard_hooks::{ListenerRegistry, LoggingListener, RecordingSink, SinkPipeline};
use switchyard_logging::EventLogger;
use switchyard_patterns::{PatternEvent, PatternOutcome, PatternRegistry, PatternRunner};

use crate::methods::{method_table, precondition_store, CoffeePattern, PingCommand};

/// Who is talking, and where.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user: String,
    pub channel: String,
    pub guild: Option<String>,
}

#[derive(Debug)]
pub enum MessageResult {
    /// The message did not start with the prefix.
    NotACommand,
    UnknownCommand(String),
    Dispatched(Result<DispatchOutcome, DispatchError>),
}

pub struct App {
    prefix: String,
    commands: BTreeMap<String, Arc<SubcommandCommand>>,
    events: Arc<RecordingSink<SubcommandEvent>>,
    patterns: PatternRunner,
    pattern_events: Arc<RecordingSink<PatternEvent>>,
}

impl App {
    pub async fn build(config: &SwitchyardConfig, owners: Vec<String>) -> Result<Self> {
        let settings = config.settings();
        let prefix = settings.prefix.unwrap_or_else(|| "!".to_string());

        let events = Arc::new(RecordingSink::<SubcommandEvent>::new());
        let listeners = ListenerRegistry::new();
        listeners.register_all(Arc::new(LoggingListener::new("Events"))).await;
        let sink = SinkPipeline::<SubcommandEvent>::new()
            .with(Arc::new(EventLogger))
            .with(Arc::new(listeners))
            .with(events.clone());

        let store: PreconditionStore = precondition_store(owners);
        let registry = CommandRegistry::new();
        registry.register(Arc::new(PingCommand)).await;
        let dispatcher = Arc::new(
            Dispatcher::new(Arc::new(sink))
                .with_registry(registry.clone())
                .with_preconditions(store.clone()),
        );

        let mut commands = BTreeMap::new();
        for command in &config.commands {
            let mapping = command
                .build(method_table(), store.clone())
                .with_context(|| format!("Failed to build command '{}'", command.name))?;
            let preconditions = command
                .precondition_set(&store)
                .with_context(|| format!("Failed to resolve preconditions of '{}'", command.name))?;
            let built = Arc::new(
                SubcommandCommand::new(&command.name, mapping, Arc::clone(&dispatcher))
                    .with_preconditions(preconditions),
            );
            registry.register(built.clone()).await;
            commands.insert(command.name.clone(), built);
        }
        info!("[App] {} command(s) ready, prefix '{}'", commands.len(), prefix);

        let pattern_events = Arc::new(RecordingSink::<PatternEvent>::new());
        let pattern_registry = PatternRegistry::new();
        pattern_registry.register(Arc::new(CoffeePattern::default())).await?;
        let patterns = PatternRunner::new(pattern_registry, pattern_events.clone());

        Ok(Self {
            prefix,
            commands,
            events,
            patterns,
            pattern_events,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn commands(&self) -> impl Iterator<Item = (&String, &Arc<SubcommandCommand>)> {
        self.commands.iter()
    }

    pub async fn handle_message(&self, content: &str, caller: &Caller) -> MessageResult {
        let Some(detected) = detect_invocation(content, &self.prefix) else {
            return MessageResult::NotACommand;
        };
        let Some(command) = self.commands.get(&detected.command_name) else {
            return MessageResult::UnknownCommand(detected.command_name);
        };

        let message = MessageRef::new(uuid::Uuid::new_v4().to_string(), &caller.user, content)
            .in_channel(&caller.channel);
        let mut context = RunContext::new(&detected.command_name, &caller.channel).with_prefix(&self.prefix);
        context.guild_id = caller.guild.clone();

        let mut invocation = TextInvocation::new(message, detected.args, context);
        MessageResult::Dispatched(command.message_run(&mut invocation).await)
    }

    pub async fn handle_interaction(
        &self,
        command_name: &str,
        group: Option<String>,
        subcommand: Option<String>,
        caller: &Caller,
    ) -> Option<Result<DispatchOutcome, DispatchError>> {
        let command = self.commands.get(command_name)?;
        let mut interaction = InteractionRef::new(uuid::Uuid::new_v4().to_string(), &caller.user, command_name);
        interaction.channel_id = caller.channel.clone();
        let mut context = RunContext::new(command_name, &caller.channel);
        context.guild_id = caller.guild.clone();

        let invocation = StructuredInvocation {
            interaction,
            context,
            subcommand,
            group,
        };
        Some(command.chat_input_run(&invocation).await)
    }

    pub async fn handle_pattern(&self, content: &str, caller: &Caller) -> Option<PatternOutcome> {
        let message = MessageRef::new(uuid::Uuid::new_v4().to_string(), &caller.user, content)
            .in_channel(&caller.channel);
        self.patterns.handle_message(&message).await
    }

    pub async fn take_events(&self) -> Vec<SubcommandEvent> {
        self.events.take().await
    }

    pub async fn take_pattern_events(&self) -> Vec<PatternEvent> {
        self.pattern_events.take().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_core::EventKind;

    const CONFIG: &str = r#"
commands:
  - name: config
    subcommands:
      - { name: show, default: true, message: echo, chatInput: echo }
      - { name: boom, message: fail }
      - { name: ping, delegate: ping }
      - group: roles
        entries:
          - { name: list, message: rest, chatInput: echo }
          - { name: add, message: echo, preconditions: [guild_only] }
"#;

    fn caller() -> Caller {
        Caller {
            user: "cli-user".into(),
            channel: "cli".into(),
            guild: None,
        }
    }

    async fn app() -> App {
        let config: SwitchyardConfig = serde_yaml_from(CONFIG);
        App::build(&config, vec!["cli-user".into()]).await.unwrap()
    }

    fn serde_yaml_from(raw: &str) -> SwitchyardConfig {
        let value = switchyard_config::ConfigFormat::Yaml.parse_value(raw).unwrap();
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn message_dispatch_records_events() {
        let app = app().await;
        let result = app.handle_message("!config roles list a b", &caller()).await;
        assert!(matches!(result, MessageResult::Dispatched(Ok(DispatchOutcome::Success))));
        let kinds: Vec<EventKind> = app.take_events().await.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![EventKind::Run, EventKind::Success]);
    }

    #[tokio::test]
    async fn unknown_command_and_plain_text() {
        let app = app().await;
        assert!(matches!(app.handle_message("hello", &caller()).await, MessageResult::NotACommand));
        assert!(matches!(
            app.handle_message("!nope", &caller()).await,
            MessageResult::UnknownCommand(ref name) if name == "nope"
        ));
    }

    #[tokio::test]
    async fn guild_only_denies_outside_guild() {
        let app = app().await;
        let result = app.handle_message("!config roles add x", &caller()).await;
        assert!(matches!(result, MessageResult::Dispatched(Ok(DispatchOutcome::Denied))));
    }

    #[tokio::test]
    async fn delegate_respects_global_owners() {
        let app = app().await;
        let stranger = Caller { user: "someone".into(), ..caller() };
        let result = app.handle_message("!config ping", &stranger).await;
        assert!(matches!(result, MessageResult::Dispatched(Ok(DispatchOutcome::Denied))));
        let result = app.handle_message("!config ping", &caller()).await;
        assert!(matches!(result, MessageResult::Dispatched(Ok(DispatchOutcome::Success))));
    }

    #[tokio::test]
    async fn interaction_without_handler_reports_missing() {
        let app = app().await;
        let outcome = app
            .handle_interaction("config", None, Some("boom".into()), &caller())
            .await
            .unwrap();
        assert_eq!(outcome.unwrap(), DispatchOutcome::HandlerMissing);
        assert!(app.handle_interaction("nope", None, None, &caller()).await.is_none());
    }
}
