/// Subcommand dispatch: resolve, commit, run and report exactly once.
///
/// Dispatch-level rejections (no match, misconfigured delegate) are returned
/// as `DispatchError` before any event is emitted. Once an entry is selected
/// the dispatcher emits `Run`, then exactly one terminal event, and never
/// returns a handler failure to the caller.
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use switchyard_core::{
    ArgCursor, Denial, DispatchError, EventSink, Identifier, InteractionRef, InvocationRef,
    InvocationShape, InvocationSource, MessageRef, RunContext, StructuredHandler,
    StructuredInvocation, SubcommandEvent, SubcommandPayload, TextHandler, TextInvocation,
    TokenCursor, Verdict,
};

use crate::detection::parameters_after_command;
use crate::mapping::{Entry, EntryTarget, MappingModel, PreconditionStore};
use crate::registry::{CommandRegistry, RegisteredCommand};
use crate::resolver::{resolve_structured, resolve_text, Resolved, TextResolution};

/// How a dispatch that reached an entry ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    Success,
    Denied,
    Errored,
    HandlerMissing,
}

// ---------------------------------------------------------------------------
// Internal plumbing
// ---------------------------------------------------------------------------

/// The invocation-specific arguments a handler is called with.
enum Call<'a> {
    Message {
        message: &'a MessageRef,
        args: &'a mut ArgCursor,
        context: &'a RunContext,
    },
    ChatInput {
        interaction: &'a InteractionRef,
        context: &'a RunContext,
    },
}

impl Call<'_> {
    fn shape(&self) -> InvocationShape {
        match self {
            Self::Message { .. } => InvocationShape::Message,
            Self::ChatInput { .. } => InvocationShape::ChatInput,
        }
    }

    fn invocation(&self) -> InvocationRef<'_> {
        match self {
            Self::Message { message, .. } => InvocationRef::Message(message),
            Self::ChatInput { interaction, .. } => InvocationRef::ChatInput(interaction),
        }
    }

    fn context(&self) -> &RunContext {
        match self {
            Self::Message { context, .. } | Self::ChatInput { context, .. } => context,
        }
    }

    fn source(&self) -> InvocationSource {
        match self {
            Self::Message { message, .. } => InvocationSource::Message((*message).clone()),
            Self::ChatInput { interaction, .. } => InvocationSource::ChatInput((*interaction).clone()),
        }
    }

    fn parameters(&self) -> Option<String> {
        match self {
            Self::Message { message, context, .. } => Some(parameters_after_command(
                &message.content,
                &context.command_prefix,
            )),
            Self::ChatInput { .. } => None,
        }
    }
}

/// What an entry will run, settled before the run event.
enum Selected {
    Text(Option<Arc<dyn TextHandler>>),
    Structured(Option<Arc<dyn StructuredHandler>>),
    Delegate(Arc<dyn RegisteredCommand>),
}

enum Step {
    Completed(Value),
    Denied(Denial),
    Missing,
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub struct Dispatcher {
    sink: Arc<dyn EventSink<SubcommandEvent>>,
    registry: CommandRegistry,
    preconditions: PreconditionStore,
}

impl Dispatcher {
    pub fn new(sink: Arc<dyn EventSink<SubcommandEvent>>) -> Self {
        Self {
            sink,
            registry: CommandRegistry::new(),
            preconditions: PreconditionStore::new(),
        }
    }

    /// Registry used to look up delegate targets.
    pub fn with_registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Store whose global preconditions guard delegated commands.
    pub fn with_preconditions(mut self, store: PreconditionStore) -> Self {
        self.preconditions = store;
        self
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Dispatch a message invocation. On a match the cursor is left after the
    /// subcommand tokens (plus whatever the handler consumed); on no match it
    /// is left where it started.
    pub async fn dispatch_message(
        &self,
        command: &str,
        model: &MappingModel,
        invocation: &mut TextInvocation,
    ) -> Result<DispatchOutcome, DispatchError> {
        let resolution = resolve_text(model, &mut invocation.args);
        let consumed = resolution.consumed();
        let resolved = match resolution {
            TextResolution::NoMatch {
                group_or_name,
                name,
            } => {
                debug!("[Dispatch] {} no match for {:?} {:?}", command, group_or_name, name);
                return Err(DispatchError::NoMatch {
                    identifier: Identifier::MessageSubcommandNoMatch,
                    command: command.to_string(),
                    group_or_name,
                    name,
                });
            }
            TextResolution::Matched { resolved, .. } | TextResolution::Default { resolved, .. } => {
                resolved
            }
        };

        for _ in 0..consumed {
            invocation.args.consume_next();
        }

        let TextInvocation {
            message,
            args,
            context,
        } = invocation;
        let call = Call::Message {
            message,
            args,
            context,
        };
        self.execute(command, resolved, call).await
    }

    /// Dispatch a chat-input invocation.
    pub async fn dispatch_chat_input(
        &self,
        command: &str,
        model: &MappingModel,
        invocation: &StructuredInvocation,
    ) -> Result<DispatchOutcome, DispatchError> {
        let Some(resolved) = resolve_structured(
            model,
            invocation.subcommand.as_deref(),
            invocation.group.as_deref(),
        ) else {
            debug!(
                "[Dispatch] {} no match for group={:?} subcommand={:?}",
                command, invocation.group, invocation.subcommand
            );
            return Err(DispatchError::NoMatch {
                identifier: Identifier::ChatInputSubcommandNoMatch,
                command: command.to_string(),
                group_or_name: invocation.group.clone(),
                name: invocation.subcommand.clone(),
            });
        };

        let call = Call::ChatInput {
            interaction: &invocation.interaction,
            context: &invocation.context,
        };
        self.execute(command, resolved, call).await
    }

    async fn execute(
        &self,
        command: &str,
        resolved: Resolved<'_>,
        call: Call<'_>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let entry = resolved.entry;
        let selected = self.select(command, entry, call.shape()).await?;

        let payload = SubcommandPayload::new(
            command,
            entry.name.as_str(),
            resolved.group.map(str::to_string),
            call.source(),
            call.context().clone(),
        );
        info!(
            "[Dispatch] {} → {}{} ({})",
            command,
            resolved.group.map(|g| format!("{g} ")).unwrap_or_default(),
            entry.name,
            call.shape()
        );
        self.sink.emit(SubcommandEvent::Run(payload.clone())).await;

        let parameters = call.parameters();
        let started = Instant::now();
        let step = self.run_selected(command, entry, selected, call).await;
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        let (event, outcome) = match step {
            Ok(Step::Completed(result)) => (
                SubcommandEvent::Success {
                    payload,
                    result,
                    duration_ms,
                },
                DispatchOutcome::Success,
            ),
            Ok(Step::Denied(denial)) => {
                warn!(
                    "[Dispatch] {} {} denied by {}: {}",
                    command, entry.name, denial.precondition, denial.reason
                );
                (
                    SubcommandEvent::Denied {
                        payload,
                        denial,
                        parameters,
                    },
                    DispatchOutcome::Denied,
                )
            }
            Ok(Step::Missing) => {
                warn!(
                    "[Dispatch] {} {} has no handler for this invocation shape",
                    command, entry.name
                );
                (SubcommandEvent::HandlerMissing(payload), DispatchOutcome::HandlerMissing)
            }
            Err(error) => {
                warn!("[Dispatch] {} {} failed: {:#}", command, entry.name, error);
                (
                    SubcommandEvent::Error {
                        payload,
                        error: Arc::new(error),
                        duration_ms,
                    },
                    DispatchOutcome::Errored,
                )
            }
        };
        self.sink.emit(event).await;
        Ok(outcome)
    }

    /// Pick the handler for this shape, looking up delegates in the registry.
    async fn select(
        &self,
        command: &str,
        entry: &Entry,
        shape: InvocationShape,
    ) -> Result<Selected, DispatchError> {
        match &entry.target {
            EntryTarget::Handlers { text, structured } => Ok(match shape {
                InvocationShape::Message => Selected::Text(text.clone()),
                InvocationShape::ChatInput => Selected::Structured(structured.clone()),
            }),
            EntryTarget::Delegate { command: target } => {
                let Some(delegate) = self.registry.get(target).await else {
                    warn!("[Dispatch] {} {} delegates to unknown command {}", command, entry.name, target);
                    return Err(DispatchError::DelegateNotFound {
                        command: command.to_string(),
                        subcommand: entry.name.clone(),
                        target: target.clone(),
                    });
                };
                if !delegate.supports(shape) {
                    warn!("[Dispatch] {} does not support {} invocations", target, shape);
                    return Err(DispatchError::DelegateUnsupported {
                        command: command.to_string(),
                        subcommand: entry.name.clone(),
                        target: target.clone(),
                        shape,
                    });
                }
                Ok(Selected::Delegate(delegate))
            }
        }
    }

    async fn run_selected(
        &self,
        command: &str,
        entry: &Entry,
        selected: Selected,
        call: Call<'_>,
    ) -> Result<Step> {
        if matches!(selected, Selected::Text(None) | Selected::Structured(None)) {
            return Ok(Step::Missing);
        }

        let verdict = entry
            .preconditions
            .run(command, call.invocation(), call.context())
            .await?;
        if let Verdict::Deny(denial) = verdict {
            return Ok(Step::Denied(denial));
        }

        let value = match (selected, call) {
            (Selected::Text(Some(handler)), Call::Message { message, args, context }) => {
                handler.run(message, args, context).await?
            }
            (Selected::Structured(Some(handler)), Call::ChatInput { interaction, context }) => {
                handler.run(interaction, context).await?
            }
            (Selected::Delegate(delegate), call) => {
                let target = delegate.name().to_string();
                let global = self.preconditions.global();
                if let Verdict::Deny(denial) = global.run(&target, call.invocation(), call.context()).await? {
                    return Ok(Step::Denied(denial));
                }
                let local = delegate.preconditions();
                if let Verdict::Deny(denial) = local.run(&target, call.invocation(), call.context()).await? {
                    return Ok(Step::Denied(denial));
                }
                debug!("[Dispatch] {} {} delegating to {}", command, entry.name, target);
                match call {
                    Call::Message { message, args, context } => {
                        delegate.message_run(message, args, context).await?
                    }
                    Call::ChatInput { interaction, context } => {
                        delegate.chat_input_run(interaction, context).await?
                    }
                }
            }
            _ => return Ok(Step::Missing),
        };
        Ok(Step::Completed(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{EntryDecl, MappingBuilder, MethodTable};
    use async_trait::async_trait;
    use serde_json::json;
    use switchyard_core::{
        structured_fn, text_fn, EventKind, GuildOnly, Precondition, PreconditionSet, UserAllowList,
    };
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<SubcommandEvent>>,
    }

    #[async_trait]
    impl EventSink<SubcommandEvent> for Recorder {
        async fn emit(&self, event: SubcommandEvent) {
            self.events.lock().await.push(event);
        }
    }

    impl Recorder {
        async fn kinds(&self) -> Vec<EventKind> {
            self.events.lock().await.iter().map(|e| e.kind()).collect()
        }
    }

    /// Consumes one more token and echoes it.
    struct TakeOne;

    #[async_trait]
    impl TextHandler for TakeOne {
        async fn run(&self, _: &MessageRef, args: &mut ArgCursor, _: &RunContext) -> Result<Value> {
            Ok(json!({ "took": args.consume_next() }))
        }
    }

    /// A precondition whose lookup always fails.
    struct Unreachable;

    #[async_trait]
    impl Precondition for Unreachable {
        fn name(&self) -> &str {
            "unreachable"
        }

        async fn check(&self, _: &str, _: InvocationRef<'_>, _: &RunContext) -> Result<Verdict> {
            anyhow::bail!("permission lookup failed")
        }
    }

    struct Ping {
        preconditions: PreconditionSet,
    }

    #[async_trait]
    impl RegisteredCommand for Ping {
        fn name(&self) -> &str {
            "ping"
        }

        fn supports(&self, shape: InvocationShape) -> bool {
            shape == InvocationShape::Message
        }

        fn preconditions(&self) -> PreconditionSet {
            self.preconditions.clone()
        }

        async fn message_run(&self, _: &MessageRef, args: &mut ArgCursor, _: &RunContext) -> Result<Value> {
            Ok(json!({ "pong": args.rest() }))
        }
    }

    fn methods() -> MethodTable {
        MethodTable::new()
            .text("take", Arc::new(TakeOne))
            .text("fail", text_fn(|_, _, _| async { Err::<Value, _>(anyhow::anyhow!("boom")) }))
            .structured("show", structured_fn(|i, _| async move { Ok(json!({ "user": i.user_id })) }))
    }

    fn model() -> MappingModel {
        MappingBuilder::new(methods())
            .entry(EntryDecl::new("show").text_method("take").structured_method("show").default_entry())
            .entry(EntryDecl::new("fail").text_method("fail"))
            .entry(EntryDecl::new("slash").structured_method("show"))
            .entry(EntryDecl::new("guarded").text_method("take").precondition(Arc::new(GuildOnly)))
            .entry(EntryDecl::new("ping").delegate("ping"))
            .entry(EntryDecl::new("ghost").delegate("ghost"))
            .entry(EntryDecl::new("broken").text_method("take").precondition(Arc::new(Unreachable)))
            .group("modroles", vec![EntryDecl::new("add").text_method("take").structured_method("show")])
            .build()
            .unwrap()
    }

    fn text(args: &str) -> TextInvocation {
        TextInvocation::new(
            MessageRef::new("m1", "u1", format!("!config {args}")),
            ArgCursor::parse(args),
            RunContext::new("config", "c1").with_prefix("!"),
        )
    }

    fn chat(subcommand: &str) -> StructuredInvocation {
        StructuredInvocation::new(InteractionRef::new("i1", "u9", "config"), RunContext::new("config", "c1"))
            .subcommand(subcommand)
    }

    fn dispatcher(recorder: &Arc<Recorder>) -> Dispatcher {
        Dispatcher::new(recorder.clone())
    }

    #[tokio::test]
    async fn group_match_commits_two_tokens_then_handler_reads_rest() {
        let recorder = Arc::new(Recorder::default());
        let mut inv = text("modroles add role extra");
        let outcome = dispatcher(&recorder)
            .dispatch_message("config", &model(), &mut inv)
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Success);
        assert_eq!(inv.args.position(), 3);
        assert_eq!(recorder.kinds().await, vec![EventKind::Run, EventKind::Success]);

        let events = recorder.events.lock().await;
        let SubcommandEvent::Success { payload, result, .. } = &events[1] else {
            panic!("expected success");
        };
        assert_eq!(payload.subcommand, "add");
        assert_eq!(payload.group.as_deref(), Some("modroles"));
        assert_eq!(result, &json!({ "took": "role" }));
        assert_eq!(events[0].payload().invocation_id, payload.invocation_id);
    }

    #[tokio::test]
    async fn default_consumes_peeked_tokens() {
        let recorder = Arc::new(Recorder::default());
        let mut inv = text("unknown more last");
        dispatcher(&recorder)
            .dispatch_message("config", &model(), &mut inv)
            .await
            .unwrap();
        let events = recorder.events.lock().await;
        let SubcommandEvent::Success { payload, result, .. } = &events[1] else {
            panic!("expected success");
        };
        assert_eq!(payload.subcommand, "show");
        assert_eq!(result, &json!({ "took": "last" }));
    }

    #[tokio::test]
    async fn no_match_returns_error_without_events() {
        let recorder = Arc::new(Recorder::default());
        let model = MappingBuilder::new(methods())
            .entry(EntryDecl::new("fail").text_method("fail"))
            .build()
            .unwrap();
        let mut inv = text("bogus");
        let err = dispatcher(&recorder)
            .dispatch_message("config", &model, &mut inv)
            .await
            .unwrap_err();
        assert_eq!(err.identifier(), Identifier::MessageSubcommandNoMatch);
        assert_eq!(inv.args.position(), 0);
        assert!(recorder.kinds().await.is_empty());
    }

    #[tokio::test]
    async fn missing_handler_for_shape() {
        let recorder = Arc::new(Recorder::default());
        let mut inv = text("slash");
        let outcome = dispatcher(&recorder)
            .dispatch_message("config", &model(), &mut inv)
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::HandlerMissing);
        assert_eq!(recorder.kinds().await, vec![EventKind::Run, EventKind::HandlerMissing]);
        let events = recorder.events.lock().await;
        assert_eq!(events[1].name(), "subcommand_mapping_is_missing_message_handler");
    }

    #[tokio::test]
    async fn handler_failure_becomes_error_event() {
        let recorder = Arc::new(Recorder::default());
        let mut inv = text("fail");
        let outcome = dispatcher(&recorder)
            .dispatch_message("config", &model(), &mut inv)
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Errored);
        let events = recorder.events.lock().await;
        let SubcommandEvent::Error { error, .. } = &events[1] else {
            panic!("expected error");
        };
        assert_eq!(error.to_string(), "boom");
    }

    #[tokio::test]
    async fn entry_precondition_denies_with_parameters() {
        let recorder = Arc::new(Recorder::default());
        let mut inv = text("guarded a b");
        let outcome = dispatcher(&recorder)
            .dispatch_message("config", &model(), &mut inv)
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Denied);
        let events = recorder.events.lock().await;
        let SubcommandEvent::Denied { denial, parameters, .. } = &events[1] else {
            panic!("expected denial");
        };
        assert_eq!(denial.precondition, "guild_only");
        assert_eq!(parameters.as_deref(), Some("guarded a b"));
    }

    #[tokio::test]
    async fn chat_input_ignores_defaults() {
        let recorder = Arc::new(Recorder::default());
        let err = dispatcher(&recorder)
            .dispatch_chat_input("config", &model(), &chat("nope"))
            .await
            .unwrap_err();
        assert_eq!(err.identifier(), Identifier::ChatInputSubcommandNoMatch);
        assert!(recorder.kinds().await.is_empty());
    }

    #[tokio::test]
    async fn chat_input_group_match() {
        let recorder = Arc::new(Recorder::default());
        let inv = chat("add").group("modroles");
        let outcome = dispatcher(&recorder)
            .dispatch_chat_input("config", &model(), &inv)
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Success);
        let events = recorder.events.lock().await;
        assert_eq!(events[0].name(), "chat_input_subcommand_run");
        let SubcommandEvent::Success { result, .. } = &events[1] else {
            panic!("expected success");
        };
        assert_eq!(result, &json!({ "user": "u9" }));
    }

    #[tokio::test]
    async fn delegate_runs_registered_command() {
        let recorder = Arc::new(Recorder::default());
        let registry = CommandRegistry::new();
        registry
            .register(Arc::new(Ping { preconditions: PreconditionSet::new() }))
            .await;
        let dispatcher = dispatcher(&recorder).with_registry(registry);
        let mut inv = text("ping now");
        let outcome = dispatcher.dispatch_message("config", &model(), &mut inv).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Success);
        let events = recorder.events.lock().await;
        let SubcommandEvent::Success { result, .. } = &events[1] else {
            panic!("expected success");
        };
        assert_eq!(result, &json!({ "pong": "now" }));
    }

    #[tokio::test]
    async fn delegate_preconditions_run_global_first() {
        let recorder = Arc::new(Recorder::default());
        let registry = CommandRegistry::new();
        registry
            .register(Arc::new(Ping {
                preconditions: PreconditionSet::new().with(Arc::new(GuildOnly)),
            }))
            .await;
        let store = PreconditionStore::new()
            .register_global(Arc::new(UserAllowList::new("owners", vec!["u2".into()])));
        let dispatcher = dispatcher(&recorder).with_registry(registry).with_preconditions(store);
        let mut inv = text("ping");
        let outcome = dispatcher.dispatch_message("config", &model(), &mut inv).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Denied);
        let events = recorder.events.lock().await;
        let SubcommandEvent::Denied { denial, .. } = &events[1] else {
            panic!("expected denial");
        };
        assert_eq!(denial.precondition, "owners");
    }

    async fn dispatch_to_ping(recorder: &Arc<Recorder>, own: PreconditionSet) -> DispatchOutcome {
        let registry = CommandRegistry::new();
        registry.register(Arc::new(Ping { preconditions: own })).await;
        let store = PreconditionStore::new()
            .register_global(Arc::new(UserAllowList::new("owners", vec!["u1".into()])));
        let dispatcher = dispatcher(recorder).with_registry(registry).with_preconditions(store);
        let mut inv = text("ping now");
        dispatcher.dispatch_message("config", &model(), &mut inv).await.unwrap()
    }

    #[tokio::test]
    async fn delegate_own_precondition_denies_after_global_allows() {
        let recorder = Arc::new(Recorder::default());
        let own = PreconditionSet::new().with(Arc::new(GuildOnly));
        assert_eq!(dispatch_to_ping(&recorder, own).await, DispatchOutcome::Denied);
        assert_eq!(recorder.kinds().await, vec![EventKind::Run, EventKind::Denied]);
        let events = recorder.events.lock().await;
        let SubcommandEvent::Denied { denial, parameters, .. } = &events[1] else {
            panic!("expected denial");
        };
        assert_eq!(denial.precondition, "guild_only");
        assert_eq!(parameters.as_deref(), Some("ping now"));
    }

    #[tokio::test]
    async fn entry_precondition_failure_is_error_not_denial() {
        let recorder = Arc::new(Recorder::default());
        let mut inv = text("broken");
        let outcome = dispatcher(&recorder)
            .dispatch_message("config", &model(), &mut inv)
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Errored);
        assert_eq!(recorder.kinds().await, vec![EventKind::Run, EventKind::Error]);
        let events = recorder.events.lock().await;
        let SubcommandEvent::Error { error, .. } = &events[1] else {
            panic!("expected error");
        };
        assert_eq!(error.to_string(), "permission lookup failed");
    }

    #[tokio::test]
    async fn delegate_precondition_failure_is_error_not_denial() {
        let recorder = Arc::new(Recorder::default());
        let own = PreconditionSet::new().with(Arc::new(Unreachable));
        assert_eq!(dispatch_to_ping(&recorder, own).await, DispatchOutcome::Errored);
        assert_eq!(recorder.kinds().await, vec![EventKind::Run, EventKind::Error]);
        let events = recorder.events.lock().await;
        let SubcommandEvent::Error { error, .. } = &events[1] else {
            panic!("expected error");
        };
        assert_eq!(error.to_string(), "permission lookup failed");
    }

    #[tokio::test]
    async fn unknown_delegate_is_misconfiguration() {
        let recorder = Arc::new(Recorder::default());
        let mut inv = text("ghost");
        let err = dispatcher(&recorder)
            .dispatch_message("config", &model(), &mut inv)
            .await
            .unwrap_err();
        assert!(err.is_misconfiguration());
        assert!(matches!(err, DispatchError::DelegateNotFound { ref target, .. } if target == "ghost"));
        assert!(recorder.kinds().await.is_empty());
    }

    #[tokio::test]
    async fn delegate_without_shape_support_is_rejected() {
        let recorder = Arc::new(Recorder::default());
        let registry = CommandRegistry::new();
        registry
            .register(Arc::new(Ping { preconditions: PreconditionSet::new() }))
            .await;
        let err = dispatcher(&recorder)
            .with_registry(registry)
            .dispatch_chat_input("config", &model(), &chat("ping"))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::DelegateUnsupported { shape: InvocationShape::ChatInput, .. }));
        assert!(recorder.kinds().await.is_empty());
    }
}
