//! Subcommand lifecycle events and the sink they are emitted into.
//!
//! Every matched or defaulted dispatch emits `Run` exactly once, followed by
//! exactly one of `Success`, `Denied`, `Error` or `HandlerMissing`.
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::invocation::{InteractionRef, InvocationShape, MessageRef, RunContext};
use crate::precondition::Denial;

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A handler was selected and is about to run.
    Run,
    /// The handler completed.
    Success,
    /// A precondition refused the invocation.
    Denied,
    /// The handler (or a precondition) failed.
    Error,
    /// The entry has no handler for this invocation shape.
    HandlerMissing,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_else(|| format!("{:?}", self));
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The invocation an event refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum InvocationSource {
    Message(MessageRef),
    ChatInput(InteractionRef),
}

/// Shared by every event of one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcommandPayload {
    pub invocation_id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Name of the command owning the mapping.
    pub command: String,
    /// Name of the entry that was selected.
    pub subcommand: String,
    pub group: Option<String>,
    pub source: InvocationSource,
    pub context: RunContext,
}

impl SubcommandPayload {
    pub fn new(
        command: impl Into<String>,
        subcommand: impl Into<String>,
        group: Option<String>,
        source: InvocationSource,
        context: RunContext,
    ) -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            command: command.into(),
            subcommand: subcommand.into(),
            group,
            source,
            context,
        }
    }

    pub fn shape(&self) -> InvocationShape {
        match self.source {
            InvocationSource::Message(_) => InvocationShape::Message,
            InvocationSource::ChatInput(_) => InvocationShape::ChatInput,
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum SubcommandEvent {
    Run(SubcommandPayload),
    Success {
        payload: SubcommandPayload,
        result: Value,
        duration_ms: f64,
    },
    Denied {
        payload: SubcommandPayload,
        denial: Denial,
        /// Prefix-less text after the command name, for message invocations.
        parameters: Option<String>,
    },
    Error {
        payload: SubcommandPayload,
        /// The handler failure, unwrapped.
        error: Arc<anyhow::Error>,
        duration_ms: f64,
    },
    HandlerMissing(SubcommandPayload),
}

impl SubcommandEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Run(_) => EventKind::Run,
            Self::Success { .. } => EventKind::Success,
            Self::Denied { .. } => EventKind::Denied,
            Self::Error { .. } => EventKind::Error,
            Self::HandlerMissing(_) => EventKind::HandlerMissing,
        }
    }

    pub fn payload(&self) -> &SubcommandPayload {
        match self {
            Self::Run(payload) | Self::HandlerMissing(payload) => payload,
            Self::Success { payload, .. }
            | Self::Denied { payload, .. }
            | Self::Error { payload, .. } => payload,
        }
    }

    /// True for every kind except `Run`.
    pub fn is_terminal(&self) -> bool {
        self.kind() != EventKind::Run
    }

    /// Shape-qualified event name.
    pub fn name(&self) -> &'static str {
        use EventKind::*;
        use InvocationShape::*;
        match (self.payload().shape(), self.kind()) {
            (Message, Run) => "message_subcommand_run",
            (Message, Success) => "message_subcommand_success",
            (Message, Denied) => "message_subcommand_denied",
            (Message, Error) => "message_subcommand_error",
            (Message, HandlerMissing) => "subcommand_mapping_is_missing_message_handler",
            (ChatInput, Run) => "chat_input_subcommand_run",
            (ChatInput, Success) => "chat_input_subcommand_success",
            (ChatInput, Denied) => "chat_input_subcommand_denied",
            (ChatInput, Error) => "chat_input_subcommand_error",
            (ChatInput, HandlerMissing) => "subcommand_mapping_is_missing_chat_input_handler",
        }
    }
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Destination for emitted events. Injected into whatever emits them.
#[async_trait]
pub trait EventSink<E>: Send + Sync
where
    E: Send + 'static,
{
    async fn emit(&self, event: E);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

#[async_trait]
impl<E: Send + 'static> EventSink<E> for NullSink {
    async fn emit(&self, _event: E) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(source: InvocationSource) -> SubcommandPayload {
        SubcommandPayload::new("config", "add", Some("modroles".into()), source, RunContext::default())
    }

    #[test]
    fn test_event_kind_display() {
        assert_eq!(EventKind::Run.to_string(), "run");
        assert_eq!(EventKind::HandlerMissing.to_string(), "handler_missing");
    }

    #[test]
    fn names_are_shape_qualified() {
        let msg = payload(InvocationSource::Message(MessageRef::default()));
        let chat = payload(InvocationSource::ChatInput(InteractionRef::default()));
        assert_eq!(SubcommandEvent::Run(msg.clone()).name(), "message_subcommand_run");
        assert_eq!(
            SubcommandEvent::HandlerMissing(chat.clone()).name(),
            "subcommand_mapping_is_missing_chat_input_handler"
        );
        let err = SubcommandEvent::Error {
            payload: chat,
            error: Arc::new(anyhow::anyhow!("x")),
            duration_ms: 0.0,
        };
        assert_eq!(err.name(), "chat_input_subcommand_error");
        assert!(err.is_terminal());
        assert!(!SubcommandEvent::Run(msg).is_terminal());
    }

    #[test]
    fn test_payload_serialization() {
        let p = payload(InvocationSource::Message(MessageRef::new("m1", "u1", "!config")));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["source"]["shape"], "message");
        assert_eq!(json["group"], "modroles");
        let back: SubcommandPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back.shape(), InvocationShape::Message);
    }
}
