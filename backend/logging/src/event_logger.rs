//! Subcommand Event Logger
//!
//! An event sink that writes every lifecycle event to `tracing` on the
//! `subcommand_events` target, so the JSON file layer captures them as NDJSON.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use switchyard_core::{EventKind, EventSink, InvocationShape, InvocationSource, SubcommandEvent};

use crate::redact::redact_sensitive_data;

pub const EVENT_TARGET: &str = "subcommand_events";

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventDetail {
    Run,
    Success { duration_ms: f64 },
    Denied { precondition: String, reason: String, parameters: Option<String> },
    Error { error_msg: String, duration_ms: f64 },
    HandlerMissing,
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub invocation_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub name: &'static str,
    pub command: String,
    pub subcommand: String,
    pub group: Option<String>,
    pub shape: InvocationShape,
    /// Message content for text invocations, redacted.
    pub content: Option<String>,
    pub detail: EventDetail,
}

impl EventLogEntry {
    pub fn from_event(event: &SubcommandEvent) -> Self {
        let payload = event.payload();
        let detail = match event {
            SubcommandEvent::Run(_) => EventDetail::Run,
            SubcommandEvent::Success { duration_ms, .. } => EventDetail::Success { duration_ms: *duration_ms },
            SubcommandEvent::Denied { denial, parameters, .. } => EventDetail::Denied {
                precondition: denial.precondition.clone(),
                reason: denial.reason.clone(),
                parameters: parameters.as_deref().map(redact_sensitive_data),
            },
            SubcommandEvent::Error { error, duration_ms, .. } => EventDetail::Error {
                error_msg: redact_sensitive_data(&format!("{error:#}")),
                duration_ms: *duration_ms,
            },
            SubcommandEvent::HandlerMissing(_) => EventDetail::HandlerMissing,
        };
        let content = match &payload.source {
            InvocationSource::Message(message) => Some(redact_sensitive_data(&message.content)),
            InvocationSource::ChatInput(_) => None,
        };

        Self {
            invocation_id: payload.invocation_id,
            timestamp: payload.timestamp,
            name: event.name(),
            command: payload.command.clone(),
            subcommand: payload.subcommand.clone(),
            group: payload.group.clone(),
            shape: payload.shape(),
            content,
            detail,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EventLogger;

impl EventLogger {
    pub fn log_event(event: &SubcommandEvent) {
        let entry = EventLogEntry::from_event(event);
        let json = serde_json::to_string(&entry).unwrap_or_default();
        match event.kind() {
            EventKind::Denied | EventKind::Error | EventKind::HandlerMissing => warn!(
                target: EVENT_TARGET,
                event = entry.name,
                command = %entry.command,
                subcommand = %entry.subcommand,
                invocation_id = %entry.invocation_id,
                entry = %json,
                "Subcommand event"
            ),
            EventKind::Run | EventKind::Success => info!(
                target: EVENT_TARGET,
                event = entry.name,
                command = %entry.command,
                subcommand = %entry.subcommand,
                invocation_id = %entry.invocation_id,
                entry = %json,
                "Subcommand event"
            ),
        }
    }
}

#[async_trait]
impl EventSink<SubcommandEvent> for EventLogger {
    async fn emit(&self, event: SubcommandEvent) {
        Self::log_event(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use switchyard_core::{MessageRef, RunContext, SubcommandPayload};

    fn payload() -> SubcommandPayload {
        SubcommandPayload::new(
            "config",
            "add",
            Some("modroles".into()),
            InvocationSource::Message(MessageRef::new("m1", "u1", "!config modroles add Bearer abc.def")),
            RunContext::default(),
        )
    }

    #[test]
    fn entry_carries_event_fields() {
        let entry = EventLogEntry::from_event(&SubcommandEvent::Error {
            payload: payload(),
            error: Arc::new(anyhow::anyhow!("role missing")),
            duration_ms: 1.5,
        });
        assert_eq!(entry.name, "message_subcommand_error");
        assert_eq!(entry.group.as_deref(), Some("modroles"));
        assert_eq!(entry.content.as_deref(), Some("!config modroles add [REDACTED_TOKEN]"));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["detail"]["type"], "error");
        assert_eq!(json["detail"]["error_msg"], "role missing");
    }

    #[tokio::test]
    async fn sink_logs_without_subscriber() {
        EventLogger.emit(SubcommandEvent::Run(payload())).await;
    }
}
