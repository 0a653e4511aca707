//! Pattern command lifecycle events.
//!
//! A matched message produces either `NoLuck`, or `Run` followed by
//! `Success` or `Error` and always `Finished`.
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use switchyard_core::MessageRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternEventKind {
    NoLuck,
    Run,
    Success,
    Error,
    Finished,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternPayload {
    pub invocation_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub command: String,
    /// The word that triggered the command: its name or one of its aliases.
    pub alias: String,
    pub message: MessageRef,
}

impl PatternPayload {
    pub fn new(command: impl Into<String>, alias: impl Into<String>, message: MessageRef) -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            command: command.into(),
            alias: alias.into(),
            message,
        }
    }
}

#[derive(Debug, Clone)]
pub enum PatternEvent {
    /// Matched, but the chance roll failed.
    NoLuck { payload: PatternPayload, roll: u8 },
    Run(PatternPayload),
    Success {
        payload: PatternPayload,
        result: Value,
        duration_ms: f64,
    },
    Error {
        payload: PatternPayload,
        error: Arc<anyhow::Error>,
        duration_ms: f64,
    },
    Finished {
        payload: PatternPayload,
        success: bool,
        duration_ms: f64,
    },
}

impl PatternEvent {
    pub fn kind(&self) -> PatternEventKind {
        match self {
            Self::NoLuck { .. } => PatternEventKind::NoLuck,
            Self::Run(_) => PatternEventKind::Run,
            Self::Success { .. } => PatternEventKind::Success,
            Self::Error { .. } => PatternEventKind::Error,
            Self::Finished { .. } => PatternEventKind::Finished,
        }
    }

    pub fn payload(&self) -> &PatternPayload {
        match self {
            Self::Run(payload) => payload,
            Self::NoLuck { payload, .. }
            | Self::Success { payload, .. }
            | Self::Error { payload, .. }
            | Self::Finished { payload, .. } => payload,
        }
    }

    pub fn name(&self) -> &'static str {
        match self.kind() {
            PatternEventKind::NoLuck => "pattern_command_no_luck",
            PatternEventKind::Run => "pattern_command_run",
            PatternEventKind::Success => "pattern_command_success",
            PatternEventKind::Error => "pattern_command_error",
            PatternEventKind::Finished => "pattern_command_finished",
        }
    }
}
