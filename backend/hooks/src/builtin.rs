/// Built-in listener implementations.
use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use switchyard_core::{EventKind, SubcommandEvent};

use crate::registry::Listener;

// ---------------------------------------------------------------------------
// Logging listener: one line per lifecycle event
// ---------------------------------------------------------------------------

pub struct LoggingListener {
    pub prefix: String,
}

impl LoggingListener {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

#[async_trait]
impl Listener for LoggingListener {
    fn name(&self) -> &str { "logging_listener" }

    async fn on_event(&self, event: &SubcommandEvent) -> Result<()> {
        let p = event.payload();
        match event {
            SubcommandEvent::Denied { denial, .. } => warn!(
                "[{}] {} {} {}: {}",
                self.prefix, event.name(), p.command, p.subcommand, denial.reason
            ),
            SubcommandEvent::Error { error, .. } => warn!(
                "[{}] {} {} {}: {:#}",
                self.prefix, event.name(), p.command, p.subcommand, error
            ),
            _ => info!("[{}] {} {} {}", self.prefix, event.name(), p.command, p.subcommand),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Counting listener: tallies events per kind
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct CountingListener {
    counts: Mutex<HashMap<EventKind, u64>>,
}

impl CountingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: EventKind) -> u64 {
        self.counts
            .lock()
            .map(|c| c.get(&kind).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> HashMap<EventKind, u64> {
        self.counts.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Listener for CountingListener {
    fn name(&self) -> &str { "counting_listener" }

    async fn on_event(&self, event: &SubcommandEvent) -> Result<()> {
        let mut counts = self
            .counts
            .lock()
            .map_err(|_| anyhow::anyhow!("counter lock poisoned"))?;
        *counts.entry(event.kind()).or_default() += 1;
        Ok(())
    }
}
