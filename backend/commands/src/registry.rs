/// Registry of commands that subcommand entries can delegate to.
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use switchyard_core::{
    ArgCursor, InteractionRef, InvocationShape, MessageRef, PreconditionSet, RunContext,
};

// ---------------------------------------------------------------------------
// Registered command
// ---------------------------------------------------------------------------

/// A fully registered command that a delegate entry can hand off to.
#[async_trait]
pub trait RegisteredCommand: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this command accepts invocations of the given shape.
    fn supports(&self, shape: InvocationShape) -> bool;

    /// The command's own preconditions, run after the global ones.
    fn preconditions(&self) -> PreconditionSet {
        PreconditionSet::new()
    }

    async fn message_run(&self, _message: &MessageRef, _args: &mut ArgCursor, _context: &RunContext) -> Result<Value> {
        bail!("command `{}` does not support message invocations", self.name())
    }

    async fn chat_input_run(&self, _interaction: &InteractionRef, _context: &RunContext) -> Result<Value> {
        bail!("command `{}` does not support chat input invocations", self.name())
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

type CommandMap = HashMap<String, Arc<dyn RegisteredCommand>>;

/// Thread-safe name → command map.
#[derive(Default, Clone)]
pub struct CommandRegistry {
    commands: Arc<RwLock<CommandMap>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its name, replacing any previous one.
    pub async fn register(&self, command: Arc<dyn RegisteredCommand>) {
        let name = command.name().to_string();
        info!("[Registry] Registered command {}", name);
        self.commands.write().await.insert(name, command);
    }

    pub async fn unregister(&self, name: &str) -> Option<Arc<dyn RegisteredCommand>> {
        self.commands.write().await.remove(name)
    }

    pub async fn get(&self, name: &str) -> Option<Arc<dyn RegisteredCommand>> {
        self.commands.read().await.get(name).cloned()
    }

    /// Registered names, sorted.
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}
