/// Preconditions: async accept/deny checks run before a handler.
///
/// Preconditions run sequentially in registration order. The first denial
/// halts the chain; an `Err` from a precondition is a failure, not a denial.
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::invocation::{InteractionRef, MessageRef, RunContext};

/// The invocation a precondition is asked about.
#[derive(Debug, Clone, Copy)]
pub enum InvocationRef<'a> {
    Message(&'a MessageRef),
    ChatInput(&'a InteractionRef),
}

impl InvocationRef<'_> {
    /// Id of the user who triggered the invocation.
    pub fn user_id(&self) -> &str {
        match self {
            Self::Message(m) => &m.author_id,
            Self::ChatInput(i) => &i.user_id,
        }
    }
}

/// Why a precondition refused to let the handler run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denial {
    /// Name of the precondition that denied.
    pub precondition: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny(Denial),
}

impl Verdict {
    pub fn allow() -> Self {
        Self::Allow
    }

    pub fn deny(precondition: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Deny(Denial {
            precondition: precondition.into(),
            reason: reason.into(),
        })
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

#[async_trait]
pub trait Precondition: Send + Sync {
    /// Name used in configuration and in denials.
    fn name(&self) -> &str;

    async fn check(&self, command: &str, invocation: InvocationRef<'_>, context: &RunContext) -> Result<Verdict>;
}

/// An ordered list of preconditions evaluated as one.
#[derive(Clone, Default)]
pub struct PreconditionSet {
    entries: Vec<Arc<dyn Precondition>>,
}

impl PreconditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, precondition: Arc<dyn Precondition>) {
        self.entries.push(precondition);
    }

    pub fn with(mut self, precondition: Arc<dyn Precondition>) -> Self {
        self.push(precondition);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|p| p.name()).collect()
    }

    /// Run every precondition until one denies or fails.
    pub async fn run(&self, command: &str, invocation: InvocationRef<'_>, context: &RunContext) -> Result<Verdict> {
        for precondition in &self.entries {
            debug!("[Preconditions] Running {} for {}", precondition.name(), command);
            let verdict = precondition.check(command, invocation, context).await?;
            if !verdict.is_allowed() {
                return Ok(verdict);
            }
        }
        Ok(Verdict::Allow)
    }
}

impl std::fmt::Debug for PreconditionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl FromIterator<Arc<dyn Precondition>> for PreconditionSet {
    fn from_iter<T: IntoIterator<Item = Arc<dyn Precondition>>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in preconditions
// ---------------------------------------------------------------------------

/// Allows only the listed user ids.
pub struct UserAllowList {
    pub name: String,
    pub user_ids: Vec<String>,
}

impl UserAllowList {
    pub fn new(name: impl Into<String>, user_ids: Vec<String>) -> Self {
        Self {
            name: name.into(),
            user_ids,
        }
    }
}

#[async_trait]
impl Precondition for UserAllowList {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, _command: &str, invocation: InvocationRef<'_>, _context: &RunContext) -> Result<Verdict> {
        let user = invocation.user_id();
        if self.user_ids.iter().any(|id| id == user) {
            Ok(Verdict::allow())
        } else {
            Ok(Verdict::deny(&self.name, format!("user {user} is not allowed")))
        }
    }
}

/// Allows only invocations from inside a guild.
pub struct GuildOnly;

#[async_trait]
impl Precondition for GuildOnly {
    fn name(&self) -> &str {
        "guild_only"
    }

    async fn check(&self, _command: &str, _invocation: InvocationRef<'_>, context: &RunContext) -> Result<Verdict> {
        if context.guild_id.is_some() {
            Ok(Verdict::allow())
        } else {
            Ok(Verdict::deny("guild_only", "this command can only be used in a server"))
        }
    }
}
