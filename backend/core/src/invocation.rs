//! Invocation context: what arrived, from where, and in which shape.
use serde::{Deserialize, Serialize};

use crate::cursor::ArgCursor;

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

/// The two input shapes a command can be invoked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationShape {
    /// A prefixed chat message parsed into a token stream.
    Message,
    /// A structured interaction whose subcommand/group are already extracted.
    ChatInput,
}

impl std::fmt::Display for InvocationShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message => write!(f, "message"),
            Self::ChatInput => write!(f, "chat_input"),
        }
    }
}

// ---------------------------------------------------------------------------
// Run context
// ---------------------------------------------------------------------------

/// Where and how the command was invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    /// Name the command was invoked under (may be an alias).
    pub command_name: String,
    /// Prefix used for message invocations (e.g. `!`). Empty for interactions.
    #[serde(default)]
    pub command_prefix: String,
    #[serde(default)]
    pub guild_id: Option<String>,
    pub channel_id: String,
}

impl RunContext {
    pub fn new(command_name: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            channel_id: channel_id.into(),
            ..Default::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.command_prefix = prefix.into();
        self
    }

    pub fn with_guild(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Message / interaction references
// ---------------------------------------------------------------------------

/// The chat message that carried a text invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub id: String,
    pub author_id: String,
    pub channel_id: String,
    /// Full raw content, prefix included.
    pub content: String,
}

impl MessageRef {
    pub fn new(id: impl Into<String>, author_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn in_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }
}

/// The structured interaction that carried a chat-input invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRef {
    pub id: String,
    pub user_id: String,
    pub channel_id: String,
    pub command_name: String,
}

impl InteractionRef {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>, command_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            command_name: command_name.into(),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Invocations
// ---------------------------------------------------------------------------

/// A message invocation. `args` is positioned at the first token after the
/// command name and is owned by this invocation alone.
#[derive(Debug, Clone)]
pub struct TextInvocation {
    pub message: MessageRef,
    pub args: ArgCursor,
    pub context: RunContext,
}

impl TextInvocation {
    pub fn new(message: MessageRef, args: ArgCursor, context: RunContext) -> Self {
        Self { message, args, context }
    }
}

/// A chat-input invocation with its subcommand identity already extracted.
#[derive(Debug, Clone)]
pub struct StructuredInvocation {
    pub interaction: InteractionRef,
    pub context: RunContext,
    pub subcommand: Option<String>,
    pub group: Option<String>,
}

impl StructuredInvocation {
    pub fn new(interaction: InteractionRef, context: RunContext) -> Self {
        Self {
            interaction,
            context,
            subcommand: None,
            group: None,
        }
    }

    pub fn subcommand(mut self, name: impl Into<String>) -> Self {
        self.subcommand = Some(name.into());
        self
    }

    pub fn group(mut self, name: impl Into<String>) -> Self {
        self.group = Some(name.into());
        self
    }
}
