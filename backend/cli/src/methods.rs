//! Built-in methods, preconditions and commands available to configured
//! subcommands.

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use switchyard_commands::{MethodTable, PreconditionStore, RegisteredCommand};
use switchyard_core::{
    structured_fn, text_fn, ArgCursor, GuildOnly, InteractionRef, InvocationShape, MessageRef,
    RunContext, TokenCursor, UserAllowList,
};
use switchyard_patterns::PatternCommand;

/// `echo`, `ping`, `fail` and `rest`, for both invocation shapes.
pub fn method_table() -> MethodTable {
    MethodTable::new()
        .text("echo", text_fn(|msg, args, ctx| async move {
            Ok(json!({ "command": ctx.command_name, "author": msg.author_id, "args": args.rest() }))
        }))
        .structured("echo", structured_fn(|interaction, ctx| async move {
            Ok(json!({ "command": ctx.command_name, "user": interaction.user_id }))
        }))
        .text("ping", text_fn(|_, _, _| async { Ok(json!("pong")) }))
        .structured("ping", structured_fn(|_, _| async { Ok(json!("pong")) }))
        .text("fail", text_fn(|_, _, _| async { Err::<Value, _>(anyhow::anyhow!("this handler always fails")) }))
        .structured("fail", structured_fn(|_, _| async { Err::<Value, _>(anyhow::anyhow!("this handler always fails")) }))
        .text("rest", text_fn(|_, mut args, _| async move {
            let mut tokens = Vec::new();
            while let Some(token) = args.consume_next() {
                tokens.push(token);
            }
            Ok(json!(tokens))
        }))
}

/// `guild_only` plus an `owners` allow-list that is also applied globally to
/// delegated commands.
pub fn precondition_store(owners: Vec<String>) -> PreconditionStore {
    PreconditionStore::new()
        .register(Arc::new(GuildOnly))
        .register_global(Arc::new(UserAllowList::new("owners", owners)))
}

/// A plain command that config entries can delegate to.
pub struct PingCommand;

#[async_trait]
impl RegisteredCommand for PingCommand {
    fn name(&self) -> &str {
        "ping"
    }

    fn supports(&self, _shape: InvocationShape) -> bool {
        true
    }

    async fn message_run(&self, _message: &MessageRef, args: &mut ArgCursor, _context: &RunContext) -> Result<Value> {
        Ok(json!({ "pong": args.rest() }))
    }

    async fn chat_input_run(&self, _interaction: &InteractionRef, _context: &RunContext) -> Result<Value> {
        Ok(json!({ "pong": "" }))
    }
}

/// Replies to coffee talk about half the time.
pub struct CoffeePattern {
    aliases: Vec<String>,
}

impl Default for CoffeePattern {
    fn default() -> Self {
        Self {
            aliases: vec!["espresso".into(), "latte".into()],
        }
    }
}

#[async_trait]
impl PatternCommand for CoffeePattern {
    fn name(&self) -> &str {
        "coffee"
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn chance(&self) -> u8 {
        50
    }

    async fn message_run(&self, message: &MessageRef) -> Result<Value> {
        if message.content.contains("decaf") {
            bail!("decaf is not coffee");
        }
        Ok(json!({ "reply": format!("one coffee for {}", message.author_id) }))
    }
}
