/// Handler traits: the callables a subcommand entry runs.
///
/// A text handler receives the message, the argument cursor already advanced
/// past the subcommand tokens, and the run context. A structured handler
/// receives the interaction and run context only.
use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::cursor::ArgCursor;
use crate::invocation::{InteractionRef, MessageRef, RunContext};

#[async_trait]
pub trait TextHandler: Send + Sync {
    async fn run(&self, message: &MessageRef, args: &mut ArgCursor, context: &RunContext) -> Result<Value>;
}

#[async_trait]
pub trait StructuredHandler: Send + Sync {
    async fn run(&self, interaction: &InteractionRef, context: &RunContext) -> Result<Value>;
}

// ---------------------------------------------------------------------------
// Closure adapters
// ---------------------------------------------------------------------------

type TextFn = dyn Fn(MessageRef, ArgCursor, RunContext) -> BoxFuture<'static, Result<Value>> + Send + Sync;
type StructuredFn = dyn Fn(InteractionRef, RunContext) -> BoxFuture<'static, Result<Value>> + Send + Sync;

/// A text handler backed by an async closure. The closure gets owned copies;
/// cursor movement inside it is not reflected back to the caller.
pub struct FnTextHandler(Box<TextFn>);

#[async_trait]
impl TextHandler for FnTextHandler {
    async fn run(&self, message: &MessageRef, args: &mut ArgCursor, context: &RunContext) -> Result<Value> {
        (self.0)(message.clone(), args.clone(), context.clone()).await
    }
}

pub struct FnStructuredHandler(Box<StructuredFn>);

#[async_trait]
impl StructuredHandler for FnStructuredHandler {
    async fn run(&self, interaction: &InteractionRef, context: &RunContext) -> Result<Value> {
        (self.0)(interaction.clone(), context.clone()).await
    }
}

/// Wrap an async closure as a text handler.
pub fn text_fn<F, Fut>(f: F) -> Arc<dyn TextHandler>
where
    F: Fn(MessageRef, ArgCursor, RunContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(FnTextHandler(Box::new(move |m, a, c| Box::pin(f(m, a, c)))))
}

/// Wrap an async closure as a structured handler.
pub fn structured_fn<F, Fut>(f: F) -> Arc<dyn StructuredHandler>
where
    F: Fn(InteractionRef, RunContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(FnStructuredHandler(Box::new(move |i, c| Box::pin(f(i, c)))))
}
