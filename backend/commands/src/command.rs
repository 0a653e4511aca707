/// A command whose behaviour is entirely described by a subcommand mapping.
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use switchyard_core::{
    ArgCursor, DispatchError, InvocationShape, MessageRef, PreconditionSet, RunContext,
    StructuredInvocation, TextInvocation,
};

use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::mapping::MappingModel;
use crate::registry::RegisteredCommand;

/// A delegated dispatch that reached an entry but did not succeed. The inner
/// terminal event has already been emitted by the time this is returned.
#[derive(Debug, Error)]
#[error("delegated command `{command}` ended {outcome:?}")]
pub struct DelegatedOutcome {
    pub command: String,
    pub outcome: DispatchOutcome,
}

pub struct SubcommandCommand {
    name: String,
    mapping: RwLock<Arc<MappingModel>>,
    preconditions: PreconditionSet,
    dispatcher: Arc<Dispatcher>,
}

impl SubcommandCommand {
    pub fn new(name: impl Into<String>, mapping: MappingModel, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            name: name.into(),
            mapping: RwLock::new(Arc::new(mapping)),
            preconditions: PreconditionSet::new(),
            dispatcher,
        }
    }

    /// Preconditions checked when another command delegates to this one.
    pub fn with_preconditions(mut self, preconditions: PreconditionSet) -> Self {
        self.preconditions = preconditions;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn mapping(&self) -> Arc<MappingModel> {
        Arc::clone(&*self.mapping.read().await)
    }

    /// Swap the whole mapping. In-flight dispatches keep the model they started with.
    pub async fn replace_mappings(&self, mapping: MappingModel) {
        info!(
            "[Commands] {} mapping replaced ({} entries, {} groups)",
            self.name,
            mapping.entries().len(),
            mapping.groups().len()
        );
        *self.mapping.write().await = Arc::new(mapping);
    }

    pub async fn message_run(&self, invocation: &mut TextInvocation) -> Result<DispatchOutcome, DispatchError> {
        let mapping = self.mapping().await;
        self.dispatcher
            .dispatch_message(&self.name, &mapping, invocation)
            .await
    }

    pub async fn chat_input_run(&self, invocation: &StructuredInvocation) -> Result<DispatchOutcome, DispatchError> {
        let mapping = self.mapping().await;
        self.dispatcher
            .dispatch_chat_input(&self.name, &mapping, invocation)
            .await
    }
}

/// As a delegate target only message invocations are accepted: a bare
/// interaction carries no subcommand name to resolve.
#[async_trait]
impl RegisteredCommand for SubcommandCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, shape: InvocationShape) -> bool {
        shape == InvocationShape::Message
    }

    fn preconditions(&self) -> PreconditionSet {
        self.preconditions.clone()
    }

    async fn message_run(&self, message: &MessageRef, args: &mut ArgCursor, context: &RunContext) -> Result<Value> {
        let mut invocation = TextInvocation::new(message.clone(), args.clone(), context.clone());
        let outcome = SubcommandCommand::message_run(self, &mut invocation).await;
        *args = invocation.args;
        match outcome? {
            DispatchOutcome::Success => Ok(serde_json::to_value(DispatchOutcome::Success)?),
            outcome => Err(DelegatedOutcome {
                command: self.name.clone(),
                outcome,
            }
            .into()),
        }
    }
}
