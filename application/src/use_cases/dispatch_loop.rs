//! Tool dispatch loop
//!
//! Drives "model requests tools → tools run → results go back → model
//! answers or asks again" to a terminal state. The number of tool rounds is
//! bounded; running out of rounds is an error, never a partial answer.
//!
//! Every failure closes the session before it is returned.

use super::conversation_session::{ConversationSession, SessionError};
use super::shared::Interruption;
use super::tool_helpers::invocation_preview;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::tool_executor::{ExecutorError, ToolExecutorPort};
use agendai_domain::{
    ArgumentError, ExtractError, ResponseTurn, ToolCallExtractor, ToolCatalog, ToolInvocation,
};
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(#[from] ArgumentError),

    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Tool loop exceeded {max_iterations} rounds (still pending: {})", .pending.join(", "))]
    LoopExceeded {
        max_iterations: usize,
        pending: Vec<String>,
    },

    #[error("{0}")]
    Interrupted(#[from] Interruption),
}

impl DispatchError {
    pub fn is_cancelled(&self) -> bool {
        match self {
            DispatchError::Interrupted(_) => true,
            DispatchError::Session(e) => e.is_cancelled(),
            _ => false,
        }
    }
}

/// Result of a completed dispatch run
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    /// Text of the terminal model response
    pub text: String,
    /// Tool rounds executed
    pub iterations: usize,
    /// Names of the tools executed, in order
    pub executed: Vec<String>,
}

pub struct ToolDispatchLoop {
    executor: Arc<dyn ToolExecutorPort>,
    max_iterations: usize,
    parallel_batches: bool,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ToolDispatchLoop {
    pub fn new(executor: Arc<dyn ToolExecutorPort>, max_iterations: usize) -> Self {
        Self {
            executor,
            max_iterations,
            parallel_batches: false,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Execute the invocations of one batch concurrently. Results are still
    /// fed back in request order.
    pub fn with_parallel_batches(mut self, enabled: bool) -> Self {
        self.parallel_batches = enabled;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Run until `session` reaches a response without tool calls.
    pub async fn run(
        &self,
        session: &mut ConversationSession,
        initial: ResponseTurn,
    ) -> Result<DispatchOutcome, DispatchError> {
        let result = self.drive(session, initial).await;
        if let Err(e) = &result {
            warn!(session = %session.id(), error = %e, "Tool dispatch failed");
            self.conversation_logger.log(ConversationEvent::new(
                "dispatch_failed",
                serde_json::json!({ "session": session.id(), "error": e.to_string() }),
            ));
            session.close();
        }
        result
    }

    async fn drive(
        &self,
        session: &mut ConversationSession,
        initial: ResponseTurn,
    ) -> Result<DispatchOutcome, DispatchError> {
        let catalog: Arc<ToolCatalog> = Arc::clone(session.catalog());
        let extractor = ToolCallExtractor::new(&catalog);

        let mut latest = initial;
        let mut pending = extractor.extract(&latest)?;
        let mut iterations = 0;
        let mut executed = Vec::new();

        while !pending.is_empty() {
            if iterations >= self.max_iterations {
                return Err(DispatchError::LoopExceeded {
                    max_iterations: self.max_iterations,
                    pending: pending.into_iter().map(|i| i.name).collect(),
                });
            }
            iterations += 1;

            for invocation in &pending {
                catalog.validate(invocation)?;
            }

            info!(
                session = %session.id(),
                iteration = iterations,
                tools = pending.len(),
                "Dispatching tool batch"
            );

            let payloads = self.execute_batch(session, &pending).await?;

            // Only the answer to the last result of the batch is inspected.
            for (invocation, payload) in pending.iter().zip(payloads) {
                executed.push(invocation.name.clone());
                latest = session
                    .continue_with_tool_result(&invocation.name, payload)
                    .await?;
            }
            pending = extractor.extract(&latest)?;
        }

        debug!(session = %session.id(), iterations, "Tool dispatch finished");
        Ok(DispatchOutcome {
            text: latest.text(),
            iterations,
            executed,
        })
    }

    async fn execute_batch(
        &self,
        session: &ConversationSession,
        batch: &[ToolInvocation],
    ) -> Result<Vec<Value>, DispatchError> {
        if self.parallel_batches && batch.len() > 1 {
            let futures = batch.iter().map(|inv| self.execute_one(session, inv));
            return join_all(futures).await.into_iter().collect();
        }

        let mut payloads = Vec::with_capacity(batch.len());
        for invocation in batch {
            payloads.push(self.execute_one(session, invocation).await?);
        }
        Ok(payloads)
    }

    async fn execute_one(
        &self,
        session: &ConversationSession,
        invocation: &ToolInvocation,
    ) -> Result<Value, DispatchError> {
        debug!(
            session = %session.id(),
            tool = %invocation.name,
            "Executing tool: {}",
            invocation_preview(invocation)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "tool_call",
            serde_json::json!({
                "session": session.id(),
                "tool": invocation.name,
                "args": invocation.arguments,
            }),
        ));

        let payload = session
            .guard()
            .run(self.executor.invoke(invocation))
            .await??;

        self.conversation_logger.log(ConversationEvent::new(
            "tool_result",
            serde_json::json!({
                "session": session.id(),
                "tool": invocation.name,
                "result": payload,
            }),
        ));
        Ok(payload)
    }
}
