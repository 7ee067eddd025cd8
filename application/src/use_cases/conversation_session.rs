//! Conversation session: one bounded exchange with the model.
//!
//! A session is created per inbound request, owns its history exclusively and
//! is discarded afterwards. Lifecycle:
//!
//! ```text
//! Created --start--> Active --(response without tool calls)--> Closed
//!                      |  ^
//!                      +--+ continue_with_tool_result
//! ```
//!
//! Any responder failure, cancellation or explicit [`close`] also ends in
//! `Closed`, and a closed session is never reused. Every sending operation
//! takes `&mut self`, so a session can have at most one request in flight.
//!
//! [`close`]: ConversationSession::close

use super::shared::{CallGuard, Interruption};
use crate::ports::model_responder::{Exchange, ModelResponder, ResponderError};
use agendai_domain::util::truncate_str;
use agendai_domain::{ConversationTurn, GenerationSettings, ResponseTurn, ToolCatalog};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Active,
    Closed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Responder(#[from] ResponderError),

    #[error("Protocol violation: {0}")]
    Protocol(String),

    #[error("Session is closed")]
    Closed,

    #[error("{0}")]
    Interrupted(#[from] Interruption),
}

impl SessionError {
    pub fn is_transport(&self) -> bool {
        matches!(self, SessionError::Responder(e) if e.is_transport())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SessionError::Interrupted(_))
    }
}

/// Stateful wrapper around one model conversation.
pub struct ConversationSession {
    id: String,
    responder: Arc<dyn ModelResponder>,
    catalog: Arc<ToolCatalog>,
    settings: GenerationSettings,
    guard: CallGuard,
    history: Vec<ConversationTurn>,
    state: SessionState,
    /// Tool names of the latest response still waiting for a result, in
    /// request order.
    pending: VecDeque<String>,
}

impl ConversationSession {
    pub fn new(
        responder: Arc<dyn ModelResponder>,
        catalog: Arc<ToolCatalog>,
        settings: GenerationSettings,
        guard: CallGuard,
    ) -> Self {
        Self {
            id: String::new(),
            responder,
            catalog,
            settings,
            guard,
            history: Vec::new(),
            state: SessionState::Created,
            pending: VecDeque::new(),
        }
    }

    /// Label used in logs (the dialogue session id).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn catalog(&self) -> &Arc<ToolCatalog> {
        &self.catalog
    }

    pub fn guard(&self) -> &CallGuard {
        &self.guard
    }

    /// Tool names still awaiting a result, in the order they must be fed.
    pub fn pending_calls(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    /// Send the first prompt. Created → Active, or straight to Closed when the
    /// model answers without requesting any tool.
    pub async fn start(&mut self, prompt: &str) -> Result<ResponseTurn, SessionError> {
        self.start_turn(ConversationTurn::prompt(prompt)).await
    }

    /// Like [`start`](Self::start), keeping the structured context alongside
    /// the prompt text in the history.
    pub async fn start_with_context(
        &mut self,
        prompt: &str,
        context: Value,
    ) -> Result<ResponseTurn, SessionError> {
        self.start_turn(ConversationTurn::Prompt {
            text: prompt.to_string(),
            context: Some(context),
        })
        .await
    }

    async fn start_turn(&mut self, turn: ConversationTurn) -> Result<ResponseTurn, SessionError> {
        match self.state {
            SessionState::Closed => return Err(SessionError::Closed),
            SessionState::Active => {
                return Err(SessionError::Protocol(
                    "session has already been started".to_string(),
                ));
            }
            SessionState::Created => {}
        }

        if let ConversationTurn::Prompt { text, .. } = &turn {
            info!(
                session = %self.id,
                model = %self.responder.model_name(),
                "Starting conversation: {}",
                truncate_str(text, 100)
            );
        }

        self.history.push(turn);
        self.state = SessionState::Active;
        let response = self.send().await?;
        self.accept_response(&response);
        Ok(response)
    }

    /// Feed the result of the next pending tool invocation.
    ///
    /// Results must arrive in request order. Every result is sent to the model
    /// and its response appended to the history. Only the response to the last
    /// result of a batch is inspected for new tool calls and terminal
    /// detection; responses to earlier results are acknowledgements.
    /// Out-of-order or unexpected results are a [`SessionError::Protocol`] and
    /// leave the session unchanged.
    pub async fn continue_with_tool_result(
        &mut self,
        tool_name: &str,
        payload: Value,
    ) -> Result<ResponseTurn, SessionError> {
        match self.state {
            SessionState::Closed => return Err(SessionError::Closed),
            SessionState::Created => {
                return Err(SessionError::Protocol(
                    "session has not been started".to_string(),
                ));
            }
            SessionState::Active => {}
        }

        match self.pending.front() {
            None => {
                return Err(SessionError::Protocol(format!(
                    "no pending tool invocation for result of '{tool_name}'"
                )));
            }
            Some(expected) if expected != tool_name => {
                return Err(SessionError::Protocol(format!(
                    "expected result for '{expected}', got '{tool_name}'"
                )));
            }
            Some(_) => {}
        }

        self.pending.pop_front();
        self.history
            .push(ConversationTurn::tool_result(tool_name, payload));

        let response = self.send().await?;
        if self.pending.is_empty() {
            self.accept_response(&response);
        } else {
            debug!(
                session = %self.id,
                tool = tool_name,
                remaining = self.pending.len(),
                "Intermediate tool result acknowledged"
            );
            self.history
                .push(ConversationTurn::Response(response.clone()));
        }
        Ok(response)
    }

    /// End the session. Idempotent.
    pub fn close(&mut self) {
        if self.state != SessionState::Closed {
            debug!(session = %self.id, turns = self.history.len(), "Closing conversation");
        }
        self.state = SessionState::Closed;
        self.pending.clear();
    }

    async fn send(&mut self) -> Result<ResponseTurn, SessionError> {
        let exchange = Exchange {
            turns: &self.history,
            settings: &self.settings,
            catalog: &self.catalog,
        };

        let result = match self.guard.run(self.responder.send(exchange)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(SessionError::Responder(e)),
            Err(interruption) => Err(SessionError::Interrupted(interruption)),
        };

        if let Err(e) = &result {
            warn!(session = %self.id, error = %e, "Model request failed, closing session");
            self.close();
        }
        result
    }

    fn accept_response(&mut self, response: &ResponseTurn) {
        self.history
            .push(ConversationTurn::Response(response.clone()));
        self.pending = response.requested_tool_names().into();

        if self.pending.is_empty() {
            debug!(session = %self.id, "Model answered without tool calls");
            self.state = SessionState::Closed;
        }
    }
}
