//! Model responder port
//!
//! Defines the interface for sending a conversation to a generative model
//! that supports function calling.

use agendai_domain::{ConversationTurn, GenerationSettings, ResponseTurn, ToolCatalog};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to the model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponderError {
    #[error("Model responder unreachable: {0}")]
    Transport(String),

    #[error("Model responder returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Model responder returned an invalid payload: {0}")]
    InvalidResponse(String),

    #[error("Model responder timed out")]
    Timeout,
}

impl ResponderError {
    /// True when the model could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, ResponderError::Transport(_) | ResponderError::Timeout)
    }
}

/// Everything the model needs for one request.
///
/// The model API is stateless, so every request replays the whole history.
#[derive(Debug, Clone, Copy)]
pub struct Exchange<'a> {
    pub turns: &'a [ConversationTurn],
    pub settings: &'a GenerationSettings,
    pub catalog: &'a ToolCatalog,
}

/// Port for model communication
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ModelResponder: Send + Sync {
    /// Send the exchange and return the model's next turn.
    async fn send(&self, exchange: Exchange<'_>) -> Result<ResponseTurn, ResponderError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
