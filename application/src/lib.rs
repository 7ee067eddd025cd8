//! Application layer for agendai
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    model_responder::{Exchange, ModelResponder, ResponderError},
    tool_executor::{ExecutorError, ToolExecutorPort},
};
pub use use_cases::conversation_session::{ConversationSession, SessionError, SessionState};
pub use use_cases::dispatch_loop::{DispatchError, DispatchOutcome, ToolDispatchLoop};
pub use use_cases::handle_intent::{
    HandleIntentError, HandleIntentInput, HandleIntentOutput, HandleIntentUseCase,
};
pub use use_cases::shared::{CallGuard, Interruption};
