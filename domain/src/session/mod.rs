//! Conversation session domain.
//!
//! - [`settings::GenerationSettings`] — validated sampling parameters
//! - [`turn::ConversationTurn`] — one entry of a session history
//! - [`response::ResponseTurn`] — a model response, as received
//! - [`extractor::ToolCallExtractor`] — response → requested tool invocations

pub mod extractor;
pub mod response;
pub mod settings;
pub mod turn;
