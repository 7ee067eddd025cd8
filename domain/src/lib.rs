//! Domain layer for agendai
//!
//! This crate contains the core types of the scheduling assistant. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Tool catalog**: the fixed set of operations the language model may
//!   request, with explicit parameter kinds and required sets
//! - **Conversation turns**: the append-only history of one model exchange
//! - **Extraction**: turning a raw model response into tool invocations
//! - **Prompts**: per-intent instructions plus serialized request context

pub mod config;
pub mod interaction;
pub mod prompt;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use interaction::{Language, WebhookReply, WebhookRequest};
pub use prompt::{Intent, IntentPromptTemplate, PromptBuilder, PromptError};
pub use session::{
    extractor::{ExtractError, ToolCallExtractor},
    response::{Candidate, Content, FunctionCall, Part, ResponseTurn},
    settings::{GenerationSettings, SettingsError},
    turn::{ConversationTurn, Role},
};
pub use tool::{
    catalog::{CatalogError, ToolCatalog},
    invocation::ToolInvocation,
    scheduling::scheduling_catalog,
    schema::{ParameterKind, ParameterSpec, ToolSchema},
    validation::{ArgumentError, validate_arguments},
};
