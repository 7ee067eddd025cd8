//! Prompt domain
//!
//! Intent recognition, per-intent instruction templates and the builder that
//! attaches request context to an instruction.

pub mod builder;
pub mod intent;
mod template;

pub use builder::{CONTEXT_DELIMITER, PromptBuilder, PromptError};
pub use intent::Intent;
pub use template::IntentPromptTemplate;
