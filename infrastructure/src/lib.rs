//! Infrastructure layer for agendai
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileDispatchConfig, FileGenerationConfig, FileLoggingConfig,
    FileModelConfig, FileWebhookConfig, ModelBackend,
};
pub use gemini::{
    endpoint::{Credential, GeminiBackend, GeminiEndpoint},
    error::GeminiError,
    responder::GeminiResponder,
};
pub use logging::JsonlConversationLogger;
pub use tools::SimulatedToolExecutor;
