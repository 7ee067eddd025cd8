//! Presentation layer for agendai
//!
//! This crate contains the CLI definition and the Dialogflow CX webhook
//! transport (codec and HTTP server).

pub mod cli;
pub mod webhook;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use webhook::{
    DialogflowRequest, FulfillmentEnvelope, ServerError, WebhookState, router, serve,
};
