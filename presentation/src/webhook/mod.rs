//! Dialogflow CX webhook transport

pub mod dialogflow;
pub mod server;

pub use dialogflow::{DialogflowRequest, FulfillmentEnvelope};
pub use server::{ServerError, WebhookState, router, serve};
