//! Interaction domain: one inbound dialogue request and its reply.
//!
//! The transport (Dialogflow CX webhook JSON) is decoded elsewhere; this
//! module only holds the transport-neutral shapes.

mod language;
mod request;

pub use language::Language;
pub use request::{WebhookReply, WebhookRequest};
