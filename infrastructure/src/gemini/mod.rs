//! Gemini `generateContent` adapter
//!
//! Implements [`ModelResponder`](agendai_application::ModelResponder) over
//! HTTP, against either Vertex AI or the Generative Language API.

pub mod endpoint;
pub mod error;
pub mod protocol;
pub mod responder;
