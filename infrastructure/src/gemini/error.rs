//! Error types for the Gemini adapter

use agendai_application::ResponderError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when talking to a Gemini endpoint
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    Parse { error: String, raw: String },

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    #[error("Missing project id for the Vertex AI backend")]
    MissingProject,
}

impl GeminiError {
    /// Build an API error from a non-success status and its body.
    ///
    /// Prefers the `error.message` field of a Google API error payload and
    /// falls back to the (truncated) raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| agendai_domain::util::truncate_str(body.trim(), 200).to_string());
        GeminiError::Api { status, message }
    }
}

impl From<GeminiError> for ResponderError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Client(e) if e.is_timeout() => ResponderError::Timeout,
            GeminiError::Client(e) if e.is_decode() => {
                ResponderError::InvalidResponse(e.to_string())
            }
            GeminiError::Client(e) => ResponderError::Transport(e.to_string()),
            GeminiError::Api { status, message } => ResponderError::Status { status, message },
            GeminiError::Parse { error, .. } => ResponderError::InvalidResponse(error),
            other @ (GeminiError::MissingCredential(_) | GeminiError::MissingProject) => {
                ResponderError::Transport(other.to_string())
            }
        }
    }
}
