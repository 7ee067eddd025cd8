//! Gemini model responder

use super::endpoint::{Credential, GeminiEndpoint};
use super::error::{GeminiError, Result};
use super::protocol;
use crate::config::{FileModelConfig, ModelBackend};
use agendai_application::{Exchange, ModelResponder, ResponderError};
use agendai_domain::ResponseTurn;
use agendai_domain::util::truncate_str;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Default per-request HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`ModelResponder`] backed by the `generateContent` REST endpoint.
pub struct GeminiResponder {
    client: reqwest::Client,
    endpoint: GeminiEndpoint,
    credential: Credential,
}

impl GeminiResponder {
    pub fn new(endpoint: GeminiEndpoint, credential: Credential) -> Result<Self> {
        Self::with_timeout(endpoint, credential, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: GeminiEndpoint,
        credential: Credential,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!(model = %endpoint.model, url = %endpoint.url(), "GeminiResponder initialized");

        Ok(Self {
            client,
            endpoint,
            credential,
        })
    }

    /// Build from the `[model]` section, reading the credential from the
    /// configured environment variable.
    pub fn from_config(config: &FileModelConfig) -> Result<Self> {
        let (endpoint, credential) = match config.parse_backend().0 {
            ModelBackend::Vertex => {
                let project = config.project().ok_or(GeminiError::MissingProject)?;
                (
                    GeminiEndpoint::vertex(project, config.location.trim(), config.model_name.trim()),
                    Credential::from_env(&config.access_token_env, true)?,
                )
            }
            ModelBackend::Gemini => (
                GeminiEndpoint::generative_language(config.model_name.trim()),
                Credential::from_env(&config.api_key_env, false)?,
            ),
        };
        let endpoint = match &config.base_url {
            Some(base_url) => endpoint.with_base_url(base_url),
            None => endpoint,
        };
        Self::with_timeout(endpoint, credential, Duration::from_secs(config.timeout_secs))
    }

    pub fn endpoint(&self) -> &GeminiEndpoint {
        &self.endpoint
    }

    async fn generate(&self, exchange: Exchange<'_>) -> Result<ResponseTurn> {
        let body = protocol::request_body(exchange);
        debug!(turns = exchange.turns.len(), "Sending generateContent request");

        let request = self.client.post(self.endpoint.url()).json(&body);
        let resp = self.credential.apply(request).send().await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(GeminiError::from_status(status.as_u16(), &text));
        }

        serde_json::from_str::<ResponseTurn>(&text).map_err(|e| GeminiError::Parse {
            error: e.to_string(),
            raw: truncate_str(&text, 500).to_string(),
        })
    }
}

#[async_trait]
impl ModelResponder for GeminiResponder {
    async fn send(&self, exchange: Exchange<'_>) -> std::result::Result<ResponseTurn, ResponderError> {
        let turn = self.generate(exchange).await?;
        debug!(
            candidates = turn.candidates.len(),
            calls = turn.function_calls().count(),
            "Received generateContent response"
        );
        Ok(turn)
    }

    fn model_name(&self) -> &str {
        &self.endpoint.model
    }
}
