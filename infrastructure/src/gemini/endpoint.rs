//! Endpoint and credential resolution for `generateContent`.

use super::error::{GeminiError, Result};

/// Which Google API serves the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeminiBackend {
    /// Vertex AI, authenticated with an OAuth bearer token
    VertexAi { project_id: String, location: String },
    /// Generative Language API, authenticated with an API key
    GenerativeLanguage,
}

/// How requests are authenticated.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Bearer(String),
    ApiKey(String),
    /// No auth header. Only useful against local test servers.
    Anonymous,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Bearer(_) => write!(f, "Bearer(***)"),
            Credential::ApiKey(_) => write!(f, "ApiKey(***)"),
            Credential::Anonymous => write!(f, "Anonymous"),
        }
    }
}

impl Credential {
    /// Read a credential from the environment variable `var`.
    pub fn from_env(var: &str, bearer: bool) -> Result<Self> {
        let value = std::env::var(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| GeminiError::MissingCredential(var.to_string()))?;
        Ok(if bearer {
            Credential::Bearer(value)
        } else {
            Credential::ApiKey(value)
        })
    }

    pub(crate) fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Credential::Bearer(token) => request.bearer_auth(token),
            Credential::ApiKey(key) => request.header("x-goog-api-key", key),
            Credential::Anonymous => request,
        }
    }
}

/// Fully resolved target of a responder.
#[derive(Debug, Clone)]
pub struct GeminiEndpoint {
    pub backend: GeminiBackend,
    pub model: String,
    /// Overrides the scheme and host (e.g. a proxy or a test server).
    pub base_url: Option<String>,
}

impl GeminiEndpoint {
    pub fn vertex(
        project_id: impl Into<String>,
        location: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            backend: GeminiBackend::VertexAi {
                project_id: project_id.into(),
                location: location.into(),
            },
            model: model.into(),
            base_url: None,
        }
    }

    pub fn generative_language(model: impl Into<String>) -> Self {
        Self {
            backend: GeminiBackend::GenerativeLanguage,
            model: model.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn base(&self) -> String {
        if let Some(base) = &self.base_url {
            return base.trim_end_matches('/').to_string();
        }
        match &self.backend {
            GeminiBackend::VertexAi { location, .. } => {
                format!("https://{location}-aiplatform.googleapis.com")
            }
            GeminiBackend::GenerativeLanguage => {
                "https://generativelanguage.googleapis.com".to_string()
            }
        }
    }

    /// The `generateContent` URL for this endpoint.
    pub fn url(&self) -> String {
        let base = self.base();
        match &self.backend {
            GeminiBackend::VertexAi {
                project_id,
                location,
            } => format!(
                "{base}/v1/projects/{project_id}/locations/{location}/publishers/google/models/{}:generateContent",
                self.model
            ),
            GeminiBackend::GenerativeLanguage => {
                format!("{base}/v1beta/models/{}:generateContent", self.model)
            }
        }
    }
}
