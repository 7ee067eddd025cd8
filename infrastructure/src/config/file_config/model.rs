//! Model configuration from TOML (`[model]` section)

use agendai_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Which Google API serves the model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelBackend {
    #[default]
    Vertex,
    Gemini,
}

impl ModelBackend {
    pub const VALID: [&'static str; 2] = ["vertex", "gemini"];
}

impl std::str::FromStr for ModelBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vertex" | "vertexai" | "vertex_ai" => Ok(ModelBackend::Vertex),
            "gemini" | "generativelanguage" => Ok(ModelBackend::Gemini),
            _ => Err(()),
        }
    }
}

/// Raw model configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// `vertex` (bearer token) or `gemini` (API key)
    pub backend: String,
    /// Google Cloud project, required for Vertex AI.
    /// `GOOGLE_CLOUD_PROJECT` overrides this.
    pub project_id: Option<String>,
    pub location: String,
    pub model_name: String,
    /// Replace the scheme and host of the API (proxies, local testing)
    pub base_url: Option<String>,
    /// Environment variable holding the Vertex AI access token
    pub access_token_env: String,
    /// Environment variable holding the Generative Language API key
    pub api_key_env: String,
    /// HTTP timeout per model request
    pub timeout_secs: u64,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            backend: "vertex".to_string(),
            project_id: None,
            location: "us-central1".to_string(),
            model_name: "gemini-1.5-pro".to_string(),
            base_url: None,
            access_token_env: "GOOGLE_CLOUD_ACCESS_TOKEN".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

impl FileModelConfig {
    /// Parse `backend`, falling back to Vertex AI with a warning.
    pub fn parse_backend(&self) -> (ModelBackend, Vec<ConfigIssue>) {
        match self.backend.parse::<ModelBackend>() {
            Ok(backend) => (backend, Vec::new()),
            Err(()) => (
                ModelBackend::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "model.backend".to_string(),
                        value: self.backend.clone(),
                        valid_values: ModelBackend::VALID.iter().map(|v| v.to_string()).collect(),
                    },
                    format!(
                        "model.backend: unknown value '{}', falling back to 'vertex'",
                        self.backend
                    ),
                )],
            ),
        }
    }

    /// Non-blank project id.
    pub fn project(&self) -> Option<&str> {
        self.project_id
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (backend, mut issues) = self.parse_backend();

        if self.model_name.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingValue {
                    field: "model.model_name".to_string(),
                },
                "model.model_name must not be empty",
            ));
        }
        if backend == ModelBackend::Vertex {
            if self.project().is_none() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MissingValue {
                        field: "model.project_id".to_string(),
                    },
                    "model.project_id is required for the vertex backend (or set GOOGLE_CLOUD_PROJECT)",
                ));
            }
            if self.location.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MissingValue {
                        field: "model.location".to_string(),
                    },
                    "model.location must not be empty for the vertex backend",
                ));
            }
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "model.timeout_secs".to_string(),
                },
                "model.timeout_secs must be greater than 0",
            ));
        }

        issues
    }
}
