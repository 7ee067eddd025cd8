use super::language::Language;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An inbound intent, already parsed from the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookRequest {
    pub session_id: String,
    pub intent_name: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    pub language_code: String,
}

impl WebhookRequest {
    pub const DEFAULT_LANGUAGE_CODE: &'static str = "pt-br";

    pub fn new(session_id: impl Into<String>, intent_name: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            intent_name: intent_name.into(),
            parameters: Map::new(),
            language_code: Self::DEFAULT_LANGUAGE_CODE.to_string(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language_code = code.into();
        self
    }

    pub fn language(&self) -> Language {
        Language::from_code(&self.language_code)
    }

    /// Non-empty string parameter.
    pub fn parameter_str(&self, key: &str) -> Option<&str> {
        self.parameters
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

/// Text returned to the dialogue platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookReply {
    pub text: String,
}

impl WebhookReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn fallback(language: Language) -> Self {
        Self::new(language.fallback_message())
    }
}
