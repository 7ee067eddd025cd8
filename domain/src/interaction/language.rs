use serde::{Deserialize, Serialize};

/// Reply language, derived from the request's language code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    #[default]
    PtBr,
    En,
}

impl Language {
    /// Map a BCP-47 style code. Anything not English falls back to pt-BR.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_ascii_lowercase();
        if code == "en" || code.starts_with("en-") || code.starts_with("en_") {
            Language::En
        } else {
            Language::PtBr
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Language::PtBr => "pt-br",
            Language::En => "en",
        }
    }

    /// User-safe message returned whenever a request cannot be completed.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Language::PtBr => {
                "Desculpe, ocorreu um erro ao processar sua solicitação. Por favor, tente novamente mais tarde."
            }
            Language::En => {
                "Sorry, something went wrong while processing your request. Please try again later."
            }
        }
    }
}
