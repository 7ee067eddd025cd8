//! Webhook configuration from TOML (`[webhook]` section)

use agendai_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWebhookConfig {
    /// Listen address of `agendai serve`
    pub bind: String,
    /// Professional used when a request carries no `professional_id`
    pub default_professional_id: String,
    /// Language assumed when a request carries no `languageCode`
    pub default_language: String,
}

impl Default for FileWebhookConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            default_professional_id: "prof123".to_string(),
            default_language: "pt-br".to_string(),
        }
    }
}

impl FileWebhookConfig {
    pub fn parse_bind(&self) -> (Option<SocketAddr>, Vec<ConfigIssue>) {
        match self.bind.trim().parse::<SocketAddr>() {
            Ok(addr) => (Some(addr), Vec::new()),
            Err(e) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::OutOfRange {
                        field: "webhook.bind".to_string(),
                    },
                    format!("webhook.bind: '{}' is not a socket address ({e})", self.bind),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_bind().1;

        if self.default_professional_id.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingValue {
                    field: "webhook.default_professional_id".to_string(),
                },
                "webhook.default_professional_id must not be empty",
            ));
        }

        let lang = self.default_language.to_lowercase();
        if !(lang.starts_with("pt") || lang.starts_with("en")) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidEnumValue {
                    field: "webhook.default_language".to_string(),
                    value: self.default_language.clone(),
                    valid_values: vec!["pt-br".to_string(), "en".to_string()],
                },
                format!(
                    "webhook.default_language: '{}' is not supported, replies fall back to pt-br",
                    self.default_language
                ),
            ));
        }

        issues
    }
}
