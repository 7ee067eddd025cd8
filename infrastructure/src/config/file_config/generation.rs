//! Generation configuration from TOML (`[generation]` section)

use agendai_domain::{ConfigIssue, ConfigIssueCode, GenerationSettings, SettingsError};
use serde::{Deserialize, Serialize};

/// Raw sampling parameters from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            temperature: GenerationSettings::DEFAULT_TEMPERATURE,
            max_output_tokens: GenerationSettings::DEFAULT_MAX_OUTPUT_TOKENS,
            top_p: GenerationSettings::DEFAULT_TOP_P,
            top_k: GenerationSettings::DEFAULT_TOP_K,
        }
    }
}

impl FileGenerationConfig {
    /// Convert to validated settings. An out-of-range value is reported as a
    /// configuration error naming the offending field.
    pub fn to_settings(&self) -> Result<GenerationSettings, ConfigIssue> {
        GenerationSettings::new(
            self.temperature,
            self.max_output_tokens,
            self.top_p,
            self.top_k,
        )
        .map_err(|e| {
            let field = match e {
                SettingsError::Temperature(_) => "generation.temperature",
                SettingsError::MaxOutputTokens => "generation.max_output_tokens",
                SettingsError::TopP(_) => "generation.top_p",
                SettingsError::TopK => "generation.top_k",
            };
            ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: field.to_string(),
                },
                format!("{field}: {e}"),
            )
        })
    }
}
