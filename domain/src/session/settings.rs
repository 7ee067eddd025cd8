//! Generation settings value object

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("temperature must be within [0, 1], got {0}")]
    Temperature(f32),

    #[error("max_output_tokens must be greater than 0")]
    MaxOutputTokens,

    #[error("top_p must be within (0, 1], got {0}")]
    TopP(f32),

    #[error("top_k must be at least 1")]
    TopK,
}

/// Sampling parameters sent with every model request of a session.
///
/// Validated on construction and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationSettings {
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
    top_k: u32,
}

impl GenerationSettings {
    pub const DEFAULT_TEMPERATURE: f32 = 0.2;
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;
    pub const DEFAULT_TOP_P: f32 = 0.8;
    pub const DEFAULT_TOP_K: u32 = 40;

    pub fn new(
        temperature: f32,
        max_output_tokens: u32,
        top_p: f32,
        top_k: u32,
    ) -> Result<Self, SettingsError> {
        if !(0.0..=1.0).contains(&temperature) {
            return Err(SettingsError::Temperature(temperature));
        }
        if max_output_tokens == 0 {
            return Err(SettingsError::MaxOutputTokens);
        }
        if !(top_p > 0.0 && top_p <= 1.0) {
            return Err(SettingsError::TopP(top_p));
        }
        if top_k == 0 {
            return Err(SettingsError::TopK);
        }
        Ok(Self {
            temperature,
            max_output_tokens,
            top_p,
            top_k,
        })
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn top_p(&self) -> f32 {
        self.top_p
    }

    pub fn top_k(&self) -> u32 {
        self.top_k
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: Self::DEFAULT_TEMPERATURE,
            max_output_tokens: Self::DEFAULT_MAX_OUTPUT_TOKENS,
            top_p: Self::DEFAULT_TOP_P,
            top_k: Self::DEFAULT_TOP_K,
        }
    }
}
