//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain/application types
//! where the rest of the program needs them.

mod dispatch;
mod generation;
mod logging;
mod model;
mod webhook;

pub use dispatch::FileDispatchConfig;
pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use model::{FileModelConfig, ModelBackend};
pub use webhook::FileWebhookConfig;

use agendai_application::ExecutionParams;
use agendai_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model endpoint and credentials
    pub model: FileModelConfig,
    /// Sampling parameters
    pub generation: FileGenerationConfig,
    /// Tool loop bounds
    pub dispatch: FileDispatchConfig,
    /// HTTP webhook server
    pub webhook: FileWebhookConfig,
    /// Log outputs
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.model.validate());
        issues.extend(self.generation.to_settings().err());
        issues.extend(self.dispatch.validate());
        issues.extend(self.webhook.validate());
        issues
    }

    /// Request handling parameters for the use case.
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_iterations(self.dispatch.max_iterations)
            .with_request_timeout(self.dispatch.deadline())
            .with_parallel_batches(self.dispatch.parallel_batches)
            .with_default_professional_id(self.webhook.default_professional_id.trim())
    }
}
