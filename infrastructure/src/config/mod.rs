//! Configuration file loading for agendai
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GOOGLE_CLOUD_PROJECT` and `AGENDAI_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./agendai.toml` or `./.agendai.toml`
//! 4. Global: `~/.config/agendai/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileDispatchConfig, FileGenerationConfig, FileLoggingConfig, FileModelConfig,
    FileWebhookConfig, ModelBackend,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_ENV};
