//! Dispatch configuration from TOML (`[dispatch]` section)

use agendai_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest time Dialogflow CX waits for a webhook answer
const WEBHOOK_TIMEOUT_LIMIT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDispatchConfig {
    /// Maximum tool rounds per request
    pub max_iterations: usize,
    /// Deadline for a whole request in seconds (0 disables it)
    pub deadline_secs: u64,
    /// Run the invocations of one batch concurrently
    pub parallel_batches: bool,
}

impl Default for FileDispatchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            deadline_secs: 25,
            parallel_batches: false,
        }
    }
}

impl FileDispatchConfig {
    pub fn deadline(&self) -> Option<Duration> {
        (self.deadline_secs > 0).then(|| Duration::from_secs(self.deadline_secs))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.max_iterations == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "dispatch.max_iterations".to_string(),
                },
                "dispatch.max_iterations must be at least 1",
            ));
        }
        if self.deadline_secs == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "dispatch.deadline_secs".to_string(),
                },
                "dispatch.deadline_secs is 0: requests have no deadline",
            ));
        } else if self.deadline_secs > WEBHOOK_TIMEOUT_LIMIT_SECS {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "dispatch.deadline_secs".to_string(),
                },
                format!(
                    "dispatch.deadline_secs is {}s: Dialogflow stops waiting after {WEBHOOK_TIMEOUT_LIMIT_SECS}s",
                    self.deadline_secs
                ),
            ));
        }
        issues
    }
}
