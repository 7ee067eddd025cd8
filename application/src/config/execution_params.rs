//! Execution parameters — request handling control.
//!
//! [`ExecutionParams`] groups the static parameters that control how one
//! webhook request is served by
//! [`HandleIntentUseCase`](crate::use_cases::handle_intent::HandleIntentUseCase).

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum tool rounds before the request fails.
    pub max_iterations: usize,
    /// Deadline for the whole request (model calls and tool calls).
    pub request_timeout: Option<Duration>,
    /// Execute the invocations of one batch concurrently.
    pub parallel_batches: bool,
    /// Professional used when the request does not carry `professional_id`.
    pub default_professional_id: String,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            request_timeout: Some(Duration::from_secs(25)),
            parallel_batches: false,
            default_professional_id: "prof123".to_string(),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_parallel_batches(mut self, enabled: bool) -> Self {
        self.parallel_batches = enabled;
        self
    }

    pub fn with_default_professional_id(mut self, id: impl Into<String>) -> Self {
        self.default_professional_id = id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.max_iterations, 5);
        assert_eq!(params.request_timeout, Some(Duration::from_secs(25)));
        assert!(!params.parallel_batches);
        assert_eq!(params.default_professional_id, "prof123");
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_max_iterations(3)
            .with_request_timeout(None)
            .with_parallel_batches(true)
            .with_default_professional_id("prof9");
        assert_eq!(params.max_iterations, 3);
        assert_eq!(params.request_timeout, None);
        assert!(params.parallel_batches);
        assert_eq!(params.default_professional_id, "prof9");
    }
}
