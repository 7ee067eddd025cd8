//! Tool Executor port
//!
//! Defines the interface for executing the scheduling tools (calendar and
//! spreadsheet operations) the model requests.

use agendai_domain::ToolInvocation;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    #[error("Tool '{0}' is not supported by this executor")]
    Unsupported(String),

    #[error("Tool '{tool}' failed: {message}")]
    Failed { tool: String, message: String },
}

/// Port for tool execution
///
/// Arguments have been validated against the tool schema before `invoke` is
/// called. Failures are returned as-is; retry policy is the adapter's concern.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Execute one invocation and return its JSON result.
    async fn invoke(&self, invocation: &ToolInvocation) -> Result<Value, ExecutorError>;
}
