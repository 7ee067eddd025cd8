//! Tool call extraction
//!
//! Turns a raw [`ResponseTurn`] into validated-by-name [`ToolInvocation`]s.
//!
//! Tolerated shapes:
//! - no candidates / no content / no parts → zero invocations
//! - function call without a name (or a blank one) → skipped
//! - `args` absent or `null` → empty mapping
//! - `args` as a JSON-encoded object string → parsed
//!
//! Rejected:
//! - a name that is not in the catalog → [`ExtractError::UnknownTool`]
//! - `args` that cannot be read as a mapping → [`ExtractError::MalformedArguments`]

use super::response::ResponseTurn;
use crate::tool::catalog::ToolCatalog;
use crate::tool::invocation::ToolInvocation;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Model requested unknown tool: {0}")]
    UnknownTool(String),

    #[error("Model sent malformed arguments for tool '{0}'")]
    MalformedArguments(String),
}

/// Extracts tool invocations from model responses against a catalog.
pub struct ToolCallExtractor<'a> {
    catalog: &'a ToolCatalog,
}

impl<'a> ToolCallExtractor<'a> {
    pub fn new(catalog: &'a ToolCatalog) -> Self {
        Self { catalog }
    }

    /// Invocations requested by `response`, in request order.
    pub fn extract(&self, response: &ResponseTurn) -> Result<Vec<ToolInvocation>, ExtractError> {
        let mut invocations = Vec::new();

        for call in response.function_calls() {
            let Some(name) = call.tool_name() else {
                warn!("Skipping function call without a tool name");
                continue;
            };

            if !self.catalog.contains(name) {
                return Err(ExtractError::UnknownTool(name.to_string()));
            }

            let arguments = normalize_arguments(call.args.as_ref())
                .ok_or_else(|| ExtractError::MalformedArguments(name.to_string()))?;

            invocations.push(ToolInvocation::new(name, arguments));
        }

        Ok(invocations)
    }
}

fn normalize_arguments(args: Option<&Value>) -> Option<Map<String, Value>> {
    match args {
        None | Some(Value::Null) => Some(Map::new()),
        Some(Value::Object(map)) => Some(map.clone()),
        Some(Value::String(raw)) if raw.trim().is_empty() => Some(Map::new()),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        Some(_) => None,
    }
}
