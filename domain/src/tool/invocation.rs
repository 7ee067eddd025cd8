//! Tool invocation value object

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A model's request to execute one tool with concrete arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: Map<String, Value>,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Argument as a string slice, if present and a JSON string.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(Value::as_str)
    }
}
