//! Conversation turns

use super::response::ResponseTurn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Caller,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Caller => "caller",
            Role::Model => "model",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a session's append-only history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversationTurn {
    /// Instruction sent by the caller. `context` is kept for logging; the
    /// text already embeds its serialized form.
    Prompt {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<Value>,
    },
    /// Result of executing one requested tool
    ToolResult { tool_name: String, payload: Value },
    /// Model output
    Response(ResponseTurn),
}

impl ConversationTurn {
    pub fn prompt(text: impl Into<String>) -> Self {
        ConversationTurn::Prompt {
            text: text.into(),
            context: None,
        }
    }

    pub fn tool_result(tool_name: impl Into<String>, payload: Value) -> Self {
        ConversationTurn::ToolResult {
            tool_name: tool_name.into(),
            payload,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            ConversationTurn::Prompt { .. } | ConversationTurn::ToolResult { .. } => Role::Caller,
            ConversationTurn::Response(_) => Role::Model,
        }
    }

    pub fn as_response(&self) -> Option<&ResponseTurn> {
        match self {
            ConversationTurn::Response(r) => Some(r),
            _ => None,
        }
    }
}
