//! Model response turn
//!
//! Mirrors the `generateContent` response shape (candidates → content →
//! parts). Every level is optional on the wire; missing or `null` collections
//! deserialize as empty so that a response never fails to parse merely for
//! being sparse.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One response from the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTurn {
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parts: Vec<Part>,
}

/// A text fragment and/or a function call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

/// A raw function call as the model emitted it. Not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
}

impl FunctionCall {
    /// Trimmed tool name, or `None` if missing or blank.
    pub fn tool_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            function_call: None,
        }
    }

    pub fn function_call(name: impl Into<String>, args: Value) -> Self {
        Self {
            text: None,
            function_call: Some(FunctionCall {
                name: Some(name.into()),
                args: Some(args),
            }),
        }
    }
}

impl ResponseTurn {
    /// Single-candidate response built from parts.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts,
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            model_version: None,
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_parts(vec![Part::text(text)])
    }

    /// Parts of every candidate that carries content, in order.
    ///
    /// Text, tool calls and the replayed model turn are all read through this,
    /// so a call is only answered if the replayed turn also contains it.
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|content| content.parts.iter())
    }

    /// Concatenated text of all parts.
    pub fn text(&self) -> String {
        self.parts().filter_map(|p| p.text.as_deref()).collect()
    }

    /// Every function-call part, in order.
    pub fn function_calls(&self) -> impl Iterator<Item = &FunctionCall> {
        self.parts().filter_map(|p| p.function_call.as_ref())
    }

    /// Names of the calls that carry a usable name, in order.
    pub fn requested_tool_names(&self) -> Vec<String> {
        self.function_calls()
            .filter_map(FunctionCall::tool_name)
            .map(str::to_string)
            .collect()
    }
}
