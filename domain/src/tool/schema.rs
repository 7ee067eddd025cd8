//! Tool schema entities
//!
//! A [`ToolSchema`] is the contract presented to the language model for one
//! callable operation. Parameter constraints are an explicit tagged
//! [`ParameterKind`] so that argument validation can happen before dispatch.

use serde::{Deserialize, Serialize};

/// The value shape a parameter accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterKind {
    /// Free-form string
    String,
    /// String restricted to an enumerated set of values
    Enum { values: Vec<String> },
    /// Arbitrary JSON object
    Object,
    /// Any JSON number
    Number,
    /// Whole number
    Integer,
    /// true / false
    Boolean,
}

impl ParameterKind {
    /// JSON schema type name for this kind.
    pub fn json_type(&self) -> &'static str {
        match self {
            ParameterKind::String | ParameterKind::Enum { .. } => "string",
            ParameterKind::Object => "object",
            ParameterKind::Number => "number",
            ParameterKind::Integer => "integer",
            ParameterKind::Boolean => "boolean",
        }
    }

    /// Allowed values, if this kind is an enumeration.
    pub fn allowed_values(&self) -> Option<&[String]> {
        match self {
            ParameterKind::Enum { values } => Some(values),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterKind::Enum { values } => write!(f, "one of [{}]", values.join(", ")),
            other => write!(f, "{}", other.json_type()),
        }
    }
}

/// Declaration of a single tool parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub description: String,
    pub kind: ParameterKind,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
        }
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParameterKind::String)
    }

    pub fn enumeration<I, S>(name: impl Into<String>, description: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            description,
            ParameterKind::Enum {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn object(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParameterKind::Object)
    }
}

/// Immutable descriptor of a callable tool.
///
/// Parameters keep their declaration order; `required` lists the names that
/// must be present in every invocation. The catalog checks on registration
/// that each required name is declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
    pub required: Vec<String>,
}

impl ToolSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            required: Vec::new(),
        }
    }

    /// Declare an optional parameter.
    pub fn with_parameter(mut self, param: ParameterSpec) -> Self {
        self.parameters.push(param);
        self
    }

    /// Declare a parameter and mark it required.
    pub fn with_required(mut self, param: ParameterSpec) -> Self {
        self.required.push(param.name.clone());
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}
