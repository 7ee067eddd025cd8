//! Argument validation against a tool schema.
//!
//! Runs before any invocation reaches an executor. Model output is untrusted:
//! missing required fields, values outside an enumeration, wrongly typed values
//! and undeclared parameters are all rejected.

use super::schema::{ParameterKind, ToolSchema};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reasons an invocation's arguments are rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool '{tool}' is missing required parameter '{parameter}'")]
    MissingRequired { tool: String, parameter: String },

    #[error("Tool '{tool}' does not declare parameter '{parameter}'")]
    UnknownParameter { tool: String, parameter: String },

    #[error("Tool '{tool}' parameter '{parameter}' must be {expected}")]
    InvalidType {
        tool: String,
        parameter: String,
        expected: String,
    },

    #[error("Tool '{tool}' parameter '{parameter}' has value '{value}', expected one of [{}]", .allowed.join(", "))]
    NotAllowed {
        tool: String,
        parameter: String,
        value: String,
        allowed: Vec<String>,
    },
}

/// Validate `arguments` against `schema`.
///
/// A `null` value counts as absent: it fails a required parameter and is
/// accepted for an optional one.
pub fn validate_arguments(schema: &ToolSchema, arguments: &Map<String, Value>) -> Result<(), ArgumentError> {
    for required in &schema.required {
        match arguments.get(required) {
            None | Some(Value::Null) => {
                return Err(ArgumentError::MissingRequired {
                    tool: schema.name.clone(),
                    parameter: required.clone(),
                });
            }
            Some(_) => {}
        }
    }

    for (key, value) in arguments {
        let Some(param) = schema.parameter(key) else {
            return Err(ArgumentError::UnknownParameter {
                tool: schema.name.clone(),
                parameter: key.clone(),
            });
        };
        if value.is_null() {
            continue;
        }
        check_kind(&schema.name, key, &param.kind, value)?;
    }

    Ok(())
}

fn check_kind(tool: &str, parameter: &str, kind: &ParameterKind, value: &Value) -> Result<(), ArgumentError> {
    let type_ok = match kind {
        ParameterKind::String | ParameterKind::Enum { .. } => value.is_string(),
        ParameterKind::Object => value.is_object(),
        ParameterKind::Number => value.is_number(),
        // JSON transports often encode whole numbers as floats (3.0)
        ParameterKind::Integer => value.as_f64().is_some_and(|f| f.fract() == 0.0),
        ParameterKind::Boolean => value.is_boolean(),
    };
    if !type_ok {
        return Err(ArgumentError::InvalidType {
            tool: tool.to_string(),
            parameter: parameter.to_string(),
            expected: kind.json_type().to_string(),
        });
    }

    if let (ParameterKind::Enum { values }, Some(s)) = (kind, value.as_str())
        && !values.iter().any(|v| v == s)
    {
        return Err(ArgumentError::NotAllowed {
            tool: tool.to_string(),
            parameter: parameter.to_string(),
            value: s.to_string(),
            allowed: values.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::schema::ParameterSpec;
    use serde_json::json;

    fn schema() -> ToolSchema {
        ToolSchema::new("create_calendar_event", "Create event")
            .with_required(ParameterSpec::string("professional_id", "Owner"))
            .with_required(ParameterSpec::string("summary", "Title"))
            .with_required(ParameterSpec::enumeration(
                "status",
                "Status",
                ["pending", "confirmed"],
            ))
            .with_parameter(ParameterSpec::string("client_email", "Email"))
            .with_parameter(ParameterSpec::new("slots", "Count", ParameterKind::Integer))
            .with_parameter(ParameterSpec::object("extra", "Extra data"))
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_valid_arguments() {
        let a = args(json!({
            "professional_id": "prof123",
            "summary": "Corte - Ana",
            "status": "pending",
            "slots": 2.0,
            "extra": {"k": 1},
            "client_email": null
        }));
        assert!(validate_arguments(&schema(), &a).is_ok());
    }

    #[test]
    fn test_missing_required() {
        let a = args(json!({"professional_id": "prof123", "status": "pending"}));
        assert_eq!(
            validate_arguments(&schema(), &a),
            Err(ArgumentError::MissingRequired {
                tool: "create_calendar_event".to_string(),
                parameter: "summary".to_string(),
            })
        );
    }

    #[test]
    fn test_null_required_counts_as_missing() {
        let a = args(json!({"professional_id": null, "summary": "x", "status": "pending"}));
        assert!(matches!(
            validate_arguments(&schema(), &a),
            Err(ArgumentError::MissingRequired { parameter, .. }) if parameter == "professional_id"
        ));
    }

    #[test]
    fn test_enum_violation() {
        let a = args(json!({"professional_id": "p", "summary": "x", "status": "maybe"}));
        let err = validate_arguments(&schema(), &a).unwrap_err();
        assert!(matches!(err, ArgumentError::NotAllowed { ref value, .. } if value == "maybe"));
        assert!(err.to_string().contains("pending, confirmed"));
    }

    #[test]
    fn test_type_mismatch() {
        let a = args(json!({"professional_id": 42, "summary": "x", "status": "pending"}));
        assert!(matches!(
            validate_arguments(&schema(), &a),
            Err(ArgumentError::InvalidType { parameter, .. }) if parameter == "professional_id"
        ));

        let a = args(json!({"professional_id": "p", "summary": "x", "status": "pending", "slots": 1.5}));
        assert!(matches!(
            validate_arguments(&schema(), &a),
            Err(ArgumentError::InvalidType { parameter, .. }) if parameter == "slots"
        ));
    }

    #[test]
    fn test_undeclared_parameter() {
        let a = args(json!({"professional_id": "p", "summary": "x", "status": "pending", "phone": "555"}));
        assert!(matches!(
            validate_arguments(&schema(), &a),
            Err(ArgumentError::UnknownParameter { parameter, .. }) if parameter == "phone"
        ));
    }
}
