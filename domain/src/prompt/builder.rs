//! Prompt composition: instruction text plus serialized context.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Separator placed between the instruction and the serialized context.
pub const CONTEXT_DELIMITER: &str = "\n\nContext:\n";

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt context could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Prompt context must be a mapping, got {0}")]
    NotAMapping(&'static str),
}

/// Composes prompts. Pure; holds no state.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Append `context` to `instruction` under [`CONTEXT_DELIMITER`].
    ///
    /// The context is rendered with sorted keys and two-space indentation,
    /// non-ASCII characters are kept as-is. An empty mapping leaves the
    /// instruction untouched.
    pub fn build<C: Serialize + ?Sized>(instruction: &str, context: &C) -> Result<String, PromptError> {
        // serde_json's Map is ordered by key, which gives a stable rendering
        let value = serde_json::to_value(context)?;
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Err(PromptError::NotAMapping("null")),
            Value::Bool(_) => return Err(PromptError::NotAMapping("boolean")),
            Value::Number(_) => return Err(PromptError::NotAMapping("number")),
            Value::String(_) => return Err(PromptError::NotAMapping("string")),
            Value::Array(_) => return Err(PromptError::NotAMapping("array")),
        };

        if map.is_empty() {
            return Ok(instruction.to_string());
        }

        let rendered = serde_json::to_string_pretty(&map)?;
        Ok(format!("{instruction}{CONTEXT_DELIMITER}{rendered}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_empty_context_returns_instruction() {
        let prompt = PromptBuilder::build("Olá", &json!({})).unwrap();
        assert_eq!(prompt, "Olá");
    }

    #[test]
    fn test_context_is_sorted_and_indented() {
        let prompt = PromptBuilder::build(
            "Liste a agenda",
            &json!({"session_id": "s1", "intent": "consultar_agenda", "parameters": {"b": 1, "a": 2}}),
        )
        .unwrap();

        let expected = "Liste a agenda\n\nContext:\n{\n  \"intent\": \"consultar_agenda\",\n  \"parameters\": {\n    \"a\": 2,\n    \"b\": 1\n  },\n  \"session_id\": \"s1\"\n}";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_non_ascii_preserved() {
        let prompt = PromptBuilder::build("x", &json!({"cliente": "João"})).unwrap();
        assert!(prompt.contains("\"cliente\": \"João\""));
    }

    #[test]
    fn test_deterministic_for_hash_maps() {
        let mut ctx = HashMap::new();
        for (i, key) in ["zeta", "alpha", "mid", "beta"].iter().enumerate() {
            ctx.insert(*key, i);
        }
        let first = PromptBuilder::build("p", &ctx).unwrap();
        for _ in 0..5 {
            assert_eq!(PromptBuilder::build("p", &ctx).unwrap(), first);
        }
        assert!(first.find("alpha").unwrap() < first.find("zeta").unwrap());
    }

    #[test]
    fn test_non_mapping_context_rejected() {
        assert!(matches!(
            PromptBuilder::build("p", &json!([1, 2])),
            Err(PromptError::NotAMapping("array"))
        ));
        assert!(matches!(
            PromptBuilder::build("p", "text"),
            Err(PromptError::NotAMapping("string"))
        ));
    }

    #[test]
    fn test_unserializable_context_rejected() {
        // JSON object keys must be strings
        let mut ctx = HashMap::new();
        ctx.insert(vec![1u8], "v");
        assert!(matches!(
            PromptBuilder::build("p", &ctx),
            Err(PromptError::Serialization(_))
        ));
    }
}
