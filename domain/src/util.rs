//! Shared utility functions.

use serde_json::Value;

/// Truncate a string to at most `max_bytes` without splitting a UTF-8
/// character. Used for log previews of prompts and replies.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Render a JSON value for inclusion in human-readable text.
///
/// Strings are unquoted, arrays are joined with ", ", `null` is empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_str("agenda", 10), "agenda");
        assert_eq!(truncate_str("", 10), "");
    }

    #[test]
    fn truncate_backs_up_to_char_boundary() {
        // 'ç' and 'ã' are 2 bytes each
        let s = "cançã";
        assert_eq!(truncate_str(s, 3), "can");
        assert_eq!(truncate_str(s, 4), "can");
        assert_eq!(truncate_str(s, 5), "canç");
    }

    #[test]
    fn display_scalars() {
        assert_eq!(display_value(&json!("09:00")), "09:00");
        assert_eq!(display_value(&json!(24)), "24");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&Value::Null), "");
    }

    #[test]
    fn display_arrays_and_objects() {
        assert_eq!(display_value(&json!(["segunda", "terça"])), "segunda, terça");
        assert_eq!(display_value(&json!({"a": 1})), "{\"a\":1}");
    }
}
