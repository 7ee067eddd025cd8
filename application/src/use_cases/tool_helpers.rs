//! Shared helpers for tool use cases.

use agendai_domain::ToolInvocation;

/// Extract a short preview string from invocation arguments, for logs.
///
/// Looks for the keys that identify what a scheduling call touches
/// (`event_id`, `summary`, `config_type`, `stat_type`, `action`,
/// `start_date`) first, then falls back to the first string value found.
pub(crate) fn invocation_preview(invocation: &ToolInvocation) -> String {
    let keys = [
        "event_id",
        "summary",
        "config_type",
        "stat_type",
        "action",
        "start_date",
    ];
    for key in &keys {
        if let Some(s) = invocation.get_string(key) {
            return truncate_preview(s, 50);
        }
    }
    for value in invocation.arguments.values() {
        if let Some(s) = value.as_str() {
            return truncate_preview(s, 50);
        }
    }
    String::new()
}

fn truncate_preview(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
