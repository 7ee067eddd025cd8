//! JSONL file writer for conversation events.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying `type` and
//! `timestamp` next to the payload fields. The file is opened in append mode
//! so that transcripts survive server restarts.

use agendai_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL conversation logger that writes one JSON object per line.
///
/// Shared by every concurrent request; lines are written whole under a
/// `Mutex<BufWriter<File>>` and flushed immediately.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) the log at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Like [`open`](Self::open), but logs the failure and returns `None`.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(logger) => Some(logger),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not open conversation log"
                );
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ConversationEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        match event.payload {
            Value::Object(mut map) => {
                map.insert("type".to_string(), Value::String(event.event_type.to_string()));
                map.insert("timestamp".to_string(), Value::String(timestamp));
                Value::Object(map)
            }
            other => json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": other,
            }),
        }
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{line}");
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversations.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new(
            "prompt",
            json!({
                "session": "sess-1",
                "intent": "consultar_agenda",
                "text": "Consulte a agenda"
            }),
        ));
        logger.log(ConversationEvent::new(
            "tool_call",
            json!({
                "session": "sess-1",
                "tool": "list_calendar_events",
                "args": {"professional_id": "prof123"}
            }),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line["timestamp"].is_string());
        }
        assert_eq!(lines[0]["type"], "prompt");
        assert_eq!(lines[0]["intent"], "consultar_agenda");
        assert_eq!(lines[1]["type"], "tool_call");
        assert_eq!(lines[1]["args"]["professional_id"], "prof123");
    }

    #[test]
    fn test_non_object_payload_goes_under_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new("note", json!("just a string")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "just a string");
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("c.jsonl");

        for session in ["a", "b"] {
            let logger = JsonlConversationLogger::open(&path).unwrap();
            logger.log(ConversationEvent::new("reply", json!({ "session": session })));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["session"], "a");
        assert_eq!(lines[1]["session"], "b");
    }

    #[test]
    fn test_new_returns_none_when_path_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlConversationLogger::new(dir.path()).is_none());
    }
}
