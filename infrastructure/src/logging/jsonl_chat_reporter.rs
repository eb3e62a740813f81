//! JSONL transcript of recorded phase results.
//!
//! Each [`ChatMessage`] becomes one JSON line with `type` and `timestamp`
//! fields merged into the message body, appended through a buffered writer.

use edrr_application::{ChatMessage, ChatReporter};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

const EVENT_TYPE: &str = "phase_result";

/// Chat reporter that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlChatReporter {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlChatReporter {
    /// Create a reporter writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create reasoning log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create reasoning log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(message: &ChatMessage) -> Option<Value> {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let Value::Object(mut map) = serde_json::to_value(message).ok()? else {
            return None;
        };
        map.insert("type".to_string(), Value::String(EVENT_TYPE.to_string()));
        map.insert("timestamp".to_string(), Value::String(timestamp));
        Some(Value::Object(map))
    }
}

impl ChatReporter for JsonlChatReporter {
    fn display(&self, message: &ChatMessage) {
        let Some(record) = Self::record(message) else {
            warn!(change_id = message.change_id.as_str(), "Could not serialize phase result");
            return;
        };
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // Append-only; flush each line so a crash loses at most one record
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlChatReporter {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edrr_domain::EdrrPhase;

    fn message(phase: EdrrPhase, failure: Option<&str>) -> ChatMessage {
        ChatMessage {
            change_id: "change-1".to_string(),
            phase: if failure.is_some() {
                EdrrPhase::Retrospect
            } else {
                phase
            },
            attempted_in: phase,
            primus: Some("explorer".to_string()),
            consensus_reached: failure.is_none(),
            synthesis: "ship it behind a flag".to_string(),
            failure_reason: failure.map(str::to_string),
            disciplines: vec!["security".to_string(), "performance".to_string()],
            record_id: "rec-1".to_string(),
        }
    }

    #[test]
    fn test_writes_one_line_per_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("reasoning.jsonl");
        let reporter = JsonlChatReporter::new(&path).unwrap();
        assert_eq!(reporter.path(), path.as_path());

        reporter.display(&message(EdrrPhase::Expand, None));
        reporter.display(&message(EdrrPhase::Refine, Some("security veto")));
        drop(reporter);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "phase_result");
        assert!(first["timestamp"].as_str().unwrap().ends_with('Z'));
        assert_eq!(first["phase"], "EXPAND");
        assert_eq!(first["consensus_reached"], true);
        assert_eq!(first["primus"], "explorer");

        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["phase"], "RETROSPECT");
        assert_eq!(second["attempted_in"], "REFINE");
        assert_eq!(second["failure_reason"], "security veto");
    }

    #[test]
    fn test_returns_none_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        assert!(JsonlChatReporter::new(blocker.join("reasoning.jsonl")).is_none());
    }
}
