//! Recorded devtools protocol traffic
//!
//! A devtools log is the ordered sequence of protocol messages (navigation
//! lifecycle, network lifecycle) exchanged with the browser while a capture
//! ran. The recorder stamps each message with a wall-clock timestamp in
//! milliseconds so the log can later be aligned to the trace's clock.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single captured protocol message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevtoolsMessage {
    /// Protocol method, e.g. `Page.frameNavigated`
    pub method: String,
    /// Method parameters; shape varies per method
    #[serde(default)]
    pub params: serde_json::Value,
    /// Recorder-attached timestamp in milliseconds. Older recorders omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_millis: Option<f64>,
}

impl DevtoolsMessage {
    /// The frame object carried by `Page.frameNavigated` messages.
    pub fn frame(&self) -> Option<&serde_json::Value> {
        self.params.get("frame")
    }
}

/// An ordered protocol-message log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DevtoolsLog {
    pub messages: Vec<DevtoolsMessage>,
}

impl DevtoolsLog {
    pub fn new(messages: Vec<DevtoolsMessage>) -> Self {
        Self { messages }
    }

    /// Parse a log from a JSON array of messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        serde_json::from_str(s).context("Failed to parse devtools log JSON")
    }

    /// Load a log from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read devtools log: {}", path.display()))?;
        Self::from_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_log() {
        let json = r#"[
            {"method": "Page.frameStartedLoading", "params": {"frameId": "F1"},
             "timestampMillis": 100.5},
            {"method": "Page.frameNavigated",
             "params": {"frame": {"id": "F1", "url": "https://example.com/"}},
             "timestampMillis": 101.0}
        ]"#;

        let log = DevtoolsLog::from_str(json).unwrap();
        assert_eq!(log.messages.len(), 2);
        assert_eq!(log.messages[0].method, "Page.frameStartedLoading");
        assert_eq!(log.messages[1].timestamp_millis, Some(101.0));
        assert_eq!(
            log.messages[1].frame().and_then(|f| f.get("id")).and_then(|v| v.as_str()),
            Some("F1")
        );
    }

    #[test]
    fn test_parse_message_without_timestamp() {
        let json = r#"[{"method": "Network.loadingFinished", "params": {"requestId": "1"}}]"#;
        let log = DevtoolsLog::from_str(json).unwrap();
        assert_eq!(log.messages[0].timestamp_millis, None);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(DevtoolsLog::from_str("{\"method\": \"x\"}").is_err());
    }
}
