//! Chrome trace-event interchange format
//!
//! A trace is an ordered recording of process/thread-scoped events emitted by
//! the browser during a page load. Chrome writes traces either as an object
//! with a `traceEvents` array or as a bare array of events; [`Trace::from_str`]
//! accepts both.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single raw trace event.
///
/// Timestamps are microseconds on the browser's monotonic clock. Events are
/// immutable after parse; the engine never rewrites a capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Process id that emitted the event
    pub pid: u64,
    /// Thread id that emitted the event
    pub tid: u64,
    /// Event phase (`I` instant, `X` complete, `b`/`e` async, ...)
    pub ph: String,
    /// Comma-separated category list
    #[serde(default)]
    pub cat: String,
    /// Event name, e.g. `navigationStart`
    pub name: String,
    /// Timestamp in microseconds
    pub ts: i64,
    /// Event payload; shape varies per event name
    #[serde(default)]
    pub args: serde_json::Value,
    /// Duration in microseconds, for complete (`X`) events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dur: Option<i64>,
}

impl TraceEvent {
    /// The `args.data` payload most instrumentation events carry.
    pub fn arg_data(&self) -> Option<&serde_json::Value> {
        self.args.get("data")
    }

    /// The frame id recorded in `args.data.frame`, when present.
    pub fn frame(&self) -> Option<&str> {
        self.arg_data()?.get("frame")?.as_str()
    }
}

/// A complete event trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "traceEvents")]
    pub trace_events: Vec<TraceEvent>,
}

/// The two on-disk shapes Chrome produces.
#[derive(Deserialize)]
#[serde(untagged)]
enum TraceFile {
    Object {
        #[serde(rename = "traceEvents")]
        trace_events: Vec<TraceEvent>,
    },
    Array(Vec<TraceEvent>),
}

impl Trace {
    pub fn new(trace_events: Vec<TraceEvent>) -> Self {
        Self { trace_events }
    }

    /// Parse a trace from JSON, accepting both the `{"traceEvents": [...]}`
    /// object form and the bare-array form.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or matches neither shape.
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let file: TraceFile =
            serde_json::from_str(s).context("Failed to parse trace-event JSON")?;
        let trace_events = match file {
            TraceFile::Object { trace_events } => trace_events,
            TraceFile::Array(trace_events) => trace_events,
        };
        Ok(Self { trace_events })
    }

    /// Load a trace from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace file: {}", path.display()))?;
        Self::from_str(&content)
    }
}
