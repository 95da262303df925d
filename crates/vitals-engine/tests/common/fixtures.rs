//! Shared capture builders for engine integration tests
//!
//! Builds small but structurally faithful traces and devtools logs: a
//! `TracingStartedInBrowser` frame table, a main-frame `navigationStart`,
//! optional paint candidates, and a protocol log whose top-level navigation
//! anchors to the trace's main frame.

use serde_json::json;
use shared_trace::{DevtoolsLog, DevtoolsMessage, Trace, TraceEvent};
use vitals_engine::Artifacts;

/// Route engine logs to the test writer. Safe to call from every test; only
/// the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub const MAIN_FRAME_ID: &str = "3EFC2700D7BC3F4734CAF2FEAAEDF1B5";
pub const MAIN_PID: u64 = 92_015;

/// Absolute trace timestamp of the audited navigation, in microseconds.
pub const NAVIGATION_START_US: i64 = 225_414_172_015;

pub const CHROME_60_UA: &str =
    "Mozilla/5.0 (Linux; Android 7.0) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/60.0.3112.78 Mobile Safari/537.36";
pub const CHROME_78_UA: &str =
    "Mozilla/5.0 (Linux; Android 7.0) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/78.0.3904.70 Mobile Safari/537.36";
pub const CHROME_83_UA: &str =
    "Mozilla/5.0 (Linux; Android 7.0) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/83.0.4103.116 Mobile Safari/537.36";

pub fn trace_event(name: &str, ts: i64, args: serde_json::Value) -> TraceEvent {
    TraceEvent {
        pid: MAIN_PID,
        tid: 1,
        ph: "I".to_string(),
        cat: "loading".to_string(),
        name: name.to_string(),
        ts,
        args,
        dur: None,
    }
}

fn tracing_started() -> TraceEvent {
    trace_event(
        "TracingStartedInBrowser",
        NAVIGATION_START_US - 5_000,
        json!({"data": {"frames": [
            {"frame": MAIN_FRAME_ID, "url": "https://paulirish.com/", "processId": MAIN_PID}
        ]}}),
    )
}

fn navigation_start() -> TraceEvent {
    trace_event(
        "navigationStart",
        NAVIGATION_START_US,
        json!({"data": {
            "frame": MAIN_FRAME_ID,
            "isLoadingMainFrame": true,
            "documentLoaderURL": "https://paulirish.com/"
        }}),
    )
}

/// A trace whose final LCP candidate lands `candidate_offset_us` after
/// navigation start. An earlier, superseded candidate is always present.
pub fn trace_with_lcp(candidate_offset_us: i64) -> Trace {
    Trace::new(vec![
        tracing_started(),
        navigation_start(),
        trace_event(
            "firstContentfulPaint",
            NAVIGATION_START_US + 499_000,
            json!({"data": {"frame": MAIN_FRAME_ID}}),
        ),
        trace_event(
            "largestContentfulPaint::Candidate",
            NAVIGATION_START_US + 499_000,
            json!({"data": {"frame": MAIN_FRAME_ID, "isMainFrame": true, "size": 10}}),
        ),
        trace_event(
            "largestContentfulPaint::Candidate",
            NAVIGATION_START_US + candidate_offset_us,
            json!({"data": {"frame": MAIN_FRAME_ID, "isMainFrame": true, "size": 7292}}),
        ),
    ])
}

/// A trace with navigation markers but no paint candidate events at all,
/// as captured on browsers that predate the instrumentation.
pub fn trace_without_paint_events() -> Trace {
    Trace::new(vec![tracing_started(), navigation_start()])
}

/// A protocol log whose top-level navigation anchors to the trace's main
/// frame, plus one document request.
pub fn devtools_log() -> DevtoolsLog {
    let navigation_ms = NAVIGATION_START_US as f64 / 1000.0;
    DevtoolsLog::new(vec![
        DevtoolsMessage {
            method: "Page.frameStartedLoading".to_string(),
            params: json!({"frameId": MAIN_FRAME_ID}),
            timestamp_millis: Some(navigation_ms - 2.0),
        },
        DevtoolsMessage {
            method: "Page.frameNavigated".to_string(),
            params: json!({"frame": {"id": MAIN_FRAME_ID, "url": "https://paulirish.com/"}}),
            timestamp_millis: Some(navigation_ms),
        },
        DevtoolsMessage {
            method: "Network.requestWillBeSent".to_string(),
            params: json!({"requestId": "1000.1",
                           "request": {"url": "https://paulirish.com/"}}),
            timestamp_millis: Some(navigation_ms + 1.5),
        },
        DevtoolsMessage {
            method: "Network.loadingFinished".to_string(),
            params: json!({"requestId": "1000.1"}),
            timestamp_millis: Some(navigation_ms + 210.0),
        },
    ])
}

pub fn artifacts(trace: Trace, tested_as_mobile: bool, user_agent: &str) -> Artifacts {
    Artifacts::new(trace, devtools_log(), tested_as_mobile, user_agent)
}
