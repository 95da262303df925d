//! Raw trace to [`ProcessedTrace`] transform

use shared_trace::{Trace, TraceEvent};
use tracing::debug;

use crate::error::MetricError;

/// Top-level marker Chrome emits when tracing starts; carries the frame tree.
pub const TRACING_STARTED_EVENT: &str = "TracingStartedInBrowser";

/// Navigation anchor event on the main frame.
pub const NAVIGATION_START_EVENT: &str = "navigationStart";

/// Paint-adjacent event names retained for metric extraction.
const PAINT_EVENT_NAMES: &[&str] = &[
    "largestContentfulPaint::Candidate",
    "largestContentfulPaint::Invalidate",
    "firstContentfulPaint",
    "firstPaint",
];

/// A paint/metric candidate event, reduced to what extraction needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintEvent {
    pub name: String,
    /// Timestamp in microseconds on the trace clock
    pub ts_us: i64,
    /// Frame the event was attributed to, when instrumentation recorded one
    pub frame: Option<String>,
    pub is_main_frame: bool,
}

/// Structured view of one trace, owned by the processor and consumed
/// read-only downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedTrace {
    pub main_frame_pid: u64,
    pub main_frame_id: String,
    /// Timestamp of the final main-frame `navigationStart`, in microseconds.
    /// All trace-local times are expressed relative to this origin.
    pub navigation_start_us: i64,
    /// Paint/metric candidates, ordered by timestamp ascending
    pub paint_events: Vec<PaintEvent>,
}

impl ProcessedTrace {
    /// Convert an absolute trace timestamp to milliseconds past the origin.
    pub fn to_local_ms(&self, ts_us: i64) -> f64 {
        (ts_us - self.navigation_start_us) as f64 / 1000.0
    }

    /// Resolve the final candidate for a metric: later candidates supersede
    /// earlier ones, and an invalidation event clears everything before it.
    /// Returns the surviving candidate's absolute timestamp in microseconds.
    pub fn final_candidate(
        &self,
        candidate_name: &str,
        invalidate_name: Option<&str>,
        main_frame_only: bool,
    ) -> Option<i64> {
        let mut latest = None;
        for event in &self.paint_events {
            if event.name == candidate_name {
                if main_frame_only && !event.is_main_frame {
                    continue;
                }
                latest = Some(event.ts_us);
            } else if invalidate_name == Some(event.name.as_str()) {
                latest = None;
            }
        }
        latest
    }
}

/// Parse a raw trace into its structured view.
///
/// # Errors
///
/// Returns [`MetricError::NoMainFrameTrace`] when the trace lacks an
/// identifiable main-frame navigation.
pub fn process_trace(trace: &Trace) -> Result<ProcessedTrace, MetricError> {
    let (main_frame_id, main_frame_pid) = find_main_frame(trace)?;
    debug!(
        "identified main frame {} in process {}",
        main_frame_id, main_frame_pid
    );

    // Instrumentation emits one navigationStart per redirect/reload; the last
    // one on the main frame anchors the audited load.
    let navigation_start = trace
        .trace_events
        .iter()
        .filter(|event| event.name == NAVIGATION_START_EVENT && event.pid == main_frame_pid)
        .filter(|event| match event.frame() {
            Some(frame) => frame == main_frame_id,
            None => is_loading_main_frame(event),
        })
        .max_by_key(|event| event.ts)
        .ok_or(MetricError::NoMainFrameTrace)?;

    let mut paint_events: Vec<PaintEvent> = trace
        .trace_events
        .iter()
        .filter(|event| PAINT_EVENT_NAMES.contains(&event.name.as_str()))
        .map(|event| {
            let frame = event.frame().map(str::to_string);
            let is_main_frame = frame.as_deref() == Some(main_frame_id.as_str())
                || event
                    .arg_data()
                    .and_then(|data| data.get("isMainFrame"))
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
            PaintEvent {
                name: event.name.clone(),
                ts_us: event.ts,
                frame,
                is_main_frame,
            }
        })
        .collect();
    paint_events.sort_by_key(|event| event.ts_us);

    debug!(
        "processed trace: navigation start at {} us, {} paint events",
        navigation_start.ts,
        paint_events.len()
    );

    Ok(ProcessedTrace {
        main_frame_pid,
        main_frame_id,
        navigation_start_us: navigation_start.ts,
        paint_events,
    })
}

/// Identify the main frame and its renderer process.
///
/// Primary signal is the `TracingStartedInBrowser` frame table (the entry
/// without a parent). Traces from older captures may miss it, so fall back to
/// the earliest `navigationStart` flagged as loading the main frame.
fn find_main_frame(trace: &Trace) -> Result<(String, u64), MetricError> {
    for event in &trace.trace_events {
        if event.name != TRACING_STARTED_EVENT {
            continue;
        }
        let frames = event
            .arg_data()
            .and_then(|data| data.get("frames"))
            .and_then(|frames| frames.as_array());
        let Some(frames) = frames else { continue };
        for frame in frames {
            if frame.get("parent").is_some() {
                continue;
            }
            let id = frame.get("frame").and_then(|v| v.as_str());
            let pid = frame.get("processId").and_then(|v| v.as_u64());
            if let (Some(id), Some(pid)) = (id, pid) {
                return Ok((id.to_string(), pid));
            }
        }
    }

    trace
        .trace_events
        .iter()
        .filter(|event| event.name == NAVIGATION_START_EVENT && is_loading_main_frame(event))
        .min_by_key(|event| event.ts)
        .and_then(|event| event.frame().map(|frame| (frame.to_string(), event.pid)))
        .ok_or(MetricError::NoMainFrameTrace)
}

fn is_loading_main_frame(event: &TraceEvent) -> bool {
    event
        .arg_data()
        .and_then(|data| data.get("isLoadingMainFrame"))
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}
