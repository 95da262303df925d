//! Devtools log to [`CorrelatedLog`] transform

use shared_trace::{DevtoolsLog, DevtoolsMessage};
use tracing::{debug, warn};

use crate::error::MetricError;
use crate::trace::ProcessedTrace;

const FRAME_NAVIGATED_METHOD: &str = "Page.frameNavigated";
const REQUEST_WILL_BE_SENT_METHOD: &str = "Network.requestWillBeSent";
const LOADING_FINISHED_METHOD: &str = "Network.loadingFinished";

/// The navigation that anchors all metric timings. Exactly one per audited
/// page load.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationRecord {
    /// Navigation start in trace-local milliseconds (relative to the trace
    /// time origin). Zero when the protocol log and trace agree exactly.
    pub navigation_start_ms: f64,
    pub frame_id: String,
    pub is_main_frame: bool,
}

/// One network request's lifecycle, aligned to the trace clock.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkRequestRecord {
    pub request_id: String,
    pub url: String,
    pub started_ms: f64,
    pub finished_ms: Option<f64>,
}

/// The correlator's full output.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedLog {
    pub navigation: NavigationRecord,
    /// Milliseconds added to a protocol timestamp to express it on the trace
    /// clock (before rebasing onto the trace-local origin).
    pub clock_offset_ms: f64,
    /// Request records for metric variants that depend on network completion
    pub network_requests: Vec<NetworkRequestRecord>,
}

/// Correlate a protocol log with a processed trace.
///
/// The shared anchor is the top-level navigation itself: the
/// `Page.frameNavigated` message for the trace's main frame, which must carry
/// a recorder timestamp.
///
/// # Errors
///
/// - [`MetricError::NoNavigationStart`] when the log holds no top-level
///   navigation at all.
/// - [`MetricError::UnalignableTimeBases`] when a top-level navigation exists
///   but cannot be anchored to the trace (frame id mismatch, or the message
///   carries no timestamp).
pub fn correlate(
    log: &DevtoolsLog,
    trace: &ProcessedTrace,
) -> Result<CorrelatedLog, MetricError> {
    let top_level_navigations: Vec<&DevtoolsMessage> = log
        .messages
        .iter()
        .filter(|message| message.method == FRAME_NAVIGATED_METHOD)
        .filter(|message| {
            message
                .frame()
                .is_some_and(|frame| frame.get("parentId").is_none())
        })
        .collect();

    if top_level_navigations.is_empty() {
        return Err(MetricError::NoNavigationStart);
    }

    let anchor = top_level_navigations
        .iter()
        .find(|message| frame_id(message) == Some(trace.main_frame_id.as_str()))
        .ok_or(MetricError::UnalignableTimeBases)?;
    let anchor_ms = anchor
        .timestamp_millis
        .ok_or(MetricError::UnalignableTimeBases)?;

    let trace_navigation_abs_ms = trace.navigation_start_us as f64 / 1000.0;
    let clock_offset_ms = trace_navigation_abs_ms - anchor_ms;
    debug!(
        "aligned protocol log to trace clock via frame {} (offset {:.3} ms)",
        trace.main_frame_id, clock_offset_ms
    );

    // Rebase a protocol timestamp onto the trace-local origin.
    let align = |protocol_ms: f64| protocol_ms + clock_offset_ms - trace_navigation_abs_ms;

    let navigation = NavigationRecord {
        navigation_start_ms: align(anchor_ms),
        frame_id: trace.main_frame_id.clone(),
        is_main_frame: true,
    };

    let network_requests = collect_network_requests(log, align);

    Ok(CorrelatedLog {
        navigation,
        clock_offset_ms,
        network_requests,
    })
}

fn collect_network_requests(
    log: &DevtoolsLog,
    align: impl Fn(f64) -> f64,
) -> Vec<NetworkRequestRecord> {
    let mut records: Vec<NetworkRequestRecord> = Vec::new();

    for message in &log.messages {
        match message.method.as_str() {
            REQUEST_WILL_BE_SENT_METHOD => {
                let request_id = message
                    .params
                    .get("requestId")
                    .and_then(|v| v.as_str())
                    .map(str::to_string);
                let url = message
                    .params
                    .get("request")
                    .and_then(|r| r.get("url"))
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                match (request_id, message.timestamp_millis) {
                    (Some(request_id), Some(ts)) => records.push(NetworkRequestRecord {
                        request_id,
                        url,
                        started_ms: align(ts),
                        finished_ms: None,
                    }),
                    _ => warn!("skipping unstamped or malformed requestWillBeSent message"),
                }
            }
            LOADING_FINISHED_METHOD => {
                let request_id = message.params.get("requestId").and_then(|v| v.as_str());
                let (Some(request_id), Some(ts)) = (request_id, message.timestamp_millis) else {
                    continue;
                };
                if let Some(record) = records.iter_mut().find(|r| r.request_id == request_id) {
                    record.finished_ms = Some(align(ts));
                }
            }
            _ => {}
        }
    }

    records
}

fn frame_id(message: &DevtoolsMessage) -> Option<&str> {
    message.frame()?.get("id")?.as_str()
}
