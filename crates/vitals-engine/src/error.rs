//! Engine error taxonomy
//!
//! Every extraction failure surfaces as exactly one of these kinds, raised at
//! the point of detection and propagated unchanged to the caller. There is no
//! local recovery and no defaulting to a zero score; the computed-artifact
//! cache stores failures and replays them verbatim on re-query.

use thiserror::Error;

/// The closed set of failure kinds the engine can report.
///
/// The kinds are non-overlapping by construction: a capability gap
/// ([`MetricError::NoLcpOldBrowser`]) is never reported as a capture anomaly
/// ([`MetricError::NoLcp`]), and vice versa, because the distinction is made
/// from the browser capability marker rather than from event absence alone.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    /// The trace lacks an identifiable main-frame navigation.
    #[error("trace contains no identifiable main-frame navigation")]
    NoMainFrameTrace,

    /// The protocol log lacks a top-level navigation-start message.
    #[error("protocol log contains no top-level navigation start")]
    NoNavigationStart,

    /// The trace and the protocol log share no anchor to reconcile their clocks.
    #[error("trace and protocol log share no time-base alignment anchor")]
    UnalignableTimeBases,

    /// The captured browser predates LCP instrumentation entirely.
    #[error("Chrome {milestone} predates largest-contentful-paint instrumentation")]
    NoLcpOldBrowser { milestone: u32 },

    /// The browser supports LCP but the trace holds no candidate event.
    #[error("no largest-contentful-paint candidate was recorded in the trace")]
    NoLcp,

    /// The trace holds no first-contentful-paint event.
    #[error("no first-contentful-paint event was recorded in the trace")]
    NoFcp,

    /// A computed timing came out negative or otherwise impossible.
    #[error("computed metric timing of {value_ms} ms is not physically possible")]
    InvalidMetricTiming { value_ms: f64 },
}

impl MetricError {
    /// Whether this condition is a permanent, expected capability gap rather
    /// than something worth re-capturing or investigating.
    pub fn is_permanent(&self) -> bool {
        matches!(self, MetricError::NoLcpOldBrowser { .. })
    }

    /// Whether the capture itself should be treated as corrupted or
    /// un-correlatable, as opposed to a per-metric anomaly.
    pub fn is_capture_corruption(&self) -> bool {
        matches!(
            self,
            MetricError::NoMainFrameTrace
                | MetricError::NoNavigationStart
                | MetricError::UnalignableTimeBases
                | MetricError::InvalidMetricTiming { .. }
        )
    }

    /// A kind-specific remediation hint for report renderers.
    pub fn remediation(&self) -> &'static str {
        match self {
            MetricError::NoMainFrameTrace | MetricError::NoNavigationStart => {
                "re-capture the page load; the recording is missing its navigation markers"
            }
            MetricError::UnalignableTimeBases => {
                "re-capture with a recorder that stamps protocol messages for the audited frame"
            }
            MetricError::NoLcpOldBrowser { .. } => {
                "upgrade the captured browser to a version that emits this metric"
            }
            MetricError::NoLcp | MetricError::NoFcp => {
                "investigate the capture; the browser supports this metric but emitted no event"
            }
            MetricError::InvalidMetricTiming { .. } => {
                "discard the capture; its event stream is internally inconsistent"
            }
        }
    }
}
