//! Metric extraction
//!
//! The engine's metric catalog is a closed set of tagged variants. Each
//! variant supplies its candidate trace-event name(s), whether sub-frame
//! candidates count, and the minimum browser capability it needs; all
//! extraction goes through the single [`extract_timing`] entry point rather
//! than per-metric branching at call sites.

pub mod fcp;
pub mod lcp;

use serde::{Deserialize, Serialize};

use crate::context::MetricContext;
use crate::devtools::NavigationRecord;
use crate::error::MetricError;
use crate::trace::ProcessedTrace;

/// The metrics this engine knows how to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimingMetric {
    LargestContentfulPaint,
    FirstContentfulPaint,
}

impl TimingMetric {
    /// Stable identifier, used in fingerprints and logs.
    pub fn id(&self) -> &'static str {
        match self {
            TimingMetric::LargestContentfulPaint => "largest-contentful-paint",
            TimingMetric::FirstContentfulPaint => "first-contentful-paint",
        }
    }

    /// Trace-event name that denotes a candidate for this metric.
    pub fn candidate_event(&self) -> &'static str {
        match self {
            TimingMetric::LargestContentfulPaint => lcp::CANDIDATE_EVENT,
            TimingMetric::FirstContentfulPaint => fcp::PAINT_EVENT,
        }
    }

    /// Trace-event name that invalidates earlier candidates, if the metric
    /// has one.
    pub fn invalidate_event(&self) -> Option<&'static str> {
        match self {
            TimingMetric::LargestContentfulPaint => Some(lcp::INVALIDATE_EVENT),
            TimingMetric::FirstContentfulPaint => None,
        }
    }

    /// Whether candidates from frames other than the main frame are eligible.
    pub fn allows_subframe_candidates(&self) -> bool {
        match self {
            TimingMetric::LargestContentfulPaint | TimingMetric::FirstContentfulPaint => false,
        }
    }

    /// Minimum Chrome milestone whose instrumentation emits this metric.
    /// `None` means every capturable browser supports it.
    pub fn minimum_chrome_milestone(&self) -> Option<u32> {
        match self {
            TimingMetric::LargestContentfulPaint => Some(lcp::MIN_CHROME_MILESTONE),
            TimingMetric::FirstContentfulPaint => None,
        }
    }
}

/// Locate a metric's defining timestamp relative to navigation start.
///
/// Returns the timing in milliseconds. Failure kinds are metric-specific;
/// see [`lcp`] and [`fcp`].
pub fn extract_timing(
    metric: TimingMetric,
    trace: &ProcessedTrace,
    navigation: &NavigationRecord,
    context: &MetricContext,
) -> Result<f64, MetricError> {
    match metric {
        TimingMetric::LargestContentfulPaint => lcp::extract(trace, navigation, context),
        TimingMetric::FirstContentfulPaint => fcp::extract(trace, navigation, context),
    }
}

/// Turn a candidate's trace-local timestamp into the metric value, enforcing
/// that timings are physically possible.
pub(crate) fn finalize_timing(
    candidate_ms: f64,
    navigation: &NavigationRecord,
) -> Result<f64, MetricError> {
    let value_ms = candidate_ms - navigation.navigation_start_ms;
    if value_ms < 0.0 {
        return Err(MetricError::InvalidMetricTiming { value_ms });
    }
    Ok(value_ms)
}
