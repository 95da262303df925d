//! Largest Contentful Paint extraction
//!
//! The browser emits a candidate event each time the largest visible element
//! changes during load, and an invalidation event when the current largest
//! element is removed. The metric is the final surviving candidate, measured
//! from navigation start.
//!
//! A missing candidate means one of two very different things: the captured
//! browser may predate LCP instrumentation entirely (a permanent capability
//! gap), or a supporting browser may simply not have recorded one (a capture
//! anomaly). The two are told apart by the Chrome milestone parsed from the
//! host user agent, never by event absence alone.

use crate::context::MetricContext;
use crate::devtools::NavigationRecord;
use crate::error::MetricError;
use crate::metrics::{finalize_timing, TimingMetric};
use crate::trace::ProcessedTrace;

pub const CANDIDATE_EVENT: &str = "largestContentfulPaint::Candidate";
pub const INVALIDATE_EVENT: &str = "largestContentfulPaint::Invalidate";

/// First Chrome milestone whose traces carry LCP candidate events.
pub const MIN_CHROME_MILESTONE: u32 = 78;

pub(crate) fn extract(
    trace: &ProcessedTrace,
    navigation: &NavigationRecord,
    context: &MetricContext,
) -> Result<f64, MetricError> {
    let metric = TimingMetric::LargestContentfulPaint;
    let candidate = trace.final_candidate(
        metric.candidate_event(),
        metric.invalidate_event(),
        !metric.allows_subframe_candidates(),
    );

    match candidate {
        Some(ts_us) => finalize_timing(trace.to_local_ms(ts_us), navigation),
        None => match context.chrome_milestone() {
            Some(milestone) if milestone < MIN_CHROME_MILESTONE => {
                Err(MetricError::NoLcpOldBrowser { milestone })
            }
            // An unrecognizable user agent is assumed capable; the absence is
            // then an anomaly in this capture, not a capability gap.
            _ => Err(MetricError::NoLcp),
        },
    }
}
