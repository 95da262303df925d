//! First Contentful Paint extraction
//!
//! FCP has been emitted by every browser version this engine can receive
//! captures from, so there is no old-browser gate; a missing event is always
//! a capture anomaly.

use crate::context::MetricContext;
use crate::devtools::NavigationRecord;
use crate::error::MetricError;
use crate::metrics::{finalize_timing, TimingMetric};
use crate::trace::ProcessedTrace;

pub const PAINT_EVENT: &str = "firstContentfulPaint";

pub(crate) fn extract(
    trace: &ProcessedTrace,
    navigation: &NavigationRecord,
    _context: &MetricContext,
) -> Result<f64, MetricError> {
    let metric = TimingMetric::FirstContentfulPaint;
    let candidate = trace.final_candidate(
        metric.candidate_event(),
        metric.invalidate_event(),
        !metric.allows_subframe_candidates(),
    );

    match candidate {
        Some(ts_us) => finalize_timing(trace.to_local_ms(ts_us), navigation),
        None => Err(MetricError::NoFcp),
    }
}
