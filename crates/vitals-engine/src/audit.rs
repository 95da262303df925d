//! Audit invocation contract
//!
//! `compute_metric` is the single entry point callers use: it threads one
//! capture through the trace processor, the protocol-log correlator, the
//! metric extractor and the scoring engine, memoizing every stage in the
//! run-scoped computed-artifact cache. Computing the same metric twice for
//! the same capture and settings performs the extraction exactly once, and
//! replays failures identically.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::cache::Fingerprint;
use crate::context::{Artifacts, AuditContext};
use crate::devtools;
use crate::error::MetricError;
use crate::metrics::{self, TimingMetric};
use crate::scoring;
use crate::trace;

/// One scored metric. Immutable once created; the cache hands every caller
/// for the same fingerprint a copy of the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// Metric value in milliseconds
    pub numeric_value: f64,
    /// Normalized quality score in [0, 1]
    pub score: f64,
    /// Human-readable rendering of the value
    pub display_value: String,
}

/// Compute one metric for one capture.
///
/// Upstream artifacts (processed trace, correlated log) are computed at most
/// once per capture and shared between every metric requested against it,
/// including concurrent requests.
///
/// # Errors
///
/// Any [`MetricError`] raised by the processor, correlator or extractor,
/// propagated unchanged.
#[instrument(skip_all, fields(metric = metric.id()))]
pub async fn compute_metric(
    metric: TimingMetric,
    artifacts: &Artifacts,
    context: &AuditContext,
) -> Result<MetricResult, MetricError> {
    let computed = &context.computed;
    let fingerprint = Fingerprint::metric(metric, artifacts, &context.settings);

    let result = computed
        .metric_results()
        .get_or_compute(fingerprint, || async {
            let processed = computed
                .processed_traces()
                .get_or_compute(Fingerprint::processed_trace(artifacts), || async {
                    trace::process_trace(&artifacts.trace)
                })
                .await?;

            let correlated = computed
                .correlated_logs()
                .get_or_compute(Fingerprint::correlated_log(artifacts), || async {
                    devtools::correlate(&artifacts.devtools_log, &processed)
                })
                .await?;

            let metric_context = artifacts.metric_context(&context.settings);
            let timing_ms =
                metrics::extract_timing(metric, &processed, &correlated.navigation, &metric_context)?;
            let curve = scoring::curve_for(metric, metric_context.form_factor());
            let score = scoring::round_score(curve.score(timing_ms));
            debug!(
                "{}: {:.3} ms scores {} on the {:?} curve",
                metric.id(),
                timing_ms,
                score,
                metric_context.form_factor()
            );

            Ok(MetricResult {
                numeric_value: timing_ms,
                score,
                display_value: format_display_value(timing_ms),
            })
        })
        .await?;

    Ok((*result).clone())
}

/// Compute several metrics against one capture concurrently. Each result is
/// reported independently; one metric failing does not affect the others.
pub async fn compute_metrics(
    metrics: &[TimingMetric],
    artifacts: &Artifacts,
    context: &AuditContext,
) -> Vec<Result<MetricResult, MetricError>> {
    join_all(
        metrics
            .iter()
            .map(|metric| compute_metric(*metric, artifacts, context)),
    )
    .await
}

/// Render a millisecond timing the way reports display page-load metrics:
/// seconds, one decimal.
pub fn format_display_value(value_ms: f64) -> String {
    format!("{:.1} s", value_ms / 1000.0)
}
