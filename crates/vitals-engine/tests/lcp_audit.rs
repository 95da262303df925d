//! End-to-end audit tests for Largest Contentful Paint
//!
//! These exercise the full pipeline through the public API: trace processing,
//! log correlation, extraction, scoring and the run-scoped cache.

#[path = "common/fixtures.rs"]
mod fixtures;

use fixtures::*;
use pretty_assertions::assert_eq;
use vitals_engine::{
    compute_metric, compute_metrics, AuditContext, AuditSettings, MetricError, TimingMetric,
};

/// Final candidate 1_121_711 us after navigation start, the calibration
/// capture's timing.
const LCP_OFFSET_US: i64 = 1_121_711;

#[tokio::test]
async fn test_adjusts_scoring_based_on_form_factor() -> anyhow::Result<()> {
    init_tracing();
    let mobile = artifacts(trace_with_lcp(LCP_OFFSET_US), true, CHROME_78_UA);
    let context = AuditContext::new(AuditSettings::default());
    let output = compute_metric(TimingMetric::LargestContentfulPaint, &mobile, &context).await?;

    assert!((output.numeric_value - 1121.711).abs() < 1e-6);
    assert_eq!(output.score, 1.0);
    assert_eq!(output.display_value, "1.1 s");

    // the identical capture interpreted under a desktop context scores lower
    let desktop = artifacts(trace_with_lcp(LCP_OFFSET_US), false, CHROME_78_UA);
    let context = AuditContext::new(AuditSettings::default());
    let output = compute_metric(TimingMetric::LargestContentfulPaint, &desktop, &context).await?;

    assert!((output.numeric_value - 1121.711).abs() < 1e-6);
    assert_eq!(output.score, 0.92);
    assert_eq!(output.display_value, "1.1 s");
    Ok(())
}

#[tokio::test]
async fn test_old_chrome_without_candidate_is_a_capability_gap() {
    let old = artifacts(trace_without_paint_events(), true, CHROME_60_UA);
    let context = AuditContext::new(AuditSettings::default());

    let result = compute_metric(TimingMetric::LargestContentfulPaint, &old, &context).await;
    assert_eq!(result, Err(MetricError::NoLcpOldBrowser { milestone: 60 }));
}

#[tokio::test]
async fn test_new_chrome_without_candidate_is_an_anomaly() {
    let new = artifacts(trace_without_paint_events(), true, CHROME_83_UA);
    let context = AuditContext::new(AuditSettings::default());

    let result = compute_metric(TimingMetric::LargestContentfulPaint, &new, &context).await;
    assert_eq!(result, Err(MetricError::NoLcp));
}

#[tokio::test]
async fn test_repeated_computation_is_deterministic() -> anyhow::Result<()> {
    let capture = artifacts(trace_with_lcp(LCP_OFFSET_US), true, CHROME_78_UA);
    let context = AuditContext::new(AuditSettings::default());

    let first = compute_metric(TimingMetric::LargestContentfulPaint, &capture, &context).await?;
    let second = compute_metric(TimingMetric::LargestContentfulPaint, &capture, &context).await?;
    assert_eq!(first, second);

    // a fresh cache reproduces the same result from the same capture
    let fresh_context = AuditContext::new(AuditSettings::default());
    let third =
        compute_metric(TimingMetric::LargestContentfulPaint, &capture, &fresh_context).await?;
    assert_eq!(first, third);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_requests_share_one_computation() -> anyhow::Result<()> {
    init_tracing();
    let capture = artifacts(trace_with_lcp(LCP_OFFSET_US), true, CHROME_78_UA);
    let context = AuditContext::new(AuditSettings::default());

    let (a, b, c) = tokio::join!(
        compute_metric(TimingMetric::LargestContentfulPaint, &capture, &context),
        compute_metric(TimingMetric::LargestContentfulPaint, &capture, &context),
        compute_metric(TimingMetric::FirstContentfulPaint, &capture, &context),
    );
    let (a, b, c) = (a?, b?, c?);
    assert_eq!(a, b);
    assert!((c.numeric_value - 499.0).abs() < 1e-6);

    // one processed trace and one correlated log served all three requests
    assert_eq!(context.computed.processed_traces().len().await, 1);
    assert_eq!(context.computed.correlated_logs().len().await, 1);
    assert_eq!(context.computed.metric_results().len().await, 2);
    Ok(())
}

#[tokio::test]
async fn test_failures_replay_from_the_cache() {
    let old = artifacts(trace_without_paint_events(), true, CHROME_60_UA);
    let context = AuditContext::new(AuditSettings::default());

    let first = compute_metric(TimingMetric::LargestContentfulPaint, &old, &context).await;
    let second = compute_metric(TimingMetric::LargestContentfulPaint, &old, &context).await;
    assert_eq!(first, second);
    assert_eq!(first, Err(MetricError::NoLcpOldBrowser { milestone: 60 }));
    assert_eq!(context.computed.metric_results().len().await, 1);
}

#[tokio::test]
async fn test_compute_metrics_reports_each_independently() {
    // FCP event exists in this capture, LCP candidate does not: FCP
    // succeeds while LCP reports its anomaly
    let mut events = trace_with_lcp(LCP_OFFSET_US).trace_events;
    events.retain(|e| !e.name.starts_with("largestContentfulPaint"));
    let capture = artifacts(shared_trace::Trace::new(events), true, CHROME_83_UA);
    let context = AuditContext::new(AuditSettings::default());

    let results = compute_metrics(
        &[
            TimingMetric::FirstContentfulPaint,
            TimingMetric::LargestContentfulPaint,
        ],
        &capture,
        &context,
    )
    .await;

    assert!(results[0].is_ok());
    assert_eq!(results[1], Err(MetricError::NoLcp));
}

#[tokio::test]
async fn test_missing_navigation_in_log_fails_structurally() {
    let capture = vitals_engine::Artifacts::new(
        trace_with_lcp(LCP_OFFSET_US),
        shared_trace::DevtoolsLog::default(),
        true,
        CHROME_78_UA,
    );
    let context = AuditContext::new(AuditSettings::default());

    let result = compute_metric(TimingMetric::LargestContentfulPaint, &capture, &context).await;
    assert_eq!(result, Err(MetricError::NoNavigationStart));
}
