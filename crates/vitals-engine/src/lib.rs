//! Web-performance metric extraction and scoring engine
//!
//! This crate turns a completed browser capture — a raw event trace plus the
//! devtools protocol log recorded alongside it — into scored page-load
//! metrics such as Largest Contentful Paint.
//!
//! # Pipeline
//!
//! - **Trace processing**: parse the event trace into a structured timeline
//!   (main-frame identity, navigation anchor, paint candidates)
//! - **Log correlation**: align the protocol log's clock to the trace's and
//!   extract navigation/network records
//! - **Metric extraction**: locate the metric's defining timestamp relative
//!   to navigation start, per metric variant
//! - **Scoring**: map the timing to a 0–1 score on a device-aware log-normal
//!   curve
//!
//! Every stage is memoized in a run-scoped computed-artifact cache keyed by
//! content fingerprints, so concurrent metric computations over one capture
//! share upstream work and failures replay deterministically.
//!
//! # Example
//!
//! ```no_run
//! use shared_trace::{DevtoolsLog, Trace};
//! use vitals_engine::{compute_metric, Artifacts, AuditContext, AuditSettings, TimingMetric};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let trace = Trace::from_file("capture/trace.json")?;
//! let devtools_log = DevtoolsLog::from_file("capture/devtools.log.json")?;
//! let artifacts = Artifacts::new(trace, devtools_log, true, "Chrome/78.0.3904.70");
//! let context = AuditContext::new(AuditSettings::default());
//!
//! let result = compute_metric(TimingMetric::LargestContentfulPaint, &artifacts, &context).await?;
//! println!("LCP: {} (score {})", result.display_value, result.score);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cache;
pub mod context;
pub mod devtools;
pub mod error;
pub mod metrics;
pub mod scoring;
pub mod trace;

// Re-export the audit surface for convenience
pub use audit::{compute_metric, compute_metrics, format_display_value, MetricResult};
pub use cache::{ComputedArtifacts, ComputedCache, Fingerprint};
pub use context::{
    Artifacts, AuditContext, AuditSettings, FormFactor, MetricContext, ThrottlingMethod,
};
pub use devtools::{correlate, CorrelatedLog, NavigationRecord, NetworkRequestRecord};
pub use error::MetricError;
pub use metrics::{extract_timing, TimingMetric};
pub use scoring::{curve_for, ScoringCurve};
pub use trace::{process_trace, PaintEvent, ProcessedTrace};
