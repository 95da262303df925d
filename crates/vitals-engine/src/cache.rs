//! Computed-artifact cache
//!
//! One arena of fingerprint-keyed slots guarantees at-most-once computation
//! per fingerprint for an entire audit run. Concurrent requests for the same
//! fingerprint await the same in-flight computation; failures are stored and
//! replayed verbatim so a deterministically-failing extraction is never
//! silently retried. Nothing is evicted within a run.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::audit::MetricResult;
use crate::context::{Artifacts, AuditSettings};
use crate::devtools::CorrelatedLog;
use crate::error::MetricError;
use crate::metrics::TimingMetric;
use crate::trace::ProcessedTrace;

/// Identity of one computation: what is being computed, over which capture,
/// under which settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    /// Artifact kind, e.g. `metric:largest-contentful-paint`
    pub artifact: String,
    /// SHA-256 content digest of the trace
    pub trace_digest: String,
    /// Settings that influence the result
    pub settings_key: String,
}

impl Fingerprint {
    pub fn metric(metric: TimingMetric, artifacts: &Artifacts, settings: &AuditSettings) -> Self {
        Self {
            artifact: format!("metric:{}", metric.id()),
            trace_digest: artifacts.trace_digest().to_string(),
            settings_key: format!(
                "mobile={};throttling={}",
                artifacts.tested_as_mobile,
                settings.throttling_method.as_str()
            ),
        }
    }

    /// Processed traces depend on trace content only.
    pub fn processed_trace(artifacts: &Artifacts) -> Self {
        Self {
            artifact: "processed-trace".to_string(),
            trace_digest: artifacts.trace_digest().to_string(),
            settings_key: String::new(),
        }
    }

    /// Correlated logs depend on trace content only (the log travels with
    /// its trace).
    pub fn correlated_log(artifacts: &Artifacts) -> Self {
        Self {
            artifact: "correlated-log".to_string(),
            trace_digest: artifacts.trace_digest().to_string(),
            settings_key: String::new(),
        }
    }
}

type Slot<T> = Arc<OnceCell<Result<Arc<T>, MetricError>>>;

/// A fingerprint-keyed arena of compute-once slots.
#[derive(Debug)]
pub struct ComputedCache<T> {
    slots: Mutex<HashMap<Fingerprint, Slot<T>>>,
}

impl<T> ComputedCache<T> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the stored result for `fingerprint`, computing it at most once.
    ///
    /// The first caller for a fingerprint runs `compute`; every concurrent
    /// and subsequent caller awaits and shares that same outcome, success or
    /// failure.
    pub async fn get_or_compute<F, Fut>(
        &self,
        fingerprint: Fingerprint,
        compute: F,
    ) -> Result<Arc<T>, MetricError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, MetricError>>,
    {
        let slot = {
            let mut slots = self.slots.lock().await;
            Arc::clone(slots.entry(fingerprint).or_default())
        };
        slot.get_or_init(|| async {
            debug!("computing uncached artifact");
            compute().await.map(Arc::new)
        })
        .await
        .clone()
    }

    /// Number of resolved or in-flight fingerprints.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }
}

impl<T> Default for ComputedCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The cache families one audit run shares: upstream artifacts are memoized
/// exactly the same way metric results are.
#[derive(Debug, Default)]
pub struct ComputedArtifacts {
    processed_traces: ComputedCache<ProcessedTrace>,
    correlated_logs: ComputedCache<CorrelatedLog>,
    metric_results: ComputedCache<MetricResult>,
}

impl ComputedArtifacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processed_traces(&self) -> &ComputedCache<ProcessedTrace> {
        &self.processed_traces
    }

    pub fn correlated_logs(&self) -> &ComputedCache<CorrelatedLog> {
        &self.correlated_logs
    }

    pub fn metric_results(&self) -> &ComputedCache<MetricResult> {
        &self.metric_results
    }
}
