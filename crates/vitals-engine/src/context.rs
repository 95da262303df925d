//! Audit inputs: captured artifacts, runtime settings, and the per-computation
//! metric context.
//!
//! An [`Artifacts`] value bundles one completed capture (trace + devtools log
//! + device-emulation flag + host user agent). An [`AuditContext`] carries the
//! run-wide settings and the shared computed-artifact cache; the same context
//! is reused for every metric computed during one audit run so upstream
//! artifacts are processed exactly once.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_trace::{DevtoolsLog, Trace};
use std::sync::Arc;

use crate::cache::ComputedArtifacts;

lazy_static! {
    /// Chrome/Chromium milestone in a host user-agent string
    static ref CHROME_MILESTONE_PATTERN: Regex =
        Regex::new(r"Chrom(?:e|ium)/(\d+)\.").unwrap();
}

/// Device form factor; selects the scoring curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFactor {
    Mobile,
    Desktop,
}

/// How throttling was applied while the capture ran.
///
/// The engine extracts observed timings under every method; the method still
/// participates in result identity because a differently-throttled capture is
/// a different measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThrottlingMethod {
    /// Timings are taken as provided by the environment (no emulation)
    #[default]
    Provided,
    /// Throttling was applied through the devtools protocol during capture
    Devtools,
    /// Throttling is simulated after capture
    Simulate,
}

impl ThrottlingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThrottlingMethod::Provided => "provided",
            ThrottlingMethod::Devtools => "devtools",
            ThrottlingMethod::Simulate => "simulate",
        }
    }
}

/// Run-wide environment settings supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditSettings {
    #[serde(default)]
    pub throttling_method: ThrottlingMethod,
}

/// One completed capture, consumed read-only.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub trace: Trace,
    pub devtools_log: DevtoolsLog,
    /// Whether the page was loaded under mobile device emulation
    pub tested_as_mobile: bool,
    /// User-agent string of the browser that produced the capture
    pub host_user_agent: String,
    trace_digest: String,
}

impl Artifacts {
    pub fn new(
        trace: Trace,
        devtools_log: DevtoolsLog,
        tested_as_mobile: bool,
        host_user_agent: impl Into<String>,
    ) -> Self {
        let trace_digest = digest_trace(&trace);
        Self {
            trace,
            devtools_log,
            tested_as_mobile,
            host_user_agent: host_user_agent.into(),
            trace_digest,
        }
    }

    /// Content identity of the trace, as a lowercase hex SHA-256 digest.
    /// Computed once at construction; used for cache fingerprints.
    pub fn trace_digest(&self) -> &str {
        &self.trace_digest
    }

    pub fn form_factor(&self) -> FormFactor {
        if self.tested_as_mobile {
            FormFactor::Mobile
        } else {
            FormFactor::Desktop
        }
    }

    /// The immutable per-computation context derived from this capture and
    /// the run settings.
    pub fn metric_context(&self, settings: &AuditSettings) -> MetricContext {
        MetricContext {
            is_mobile_device: self.tested_as_mobile,
            host_user_agent: self.host_user_agent.clone(),
            throttling_method: settings.throttling_method,
        }
    }
}

/// Digest over the fields that define trace identity. Hashing the parsed
/// events directly keeps the digest independent of JSON formatting.
fn digest_trace(trace: &Trace) -> String {
    let mut hasher = Sha256::new();
    hasher.update((trace.trace_events.len() as u64).to_le_bytes());
    for event in &trace.trace_events {
        hasher.update(event.name.as_bytes());
        hasher.update([0u8]);
        hasher.update(event.cat.as_bytes());
        hasher.update([0u8]);
        hasher.update(event.ts.to_le_bytes());
        hasher.update(event.pid.to_le_bytes());
        hasher.update(event.tid.to_le_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Inputs that parameterize a single metric computation.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricContext {
    pub is_mobile_device: bool,
    pub host_user_agent: String,
    pub throttling_method: ThrottlingMethod,
}

impl MetricContext {
    pub fn form_factor(&self) -> FormFactor {
        if self.is_mobile_device {
            FormFactor::Mobile
        } else {
            FormFactor::Desktop
        }
    }

    /// The Chrome milestone parsed from the host user agent, the capability
    /// marker used to tell "browser too old" apart from "event missing".
    /// `None` when the user agent is not a recognizable Chrome/Chromium.
    pub fn chrome_milestone(&self) -> Option<u32> {
        CHROME_MILESTONE_PATTERN
            .captures(&self.host_user_agent)
            .and_then(|cap| cap.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

/// Run-scoped audit state: settings plus the shared computed-artifact cache.
///
/// Clone is shallow; clones share the same cache, which is what lets several
/// metric computations for one page load reuse each other's upstream work.
#[derive(Debug, Clone, Default)]
pub struct AuditContext {
    pub settings: AuditSettings,
    pub computed: Arc<ComputedArtifacts>,
}

impl AuditContext {
    pub fn new(settings: AuditSettings) -> Self {
        Self {
            settings,
            computed: Arc::new(ComputedArtifacts::new()),
        }
    }
}
