//! Log-normal metric scoring
//!
//! A metric's millisecond value maps to a 0–1 score through the complementary
//! CDF of a log-normal distribution fixed by two calibration points: the
//! median timing scores 0.5 and the 10th-percentile timing scores 0.9. Curves
//! are table-driven over (metric, form factor); desktop curves are calibrated
//! stricter than mobile, so one timing can score differently depending on the
//! device context the capture was taken under.

use serde::{Deserialize, Serialize};

use crate::context::FormFactor;
use crate::metrics::TimingMetric;

/// `erfc(x) == 1/5` at this x; positions the p10 calibration point at 0.9.
const INVERSE_ERFC_ONE_FIFTH: f64 = 0.906_193_802_436_823_2;

/// Two calibration points of a log-normal scoring curve, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringCurve {
    /// Timing that scores 0.9
    pub p10: f64,
    /// Timing that scores 0.5
    pub median: f64,
}

impl ScoringCurve {
    /// Score a timing on this curve. Clamped to [0, 1]; monotonically
    /// non-increasing in the timing.
    pub fn score(&self, value_ms: f64) -> f64 {
        if value_ms <= 0.0 {
            return 1.0;
        }
        let x_ratio = (value_ms / self.median).max(f64::MIN_POSITIVE);
        let x_log_ratio = x_ratio.ln();
        let p10_ratio = (self.p10 / self.median).max(f64::MIN_POSITIVE);
        let p10_log_ratio = -p10_ratio.ln();
        let standardized_x = x_log_ratio * INVERSE_ERFC_ONE_FIFTH / p10_log_ratio;
        let complementary_percentile = erfc(standardized_x) / 2.0;
        complementary_percentile.clamp(0.0, 1.0)
    }
}

pub const LCP_MOBILE: ScoringCurve = ScoringCurve {
    p10: 2500.0,
    median: 4000.0,
};
pub const LCP_DESKTOP: ScoringCurve = ScoringCurve {
    p10: 1200.0,
    median: 2400.0,
};
pub const FCP_MOBILE: ScoringCurve = ScoringCurve {
    p10: 1800.0,
    median: 3000.0,
};
pub const FCP_DESKTOP: ScoringCurve = ScoringCurve {
    p10: 934.0,
    median: 1600.0,
};

/// The calibration table. One curve per (metric, form factor) pair;
/// exhaustive over both closed sets.
pub fn curve_for(metric: TimingMetric, form_factor: FormFactor) -> ScoringCurve {
    match (metric, form_factor) {
        (TimingMetric::LargestContentfulPaint, FormFactor::Mobile) => LCP_MOBILE,
        (TimingMetric::LargestContentfulPaint, FormFactor::Desktop) => LCP_DESKTOP,
        (TimingMetric::FirstContentfulPaint, FormFactor::Mobile) => FCP_MOBILE,
        (TimingMetric::FirstContentfulPaint, FormFactor::Desktop) => FCP_DESKTOP,
    }
}

/// Round a score to two decimals for display stability.
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Complementary error function.
fn erfc(x: f64) -> f64 {
    1.0 - erf(x)
}

/// Abramowitz–Stegun 7.1.26 rational approximation; absolute error below
/// 1.5e-7, well inside the two-decimal display precision.
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let y = t * (A1 + t * (A2 + t * (A3 + t * (A4 + t * A5))));
    sign * (1.0 - y * (-x * x).exp())
}
