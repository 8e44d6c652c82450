//! Disease risk scoring
//!
//! - Logistic-link scorer with confidence-interval propagation
//! - Per-edge contribution breakdown
//! - Noisy-OR composites over disease groups
//! - Risk level banding

pub mod composite;
pub mod level;
pub mod scorer;

use serde::Serialize;

pub use composite::{composite, compute_all_risks, RiskSet, CVD_DISEASES, NCD_DISEASES};
pub use level::{RiskLevel, RiskThresholds};
pub use scorer::{
    compute_disease_risk, compute_risk_contributions, stable_sigmoid, Disease, RiskContribution,
};

/// Probability with its confidence interval.
///
/// Always satisfies `0 <= ci_low <= value <= ci_high <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskResult {
    pub value: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

impl RiskResult {
    /// Clamp to [0, 1] and widen the interval so it brackets the value
    pub fn new(value: f64, ci_low: f64, ci_high: f64) -> Self {
        let value = clamp_unit(value);
        let ci_low = clamp_unit(ci_low).min(value);
        let ci_high = clamp_unit(ci_high).max(value);
        RiskResult {
            value,
            ci_low,
            ci_high,
        }
    }

    pub fn zero() -> Self {
        RiskResult::new(0.0, 0.0, 0.0)
    }

    pub fn is_ordered(&self) -> bool {
        0.0 <= self.ci_low
            && self.ci_low <= self.value
            && self.value <= self.ci_high
            && self.ci_high <= 1.0
    }
}

fn clamp_unit(p: f64) -> f64 {
    if p.is_nan() {
        0.5
    } else {
        p.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_is_repaired() {
        let r = RiskResult::new(0.4, 0.5, 0.3);
        assert_eq!(r.value, 0.4);
        assert_eq!(r.ci_low, 0.4);
        assert_eq!(r.ci_high, 0.4);
        assert!(r.is_ordered());

        let r = RiskResult::new(1.2, -0.1, 2.0);
        assert_eq!((r.ci_low, r.value, r.ci_high), (0.0, 1.0, 1.0));

        let r = RiskResult::new(f64::NAN, 0.1, 0.9);
        assert_eq!(r.value, 0.5);
        assert!(r.is_ordered());
    }
}
