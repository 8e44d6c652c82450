//! Noisy-OR composite risks

use super::scorer::{compute_disease_risk, Disease};
use super::RiskResult;
use crate::clinical::{derive_conditions, Covariates};
use crate::graph::GraphStore;
use serde::Serialize;

pub const CVD_DISEASES: [Disease; 4] = [Disease::Cad, Disease::Stroke, Disease::Hf, Disease::Pad];
pub const NCD_DISEASES: [Disease; 2] = [Disease::T2dm, Disease::Ckd];

/// `1 - Π(1 - r)` applied independently to the value and both CI bounds
pub fn composite<'a>(risks: impl IntoIterator<Item = &'a RiskResult>) -> RiskResult {
    let (mut value, mut low, mut high) = (1.0, 1.0, 1.0);
    for risk in risks {
        value *= 1.0 - risk.value;
        low *= 1.0 - risk.ci_low;
        high *= 1.0 - risk.ci_high;
    }
    RiskResult::new(1.0 - value, 1.0 - low, 1.0 - high)
}

/// The seven disease risks and the two composites
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskSet {
    pub cad: RiskResult,
    pub stroke: RiskResult,
    pub hf: RiskResult,
    pub pad: RiskResult,
    pub t2dm: RiskResult,
    pub ckd: RiskResult,
    pub nafld: RiskResult,
    pub cvd_composite: RiskResult,
    pub ncd_composite: RiskResult,
}

impl RiskSet {
    pub const KEYS: [&'static str; 9] = [
        "cad",
        "stroke",
        "hf",
        "pad",
        "t2dm",
        "ckd",
        "nafld",
        "cvd_composite",
        "ncd_composite",
    ];

    pub fn disease(&self, disease: Disease) -> &RiskResult {
        match disease {
            Disease::Cad => &self.cad,
            Disease::Stroke => &self.stroke,
            Disease::Hf => &self.hf,
            Disease::Pad => &self.pad,
            Disease::T2dm => &self.t2dm,
            Disease::Ckd => &self.ckd,
            Disease::Nafld => &self.nafld,
        }
    }

    /// Lookup by disease or composite id
    pub fn get(&self, key: &str) -> Option<&RiskResult> {
        match key {
            "cvd_composite" => Some(&self.cvd_composite),
            "ncd_composite" => Some(&self.ncd_composite),
            _ => Disease::from_id(key).map(|d| self.disease(d)),
        }
    }

    /// All nine results in [`RiskSet::KEYS`] order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &RiskResult)> + '_ {
        [
            &self.cad,
            &self.stroke,
            &self.hf,
            &self.pad,
            &self.t2dm,
            &self.ckd,
            &self.nafld,
            &self.cvd_composite,
            &self.ncd_composite,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, r)| (RiskSet::KEYS[i], r))
    }
}

/// Score every disease and aggregate the composites
pub fn compute_all_risks(store: &GraphStore, covariates: &Covariates) -> RiskSet {
    let covariates = derive_conditions(covariates);
    let score = |d: Disease| compute_disease_risk(store, &covariates, d.id());

    let cad = score(Disease::Cad);
    let stroke = score(Disease::Stroke);
    let hf = score(Disease::Hf);
    let pad = score(Disease::Pad);
    let t2dm = score(Disease::T2dm);
    let ckd = score(Disease::Ckd);
    let nafld = score(Disease::Nafld);

    let cvd_composite = composite([&cad, &stroke, &hf, &pad]);
    let ncd_composite = composite([&cvd_composite, &t2dm, &ckd]);

    RiskSet {
        cad,
        stroke,
        hf,
        pad,
        t2dm,
        ckd,
        nafld,
        cvd_composite,
        ncd_composite,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinical::demo_patients;

    #[test]
    fn test_composite_formula() {
        let a = RiskResult::new(0.1, 0.05, 0.2);
        let b = RiskResult::new(0.2, 0.1, 0.3);
        let c = composite([&a, &b]);

        assert!((c.value - 0.28).abs() < 1e-12);
        assert!((c.ci_low - (1.0 - 0.95 * 0.9)).abs() < 1e-12);
        assert!((c.ci_high - (1.0 - 0.8 * 0.7)).abs() < 1e-12);
    }

    #[test]
    fn test_empty_composite_is_zero() {
        let c = composite(std::iter::empty::<&RiskResult>());
        assert_eq!(c, RiskResult::zero());
    }

    #[test]
    fn test_composites_dominate_constituents() {
        let store = GraphStore::reference().unwrap();
        for patient in demo_patients() {
            let risks = compute_all_risks(&store, &patient.covariates);
            for d in CVD_DISEASES {
                assert!(risks.cvd_composite.value >= risks.disease(d).value);
            }
            for d in NCD_DISEASES {
                assert!(risks.ncd_composite.value >= risks.disease(d).value);
            }
            assert!(risks.ncd_composite.value >= risks.cvd_composite.value);

            let expected = 1.0
                - (1.0 - risks.cad.value)
                    * (1.0 - risks.stroke.value)
                    * (1.0 - risks.hf.value)
                    * (1.0 - risks.pad.value);
            assert!((risks.cvd_composite.value - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_lookup_and_iteration() {
        let store = GraphStore::reference().unwrap();
        let risks = compute_all_risks(&store, &demo_patients()[1].covariates);

        let keys: Vec<_> = risks.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, RiskSet::KEYS.to_vec());
        assert_eq!(risks.get("stroke"), Some(&risks.stroke));
        assert_eq!(risks.get("ncd_composite"), Some(&risks.ncd_composite));
        assert!(risks.get("ldl").is_none());
    }
}
