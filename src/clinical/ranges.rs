//! Plausible input ranges and clinical status bands
//!
//! These are advisory: the scorer accepts any finite input, and callers decide
//! whether to surface range violations.

use super::covariate::{Covariate, Covariates};
use serde::Serialize;
use std::fmt;

/// Inclusive bounds of a plausible input value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiomarkerRange {
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

impl BiomarkerRange {
    const fn new(min: f64, max: f64, unit: &'static str) -> Self {
        BiomarkerRange { min, max, unit }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Covariate {
    pub fn plausible_range(&self) -> Option<BiomarkerRange> {
        let range = match self {
            Covariate::Age => BiomarkerRange::new(18.0, 90.0, "years"),
            Covariate::Sbp => BiomarkerRange::new(80.0, 220.0, "mmHg"),
            Covariate::Dbp => BiomarkerRange::new(40.0, 130.0, "mmHg"),
            Covariate::Ldl => BiomarkerRange::new(30.0, 300.0, "mg/dL"),
            Covariate::Hdl => BiomarkerRange::new(15.0, 100.0, "mg/dL"),
            Covariate::Tc => BiomarkerRange::new(80.0, 400.0, "mg/dL"),
            Covariate::Tg => BiomarkerRange::new(30.0, 600.0, "mg/dL"),
            Covariate::Hba1c => BiomarkerRange::new(3.5, 14.0, "%"),
            Covariate::Fpg => BiomarkerRange::new(50.0, 300.0, "mg/dL"),
            Covariate::Bmi => BiomarkerRange::new(14.0, 55.0, "kg/m²"),
            Covariate::Egfr => BiomarkerRange::new(10.0, 140.0, "mL/min"),
            Covariate::Exercise => BiomarkerRange::new(0.0, 7.0, "days/wk"),
            Covariate::Diet | Covariate::Smoking | Covariate::Alcohol => {
                BiomarkerRange::new(0.0, 1.0, "")
            }
            _ => return None,
        };
        Some(range)
    }
}

/// A covariate value outside its plausible range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeViolation {
    pub covariate: Covariate,
    pub value: f64,
    pub range: BiomarkerRange,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} outside [{}, {}] {}",
            self.covariate, self.value, self.range.min, self.range.max, self.range.unit
        )
    }
}

impl Covariates {
    /// Fields outside their plausible range, in field order
    pub fn out_of_range(&self) -> Vec<RangeViolation> {
        self.iter()
            .filter_map(|(covariate, value)| {
                let range = covariate.plausible_range()?;
                (!range.contains(value)).then_some(RangeViolation {
                    covariate,
                    value,
                    range,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalStatus {
    Normal,
    Borderline,
    High,
}

impl fmt::Display for VitalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VitalStatus::Normal => write!(f, "normal"),
            VitalStatus::Borderline => write!(f, "borderline"),
            VitalStatus::High => write!(f, "high"),
        }
    }
}

fn rising(value: f64, borderline: f64, high: f64) -> VitalStatus {
    if value >= high {
        VitalStatus::High
    } else if value >= borderline {
        VitalStatus::Borderline
    } else {
        VitalStatus::Normal
    }
}

/// Clinical band of a single reading, None for fields without thresholds.
///
/// HDL and eGFR are inverse markers: low values are the risky ones.
pub fn vital_status(covariate: Covariate, value: f64) -> Option<VitalStatus> {
    let status = match covariate {
        Covariate::Sbp => rising(value, 130.0, 140.0),
        Covariate::Dbp => rising(value, 85.0, 90.0),
        Covariate::Ldl => rising(value, 130.0, 160.0),
        Covariate::Hba1c => rising(value, 5.7, 6.5),
        Covariate::Fpg => rising(value, 100.0, 126.0),
        Covariate::Bmi => rising(value, 25.0, 30.0),
        Covariate::Tg => rising(value, 150.0, 200.0),
        Covariate::Hdl if value < 40.0 => VitalStatus::High,
        Covariate::Hdl => VitalStatus::Normal,
        Covariate::Egfr if value < 60.0 => VitalStatus::High,
        Covariate::Egfr if value < 90.0 => VitalStatus::Borderline,
        Covariate::Egfr => VitalStatus::Normal,
        _ => return None,
    };
    Some(status)
}
