//! Named patient profiles and the demo cohort

use super::covariate::Covariates;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub covariates: Covariates,
}

impl PatientProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, covariates: Covariates) -> Self {
        PatientProfile {
            id: id.into(),
            name: name.into(),
            covariates,
        }
    }
}

/// Three untreated patients with low, moderate and high composite risk
pub fn demo_patients() -> Vec<PatientProfile> {
    vec![
        PatientProfile::new(
            "demo-low",
            "Sarah Chen",
            Covariates {
                age: 40.0,
                sex: 0.0,
                sbp: 115.0,
                dbp: 72.0,
                ldl: 95.0,
                hdl: 62.0,
                tc: 185.0,
                tg: 90.0,
                hba1c: 5.2,
                fpg: 88.0,
                bmi: 22.5,
                egfr: 105.0,
                smoking: 0.0,
                exercise: 5.0,
                alcohol: 0.0,
                diet: 0.8,
                ..Default::default()
            },
        ),
        PatientProfile::new(
            "demo-moderate",
            "James Wilson",
            Covariates {
                age: 55.0,
                sex: 1.0,
                sbp: 148.0,
                dbp: 92.0,
                ldl: 162.0,
                hdl: 38.0,
                tc: 245.0,
                tg: 210.0,
                hba1c: 6.1,
                fpg: 112.0,
                bmi: 29.5,
                egfr: 78.0,
                smoking: 0.0,
                exercise: 1.0,
                alcohol: 0.5,
                diet: 0.4,
                ..Default::default()
            },
        ),
        PatientProfile::new(
            "demo-high",
            "Robert Martinez",
            Covariates {
                age: 65.0,
                sex: 1.0,
                sbp: 168.0,
                dbp: 98.0,
                ldl: 185.0,
                hdl: 32.0,
                tc: 280.0,
                tg: 290.0,
                hba1c: 8.2,
                fpg: 165.0,
                bmi: 33.5,
                egfr: 52.0,
                smoking: 1.0,
                exercise: 0.0,
                alcohol: 0.5,
                diet: 0.2,
                ..Default::default()
            },
        ),
    ]
}

/// Demo patient by id (`demo-low`, `demo-moderate`, `demo-high`)
pub fn demo_patient(id: &str) -> Option<PatientProfile> {
    demo_patients().into_iter().find(|p| p.id == id)
}
