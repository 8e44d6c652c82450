//! Named what-if scenarios

use super::intervention::Interventions;
use crate::clinical::{Covariate, Covariates};
use serde::{Deserialize, Serialize};

/// How a scenario moves a covariate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ScenarioChange {
    /// Set to this value
    Absolute(f64),
    /// Add this offset to the patient's current value
    Relative(f64),
}

impl ScenarioChange {
    pub fn apply(&self, current: f64) -> f64 {
        match self {
            ScenarioChange::Absolute(value) => *value,
            ScenarioChange::Relative(offset) => current + offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub changes: Vec<(Covariate, ScenarioChange)>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Scenario {
            name: name.into(),
            description: description.into(),
            changes: Vec::new(),
        }
    }

    pub fn set(mut self, covariate: Covariate, value: f64) -> Self {
        self.changes.push((covariate, ScenarioChange::Absolute(value)));
        self
    }

    pub fn shift(mut self, covariate: Covariate, offset: f64) -> Self {
        self.changes.push((covariate, ScenarioChange::Relative(offset)));
        self
    }

    /// Absolute intervention values for a specific patient
    pub fn resolve(&self, baseline: &Covariates) -> Interventions {
        self.changes
            .iter()
            .map(|(covariate, change)| (*covariate, change.apply(baseline.get(*covariate))))
            .collect()
    }
}

/// The six built-in scenarios
pub fn presets() -> Vec<Scenario> {
    vec![
        Scenario::new("Start Statin Therapy", "Add high-intensity statin therapy")
            .set(Covariate::Statin, 1.0),
        Scenario::new("Lose 10kg", "Moderate weight loss program, about 3 BMI points")
            .shift(Covariate::Bmi, -3.0),
        Scenario::new("Exercise 150min/week", "WHO recommended physical activity")
            .set(Covariate::Exercise, 5.0),
        Scenario::new("Quit Smoking", "Complete smoking cessation").set(Covariate::Smoking, 0.0),
        Scenario::new("Start SGLT2i + ACEi", "Cardio-renal protection combo")
            .set(Covariate::Sglt2i, 1.0)
            .set(Covariate::AceArb, 1.0),
        Scenario::new("Full Lifestyle Change", "Comprehensive lifestyle modification")
            .set(Covariate::Exercise, 5.0)
            .set(Covariate::Diet, 0.8)
            .set(Covariate::Smoking, 0.0)
            .set(Covariate::Alcohol, 0.0),
    ]
}

/// Preset by case-insensitive name
pub fn preset(name: &str) -> Option<Scenario> {
    presets()
        .into_iter()
        .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinical::demo_patient;

    #[test]
    fn test_presets() {
        let all = presets();
        assert_eq!(all.len(), 6);
        assert!(preset("quit smoking").is_some());
        assert!(preset("Skydiving").is_none());
    }

    #[test]
    fn test_relative_change_resolves_against_patient() {
        let patient = demo_patient("demo-moderate").unwrap();
        let interventions = preset("Lose 10kg").unwrap().resolve(&patient.covariates);
        assert_eq!(interventions.get(Covariate::Bmi), Some(26.5));
    }

    #[test]
    fn test_absolute_changes_keep_order() {
        let patient = demo_patient("demo-high").unwrap();
        let interventions = preset("Full Lifestyle Change").unwrap().resolve(&patient.covariates);
        let order: Vec<_> = interventions.covariates().collect();
        assert_eq!(
            order,
            vec![Covariate::Exercise, Covariate::Diet, Covariate::Smoking, Covariate::Alcohol]
        );
        assert_eq!(interventions.get(Covariate::Smoking), Some(0.0));
    }
}
