//! Patient covariate vector and its enumerated accessor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a string does not name a covariate field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown covariate: {0}")]
pub struct UnknownCovariate(pub String);

/// Every field of [`Covariates`], named by its graph node id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Covariate {
    Age,
    Sex,
    Sbp,
    Dbp,
    Ldl,
    Hdl,
    Tc,
    Tg,
    Hba1c,
    Fpg,
    Bmi,
    Egfr,
    Smoking,
    Exercise,
    Alcohol,
    Diet,
    Statin,
    HtnMed,
    Sglt2i,
    Metformin,
    Aspirin,
    AceArb,
    Diabetes,
    Hypertension,
}

impl Covariate {
    pub const ALL: [Covariate; 24] = [
        Covariate::Age,
        Covariate::Sex,
        Covariate::Sbp,
        Covariate::Dbp,
        Covariate::Ldl,
        Covariate::Hdl,
        Covariate::Tc,
        Covariate::Tg,
        Covariate::Hba1c,
        Covariate::Fpg,
        Covariate::Bmi,
        Covariate::Egfr,
        Covariate::Smoking,
        Covariate::Exercise,
        Covariate::Alcohol,
        Covariate::Diet,
        Covariate::Statin,
        Covariate::HtnMed,
        Covariate::Sglt2i,
        Covariate::Metformin,
        Covariate::Aspirin,
        Covariate::AceArb,
        Covariate::Diabetes,
        Covariate::Hypertension,
    ];

    /// Node id of the field in the knowledge graph
    pub fn as_str(&self) -> &'static str {
        match self {
            Covariate::Age => "age",
            Covariate::Sex => "sex",
            Covariate::Sbp => "sbp",
            Covariate::Dbp => "dbp",
            Covariate::Ldl => "ldl",
            Covariate::Hdl => "hdl",
            Covariate::Tc => "tc",
            Covariate::Tg => "tg",
            Covariate::Hba1c => "hba1c",
            Covariate::Fpg => "fpg",
            Covariate::Bmi => "bmi",
            Covariate::Egfr => "egfr",
            Covariate::Smoking => "smoking",
            Covariate::Exercise => "exercise",
            Covariate::Alcohol => "alcohol",
            Covariate::Diet => "diet",
            Covariate::Statin => "statin",
            Covariate::HtnMed => "htn_med",
            Covariate::Sglt2i => "sglt2i",
            Covariate::Metformin => "metformin",
            Covariate::Aspirin => "aspirin",
            Covariate::AceArb => "ace_arb",
            Covariate::Diabetes => "diabetes",
            Covariate::Hypertension => "hypertension",
        }
    }

    pub fn from_node_id(id: &str) -> Option<Self> {
        Covariate::ALL.iter().copied().find(|c| c.as_str() == id)
    }

    /// Fields written by the condition deriver rather than the caller
    pub fn is_derived(&self) -> bool {
        matches!(self, Covariate::Diabetes | Covariate::Hypertension)
    }
}

impl fmt::Display for Covariate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Covariate {
    type Err = UnknownCovariate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Covariate::from_node_id(s.trim()).ok_or_else(|| UnknownCovariate(s.to_string()))
    }
}

/// Fixed-field patient input record.
///
/// Units follow the graph: mmHg for pressures, mg/dL for lipids and glucose,
/// % for HbA1c, kg/m² for BMI, mL/min/1.73m² for eGFR, days/week for exercise.
/// Lifestyle and medication fields are 0..1 flags or scores. `diabetes` and
/// `hypertension` are overwritten by [`crate::clinical::derive_conditions`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Covariates {
    pub age: f64,
    pub sex: f64,
    pub sbp: f64,
    pub dbp: f64,
    pub ldl: f64,
    pub hdl: f64,
    pub tc: f64,
    pub tg: f64,
    pub hba1c: f64,
    pub fpg: f64,
    pub bmi: f64,
    pub egfr: f64,
    pub smoking: f64,
    pub exercise: f64,
    pub alcohol: f64,
    pub diet: f64,
    pub statin: f64,
    pub htn_med: f64,
    pub sglt2i: f64,
    pub metformin: f64,
    pub aspirin: f64,
    pub ace_arb: f64,
    pub diabetes: f64,
    pub hypertension: f64,
}

impl Covariates {
    pub fn get(&self, covariate: Covariate) -> f64 {
        match covariate {
            Covariate::Age => self.age,
            Covariate::Sex => self.sex,
            Covariate::Sbp => self.sbp,
            Covariate::Dbp => self.dbp,
            Covariate::Ldl => self.ldl,
            Covariate::Hdl => self.hdl,
            Covariate::Tc => self.tc,
            Covariate::Tg => self.tg,
            Covariate::Hba1c => self.hba1c,
            Covariate::Fpg => self.fpg,
            Covariate::Bmi => self.bmi,
            Covariate::Egfr => self.egfr,
            Covariate::Smoking => self.smoking,
            Covariate::Exercise => self.exercise,
            Covariate::Alcohol => self.alcohol,
            Covariate::Diet => self.diet,
            Covariate::Statin => self.statin,
            Covariate::HtnMed => self.htn_med,
            Covariate::Sglt2i => self.sglt2i,
            Covariate::Metformin => self.metformin,
            Covariate::Aspirin => self.aspirin,
            Covariate::AceArb => self.ace_arb,
            Covariate::Diabetes => self.diabetes,
            Covariate::Hypertension => self.hypertension,
        }
    }

    pub fn set(&mut self, covariate: Covariate, value: f64) {
        let slot = match covariate {
            Covariate::Age => &mut self.age,
            Covariate::Sex => &mut self.sex,
            Covariate::Sbp => &mut self.sbp,
            Covariate::Dbp => &mut self.dbp,
            Covariate::Ldl => &mut self.ldl,
            Covariate::Hdl => &mut self.hdl,
            Covariate::Tc => &mut self.tc,
            Covariate::Tg => &mut self.tg,
            Covariate::Hba1c => &mut self.hba1c,
            Covariate::Fpg => &mut self.fpg,
            Covariate::Bmi => &mut self.bmi,
            Covariate::Egfr => &mut self.egfr,
            Covariate::Smoking => &mut self.smoking,
            Covariate::Exercise => &mut self.exercise,
            Covariate::Alcohol => &mut self.alcohol,
            Covariate::Diet => &mut self.diet,
            Covariate::Statin => &mut self.statin,
            Covariate::HtnMed => &mut self.htn_med,
            Covariate::Sglt2i => &mut self.sglt2i,
            Covariate::Metformin => &mut self.metformin,
            Covariate::Aspirin => &mut self.aspirin,
            Covariate::AceArb => &mut self.ace_arb,
            Covariate::Diabetes => &mut self.diabetes,
            Covariate::Hypertension => &mut self.hypertension,
        };
        *slot = value;
    }

    /// Builder-style [`Covariates::set`]
    pub fn with(mut self, covariate: Covariate, value: f64) -> Self {
        self.set(covariate, value);
        self
    }

    /// Value of the field named by a graph node id, None for non-covariate nodes
    pub fn value_of(&self, node_id: &str) -> Option<f64> {
        Covariate::from_node_id(node_id).map(|c| self.get(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Covariate, f64)> + '_ {
        Covariate::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_roundtrip() {
        for covariate in Covariate::ALL {
            assert_eq!(Covariate::from_node_id(covariate.as_str()), Some(covariate));
            assert_eq!(covariate.as_str().parse::<Covariate>().unwrap(), covariate);
        }
        assert_eq!(Covariate::from_node_id("cad"), None);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "cholesterol".parse::<Covariate>().unwrap_err();
        assert_eq!(err, UnknownCovariate("cholesterol".to_string()));
        assert_eq!(err.to_string(), "Unknown covariate: cholesterol");
    }

    #[test]
    fn test_serde_names_match_node_ids() {
        for covariate in Covariate::ALL {
            let json = serde_json::to_string(&covariate).unwrap();
            assert_eq!(json, format!("\"{}\"", covariate.as_str()));
        }
    }

    #[test]
    fn test_get_set() {
        let mut covariates = Covariates::default();
        for (i, covariate) in Covariate::ALL.iter().enumerate() {
            covariates.set(*covariate, i as f64);
        }
        for (i, covariate) in Covariate::ALL.iter().enumerate() {
            assert_eq!(covariates.get(*covariate), i as f64);
        }
        assert_eq!(covariates.htn_med, 17.0);
        assert_eq!(covariates.value_of("ace_arb"), Some(21.0));
        assert_eq!(covariates.value_of("stroke"), None);
        assert_eq!(covariates.iter().count(), 24);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let covariates: Covariates = serde_json::from_str(r#"{"age": 61, "ldl": 140.5}"#).unwrap();
        assert_eq!(covariates.age, 61.0);
        assert_eq!(covariates.ldl, 140.5);
        assert_eq!(covariates.statin, 0.0);
        assert_eq!(covariates.diabetes, 0.0);
    }

    #[test]
    fn test_derived_fields() {
        let derived: Vec<_> = Covariate::ALL.iter().filter(|c| c.is_derived()).collect();
        assert_eq!(derived, vec![&Covariate::Diabetes, &Covariate::Hypertension]);
    }
}
