//! Core type definitions for the knowledge graph

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable string key of a node (e.g. `"ldl"`, `"cad"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

/// Stable string key of an edge (e.g. `"e83"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        EdgeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for EdgeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        EdgeId(s.to_string())
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        EdgeId(s)
    }
}

/// Clinical domain a node or edge belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClinicalDomain {
    #[serde(rename = "Lipid Metabolism")]
    LipidMetabolism,
    #[serde(rename = "Glycaemic Regulation")]
    GlycaemicRegulation,
    #[serde(rename = "Blood Pressure")]
    BloodPressure,
    #[serde(rename = "Renal Function")]
    RenalFunction,
    #[serde(rename = "Inflammatory Markers")]
    InflammatoryMarkers,
    #[serde(rename = "Anthropometrics")]
    Anthropometrics,
    #[serde(rename = "Lifestyle")]
    Lifestyle,
    #[serde(rename = "Disease Endpoints")]
    DiseaseEndpoints,
    #[serde(rename = "Interventions")]
    Interventions,
}

impl ClinicalDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClinicalDomain::LipidMetabolism => "Lipid Metabolism",
            ClinicalDomain::GlycaemicRegulation => "Glycaemic Regulation",
            ClinicalDomain::BloodPressure => "Blood Pressure",
            ClinicalDomain::RenalFunction => "Renal Function",
            ClinicalDomain::InflammatoryMarkers => "Inflammatory Markers",
            ClinicalDomain::Anthropometrics => "Anthropometrics",
            ClinicalDomain::Lifestyle => "Lifestyle",
            ClinicalDomain::DiseaseEndpoints => "Disease Endpoints",
            ClinicalDomain::Interventions => "Interventions",
        }
    }
}

impl fmt::Display for ClinicalDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of variable a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Biomarker,
    Disease,
    Lifestyle,
    Medication,
    Demographic,
}

/// Strength of evidence behind an edge. `A` is the strongest grade and
/// compares as the smallest value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EvidenceGrade {
    A,
    B,
    C,
    D,
}

impl fmt::Display for EvidenceGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grade = match self {
            EvidenceGrade::A => "A",
            EvidenceGrade::B => "B",
            EvidenceGrade::C => "C",
            EvidenceGrade::D => "D",
        };
        f.write_str(grade)
    }
}
