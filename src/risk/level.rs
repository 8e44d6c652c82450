//! Risk level bands

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::VeryHigh => write!(f, "Very High"),
        }
    }
}

/// Inclusive lower bounds of the Moderate, High and Very High bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub moderate: f64,
    pub high: f64,
    pub very_high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            moderate: 0.10,
            high: 0.20,
            very_high: 0.30,
        }
    }
}

impl RiskThresholds {
    pub fn classify(&self, p: f64) -> RiskLevel {
        if p < self.moderate {
            RiskLevel::Low
        } else if p < self.high {
            RiskLevel::Moderate
        } else if p < self.very_high {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }

    pub fn is_increasing(&self) -> bool {
        0.0 < self.moderate && self.moderate < self.high && self.high < self.very_high && self.very_high <= 1.0
    }
}
