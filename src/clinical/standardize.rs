//! Z-score standardization against the reference population

use super::covariate::Covariate;
use serde::Serialize;

/// Mean and standard deviation of a covariate in the reference population
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopulationStats {
    pub mean: f64,
    pub std: f64,
}

impl PopulationStats {
    const fn new(mean: f64, std: f64) -> Self {
        PopulationStats { mean, std }
    }

    pub fn z_score(&self, raw: f64) -> f64 {
        (raw - self.mean) / self.std
    }
}

impl Covariate {
    pub fn reference_stats(&self) -> PopulationStats {
        match self {
            Covariate::Age => PopulationStats::new(55.0, 12.0),
            Covariate::Sex => PopulationStats::new(0.5, 0.5),
            Covariate::Sbp => PopulationStats::new(130.0, 18.0),
            Covariate::Dbp => PopulationStats::new(82.0, 10.0),
            Covariate::Ldl => PopulationStats::new(130.0, 35.0),
            Covariate::Hdl => PopulationStats::new(50.0, 14.0),
            Covariate::Tc => PopulationStats::new(210.0, 40.0),
            Covariate::Tg => PopulationStats::new(150.0, 70.0),
            Covariate::Hba1c => PopulationStats::new(5.8, 0.9),
            Covariate::Fpg => PopulationStats::new(105.0, 25.0),
            Covariate::Bmi => PopulationStats::new(26.0, 4.5),
            Covariate::Egfr => PopulationStats::new(85.0, 22.0),
            Covariate::Smoking => PopulationStats::new(0.25, 0.4),
            Covariate::Exercise => PopulationStats::new(2.5, 2.0),
            Covariate::Alcohol => PopulationStats::new(0.2, 0.3),
            Covariate::Diet => PopulationStats::new(0.5, 0.25),
            Covariate::Statin => PopulationStats::new(0.2, 0.4),
            Covariate::HtnMed => PopulationStats::new(0.3, 0.45),
            Covariate::Sglt2i => PopulationStats::new(0.05, 0.22),
            Covariate::Metformin => PopulationStats::new(0.15, 0.35),
            Covariate::Aspirin => PopulationStats::new(0.15, 0.35),
            Covariate::AceArb => PopulationStats::new(0.2, 0.4),
            Covariate::Diabetes => PopulationStats::new(0.15, 0.35),
            Covariate::Hypertension => PopulationStats::new(0.35, 0.48),
        }
    }
}

/// Reference statistics for a node id, None for nodes outside the table
pub fn reference_stats(node_id: &str) -> Option<PopulationStats> {
    Covariate::from_node_id(node_id).map(|c| c.reference_stats())
}

/// `(raw - mean) / std`, or 0 for ids without reference statistics
pub fn standardize(node_id: &str, raw: f64) -> f64 {
    reference_stats(node_id).map_or(0.0, |stats| stats.z_score(raw))
}
