//! Edge implementation for the causal knowledge graph

use super::types::{ClinicalDomain, EdgeId, EvidenceGrade, NodeId};
use serde::{Deserialize, Serialize};

/// A directed, weighted causal relationship
///
/// The weight is a log-odds-scale effect of one standard deviation of the
/// source on the target. `ci` is the `[low, high]` confidence interval around it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Signed causal effect
    pub weight: f64,

    /// Confidence interval `[low, high]`
    pub ci: [f64; 2],

    pub evidence_grade: EvidenceGrade,

    pub domain: ClinicalDomain,

    pub description: String,

    /// Bradford-Hill causality score, when curated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bradford_hill: Option<f64>,
}

impl Edge {
    /// Create a new directed edge with a confidence interval
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        weight: f64,
        ci: [f64; 2],
        evidence_grade: EvidenceGrade,
        domain: ClinicalDomain,
    ) -> Self {
        Edge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            weight,
            ci,
            evidence_grade,
            domain,
            description: String::new(),
            bradford_hill: None,
        }
    }

    pub fn ci_low(&self) -> f64 {
        self.ci[0]
    }

    pub fn ci_high(&self) -> f64 {
        self.ci[1]
    }

    /// Weight lies inside its own confidence interval
    pub fn has_consistent_ci(&self) -> bool {
        self.ci[0] <= self.weight && self.weight <= self.ci[1]
    }
}
