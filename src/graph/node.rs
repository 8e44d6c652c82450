//! Node implementation for the causal knowledge graph

use super::types::{ClinicalDomain, NodeId, NodeType};
use serde::{Deserialize, Serialize};

/// Reference interval for a biomarker, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalRange {
    pub min: f64,
    pub max: f64,
}

/// A variable in the causal graph
///
/// Nodes have:
/// - A stable string id
/// - A display label and description
/// - A clinical domain and node type
/// - Optional unit and normal range (biomarkers only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Short display label (e.g. "LDL-C")
    pub label: String,

    /// Clinical domain
    pub domain: ClinicalDomain,

    /// Kind of variable
    #[serde(rename = "type")]
    pub node_type: NodeType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_range: Option<NormalRange>,

    pub description: String,
}

impl Node {
    /// Create a node with no unit or normal range
    pub fn new(
        id: impl Into<NodeId>,
        label: impl Into<String>,
        domain: ClinicalDomain,
        node_type: NodeType,
    ) -> Self {
        Node {
            id: id.into(),
            label: label.into(),
            domain,
            node_type,
            unit: None,
            normal_range: None,
            description: String::new(),
        }
    }

    pub fn is_disease(&self) -> bool {
        self.node_type == NodeType::Disease
    }

    pub fn is_medication(&self) -> bool {
        self.node_type == NodeType::Medication
    }
}
