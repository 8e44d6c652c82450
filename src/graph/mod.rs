//! Causal knowledge graph
//!
//! This module implements the fixed reference graph:
//! - Nodes for biomarkers, lifestyle factors, medications, demographics and diseases
//! - Directed, weighted edges with confidence intervals and evidence grades
//! - Outgoing/incoming adjacency indices in declaration order
//! - Dataset loading and structural validation

pub mod dataset;
pub mod edge;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use dataset::{Dataset, DatasetError, DatasetResult};
pub use edge::Edge;
pub use node::{Node, NormalRange};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{ClinicalDomain, EdgeId, EvidenceGrade, NodeId, NodeType};
