//! Curated node/edge datasets
//!
//! The reference NCD-CIE graph ships inside the crate as JSON and is parsed on
//! demand; alternative datasets with the same shape can be loaded from disk.

use super::edge::Edge;
use super::node::Node;
use super::store::{GraphError, GraphStore};
use super::types::NodeId;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

const REFERENCE_DATASET: &str = include_str!("../../data/knowledge_graph.json");

/// Errors raised while reading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid dataset: {0}")]
    Graph(#[from] GraphError),
}

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Serialized form of a knowledge graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub nodes: Vec<Node>,

    pub edges: Vec<Edge>,

    /// Optional precomputed order; computed from the edges when empty
    #[serde(default)]
    pub topological_order: Vec<NodeId>,
}

impl Dataset {
    /// The bundled 107-edge NCD-CIE reference graph
    pub fn reference() -> DatasetResult<Self> {
        Self::from_json_str(REFERENCE_DATASET)
    }

    pub fn from_json_str(json: &str) -> DatasetResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        info!("Loading dataset from: {:?}", path);
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Build the in-memory store with its adjacency indices
    pub fn into_store(self) -> DatasetResult<GraphStore> {
        Ok(GraphStore::from_parts(
            self.nodes,
            self.edges,
            self.topological_order,
        )?)
    }
}

impl GraphStore {
    /// Load the bundled reference graph
    pub fn reference() -> DatasetResult<Self> {
        Dataset::reference()?.into_store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reference_dataset_parses() {
        let dataset = Dataset::reference().unwrap();

        assert_eq!(dataset.nodes.len(), 31);
        assert_eq!(dataset.edges.len(), 107);
        assert_eq!(dataset.topological_order.len(), 31);
        assert_eq!(dataset.version.as_deref(), Some("ncd-cie-v16"));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "nodes": [
                    {{"id": "ldl", "label": "LDL-C", "domain": "Lipid Metabolism", "type": "biomarker", "description": ""}},
                    {{"id": "cad", "label": "CAD", "domain": "Disease Endpoints", "type": "disease", "description": ""}}
                ],
                "edges": [
                    {{"id": "e1", "source": "ldl", "target": "cad", "weight": 0.28, "ci": [0.22, 0.34],
                      "evidence_grade": "A", "domain": "Lipid Metabolism", "description": ""}}
                ]
            }}"#
        )
        .unwrap();

        let store = Dataset::from_path(file.path()).unwrap().into_store().unwrap();
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.topological_order().len(), 2);
    }

    #[test]
    fn test_parse_error() {
        let err = Dataset::from_json_str("{\"nodes\": 3}").unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
