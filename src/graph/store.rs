//! In-memory knowledge graph storage
//!
//! The graph is loaded once and never mutated afterwards. Lookups by unknown
//! id are tolerated everywhere: they yield `None` or an empty edge list.

use super::edge::Edge;
use super::node::Node;
use super::types::{EdgeId, NodeId, NodeType};
use crate::algo;
use indexmap::IndexMap;
use ncd_cie_graph_algorithms::{order_violations, topological_sort};
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while building or validating the graph
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} already exists")]
    NodeAlreadyExists(NodeId),

    #[error("Edge {0} already exists")]
    EdgeAlreadyExists(EdgeId),

    #[error("Invalid edge {edge}: source node {node} does not exist")]
    InvalidEdgeSource { edge: EdgeId, node: NodeId },

    #[error("Invalid edge {edge}: target node {node} does not exist")]
    InvalidEdgeTarget { edge: EdgeId, node: NodeId },

    #[error("Graph contains a cycle through {0:?}")]
    CycleDetected(Vec<NodeId>),

    #[error("Topological order is missing node {0}")]
    MissingFromOrder(NodeId),

    #[error("Topological order lists unknown or repeated node {0}")]
    InvalidOrderEntry(NodeId),

    #[error("Edge {edge} ({from} -> {to}) runs against the topological order")]
    OrderViolation { edge: EdgeId, from: NodeId, to: NodeId },

    #[error("Disease node {node} has outgoing edge {edge}")]
    DiseaseHasOutgoing { node: NodeId, edge: EdgeId },

    #[error("Medication node {node} has incoming edge {edge}")]
    MedicationHasIncoming { node: NodeId, edge: EdgeId },

    #[error("Edge {0} has a confidence interval that does not bracket its weight")]
    InconsistentInterval(EdgeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory causal graph
///
/// Uses hash maps for O(1) lookup performance:
/// - nodes: NodeId -> Node (declaration order preserved, position = dense index)
/// - edges: declaration-ordered list, with EdgeId -> position index
/// - outgoing: NodeId -> edge positions (adjacency list for outgoing edges)
/// - incoming: NodeId -> edge positions (adjacency list for incoming edges)
#[derive(Debug, Clone)]
pub struct GraphStore {
    /// Node storage
    nodes: IndexMap<NodeId, Node>,

    /// Edge storage in declaration order
    edges: Vec<Edge>,

    /// Edge id -> position in `edges`
    edge_index: FxHashMap<EdgeId, usize>,

    /// Outgoing edges for each node, declaration order
    outgoing: FxHashMap<NodeId, Vec<usize>>,

    /// Incoming edges for each node, declaration order
    incoming: FxHashMap<NodeId, Vec<usize>>,

    /// Total order consistent with every edge direction
    topological_order: Vec<NodeId>,
}

impl GraphStore {
    /// Build the store and its adjacency indices.
    ///
    /// An empty `topological_order` is computed from the edges; a supplied
    /// one is kept verbatim and only checked by [`GraphStore::validate`].
    pub fn from_parts(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        topological_order: Vec<NodeId>,
    ) -> GraphResult<Self> {
        let mut node_map = IndexMap::with_capacity(nodes.len());
        for node in nodes {
            if node_map.contains_key(&node.id) {
                return Err(GraphError::NodeAlreadyExists(node.id));
            }
            node_map.insert(node.id.clone(), node);
        }

        let mut edge_index = FxHashMap::default();
        let mut outgoing: FxHashMap<NodeId, Vec<usize>> = FxHashMap::default();
        let mut incoming: FxHashMap<NodeId, Vec<usize>> = FxHashMap::default();

        for (pos, edge) in edges.iter().enumerate() {
            if !node_map.contains_key(&edge.source) {
                return Err(GraphError::InvalidEdgeSource {
                    edge: edge.id.clone(),
                    node: edge.source.clone(),
                });
            }
            if !node_map.contains_key(&edge.target) {
                return Err(GraphError::InvalidEdgeTarget {
                    edge: edge.id.clone(),
                    node: edge.target.clone(),
                });
            }
            if edge_index.insert(edge.id.clone(), pos).is_some() {
                return Err(GraphError::EdgeAlreadyExists(edge.id.clone()));
            }

            outgoing.entry(edge.source.clone()).or_default().push(pos);
            incoming.entry(edge.target.clone()).or_default().push(pos);
        }

        let mut store = GraphStore {
            nodes: node_map,
            edges,
            edge_index,
            outgoing,
            incoming,
            topological_order,
        };

        if store.topological_order.is_empty() {
            store.topological_order = store.compute_topological_order()?;
            debug!("Computed topological order over {} nodes", store.topological_order.len());
        }

        info!(
            "Knowledge graph loaded: {} nodes, {} edges",
            store.node_count(),
            store.edge_count()
        );

        Ok(store)
    }

    /// Get all outgoing edges from a node
    pub fn edges_from(&self, node_id: &str) -> Vec<&Edge> {
        self.outgoing
            .get(node_id)
            .map(|positions| positions.iter().map(|&pos| &self.edges[pos]).collect())
            .unwrap_or_default()
    }

    /// Get all incoming edges to a node
    pub fn edges_to(&self, node_id: &str) -> Vec<&Edge> {
        self.incoming
            .get(node_id)
            .map(|positions| positions.iter().map(|&pos| &self.edges[pos]).collect())
            .unwrap_or_default()
    }

    pub fn get_node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn has_node(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    pub fn get_edge(&self, edge_id: &str) -> Option<&Edge> {
        self.edge_index.get(edge_id).map(|&pos| &self.edges[pos])
    }

    /// Dense index of a node (its declaration position)
    pub fn node_index(&self, node_id: &str) -> Option<usize> {
        self.nodes.get_index_of(node_id)
    }

    /// Node at a dense index
    pub fn node_at(&self, idx: usize) -> Option<&Node> {
        self.nodes.get_index(idx).map(|(_, node)| node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in declaration order
    pub fn all_nodes(&self) -> Vec<&Node> {
        self.nodes.values().collect()
    }

    /// All edges in declaration order
    pub fn all_edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn nodes_by_type(&self, node_type: NodeType) -> Vec<&Node> {
        self.nodes
            .values()
            .filter(|node| node.node_type == node_type)
            .collect()
    }

    pub fn topological_order(&self) -> &[NodeId] {
        &self.topological_order
    }

    /// Check the structural invariants the cascade relies on.
    ///
    /// Not called on lookups; run once by whoever curates or loads a dataset.
    pub fn validate(&self) -> GraphResult<()> {
        let view = algo::build_view(self);

        if let Err(cycle) = topological_sort(&view) {
            let members = cycle
                .remaining
                .iter()
                .map(|&idx| self.node_id_at(idx as usize))
                .collect();
            return Err(GraphError::CycleDetected(members));
        }

        let mut seen = FxHashSet::default();
        let mut order = Vec::with_capacity(self.topological_order.len());
        for id in &self.topological_order {
            match self.node_index(id.as_str()) {
                Some(idx) if seen.insert(idx) => order.push(idx as u64),
                _ => return Err(GraphError::InvalidOrderEntry(id.clone())),
            }
        }
        if let Some(missing) = self.nodes.keys().find(|id| {
            self.node_index(id.as_str())
                .map_or(true, |idx| !seen.contains(&idx))
        }) {
            return Err(GraphError::MissingFromOrder(missing.clone()));
        }

        if let Some(&(from, to)) = order_violations(&view, &order).first() {
            let from = self.node_id_at(from as usize);
            let to = self.node_id_at(to as usize);
            let edge = self
                .edges_from(from.as_str())
                .into_iter()
                .find(|edge| edge.target == to)
                .map(|edge| edge.id.clone())
                .unwrap_or_else(|| EdgeId::new(format!("{}->{}", from, to)));
            return Err(GraphError::OrderViolation { edge, from, to });
        }

        for node in self.nodes.values() {
            if node.is_disease() {
                if let Some(edge) = self.edges_from(node.id.as_str()).first() {
                    return Err(GraphError::DiseaseHasOutgoing {
                        node: node.id.clone(),
                        edge: edge.id.clone(),
                    });
                }
            }
            if node.is_medication() {
                if let Some(edge) = self.edges_to(node.id.as_str()).first() {
                    return Err(GraphError::MedicationHasIncoming {
                        node: node.id.clone(),
                        edge: edge.id.clone(),
                    });
                }
            }
        }

        if let Some(edge) = self.edges.iter().find(|edge| !edge.has_consistent_ci()) {
            return Err(GraphError::InconsistentInterval(edge.id.clone()));
        }

        debug!("Knowledge graph validated");
        Ok(())
    }

    fn compute_topological_order(&self) -> GraphResult<Vec<NodeId>> {
        let view = algo::build_view(self);
        match topological_sort(&view) {
            Ok(order) => Ok(order
                .into_iter()
                .map(|idx| self.node_id_at(idx as usize))
                .collect()),
            Err(cycle) => Err(GraphError::CycleDetected(
                cycle
                    .remaining
                    .into_iter()
                    .map(|idx| self.node_id_at(idx as usize))
                    .collect(),
            )),
        }
    }

    fn node_id_at(&self, idx: usize) -> NodeId {
        self.nodes
            .get_index(idx)
            .map(|(id, _)| id.clone())
            .unwrap_or_else(|| NodeId::new(format!("#{}", idx)))
    }
}
