//! Graph algorithms module
//!
//! Algorithms are implemented in the `ncd-cie-graph-algorithms` crate.
//! This module provides the integration/adapter layer.

pub mod depth;

use crate::graph::GraphStore;
use ncd_cie_graph_algorithms::{GraphView, NodeId as AlgoNodeId};

pub use depth::{DepthCacheStats, DepthCalculator};

// Re-export algorithms
pub use ncd_cie_graph_algorithms::{bounded_depth, order_violations, topological_sort, CycleError};

/// Build a GraphView from the store for algorithm execution.
///
/// Algorithm node ids are the store's dense node indices, and each node's
/// successor slice keeps edge declaration order.
pub fn build_view(store: &GraphStore) -> GraphView {
    let nodes: Vec<AlgoNodeId> = (0..store.node_count() as AlgoNodeId).collect();

    let edges: Vec<(AlgoNodeId, AlgoNodeId)> = store
        .all_edges()
        .iter()
        .filter_map(|edge| {
            let source = store.node_index(edge.source.as_str())?;
            let target = store.node_index(edge.target.as_str())?;
            Some((source as AlgoNodeId, target as AlgoNodeId))
        })
        .collect();

    GraphView::from_edges(&nodes, &edges)
}
