//! Graph topology analysis algorithms
//!
//! Topological sorting (Kahn) and order consistency checks for DAGs.

use super::common::{GraphView, NodeId};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Returned when a topological sort cannot place every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError {
    /// Nodes left with unresolved incoming edges, in index order
    pub remaining: Vec<NodeId>,
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph contains a cycle through {} node(s)", self.remaining.len())
    }
}

impl std::error::Error for CycleError {}

/// Kahn's algorithm.
///
/// Roots are released in index order, so the result is deterministic for a
/// given view.
pub fn topological_sort(view: &GraphView) -> Result<Vec<NodeId>, CycleError> {
    let mut in_degree: Vec<usize> = (0..view.node_count).map(|idx| view.in_degree(idx)).collect();
    let mut queue: VecDeque<usize> = (0..view.node_count)
        .filter(|&idx| in_degree[idx] == 0)
        .collect();
    let mut order = Vec::with_capacity(view.node_count);

    while let Some(idx) = queue.pop_front() {
        order.push(view.index_to_node[idx]);
        for &next in view.successors(idx) {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if order.len() == view.node_count {
        Ok(order)
    } else {
        let remaining = (0..view.node_count)
            .filter(|&idx| in_degree[idx] > 0)
            .map(|idx| view.index_to_node[idx])
            .collect();
        Err(CycleError { remaining })
    }
}

/// Edges `(source, target)` whose source does not come strictly before the
/// target in `order`. Nodes absent from `order` count as violations too.
pub fn order_violations(view: &GraphView, order: &[NodeId]) -> Vec<(NodeId, NodeId)> {
    let position: HashMap<NodeId, usize> = order
        .iter()
        .enumerate()
        .map(|(pos, &id)| (id, pos))
        .collect();

    let mut violations = Vec::new();
    for idx in 0..view.node_count {
        let source = view.index_to_node[idx];
        for &next in view.successors(idx) {
            let target = view.index_to_node[next];
            match (position.get(&source), position.get(&target)) {
                (Some(s), Some(t)) if s < t => {}
                _ => violations.push((source, target)),
            }
        }
    }
    violations
}
