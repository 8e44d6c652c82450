//! Pathfinding algorithms
//!
//! Depth-limited breadth-first search over outgoing edges.

use super::common::{GraphView, NodeId};
use std::collections::{HashSet, VecDeque};

/// Hop distance from `source` to `target`, searching no deeper than `max_depth`.
///
/// Returns `Some(0)` when source and target are the same node, `Some(d)` for the
/// first depth at which `target` is discovered, and `None` when the target is
/// not reachable within the horizon or either id is not in the view.
/// Nodes at depth `max_depth` are discovered but never expanded.
pub fn bounded_depth(
    view: &GraphView,
    source: NodeId,
    target: NodeId,
    max_depth: usize,
) -> Option<usize> {
    if source == target {
        return Some(0);
    }

    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();

    queue.push_back((source_idx, 0usize));
    visited.insert(source_idx);

    while let Some((current_idx, depth)) = queue.pop_front() {
        if current_idx == target_idx {
            return Some(depth);
        }
        if depth >= max_depth {
            continue;
        }

        for &next_idx in view.successors(current_idx) {
            if visited.insert(next_idx) {
                queue.push_back((next_idx, depth + 1));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(len: u64) -> GraphView {
        // 0 -> 1 -> 2 -> ... -> len-1
        let nodes: Vec<NodeId> = (0..len).collect();
        let edges: Vec<(NodeId, NodeId)> = (1..len).map(|i| (i - 1, i)).collect();
        GraphView::from_edges(&nodes, &edges)
    }

    #[test]
    fn test_same_node_is_depth_zero() {
        let view = chain(3);
        assert_eq!(bounded_depth(&view, 1, 1, 3), Some(0));
        // Holds even for ids the view has never seen
        assert_eq!(bounded_depth(&view, 77, 77, 3), Some(0));
    }

    #[test]
    fn test_chain_depths() {
        let view = chain(6);
        assert_eq!(bounded_depth(&view, 0, 1, 3), Some(1));
        assert_eq!(bounded_depth(&view, 0, 3, 3), Some(3));
        assert_eq!(bounded_depth(&view, 0, 4, 3), None);
        assert_eq!(bounded_depth(&view, 0, 4, 4), Some(4));
    }

    #[test]
    fn test_direction_is_respected() {
        let view = chain(3);
        assert_eq!(bounded_depth(&view, 2, 0, 3), None);
    }

    #[test]
    fn test_shortest_hop_wins() {
        // 0 -> 1 -> 2 -> 3 and a shortcut 0 -> 3
        let view = GraphView::from_edges(&[0, 1, 2, 3], &[(0, 1), (1, 2), (2, 3), (0, 3)]);
        assert_eq!(bounded_depth(&view, 0, 3, 3), Some(1));
    }

    #[test]
    fn test_cycle_terminates() {
        let view = GraphView::from_edges(&[0, 1, 2], &[(0, 1), (1, 0)]);
        assert_eq!(bounded_depth(&view, 0, 2, 10), None);
    }

    #[test]
    fn test_unknown_ids() {
        let view = chain(3);
        assert_eq!(bounded_depth(&view, 0, 99, 3), None);
        assert_eq!(bounded_depth(&view, 99, 0, 3), None);
    }
}
