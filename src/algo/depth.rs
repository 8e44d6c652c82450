//! Memoized hop-distance lookups for cascade attenuation

use super::build_view;
use crate::graph::GraphStore;
use ncd_cie_graph_algorithms::{bounded_depth, GraphView};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Snapshot of the memo's effectiveness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepthCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Depth-limited BFS with a per-(source, target) memo.
///
/// The memo is append-only: entries are inserted once and never changed, so
/// concurrent readers always observe a correct answer.
#[derive(Debug)]
pub struct DepthCalculator {
    view: GraphView,
    max_depth: usize,
    memo: RwLock<FxHashMap<(usize, usize), usize>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DepthCalculator {
    pub fn new(store: &GraphStore, max_depth: usize) -> Self {
        DepthCalculator {
            view: build_view(store),
            max_depth,
            memo: RwLock::new(FxHashMap::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Sentinel returned for pairs not connected within the horizon
    pub fn unreachable(&self) -> usize {
        self.max_depth.saturating_add(1)
    }

    /// Hop distance from `source` to `target` by node id.
    ///
    /// Identical ids give 0; unknown ids and pairs beyond the horizon give
    /// [`DepthCalculator::unreachable`].
    pub fn get_depth(&self, store: &GraphStore, source: &str, target: &str) -> usize {
        if source == target {
            return 0;
        }
        match (store.node_index(source), store.node_index(target)) {
            (Some(s), Some(t)) => self.depth_by_index(s, t),
            _ => self.unreachable(),
        }
    }

    /// Hop distance between dense node indices
    pub fn depth_by_index(&self, source: usize, target: usize) -> usize {
        if source == target {
            return 0;
        }

        let cached = self
            .memo
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(source, target))
            .copied();
        if let Some(depth) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return depth;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let depth = bounded_depth(&self.view, source as u64, target as u64, self.max_depth)
            .unwrap_or_else(|| self.unreachable());

        self.memo
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((source, target))
            .or_insert(depth);

        debug!("Depth {} -> {} = {} (memoized)", source, target, depth);
        depth
    }

    pub fn cache_stats(&self) -> DepthCacheStats {
        DepthCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.memo.read().unwrap_or_else(PoisonError::into_inner).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> (GraphStore, DepthCalculator) {
        let store = GraphStore::reference().unwrap();
        let depth = DepthCalculator::new(&store, 3);
        (store, depth)
    }

    #[test]
    fn test_self_depth_is_zero() {
        let (store, depth) = calculator();
        for node in store.all_nodes() {
            assert_eq!(depth.get_depth(&store, node.id.as_str(), node.id.as_str()), 0);
        }
        assert_eq!(depth.get_depth(&store, "unknown", "unknown"), 0);
    }

    #[test]
    fn test_reference_depths() {
        let (store, depth) = calculator();

        assert_eq!(depth.get_depth(&store, "statin", "ldl"), 1);
        assert_eq!(depth.get_depth(&store, "exercise", "hdl"), 1);
        assert_eq!(depth.get_depth(&store, "diet", "hdl"), 2);
        assert_eq!(depth.get_depth(&store, "sglt2i", "cad"), 2);
        assert_eq!(depth.get_depth(&store, "metformin", "hdl"), 2);
    }

    #[test]
    fn test_unreachable_is_sentinel() {
        let (store, depth) = calculator();

        // Diseases are sinks
        assert_eq!(depth.get_depth(&store, "cad", "ldl"), 4);
        // Edges are directed
        assert_eq!(depth.get_depth(&store, "ldl", "statin"), 4);
        assert_eq!(depth.get_depth(&store, "statin", "unknown"), 4);
        assert_eq!(depth.get_depth(&store, "unknown", "ldl"), 4);
    }

    #[test]
    fn test_memo_hits() {
        let (store, depth) = calculator();

        let first = depth.get_depth(&store, "diet", "hdl");
        let second = depth.get_depth(&store, "diet", "hdl");
        assert_eq!(first, second);

        let stats = depth.cache_stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_memo_matches_fresh_search() {
        let (store, depth) = calculator();
        let view = build_view(&store);

        for source in 0..store.node_count() {
            for target in 0..store.node_count() {
                let fresh = bounded_depth(&view, source as u64, target as u64, 3).unwrap_or(4);
                assert_eq!(depth.depth_by_index(source, target), fresh);
                assert_eq!(depth.depth_by_index(source, target), fresh);
            }
        }
        let stats = depth.cache_stats();
        assert_eq!(stats.entries, store.node_count() * (store.node_count() - 1));
    }

    #[test]
    fn test_horizon_follows_max_depth() {
        let store = GraphStore::reference().unwrap();
        let shallow = DepthCalculator::new(&store, 1);

        assert_eq!(shallow.get_depth(&store, "diet", "hdl"), 2);
        assert_eq!(shallow.unreachable(), 2);
        assert_eq!(shallow.get_depth(&store, "diet", "bmi"), 1);
    }

    #[test]
    fn test_unbounded_horizon_saturates() {
        let store = GraphStore::reference().unwrap();
        let depth = DepthCalculator::new(&store, usize::MAX);

        assert_eq!(depth.unreachable(), usize::MAX);
        assert_eq!(depth.get_depth(&store, "cad", "ldl"), usize::MAX);
        assert_eq!(depth.get_depth(&store, "statin", "ldl"), 1);
    }
}
