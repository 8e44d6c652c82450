//! Depth-attenuated cascade simulation
//!
//! Approximates a do-intervention in a single pass over the topological
//! order: every intervened node is pinned to its new value, and each other
//! node receives the sum of its parents' deltas scaled by edge weight and by
//! `gamma^d`, where `d` is one more than the hop distance from the nearest
//! intervention to the parent.

use super::intervention::Interventions;
use crate::algo::DepthCalculator;
use crate::clinical::{derive_conditions, Covariate, Covariates};
use crate::config::CascadeConfig;
use crate::graph::{EdgeId, GraphStore, NodeId};
use crate::risk::{compute_all_risks, RiskSet};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::debug;

/// Outcome of a what-if run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadeResult {
    /// Caller's covariates with the intervention and cascade applied
    pub covariates: Covariates,
    pub risks: RiskSet,
    /// Materially changed nodes in processing order
    pub deltas: IndexMap<NodeId, f64>,
    /// Edges that carried a material effect, first activation first.
    /// Edges leaving an intervened node are always included.
    pub activated_edges: IndexSet<EdgeId>,
}

impl CascadeResult {
    pub fn delta(&self, node_id: &str) -> Option<f64> {
        self.deltas.get(node_id).copied()
    }

    pub fn is_activated(&self, edge_id: &str) -> bool {
        self.activated_edges.contains(edge_id)
    }
}

pub struct CascadeSimulator<'a> {
    store: &'a GraphStore,
    depth: &'a DepthCalculator,
    config: &'a CascadeConfig,
}

impl<'a> CascadeSimulator<'a> {
    pub fn new(store: &'a GraphStore, depth: &'a DepthCalculator, config: &'a CascadeConfig) -> Self {
        CascadeSimulator {
            store,
            depth,
            config,
        }
    }

    pub fn run(&self, covariates: &Covariates, interventions: &Interventions) -> CascadeResult {
        let store = self.store;
        let threshold = self.config.materiality_threshold;
        let base = derive_conditions(covariates);

        // Node values indexed by store position; non-covariate nodes start at 0
        let baseline: Vec<f64> = store
            .all_nodes()
            .iter()
            .map(|node| base.value_of(node.id.as_str()).unwrap_or(0.0))
            .collect();
        let mut working = baseline.clone();
        let mut intervened = vec![false; baseline.len()];
        let mut roots = Vec::with_capacity(interventions.len());

        let mut deltas: IndexMap<NodeId, f64> = IndexMap::new();
        let mut activated: IndexSet<EdgeId> = IndexSet::new();

        for (covariate, value) in interventions.iter() {
            let Some(idx) = store.node_index(covariate.as_str()) else {
                continue;
            };
            working[idx] = value;
            intervened[idx] = true;
            roots.push(idx);

            let delta = value - baseline[idx];
            if delta.abs() > threshold {
                deltas.insert(NodeId::from(covariate.as_str()), delta);
            }
        }

        for node_id in store.topological_order() {
            let Some(idx) = store.node_index(node_id.as_str()) else {
                continue;
            };
            if intervened[idx] {
                continue;
            }

            let mut total = 0.0;
            for edge in store.edges_to(node_id.as_str()) {
                let Some(parent) = store.node_index(edge.source.as_str()) else {
                    continue;
                };
                let parent_delta = working[parent] - baseline[parent];
                if parent_delta.abs() <= threshold {
                    continue;
                }

                let min_depth = roots
                    .iter()
                    .map(|&root| self.depth.depth_by_index(root, parent))
                    .min()
                    .unwrap_or_else(|| self.depth.unreachable())
                    .saturating_add(1);
                if min_depth > self.config.max_depth {
                    continue;
                }

                let hops = i32::try_from(min_depth).unwrap_or(i32::MAX);
                let contribution = edge.weight * parent_delta * self.config.gamma.powi(hops);
                total += contribution;
                if contribution.abs() > threshold {
                    activated.insert(edge.id.clone());
                }
            }

            if total.abs() > threshold {
                working[idx] = baseline[idx] + total;
                deltas.insert(node_id.clone(), total);
            }
        }

        let mut result = *covariates;
        for (covariate, value) in interventions.iter() {
            result.set(covariate, value);
        }
        for (node_id, delta) in &deltas {
            if let Some(covariate) = Covariate::from_node_id(node_id.as_str()) {
                if !interventions.contains(covariate) {
                    result.set(covariate, base.get(covariate) + delta);
                }
            }
        }

        // Every outgoing edge of an intervened node counts as activated
        for root in roots.iter().filter_map(|&idx| store.node_at(idx)) {
            for edge in store.edges_from(root.id.as_str()) {
                activated.insert(edge.id.clone());
            }
        }

        let risks = compute_all_risks(store, &result);

        debug!(
            "Cascade: {} interventions, {} deltas, {} edges activated",
            interventions.len(),
            deltas.len(),
            activated.len()
        );

        CascadeResult {
            covariates: result,
            risks,
            deltas,
            activated_edges: activated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinical::demo_patient;

    fn moderate() -> Covariates {
        demo_patient("demo-moderate").unwrap().covariates
    }

    fn run(covariates: &Covariates, interventions: &Interventions) -> CascadeResult {
        let store = GraphStore::reference().unwrap();
        let config = CascadeConfig::default();
        let depth = DepthCalculator::new(&store, config.max_depth);
        CascadeSimulator::new(&store, &depth, &config).run(covariates, interventions)
    }

    #[test]
    fn test_no_interventions_changes_nothing() {
        let result = run(&moderate(), &Interventions::new());
        assert!(result.deltas.is_empty());
        assert!(result.activated_edges.is_empty());
        assert_eq!(result.covariates, moderate());
    }

    #[test]
    fn test_noop_intervention() {
        let result = run(&moderate(), &Interventions::new().with(Covariate::Statin, 0.0));

        assert!(result.deltas.is_empty());
        let activated: Vec<_> = result.activated_edges.iter().map(|e| e.as_str()).collect();
        assert_eq!(activated, vec!["e83", "e84", "e85", "e86", "e87"]);
    }

    #[test]
    fn test_statin_lowers_ldl_and_cad() {
        let covariates = moderate().with(Covariate::Ldl, 180.0);
        let store = GraphStore::reference().unwrap();
        let before = compute_all_risks(&store, &covariates);

        let result = run(&covariates, &Interventions::new().with(Covariate::Statin, 1.0));

        assert_eq!(result.delta("statin"), Some(1.0));
        assert!((result.delta("ldl").unwrap() + 0.245).abs() < 1e-9);
        assert!((result.covariates.ldl - (180.0 - 0.245)).abs() < 1e-9);
        assert_eq!(result.covariates.statin, 1.0);
        assert!(result.is_activated("e83"));
        assert!(result.risks.cad.value < before.cad.value);
    }

    #[test]
    fn test_deltas_follow_topological_order() {
        let result = run(&moderate(), &Interventions::new().with(Covariate::Exercise, 5.0));

        let store = GraphStore::reference().unwrap();
        let position = |id: &str| store.topological_order().iter().position(|n| n.as_str() == id);
        let positions: Vec<_> = result
            .deltas
            .keys()
            .skip(1)
            .map(|id| position(id.as_str()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(result.deltas.keys().next().map(|k| k.as_str()), Some("exercise"));
        assert!(result.delta("hdl").unwrap() > 0.0);
        assert!(result.delta("bmi").unwrap() < 0.0);
    }

    #[test]
    fn test_disease_deltas_do_not_leak_into_covariates() {
        let result = run(&moderate(), &Interventions::new().with(Covariate::Smoking, 1.0));
        // Disease nodes may carry deltas but have no covariate field
        for (node_id, _) in &result.deltas {
            if Covariate::from_node_id(node_id.as_str()).is_none() {
                assert!(crate::risk::Disease::from_id(node_id.as_str()).is_some());
            }
        }
        assert_eq!(result.covariates.age, moderate().age);
    }
}
