//! Causal inference engine
//!
//! Owns the knowledge graph, the depth memo and the configuration, and exposes
//! every scoring and simulation operation as a method.

use crate::algo::{DepthCacheStats, DepthCalculator};
use crate::cascade::{CascadeResult, CascadeSimulator, Interventions};
use crate::clinical::{Covariates, UnknownCovariate};
use crate::config::{ConfigError, EngineConfig};
use crate::graph::{Dataset, DatasetError, GraphError, GraphStore};
use crate::risk::{
    compute_all_risks, compute_disease_risk, compute_risk_contributions, RiskContribution,
    RiskLevel, RiskResult, RiskSet,
};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Engine construction and input errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    UnknownCovariate(#[from] UnknownCovariate),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Absolute change of one risk between baseline and scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskChange {
    pub key: &'static str,
    pub baseline: f64,
    pub scenario: f64,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioComparison {
    pub baseline: RiskSet,
    pub scenario: CascadeResult,
    pub changes: Vec<RiskChange>,
}

impl ScenarioComparison {
    pub fn change(&self, key: &str) -> Option<f64> {
        self.changes.iter().find(|c| c.key == key).map(|c| c.change)
    }
}

pub struct CausalEngine {
    store: GraphStore,
    depth: DepthCalculator,
    config: EngineConfig,
}

impl CausalEngine {
    /// Build from config, loading `dataset_path` or the bundled graph
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let store = match &config.dataset_path {
            Some(path) => Dataset::from_path(path)?.into_store()?,
            None => GraphStore::reference()?,
        };
        Self::with_store(store, config)
    }

    /// Reference graph with default configuration
    pub fn reference() -> EngineResult<Self> {
        Self::new(EngineConfig::default())
    }

    pub fn with_store(store: GraphStore, config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        if config.validate_on_load {
            store.validate()?;
        }
        let depth = DepthCalculator::new(&store, config.cascade.max_depth);

        info!(
            "Causal engine ready: {} nodes, {} edges, gamma={}, max_depth={}",
            store.node_count(),
            store.edge_count(),
            config.cascade.gamma,
            config.cascade.max_depth
        );

        Ok(CausalEngine {
            store,
            depth,
            config,
        })
    }

    pub fn graph(&self) -> &GraphStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn risk(&self, covariates: &Covariates, disease_id: &str) -> RiskResult {
        compute_disease_risk(&self.store, covariates, disease_id)
    }

    pub fn all_risks(&self, covariates: &Covariates) -> RiskSet {
        compute_all_risks(&self.store, covariates)
    }

    pub fn contributions(&self, covariates: &Covariates, disease_id: &str) -> Vec<RiskContribution> {
        compute_risk_contributions(&self.store, covariates, disease_id)
    }

    pub fn risk_level(&self, p: f64) -> RiskLevel {
        self.config.risk_thresholds.classify(p)
    }

    pub fn what_if(&self, covariates: &Covariates, interventions: &Interventions) -> CascadeResult {
        CascadeSimulator::new(&self.store, &self.depth, &self.config.cascade).run(covariates, interventions)
    }

    /// Baseline risks, the cascade result and the change of every risk
    pub fn compare(&self, covariates: &Covariates, interventions: &Interventions) -> ScenarioComparison {
        let baseline = self.all_risks(covariates);
        let scenario = self.what_if(covariates, interventions);

        let changes = baseline
            .iter()
            .zip(scenario.risks.iter())
            .map(|((key, before), (_, after))| RiskChange {
                key,
                baseline: before.value,
                scenario: after.value,
                change: after.value - before.value,
            })
            .collect();

        ScenarioComparison {
            baseline,
            scenario,
            changes,
        }
    }

    /// Hop distance, or `max_depth + 1` when unreachable within the horizon
    pub fn get_depth(&self, source: &str, target: &str) -> usize {
        self.depth.get_depth(&self.store, source, target)
    }

    pub fn depth_cache_stats(&self) -> DepthCacheStats {
        self.depth.cache_stats()
    }
}
