//! NCD-CIE Causal Risk Engine
//!
//! Multi-disease risk prediction and what-if simulation over a curated causal
//! knowledge graph of non-communicable diseases.
//!
//! # Architecture
//!
//! - `graph`: immutable knowledge graph (31 nodes, 107 weighted edges) with
//!   outgoing/incoming adjacency indices and structural validation
//! - `algo`: adapter onto the `ncd-cie-graph-algorithms` CSR view plus the
//!   memoized depth-limited BFS used for cascade attenuation
//! - `clinical`: covariate vector, z-score standardization, diabetes and
//!   hypertension derivation, plausibility ranges and a demo cohort
//! - `risk`: logistic-link scorer with confidence intervals, per-edge
//!   contributions, noisy-OR composites and risk level bands
//! - `cascade`: depth-attenuated intervention propagation and preset scenarios
//! - `engine`: `CausalEngine`, the context object owning graph, memo and config
//!
//! # Model
//!
//! For a disease `d` with intercept `b`, the logit is
//! `b + Σ w_e · z(source_e)` over the incoming edges of `d`, where `z` is the
//! source covariate standardized against the reference population. Confidence
//! bounds use the edge CI endpoints, swapped when `z < 0`. Composites combine
//! constituents as `1 - Π(1 - r)`.
//!
//! An intervention pins covariates to new values. Every other node, in
//! topological order, receives `Σ w_e · Δparent · γ^d` where `d` is one more
//! than the hop distance from the nearest intervened node to the parent, and
//! effects travelling further than `max_depth` hops are dropped.
//!
//! ## Example Usage
//!
//! ```rust
//! use ncd_cie::{CausalEngine, Covariate, Interventions};
//! use ncd_cie::clinical::demo_patient;
//!
//! let engine = CausalEngine::reference().unwrap();
//! let patient = demo_patient("demo-moderate").unwrap();
//!
//! let baseline = engine.all_risks(&patient.covariates);
//! assert!(baseline.ncd_composite.value >= baseline.cvd_composite.value);
//!
//! // Start statin therapy and propagate the effect
//! let interventions = Interventions::new().with(Covariate::Statin, 1.0);
//! let result = engine.what_if(&patient.covariates, &interventions);
//!
//! assert!(result.risks.cad.value < baseline.cad.value);
//! assert!(result.activated_edges.contains("e83"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod cascade;
pub mod clinical;
pub mod config;
pub mod engine;
pub mod graph;
pub mod risk;

// Re-export main types for convenience
pub use graph::{
    ClinicalDomain, Dataset, DatasetError, DatasetResult, Edge, EdgeId, EvidenceGrade, GraphError,
    GraphResult, GraphStore, Node, NodeId, NodeType,
};

pub use clinical::{Covariate, Covariates, PatientProfile, UnknownCovariate};

pub use risk::{Disease, RiskContribution, RiskLevel, RiskResult, RiskSet, RiskThresholds};

pub use cascade::{CascadeResult, Interventions, Scenario, ScenarioChange};

pub use config::{CascadeConfig, ConfigError, ConfigResult, EngineConfig};

pub use engine::{CausalEngine, EngineError, EngineResult, RiskChange, ScenarioComparison};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
