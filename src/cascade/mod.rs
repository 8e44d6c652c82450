//! What-if simulation
//!
//! Interventions pin covariates to new values; the simulator propagates the
//! resulting deltas down the causal graph and rescores every disease.

pub mod intervention;
pub mod scenario;
pub mod simulator;

pub use intervention::Interventions;
pub use scenario::{preset, presets, Scenario, ScenarioChange};
pub use simulator::{CascadeResult, CascadeSimulator};
