//! Logistic-link risk scorer

use super::RiskResult;
use crate::clinical::{derive_conditions, standardize, Covariates};
use crate::graph::{GraphStore, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Baseline log-odds for disease ids without a known intercept
pub const DEFAULT_INTERCEPT: f64 = -2.5;

/// The seven disease endpoints of the reference graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disease {
    Cad,
    Stroke,
    Hf,
    Pad,
    T2dm,
    Ckd,
    Nafld,
}

impl Disease {
    pub const ALL: [Disease; 7] = [
        Disease::Cad,
        Disease::Stroke,
        Disease::Hf,
        Disease::Pad,
        Disease::T2dm,
        Disease::Ckd,
        Disease::Nafld,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Disease::Cad => "cad",
            Disease::Stroke => "stroke",
            Disease::Hf => "hf",
            Disease::Pad => "pad",
            Disease::T2dm => "t2dm",
            Disease::Ckd => "ckd",
            Disease::Nafld => "nafld",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Disease::Cad => "Coronary Artery Disease",
            Disease::Stroke => "Stroke",
            Disease::Hf => "Heart Failure",
            Disease::Pad => "Peripheral Artery Disease",
            Disease::T2dm => "Type 2 Diabetes",
            Disease::Ckd => "Chronic Kidney Disease",
            Disease::Nafld => "Fatty Liver Disease",
        }
    }

    pub fn abbr(&self) -> &'static str {
        match self {
            Disease::Cad => "CAD",
            Disease::Stroke => "Stroke",
            Disease::Hf => "HF",
            Disease::Pad => "PAD",
            Disease::T2dm => "T2DM",
            Disease::Ckd => "CKD",
            Disease::Nafld => "NAFLD",
        }
    }

    /// Baseline log-odds before any covariate contribution
    pub fn intercept(&self) -> f64 {
        match self {
            Disease::Cad => -2.5,
            Disease::Stroke => -3.0,
            Disease::Hf => -3.2,
            Disease::Pad => -3.5,
            Disease::T2dm => -2.8,
            Disease::Ckd => -2.6,
            Disease::Nafld => -2.0,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Disease::ALL.iter().copied().find(|d| d.id() == id)
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbr())
    }
}

fn intercept_for(disease_id: &str) -> f64 {
    Disease::from_id(disease_id).map_or(DEFAULT_INTERCEPT, |d| d.intercept())
}

/// Logistic function that never overflows; NaN maps to 0.5
pub fn stable_sigmoid(x: f64) -> f64 {
    if x.is_nan() {
        warn!("NaN logit, returning 0.5");
        return 0.5;
    }
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

fn covariate_z(covariates: &Covariates, node_id: &str) -> f64 {
    covariates
        .value_of(node_id)
        .map_or(0.0, |raw| standardize(node_id, raw))
}

/// Risk of a single disease with its confidence interval.
///
/// Conditions are re-derived first. Unknown disease ids score the default
/// intercept with no contributing edges.
pub fn compute_disease_risk(store: &GraphStore, covariates: &Covariates, disease_id: &str) -> RiskResult {
    let covariates = derive_conditions(covariates);
    let intercept = intercept_for(disease_id);

    let mut logit = intercept;
    let mut logit_low = intercept;
    let mut logit_high = intercept;

    for edge in store.edges_to(disease_id) {
        let z = covariate_z(&covariates, edge.source.as_str());
        logit += edge.weight * z;
        // A negative z reverses which CI endpoint gives the lower logit
        if z >= 0.0 {
            logit_low += edge.ci_low() * z;
            logit_high += edge.ci_high() * z;
        } else {
            logit_low += edge.ci_high() * z;
            logit_high += edge.ci_low() * z;
        }
    }

    RiskResult::new(
        stable_sigmoid(logit),
        stable_sigmoid(logit_low),
        stable_sigmoid(logit_high),
    )
}

/// Contribution of one incoming edge to a disease logit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskContribution {
    pub node_id: NodeId,
    pub label: String,
    pub contribution: f64,
    pub z_score: f64,
}

/// Per-edge contributions, largest magnitude first.
///
/// Ties keep edge declaration order.
pub fn compute_risk_contributions(
    store: &GraphStore,
    covariates: &Covariates,
    disease_id: &str,
) -> Vec<RiskContribution> {
    let covariates = derive_conditions(covariates);

    let mut contributions: Vec<RiskContribution> = store
        .edges_to(disease_id)
        .into_iter()
        .map(|edge| {
            let source = edge.source.as_str();
            let z_score = covariate_z(&covariates, source);
            let label = store
                .get_node(source)
                .map_or_else(|| source.to_string(), |n| n.label.clone());
            RiskContribution {
                node_id: edge.source.clone(),
                label,
                contribution: edge.weight * z_score,
                z_score,
            }
        })
        .collect();

    contributions.sort_by(|a, b| b.contribution.abs().total_cmp(&a.contribution.abs()));
    contributions
}
