//! Intervention maps

use crate::clinical::{Covariate, UnknownCovariate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Covariates forced to absolute values, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interventions(IndexMap<Covariate, f64>);

impl Interventions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a covariate; re-setting keeps its original position
    pub fn set(&mut self, covariate: Covariate, value: f64) {
        self.0.insert(covariate, value);
    }

    pub fn with(mut self, covariate: Covariate, value: f64) -> Self {
        self.set(covariate, value);
        self
    }

    /// Parse `(node id, value)` pairs at the API edge
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, UnknownCovariate> {
        let mut interventions = Self::new();
        for (key, value) in pairs {
            interventions.set(key.parse()?, value);
        }
        Ok(interventions)
    }

    pub fn get(&self, covariate: Covariate) -> Option<f64> {
        self.0.get(&covariate).copied()
    }

    pub fn contains(&self, covariate: Covariate) -> bool {
        self.0.contains_key(&covariate)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Covariate, f64)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }

    pub fn covariates(&self) -> impl Iterator<Item = Covariate> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Covariate, f64)> for Interventions {
    fn from_iter<I: IntoIterator<Item = (Covariate, f64)>>(iter: I) -> Self {
        Interventions(iter.into_iter().collect())
    }
}
