//! Patient-side inputs
//!
//! - Fixed-field covariate vector with an enumerated accessor
//! - Z-score standardization against the reference population
//! - Diabetes and hypertension status derivation
//! - Plausibility ranges, vital status bands and the demo cohort

pub mod conditions;
pub mod covariate;
pub mod patient;
pub mod ranges;
pub mod standardize;

pub use conditions::{derive_conditions, diabetes_status, hypertension_status};
pub use covariate::{Covariate, Covariates, UnknownCovariate};
pub use patient::{demo_patient, demo_patients, PatientProfile};
pub use ranges::{vital_status, BiomarkerRange, RangeViolation, VitalStatus};
pub use standardize::{reference_stats, standardize, PopulationStats};
