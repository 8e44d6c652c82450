//! Derived condition flags

use super::covariate::Covariates;

pub const HBA1C_DIABETES: f64 = 6.5;
pub const HBA1C_PREDIABETES: f64 = 5.7;
pub const FPG_DIABETES: f64 = 126.0;
pub const FPG_PREDIABETES: f64 = 100.0;

pub const SBP_HYPERTENSION: f64 = 140.0;
pub const SBP_ELEVATED: f64 = 130.0;
pub const DBP_HYPERTENSION: f64 = 90.0;
pub const DBP_ELEVATED: f64 = 85.0;

/// 1 for diabetes, 0.5 for prediabetes, 0 otherwise
pub fn diabetes_status(hba1c: f64, fpg: f64) -> f64 {
    if hba1c >= HBA1C_DIABETES || fpg >= FPG_DIABETES {
        1.0
    } else if hba1c >= HBA1C_PREDIABETES || fpg >= FPG_PREDIABETES {
        0.5
    } else {
        0.0
    }
}

/// 1 for hypertension, 0.5 for elevated pressure, 0 otherwise
pub fn hypertension_status(sbp: f64, dbp: f64) -> f64 {
    if sbp >= SBP_HYPERTENSION || dbp >= DBP_HYPERTENSION {
        1.0
    } else if sbp >= SBP_ELEVATED || dbp >= DBP_ELEVATED {
        0.5
    } else {
        0.0
    }
}

/// Copy of `covariates` with `diabetes` and `hypertension` recomputed from the
/// glycaemic and blood pressure fields. Idempotent.
pub fn derive_conditions(covariates: &Covariates) -> Covariates {
    Covariates {
        diabetes: diabetes_status(covariates.hba1c, covariates.fpg),
        hypertension: hypertension_status(covariates.sbp, covariates.dbp),
        ..*covariates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diabetes_bands() {
        assert_eq!(diabetes_status(5.2, 88.0), 0.0);
        assert_eq!(diabetes_status(5.7, 88.0), 0.5);
        assert_eq!(diabetes_status(5.2, 100.0), 0.5);
        assert_eq!(diabetes_status(6.5, 88.0), 1.0);
        assert_eq!(diabetes_status(5.2, 126.0), 1.0);
        assert_eq!(diabetes_status(6.49, 125.9), 0.5);
    }

    #[test]
    fn test_hypertension_bands() {
        assert_eq!(hypertension_status(120.0, 75.0), 0.0);
        assert_eq!(hypertension_status(130.0, 75.0), 0.5);
        assert_eq!(hypertension_status(120.0, 85.0), 0.5);
        assert_eq!(hypertension_status(140.0, 75.0), 1.0);
        assert_eq!(hypertension_status(120.0, 90.0), 1.0);
    }

    #[test]
    fn test_derive_is_idempotent_and_overwrites() {
        let raw = Covariates {
            sbp: 148.0,
            dbp: 92.0,
            hba1c: 6.1,
            fpg: 112.0,
            diabetes: 1.0,
            hypertension: 0.0,
            ..Default::default()
        };

        let once = derive_conditions(&raw);
        assert_eq!(once.diabetes, 0.5);
        assert_eq!(once.hypertension, 1.0);
        assert_eq!(derive_conditions(&once), once);
        assert_eq!(once.sbp, raw.sbp);
    }
}
