//! Engine configuration
//!
//! Defaults carry the reference model constants. A YAML file may override any
//! subset of fields; missing fields keep their defaults.

use crate::risk::RiskThresholds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Largest accepted cascade horizon
pub const MAX_CASCADE_DEPTH: usize = 64;

/// Cascade propagation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    /// Per-hop attenuation factor
    pub gamma: f64,
    /// Maximum hop distance an intervention effect travels
    pub max_depth: usize,
    /// Deltas and contributions at or below this magnitude are ignored
    pub materiality_threshold: f64,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            gamma: 0.7,
            max_depth: 3,
            materiality_threshold: 0.001,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub cascade: CascadeConfig,
    pub risk_thresholds: RiskThresholds,
    /// Alternative dataset (None = bundled reference graph)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<PathBuf>,
    /// Run structural validation when the engine is built
    pub validate_on_load: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cascade: CascadeConfig::default(),
            risk_thresholds: RiskThresholds::default(),
            dataset_path: None,
            validate_on_load: true,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        info!("Loading config from: {:?}", path);
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let cascade = &self.cascade;
        if !(cascade.gamma > 0.0 && cascade.gamma <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "cascade.gamma must be in (0, 1], got {}",
                cascade.gamma
            )));
        }
        if cascade.max_depth == 0 || cascade.max_depth > MAX_CASCADE_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "cascade.max_depth must be in [1, {}], got {}",
                MAX_CASCADE_DEPTH, cascade.max_depth
            )));
        }
        if cascade.materiality_threshold.is_nan() || cascade.materiality_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "cascade.materiality_threshold must be non-negative, got {}",
                cascade.materiality_threshold
            )));
        }
        if !self.risk_thresholds.is_increasing() {
            return Err(ConfigError::Invalid(format!(
                "risk_thresholds must increase within (0, 1], got {:?}",
                self.risk_thresholds
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.cascade.gamma, 0.7);
        assert_eq!(config.cascade.max_depth, 3);
        assert_eq!(config.cascade.materiality_threshold, 0.001);
        assert!(config.validate_on_load);
        assert!(config.dataset_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = EngineConfig::from_yaml_str("cascade:\n  gamma: 0.5\n").unwrap();
        assert_eq!(config.cascade.gamma, 0.5);
        assert_eq!(config.cascade.max_depth, 3);
        assert_eq!(config.risk_thresholds, RiskThresholds::default());
    }

    #[test]
    fn test_empty_document() {
        let config = EngineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = EngineConfig::default();
        config.cascade.max_depth = 4;
        config.dataset_path = Some(PathBuf::from("data/custom.json"));

        let yaml = config.to_yaml().unwrap();
        assert_eq!(EngineConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_invalid_values() {
        for yaml in [
            "cascade:\n  gamma: 0.0\n",
            "cascade:\n  gamma: 1.5\n",
            "cascade:\n  max_depth: 0\n",
            "cascade:\n  max_depth: 65\n",
            "cascade:\n  max_depth: 18446744073709551615\n",
            "cascade:\n  materiality_threshold: -0.1\n",
            "risk_thresholds:\n  moderate: 0.3\n  high: 0.2\n",
        ] {
            let err = EngineConfig::from_yaml_str(yaml).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{}", yaml);
        }
    }

    #[test]
    fn test_parse_error() {
        let err = EngineConfig::from_yaml_str("cascade: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "validate_on_load: false").unwrap();
        writeln!(file, "risk_thresholds:").unwrap();
        writeln!(file, "  moderate: 0.05").unwrap();

        let config = EngineConfig::from_path(file.path()).unwrap();
        assert!(!config.validate_on_load);
        assert_eq!(config.risk_thresholds.moderate, 0.05);
        assert_eq!(config.risk_thresholds.high, 0.20);

        let err = EngineConfig::from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
