//! Engine configuration
//!
//! This module defines the calibration table (per-factor domain bounds and
//! risk direction), the factor weight table, risk-tier thresholds, and the
//! histogram bin count. Configuration is validated once, up front; scoring
//! assumes a valid configuration thereafter.

use crate::error::EngineError;
use crate::types::Factor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tolerance for the weight-sum invariant
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Default ceiling of the Stable tier
pub const DEFAULT_STABLE_CEILING: f64 = 0.50;

/// Default ceiling of the Moderate tier
pub const DEFAULT_MODERATE_CEILING: f64 = 0.70;

/// Default number of histogram bins over [0,1]
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Direction of the raw-value-to-risk mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskDirection {
    /// Higher raw values mean higher risk
    Direct,
    /// Higher raw values mean lower risk (e.g. steps/day)
    Inverse,
}

/// Calibration for one factor: the expected raw domain and risk direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorCalibration {
    /// Lower bound of the expected raw domain
    pub domain_min: f64,
    /// Upper bound of the expected raw domain
    pub domain_max: f64,
    /// Whether risk rises or falls with the raw value
    pub direction: RiskDirection,
}

impl FactorCalibration {
    pub fn new(domain_min: f64, domain_max: f64, direction: RiskDirection) -> Self {
        Self {
            domain_min,
            domain_max,
            direction,
        }
    }
}

/// Full engine configuration.
///
/// `Default` carries the documented mental-health policy defaults; adopting
/// systems override them via the builder-style setters or a JSON config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Per-factor calibration table
    pub calibrations: HashMap<Factor, FactorCalibration>,
    /// Per-factor weight table; must sum to 1.0 within tolerance
    pub weights: HashMap<Factor, f64>,
    /// Upper bound of the Stable tier (score <= ceiling is Stable)
    pub stable_ceiling: f64,
    /// Upper bound of the Moderate tier (score <= ceiling is Moderate)
    pub moderate_ceiling: f64,
    /// Number of cohort histogram bins over [0,1]
    pub histogram_bins: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut calibrations = HashMap::new();
        // Steps per day; sedentary weeks score as risk
        calibrations.insert(
            Factor::Mobility,
            FactorCalibration::new(0.0, 30_000.0, RiskDirection::Inverse),
        );
        // Mean journal sentiment polarity in [-1, 1]
        calibrations.insert(
            Factor::Sentiment,
            FactorCalibration::new(-1.0, 1.0, RiskDirection::Inverse),
        );
        // Mean nightly sleep in hours
        calibrations.insert(
            Factor::Sleep,
            FactorCalibration::new(0.0, 10.0, RiskDirection::Inverse),
        );
        // Self-reported mood rating, 1 (low) to 5 (high)
        calibrations.insert(
            Factor::MoodCheckins,
            FactorCalibration::new(1.0, 5.0, RiskDirection::Inverse),
        );

        let mut weights = HashMap::new();
        weights.insert(Factor::Mobility, 0.30);
        weights.insert(Factor::Sentiment, 0.40);
        weights.insert(Factor::Sleep, 0.20);
        weights.insert(Factor::MoodCheckins, 0.10);

        Self {
            calibrations,
            weights,
            stable_ceiling: DEFAULT_STABLE_CEILING,
            moderate_ceiling: DEFAULT_MODERATE_CEILING,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl EngineConfig {
    /// Replace the weight table
    pub fn with_weights(mut self, weights: HashMap<Factor, f64>) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the tier thresholds
    pub fn with_thresholds(mut self, stable_ceiling: f64, moderate_ceiling: f64) -> Self {
        self.stable_ceiling = stable_ceiling;
        self.moderate_ceiling = moderate_ceiling;
        self
    }

    /// Replace the histogram bin count
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    /// Look up the calibration for a factor
    pub fn calibration(&self, factor: Factor) -> Result<&FactorCalibration, EngineError> {
        self.calibrations.get(&factor).ok_or_else(|| {
            EngineError::Configuration(format!("missing calibration for factor {}", factor.as_str()))
        })
    }

    /// Look up the weight for a factor
    pub fn weight(&self, factor: Factor) -> Result<f64, EngineError> {
        self.weights.get(&factor).copied().ok_or_else(|| {
            EngineError::Configuration(format!("missing weight for factor {}", factor.as_str()))
        })
    }

    /// Validate the full configuration. Called once at processor setup.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (factor, calibration) in &self.calibrations {
            if !calibration.domain_min.is_finite() || !calibration.domain_max.is_finite() {
                return Err(EngineError::Configuration(format!(
                    "non-finite domain for factor {}",
                    factor.as_str()
                )));
            }
            if calibration.domain_max <= calibration.domain_min {
                return Err(EngineError::Configuration(format!(
                    "empty domain for factor {}: [{}, {}]",
                    factor.as_str(),
                    calibration.domain_min,
                    calibration.domain_max
                )));
            }
        }

        if self.weights.is_empty() {
            return Err(EngineError::Configuration(
                "weight table is empty".to_string(),
            ));
        }
        for (factor, weight) in &self.weights {
            if !(0.0..=1.0).contains(weight) {
                return Err(EngineError::Configuration(format!(
                    "weight for factor {} is {} (must be in [0,1])",
                    factor.as_str(),
                    weight
                )));
            }
            if !self.calibrations.contains_key(factor) {
                return Err(EngineError::Configuration(format!(
                    "missing calibration for factor {}",
                    factor.as_str()
                )));
            }
        }
        let sum: f64 = self.weights.values().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::Configuration(format!(
                "factor weights sum to {sum}, expected 1.0"
            )));
        }

        if !(0.0 < self.stable_ceiling
            && self.stable_ceiling < self.moderate_ceiling
            && self.moderate_ceiling < 1.0)
        {
            return Err(EngineError::Configuration(format!(
                "invalid tier thresholds: stable {} / moderate {}",
                self.stable_ceiling, self.moderate_ceiling
            )));
        }

        if self.histogram_bins == 0 {
            return Err(EngineError::Configuration(
                "histogram bin count must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Load a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.histogram_bins, 10);
        assert!((config.stable_ceiling - 0.50).abs() < 1e-12);
        assert!((config.moderate_ceiling - 0.70).abs() < 1e-12);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut weights = HashMap::new();
        weights.insert(Factor::Mobility, 0.5);
        weights.insert(Factor::Sleep, 0.4);

        let config = EngineConfig::default().with_weights(weights);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
        assert!(err.to_string().contains("sum to"));
    }

    #[test]
    fn test_weight_without_calibration_is_rejected() {
        let mut config = EngineConfig::default();
        config.calibrations.remove(&Factor::Sleep);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("missing calibration"));
    }

    #[test]
    fn test_inverted_thresholds_are_rejected() {
        let config = EngineConfig::default().with_thresholds(0.8, 0.4);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_domain_is_rejected() {
        let mut config = EngineConfig::default();
        config.calibrations.insert(
            Factor::Mobility,
            FactorCalibration::new(5.0, 5.0, RiskDirection::Direct),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        let loaded = EngineConfig::from_json(&json).unwrap();
        assert_eq!(config, loaded);
    }
}
