//! Risk tier classification
//!
//! One canonical decision point for the score-to-tier mapping. Thresholds
//! are exact boundaries; a score sitting exactly on a boundary takes the
//! lower-risk tier (0.70 is Moderate, not High).

use crate::config::EngineConfig;
use crate::types::{CompositeScore, RiskTier};

/// Classifier mapping composite scores to discrete risk tiers
#[derive(Debug, Clone, Copy)]
pub struct RiskClassifier {
    stable_ceiling: f64,
    moderate_ceiling: f64,
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl RiskClassifier {
    /// Build a classifier from validated engine configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            stable_ceiling: config.stable_ceiling,
            moderate_ceiling: config.moderate_ceiling,
        }
    }

    /// Classify a composite score
    pub fn classify(&self, score: &CompositeScore) -> RiskTier {
        self.classify_value(score.value)
    }

    /// Classify a bare score value.
    ///
    /// Stateless and re-evaluated per call; nothing is cached.
    pub fn classify_value(&self, value: f64) -> RiskTier {
        if value > self.moderate_ceiling {
            RiskTier::High
        } else if value > self.stable_ceiling {
            RiskTier::Moderate
        } else {
            RiskTier::Stable
        }
    }
}
