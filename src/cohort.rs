//! Cohort aggregation
//!
//! This module derives population-level summaries from a snapshot of
//! composite scores for a fixed period: subject counts per risk tier and a
//! fixed-bin histogram of score values over [0,1]. The aggregator owns no
//! subject-level data; callers pass an immutable snapshot.

use crate::classifier::RiskClassifier;
use crate::config::EngineConfig;
use crate::types::{CohortSummary, CompositeScore, Period, RiskTier, TierCounts};

/// Aggregator producing cohort summaries
#[derive(Debug, Clone, Copy)]
pub struct CohortAggregator {
    classifier: RiskClassifier,
    bin_count: usize,
}

impl Default for CohortAggregator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl CohortAggregator {
    /// Build an aggregator from validated engine configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            classifier: RiskClassifier::from_config(config),
            bin_count: config.histogram_bins,
        }
    }

    /// Summarize a snapshot of scores for one period.
    ///
    /// Tier counts always sum to the number of input scores; an empty
    /// snapshot yields an all-zero summary, not an error.
    pub fn summarize(&self, period: Period, scores: &[CompositeScore]) -> CohortSummary {
        let mut tier_counts = TierCounts::default();
        let mut histogram = vec![0u32; self.bin_count];

        for score in scores {
            match self.classifier.classify(score) {
                RiskTier::Stable => tier_counts.stable += 1,
                RiskTier::Moderate => tier_counts.moderate += 1,
                RiskTier::High => tier_counts.high += 1,
            }

            // Clamp guards inputs outside [0,1]; value 1.0 lands in the
            // last bin rather than a phantom overflow bin.
            let position = score.value.clamp(0.0, 1.0);
            let bin = ((position * self.bin_count as f64) as usize).min(self.bin_count - 1);
            histogram[bin] += 1;
        }

        CohortSummary {
            period,
            tier_counts,
            histogram,
        }
    }
}
