//! Composite score aggregation
//!
//! This module combines normalized, weighted factor signals into one
//! composite BRI value per subject per period. The weighted linear sum is
//! clamped to [0,1] to guard against floating-point overshoot.

use crate::config::WEIGHT_SUM_TOLERANCE;
use crate::error::EngineError;
use crate::types::{CompositeScore, NormalizedFactor, Period};

/// Aggregator for combining normalized factors into a composite score
pub struct ScoreAggregator;

impl ScoreAggregator {
    /// Compute the composite BRI for one subject and period.
    ///
    /// Precondition: factor weights sum to 1.0 within tolerance. Violations
    /// indicate a caller contract bug and surface as a configuration error
    /// rather than producing a silently mis-scaled score.
    pub fn aggregate(
        subject_id: &str,
        period: Period,
        factors: &[NormalizedFactor],
    ) -> Result<CompositeScore, EngineError> {
        let weight_sum: f64 = factors.iter().map(|f| f.weight).sum();
        if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::Configuration(format!(
                "factor weights sum to {weight_sum}, expected 1.0"
            )));
        }

        let value: f64 = factors
            .iter()
            .map(|f| f.weight * f.normalized_value)
            .sum();

        Ok(CompositeScore {
            subject_id: subject_id.to_string(),
            period,
            value: value.clamp(0.0, 1.0),
        })
    }
}
