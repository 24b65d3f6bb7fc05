//! Signal normalization
//!
//! This module maps heterogeneous raw behavioral metrics onto the common
//! [0,1] risk-contribution scale:
//! - Raw values positioned within the factor's calibrated domain
//! - Direction-aware mapping (inverse factors: more of the metric, less risk)
//! - Out-of-domain values clamped, never rejected
//!
//! Clamping keeps the pipeline total over noisy real-world input; callers
//! that care about data quality can compare `raw_value` against the
//! calibration domain themselves before normalizing.

use crate::config::{EngineConfig, RiskDirection};
use crate::error::EngineError;
use crate::types::{BehavioralSignal, NormalizedFactor};

/// Normalizer for converting raw signals to normalized factors
pub struct SignalNormalizer;

impl SignalNormalizer {
    /// Normalize one raw signal using the factor's calibration and weight.
    ///
    /// A factor missing from the calibration or weight table is a
    /// configuration error; everything else is total. Pure function.
    pub fn normalize(
        signal: &BehavioralSignal,
        config: &EngineConfig,
    ) -> Result<NormalizedFactor, EngineError> {
        let calibration = config.calibration(signal.factor)?;
        let weight = config.weight(signal.factor)?;

        let span = calibration.domain_max - calibration.domain_min;
        let position = ((signal.raw_value - calibration.domain_min) / span).clamp(0.0, 1.0);

        let normalized_value = match calibration.direction {
            RiskDirection::Direct => position,
            RiskDirection::Inverse => 1.0 - position,
        };

        Ok(NormalizedFactor {
            factor: signal.factor,
            normalized_value,
            weight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Factor, Period};
    use chrono::Utc;

    fn make_signal(factor: Factor, raw_value: f64) -> BehavioralSignal {
        BehavioralSignal {
            subject_id: "subj-1".to_string(),
            period: Period(1),
            factor,
            raw_value,
            unit: "test".to_string(),
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn test_inverse_mapping_fewer_steps_higher_risk() {
        let config = EngineConfig::default();

        // 30000 steps/day: floor of the mobility risk scale
        let active = make_signal(Factor::Mobility, 30_000.0);
        let normalized = SignalNormalizer::normalize(&active, &config).unwrap();
        assert!((normalized.normalized_value - 0.0).abs() < 1e-12);

        // Sedentary week: ceiling of the scale
        let sedentary = make_signal(Factor::Mobility, 0.0);
        let normalized = SignalNormalizer::normalize(&sedentary, &config).unwrap();
        assert!((normalized.normalized_value - 1.0).abs() < 1e-12);

        // Monotone: fewer steps, more risk
        let low = SignalNormalizer::normalize(&make_signal(Factor::Mobility, 4_000.0), &config)
            .unwrap();
        let high = SignalNormalizer::normalize(&make_signal(Factor::Mobility, 12_000.0), &config)
            .unwrap();
        assert!(low.normalized_value > high.normalized_value);
    }

    #[test]
    fn test_out_of_domain_values_are_clamped() {
        let config = EngineConfig::default();

        let over = make_signal(Factor::Mobility, 45_000.0);
        let normalized = SignalNormalizer::normalize(&over, &config).unwrap();
        assert!((normalized.normalized_value - 0.0).abs() < 1e-12);

        let under = make_signal(Factor::Sleep, -2.0);
        let normalized = SignalNormalizer::normalize(&under, &config).unwrap();
        assert!((normalized.normalized_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weight_is_attached_from_config() {
        let config = EngineConfig::default();
        let normalized =
            SignalNormalizer::normalize(&make_signal(Factor::Sentiment, 0.0), &config).unwrap();
        assert!((normalized.weight - 0.40).abs() < 1e-12);
        // Neutral sentiment sits mid-scale
        assert!((normalized.normalized_value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_calibration_is_configuration_error() {
        let mut config = EngineConfig::default();
        config.calibrations.remove(&Factor::Sleep);

        let err = SignalNormalizer::normalize(&make_signal(Factor::Sleep, 7.0), &config)
            .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_determinism() {
        let config = EngineConfig::default();
        let signal = make_signal(Factor::MoodCheckins, 2.3);

        let a = SignalNormalizer::normalize(&signal, &config).unwrap();
        let b = SignalNormalizer::normalize(&signal, &config).unwrap();
        assert_eq!(a.normalized_value.to_bits(), b.normalized_value.to_bits());
    }
}
