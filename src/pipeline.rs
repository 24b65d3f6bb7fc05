//! Pipeline orchestration
//!
//! This module provides the public API for the BRI engine. It runs the full
//! scoring pipeline for one subject-period batch of raw signals:
//! normalization → aggregation → classification + explanation → trend
//! recording.

use crate::aggregator::ScoreAggregator;
use crate::classifier::RiskClassifier;
use crate::cohort::CohortAggregator;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::explainer::ContributionExplainer;
use crate::normalizer::SignalNormalizer;
use crate::trend::TrendTracker;
use crate::types::{
    BehavioralSignal, CohortSummary, CompositeScore, NormalizedFactor, Period, SubjectAssessment,
};

/// Score one subject's signals for one period, without trend state.
///
/// # Arguments
/// * `config` - Engine configuration (validated here before use)
/// * `subject_id` - Subject the signals belong to
/// * `period` - Reporting period the signals cover
/// * `signals` - The period's raw behavioral signals
///
/// # Returns
/// The subject's assessment for the period. `delta` is always None; use
/// [`BriProcessor`] when week-over-week trends matter.
///
/// # Example
/// ```ignore
/// let assessment = assess_period(&EngineConfig::default(), "subj-1", Period(8), &signals)?;
/// println!("{}: {}", assessment.score.value, assessment.tier.as_str());
/// ```
pub fn assess_period(
    config: &EngineConfig,
    subject_id: &str,
    period: Period,
    signals: &[BehavioralSignal],
) -> Result<SubjectAssessment, EngineError> {
    config.validate()?;

    let factors = normalize_batch(config, signals)?;
    let score = ScoreAggregator::aggregate(subject_id, period, &factors)?;
    let tier = RiskClassifier::from_config(config).classify(&score);
    let breakdown = ContributionExplainer::explain(subject_id, period, &factors);

    Ok(SubjectAssessment {
        score,
        tier,
        breakdown,
        delta: None,
    })
}

fn normalize_batch(
    config: &EngineConfig,
    signals: &[BehavioralSignal],
) -> Result<Vec<NormalizedFactor>, EngineError> {
    signals
        .iter()
        .map(|signal| SignalNormalizer::normalize(signal, config))
        .collect()
}

/// Stateful processor for incremental scoring with persistent trend history.
///
/// Use this when assessments arrive period by period and week-over-week
/// deltas matter. All methods are synchronous; a concurrent host wraps the
/// processor or partitions subjects across processors.
pub struct BriProcessor {
    config: EngineConfig,
    classifier: RiskClassifier,
    cohort: CohortAggregator,
    trend: TrendTracker,
}

impl Default for BriProcessor {
    fn default() -> Self {
        let config = EngineConfig::default();
        let classifier = RiskClassifier::from_config(&config);
        let cohort = CohortAggregator::from_config(&config);
        Self {
            config,
            classifier,
            cohort,
            trend: TrendTracker::new(),
        }
    }
}

impl BriProcessor {
    /// Create a processor, validating the configuration up front
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let classifier = RiskClassifier::from_config(&config);
        let cohort = CohortAggregator::from_config(&config);
        Ok(Self {
            config,
            classifier,
            cohort,
            trend: TrendTracker::new(),
        })
    }

    /// Assess one subject's signals for one period and record the result.
    ///
    /// The composite score is appended to the subject's trend history, so
    /// periods must arrive in strictly increasing order per subject. The
    /// returned `delta` compares this period against the previous one on
    /// record, or None for a subject's first assessment.
    pub fn assess(
        &mut self,
        subject_id: &str,
        period: Period,
        signals: &[BehavioralSignal],
    ) -> Result<SubjectAssessment, EngineError> {
        let factors = normalize_batch(&self.config, signals)?;
        let score = ScoreAggregator::aggregate(subject_id, period, &factors)?;
        let tier = self.classifier.classify(&score);
        let breakdown = ContributionExplainer::explain(subject_id, period, &factors);

        self.trend.record(score.clone())?;
        let delta = self.trend.delta(subject_id);

        Ok(SubjectAssessment {
            score,
            tier,
            breakdown,
            delta,
        })
    }

    /// Summarize a snapshot of scores for one period
    pub fn summarize(&self, period: Period, scores: &[CompositeScore]) -> CohortSummary {
        self.cohort.summarize(period, scores)
    }

    /// The subject's recorded score history
    pub fn history(&self, subject_id: &str) -> &[CompositeScore] {
        self.trend.history(subject_id)
    }

    /// The subject's latest trend delta
    pub fn delta(&self, subject_id: &str) -> Option<f64> {
        self.trend.delta(subject_id)
    }

    /// The processor's validated configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Load trend history from JSON
    pub fn load_trends(&mut self, json: &str) -> Result<(), EngineError> {
        self.trend = TrendTracker::from_json(json)?;
        Ok(())
    }

    /// Save trend history to JSON
    pub fn save_trends(&self) -> Result<String, EngineError> {
        Ok(self.trend.to_json()?)
    }
}
