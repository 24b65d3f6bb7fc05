//! Core types for the BRI scoring pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: raw behavioral signals, normalized factors, composite scores,
//! risk tiers, contribution breakdowns, and cohort summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavioral signal category contributing to the BRI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Mobility,
    Sentiment,
    Sleep,
    MoodCheckins,
}

impl Factor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Mobility => "mobility",
            Factor::Sentiment => "sentiment",
            Factor::Sleep => "sleep",
            Factor::MoodCheckins => "mood_checkins",
        }
    }

    /// All factors, in canonical lexical order of their names.
    /// Used for reproducible tie-breaking and uniform-share fallbacks.
    pub fn all() -> [Factor; 4] {
        [
            Factor::Mobility,
            Factor::MoodCheckins,
            Factor::Sentiment,
            Factor::Sleep,
        ]
    }
}

/// Ordinal reporting period (e.g. week number within an observation program).
///
/// Periods are totally ordered; trend history is keyed and ordered by period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period(pub u32);

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week {}", self.0)
    }
}

/// One raw behavioral observation for a subject in a period.
///
/// Immutable once recorded; the engine never rewrites raw input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehavioralSignal {
    /// Subject identifier
    pub subject_id: String,
    /// Reporting period this observation belongs to
    pub period: Period,
    /// Signal category
    pub factor: Factor,
    /// Raw metric value in the unit below (e.g. steps/day, hours)
    pub raw_value: f64,
    /// Unit of the raw value, for provenance
    pub unit: String,
    /// When the observation was recorded
    pub observed_at: DateTime<Utc>,
}

/// A factor mapped onto the common [0,1] risk-contribution scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFactor {
    /// Signal category
    pub factor: Factor,
    /// Risk contribution in [0,1]; 1.0 = maximum risk for this factor
    pub normalized_value: f64,
    /// Configured weight of this factor in the composite, [0,1]
    pub weight: f64,
}

/// Composite Behavioral Risk Index value for one subject in one period.
///
/// Derived data: never mutated after creation. Recomputing from changed
/// inputs produces a new instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub subject_id: String,
    pub period: Period,
    /// BRI value in [0,1]
    pub value: f64,
}

/// Discrete risk tier derived from a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Stable,
    Moderate,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Stable => "stable",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
        }
    }
}

/// One factor's relative share of a composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionEntry {
    pub factor: Factor,
    /// Share of the composite attributable to this factor, [0,1]
    pub share: f64,
}

/// Ranked per-factor decomposition of a composite score.
///
/// Entries are sorted descending by share; ties broken by factor name so the
/// ordering is reproducible. Shares sum to 1.0 within floating-point
/// tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    pub subject_id: String,
    pub period: Period,
    pub entries: Vec<ContributionEntry>,
}

impl ContributionBreakdown {
    /// Highest-contributing factor, if any entries exist
    pub fn top_contributor(&self) -> Option<&ContributionEntry> {
        self.entries.first()
    }
}

/// Append-only score history for one subject, ordered strictly by period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub subject_id: String,
    pub scores: Vec<CompositeScore>,
}

impl TrendRecord {
    /// Change between the two most recent scores; None with fewer than two
    pub fn delta(&self) -> Option<f64> {
        match self.scores.as_slice() {
            [.., previous, latest] => Some(latest.value - previous.value),
            _ => None,
        }
    }
}

/// Subject counts per risk tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub stable: u32,
    pub moderate: u32,
    pub high: u32,
}

impl TierCounts {
    pub fn get(&self, tier: RiskTier) -> u32 {
        match tier {
            RiskTier::Stable => self.stable,
            RiskTier::Moderate => self.moderate,
            RiskTier::High => self.high,
        }
    }

    pub fn total(&self) -> u32 {
        self.stable + self.moderate + self.high
    }
}

/// Population-level summary of composite scores for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    pub period: Period,
    /// Subject count per tier; sums to the number of input scores
    pub tier_counts: TierCounts,
    /// Histogram of score values over [0,1] with fixed-width bins
    pub histogram: Vec<u32>,
}

/// Full assessment for one subject in one period: the record a presentation
/// layer renders as the user/clinician dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectAssessment {
    pub score: CompositeScore,
    pub tier: RiskTier,
    pub breakdown: ContributionBreakdown,
    /// Change from the previous period, if one is on record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_factor_lexical_order() {
        let names: Vec<&str> = Factor::all().iter().map(|f| f.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_trend_record_delta() {
        let make = |period, value| CompositeScore {
            subject_id: "s1".to_string(),
            period: Period(period),
            value,
        };

        let mut record = TrendRecord {
            subject_id: "s1".to_string(),
            scores: vec![make(1, 0.3)],
        };
        assert_eq!(record.delta(), None);

        record.scores.push(make(2, 0.5));
        assert!((record.delta().unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_serde_round_trip_signal() {
        let signal = BehavioralSignal {
            subject_id: "s1".to_string(),
            period: Period(3),
            factor: Factor::MoodCheckins,
            raw_value: 2.0,
            unit: "rating".to_string(),
            observed_at: Utc::now(),
        };

        let json = serde_json::to_string(&signal).unwrap();
        assert!(json.contains("\"mood_checkins\""));
        let back: BehavioralSignal = serde_json::from_str(&json).unwrap();
        assert_eq!(back.period, Period(3));
        assert_eq!(back.factor, Factor::MoodCheckins);
    }
}
