//! Trend tracking
//!
//! This module maintains the append-only per-subject time series of
//! composite scores and derives trend deltas (e.g. week-over-week change).
//! The tracker is the only stateful component in the engine; appends for a
//! subject must be strictly increasing in period so deltas stay
//! well-defined. Concurrent hosts serialize mutation per subject (or wrap
//! the tracker) themselves; cross-subject operations are independent.

use crate::error::EngineError;
use crate::types::{CompositeScore, TrendRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tracker owning per-subject score histories
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendTracker {
    histories: HashMap<String, Vec<CompositeScore>>,
}

impl TrendTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a score to the subject's history.
    ///
    /// The period must be strictly greater than the latest recorded period
    /// for that subject; otherwise the append is rejected and state is
    /// unchanged. Re-recording an existing period is an ordering violation
    /// too: a recomputed score belongs to a new instance, not a rewrite.
    pub fn record(&mut self, score: CompositeScore) -> Result<(), EngineError> {
        let history = self.histories.entry(score.subject_id.clone()).or_default();

        if let Some(latest) = history.last() {
            if score.period <= latest.period {
                return Err(EngineError::OutOfOrder {
                    subject_id: score.subject_id,
                    attempted: score.period,
                    latest: latest.period,
                });
            }
        }

        history.push(score);
        Ok(())
    }

    /// Change between the subject's two most recent scores.
    /// None when fewer than two records exist.
    pub fn delta(&self, subject_id: &str) -> Option<f64> {
        match self.histories.get(subject_id)?.as_slice() {
            [.., previous, latest] => Some(latest.value - previous.value),
            _ => None,
        }
    }

    /// The subject's recorded history, ordered by period.
    /// Empty for unknown subjects.
    pub fn history(&self, subject_id: &str) -> &[CompositeScore] {
        self.histories
            .get(subject_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Snapshot the subject's history as an owned trend record
    pub fn trend_record(&self, subject_id: &str) -> TrendRecord {
        TrendRecord {
            subject_id: subject_id.to_string(),
            scores: self.history(subject_id).to_vec(),
        }
    }

    /// Subjects with at least one recorded score
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.histories.keys().map(String::as_str)
    }

    /// Load tracker state from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize tracker state to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Period;

    fn make_score(subject_id: &str, period: u32, value: f64) -> CompositeScore {
        CompositeScore {
            subject_id: subject_id.to_string(),
            period: Period(period),
            value,
        }
    }

    #[test]
    fn test_out_of_order_append_is_rejected() {
        let mut tracker = TrendTracker::new();

        for period in [1, 2, 3] {
            tracker.record(make_score("subj-1", period, 0.4)).unwrap();
        }

        // Re-inserting period 2 violates strict ordering
        let err = tracker.record(make_score("subj-1", 2, 0.5)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::OutOfOrder {
                attempted: Period(2),
                latest: Period(3),
                ..
            }
        ));

        // State unchanged
        assert_eq!(tracker.history("subj-1").len(), 3);
    }

    #[test]
    fn test_duplicate_period_is_rejected() {
        let mut tracker = TrendTracker::new();
        tracker.record(make_score("subj-1", 1, 0.3)).unwrap();
        assert!(tracker.record(make_score("subj-1", 1, 0.6)).is_err());
    }

    #[test]
    fn test_delta() {
        let mut tracker = TrendTracker::new();

        assert_eq!(tracker.delta("subj-1"), None);

        tracker.record(make_score("subj-1", 1, 0.3)).unwrap();
        assert_eq!(tracker.delta("subj-1"), None);

        tracker.record(make_score("subj-1", 2, 0.5)).unwrap();
        assert!((tracker.delta("subj-1").unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_subjects_are_independent() {
        let mut tracker = TrendTracker::new();

        tracker.record(make_score("subj-1", 5, 0.3)).unwrap();
        // A different subject may record an earlier period
        tracker.record(make_score("subj-2", 1, 0.7)).unwrap();

        assert_eq!(tracker.history("subj-1").len(), 1);
        assert_eq!(tracker.history("subj-2").len(), 1);
        assert!(tracker.history("subj-3").is_empty());
    }

    #[test]
    fn test_trend_record_snapshot() {
        let mut tracker = TrendTracker::new();
        tracker.record(make_score("subj-1", 1, 0.3)).unwrap();
        tracker.record(make_score("subj-1", 2, 0.5)).unwrap();

        let record = tracker.trend_record("subj-1");
        assert_eq!(record.scores.len(), 2);
        assert!((record.delta().unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut tracker = TrendTracker::new();
        tracker.record(make_score("subj-1", 1, 0.3)).unwrap();
        tracker.record(make_score("subj-1", 2, 0.5)).unwrap();

        let json = tracker.to_json().unwrap();
        let loaded = TrendTracker::from_json(&json).unwrap();
        assert_eq!(loaded.history("subj-1"), tracker.history("subj-1"));
    }
}
