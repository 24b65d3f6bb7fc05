//! Report encoding
//!
//! This module bundles assessments into a versioned JSON report payload for
//! the presentation layer: producer metadata, generation timestamp, the
//! assessments themselves, and an optional cohort summary. The core mandates
//! no other serialization format.

use crate::error::EngineError;
use crate::types::{CohortSummary, SubjectAssessment};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Producer metadata embedded in every report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Versioned report payload handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub generated_at_utc: DateTime<Utc>,
    pub assessments: Vec<SubjectAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohort_summary: Option<CohortSummary>,
}

/// Encoder building report payloads
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create an encoder with a fresh instance identifier
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Build a report from assessments and an optional cohort summary
    pub fn build(
        &self,
        assessments: Vec<SubjectAssessment>,
        cohort_summary: Option<CohortSummary>,
    ) -> RiskReport {
        RiskReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            generated_at_utc: Utc::now(),
            assessments,
            cohort_summary,
        }
    }

    /// Build a report and serialize it to JSON
    pub fn encode_to_json(
        &self,
        assessments: Vec<SubjectAssessment>,
        cohort_summary: Option<CohortSummary>,
    ) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(
            &self.build(assessments, cohort_summary),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::pipeline::assess_period;
    use crate::types::{BehavioralSignal, Factor, Period};

    fn make_assessment() -> SubjectAssessment {
        let signals = vec![
            BehavioralSignal {
                subject_id: "subj-1".to_string(),
                period: Period(8),
                factor: Factor::Mobility,
                raw_value: 3_000.0,
                unit: "steps/day".to_string(),
                observed_at: Utc::now(),
            },
            BehavioralSignal {
                subject_id: "subj-1".to_string(),
                period: Period(8),
                factor: Factor::Sentiment,
                raw_value: -0.6,
                unit: "polarity".to_string(),
                observed_at: Utc::now(),
            },
        ];
        // Two-factor weight table for a self-contained fixture
        let mut config = EngineConfig::default();
        config.weights.clear();
        config.weights.insert(Factor::Mobility, 0.5);
        config.weights.insert(Factor::Sentiment, 0.5);

        assess_period(&config, "subj-1", Period(8), &signals).unwrap()
    }

    #[test]
    fn test_report_payload_fields() {
        let encoder = ReportEncoder::new();
        let json = encoder.encode_to_json(vec![make_assessment()], None).unwrap();

        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(payload["report_version"], REPORT_VERSION);
        assert_eq!(payload["producer"]["name"], PRODUCER_NAME);
        assert_eq!(payload["assessments"][0]["score"]["subject_id"], "subj-1");
        assert!(payload["cohort_summary"].is_null());
    }

    #[test]
    fn test_report_round_trip() {
        let encoder = ReportEncoder::new();
        let json = encoder.encode_to_json(vec![make_assessment()], None).unwrap();

        let report: RiskReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report.assessments.len(), 1);
        assert_eq!(report.producer.version, ENGINE_VERSION);
    }

    #[test]
    fn test_instance_id_is_stable_per_encoder() {
        let encoder = ReportEncoder::new();
        let a = encoder.build(vec![], None);
        let b = encoder.build(vec![], None);
        assert_eq!(a.producer.instance_id, b.producer.instance_id);
    }
}
