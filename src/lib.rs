//! BRI Core - Behavioral risk scoring engine for the BRI mental-health index
//!
//! The engine transforms raw behavioral signals (mobility, sentiment, sleep,
//! mood check-ins) into a normalized Behavioral Risk Index through a
//! deterministic pipeline: normalization → weighted aggregation → tier
//! classification + contribution explanation, with per-subject trend
//! tracking and cohort-level summaries on top.
//!
//! ## Modules
//!
//! - **Scoring pipeline**: normalize signals, aggregate the composite BRI,
//!   classify the risk tier, rank factor contributions
//! - **Trend tracking**: append-only per-subject score history and deltas
//! - **Cohort aggregation**: tier tallies and score histograms per period
//!
//! The engine produces a relative risk indicator only; it makes no clinical
//! diagnostic claims.

pub mod aggregator;
pub mod classifier;
pub mod cohort;
pub mod config;
pub mod error;
pub mod explainer;
pub mod normalizer;
pub mod pipeline;
pub mod report;
pub mod trend;
pub mod types;

pub use aggregator::ScoreAggregator;
pub use classifier::RiskClassifier;
pub use cohort::CohortAggregator;
pub use config::{EngineConfig, FactorCalibration, RiskDirection};
pub use error::EngineError;
pub use explainer::ContributionExplainer;
pub use normalizer::SignalNormalizer;
pub use pipeline::{assess_period, BriProcessor};
pub use report::{ReportEncoder, RiskReport};
pub use trend::TrendTracker;
pub use types::{
    BehavioralSignal, CohortSummary, CompositeScore, ContributionBreakdown, Factor,
    NormalizedFactor, Period, RiskTier, SubjectAssessment, TrendRecord,
};

/// Engine version embedded in all report payloads
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "bri-core";
