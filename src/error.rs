//! Error types for the BRI engine

use crate::types::Period;
use thiserror::Error;

/// Errors that can occur during scoring
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed calibration, weight, or threshold configuration.
    /// Fatal at setup time; never silently corrected.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Trend append violated the strict period ordering. State is unchanged.
    #[error("Out-of-order period for subject {subject_id}: {attempted} is not after {latest}")]
    OutOfOrder {
        subject_id: String,
        attempted: Period,
        latest: Period,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
