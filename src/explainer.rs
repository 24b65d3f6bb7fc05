//! Contribution explainability
//!
//! This module decomposes a composite score into per-factor relative shares:
//! share_i = (weight_i * value_i) / sum(weight_j * value_j). A zero
//! denominator (all normalized values zero) yields uniform shares so the
//! output is total; an empty factor set yields an empty breakdown.

use crate::types::{ContributionBreakdown, ContributionEntry, NormalizedFactor, Period};
use std::cmp::Ordering;

/// Explainer producing ranked contribution breakdowns
pub struct ContributionExplainer;

impl ContributionExplainer {
    /// Compute the ranked contribution breakdown for one subject and period.
    ///
    /// Entries are sorted descending by share; exact ties fall back to the
    /// factor-name lexical order so the ranking is reproducible.
    pub fn explain(
        subject_id: &str,
        period: Period,
        factors: &[NormalizedFactor],
    ) -> ContributionBreakdown {
        let denominator: f64 = factors
            .iter()
            .map(|f| f.weight * f.normalized_value)
            .sum();

        let mut entries: Vec<ContributionEntry> = if denominator > 0.0 {
            factors
                .iter()
                .map(|f| ContributionEntry {
                    factor: f.factor,
                    share: (f.weight * f.normalized_value) / denominator,
                })
                .collect()
        } else {
            // All normalized values are zero: uniform shares
            let uniform = 1.0 / factors.len().max(1) as f64;
            factors
                .iter()
                .map(|f| ContributionEntry {
                    factor: f.factor,
                    share: uniform,
                })
                .collect()
        };

        entries.sort_by(|a, b| {
            b.share
                .partial_cmp(&a.share)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.factor.as_str().cmp(b.factor.as_str()))
        });

        ContributionBreakdown {
            subject_id: subject_id.to_string(),
            period,
            entries,
        }
    }
}
