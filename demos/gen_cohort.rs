//! Synthetic cohort generator
//!
//! Emits BehavioralSignal NDJSON for a mock cohort, suitable for piping into
//! `bri score`. Generation is deterministic for a given seed so fixtures are
//! reproducible. This lives outside the engine: the core only ever sees
//! caller-supplied signal collections.
//!
//! Usage:
//!     cargo run --example gen_cohort -- [subjects] [weeks] [seed]
//!     cargo run --example gen_cohort | cargo run --features cli --bin bri -- score -i - -o - --summary

use bri_core::types::{BehavioralSignal, Factor, Period};
use chrono::Utc;
use std::env;

/// xorshift64: small deterministic PRNG, no crate needed for a fixture
struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform sample in [min, max]
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let subjects: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10);
    let weeks: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(8);
    let seed: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(42);

    let mut rng = Rng(seed.max(1));
    let observed_at = Utc::now();

    for week in 1..=weeks {
        for subject in 0..subjects {
            // Later weeks drift toward higher risk for part of the cohort,
            // mirroring the rising trend the dashboard plots
            let drift = if subject % 3 == 0 {
                f64::from(week) / f64::from(weeks.max(1))
            } else {
                0.0
            };

            let signals = [
                (
                    Factor::Mobility,
                    rng.range(2_000.0, 14_000.0) * (1.0 - 0.5 * drift),
                    "steps/day",
                ),
                (
                    Factor::Sentiment,
                    rng.range(-0.2, 0.6) - 0.8 * drift,
                    "polarity",
                ),
                (
                    Factor::Sleep,
                    rng.range(5.0, 9.0) * (1.0 - 0.3 * drift),
                    "hours",
                ),
                (
                    Factor::MoodCheckins,
                    rng.range(2.5, 4.5) - 1.5 * drift,
                    "rating",
                ),
            ];

            for (factor, raw_value, unit) in signals {
                let signal = BehavioralSignal {
                    subject_id: format!("subj-{subject:03}"),
                    period: Period(week),
                    factor,
                    raw_value,
                    unit: unit.to_string(),
                    observed_at,
                };
                println!("{}", serde_json::to_string(&signal).unwrap());
            }
        }
    }
}
