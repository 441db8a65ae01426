//! Rate of change test
//!
//! Flags readings that moved faster than water plausibly can since the
//! previous reading. Sampling is irregular, so the rate threshold is turned
//! into an allowed change for the actual elapsed time of each step:
//!
//! ```text
//! allowed = rate_threshold × (t[i] − t[i-1])
//! |v[i] − v[i-1]| ≥ allowed  →  Suspect
//! ```
//!
//! Only the immediately preceding observation counts. If it has no reading,
//! the step is `NotEvaluated`; the scan never reaches further back.
//! There is a single, suspect-level threshold.

use serde::{Deserialize, Serialize};

use crate::{
    config::TestName,
    errors::QcResult,
    flags::{Flag, FlagSequence},
    series::{CanonicalSeries, Observation},
    time::elapsed_seconds,
    traits::QcTest,
};

use super::utils;

const TEST: &str = TestName::RateOfChange.as_str();

/// Rate of change threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateOfChangeTest {
    /// Meters per second
    pub rate_threshold: f64,
}

impl RateOfChangeTest {
    pub fn new(rate_threshold: f64) -> Self {
        Self { rate_threshold }
    }

    /// Flag the step from `previous` to `current`
    pub fn classify_step(&self, previous: &Observation, current: &Observation) -> Flag {
        match (previous.reading(), current.reading()) {
            (Some(before), Some(after)) => {
                let elapsed = elapsed_seconds(previous.timestamp, current.timestamp);
                let allowed = self.rate_threshold * elapsed;
                if (after - before).abs() >= allowed {
                    Flag::Suspect
                } else {
                    Flag::Pass
                }
            }
            _ => Flag::NotEvaluated,
        }
    }
}

impl QcTest for RateOfChangeTest {
    fn name(&self) -> TestName {
        TestName::RateOfChange
    }

    fn validate(&self) -> QcResult<()> {
        utils::check_positive(TEST, "rate_threshold", self.rate_threshold)
    }

    fn evaluate(&self, series: &CanonicalSeries) -> FlagSequence {
        series
            .iter()
            .scan(None::<&Observation>, |previous, current| {
                let flag = match *previous {
                    Some(before) => self.classify_step(before, current),
                    None => Flag::NotEvaluated,
                };
                *previous = Some(current);
                Some(flag)
            })
            .collect()
    }
}
