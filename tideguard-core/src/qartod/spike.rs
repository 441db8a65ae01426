//! Spike test
//!
//! Flags a reading that jumps away from both neighbours. The magnitude is the
//! deviation of the middle reading from the neighbours' mean, less half the
//! neighbours' own spread:
//!
//! ```text
//! magnitude = |v[i] − (v[i-1] + v[i+1]) / 2| − |v[i+1] − v[i-1]| / 2
//! ```
//!
//! A steady ramp gives a magnitude of zero or less, so tides rising or
//! falling quickly are not mistaken for spikes.

use serde::{Deserialize, Serialize};

use crate::{
    config::TestName,
    errors::QcResult,
    flags::{Flag, FlagSequence},
    series::{CanonicalSeries, Observation},
    traits::QcTest,
};

use super::utils;

const TEST: &str = TestName::Spike.as_str();

/// Spike thresholds in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikeTest {
    pub suspect_threshold: f64,
    pub fail_threshold: f64,
}

impl SpikeTest {
    pub fn new(suspect_threshold: f64, fail_threshold: f64) -> Self {
        Self {
            suspect_threshold,
            fail_threshold,
        }
    }

    /// Spike magnitude of `current` between two neighbours, if all three have readings
    pub fn magnitude(before: &Observation, current: &Observation, after: &Observation) -> Option<f64> {
        let (prev, value, next) = (before.reading()?, current.reading()?, after.reading()?);
        let mean = (prev + next) / 2.0;
        Some((value - mean).abs() - (next - prev).abs() / 2.0)
    }
}

impl QcTest for SpikeTest {
    fn name(&self) -> TestName {
        TestName::Spike
    }

    fn validate(&self) -> QcResult<()> {
        utils::check_non_negative(TEST, "suspect_threshold", self.suspect_threshold)?;
        utils::check_non_negative(TEST, "fail_threshold", self.fail_threshold)?;
        utils::check_order(
            TEST,
            "suspect_threshold",
            self.suspect_threshold,
            "fail_threshold",
            self.fail_threshold,
        )
    }

    fn evaluate(&self, series: &CanonicalSeries) -> FlagSequence {
        let observations = series.observations();
        let mut flags = FlagSequence::filled(Flag::NotEvaluated, observations.len()).into_vec();

        for (offset, window) in observations.windows(3).enumerate() {
            if let Some(magnitude) = Self::magnitude(&window[0], &window[1], &window[2]) {
                flags[offset + 1] = utils::grade(magnitude, self.suspect_threshold, self.fail_threshold);
            }
        }

        flags.into()
    }
}
