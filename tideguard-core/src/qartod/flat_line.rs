//! Flat line test
//!
//! Flags a sensor that has stopped moving. Water level near slack tide can
//! hold still for a while, but not for hours; a stuck sensor can.
//!
//! The scan carries one piece of state, the current flat run: its start time
//! and reference value. A reading more than `tolerance` away from the
//! reference starts a new run. Every other reading is graded by how long the
//! run has lasted:
//!
//! ```text
//! duration = t[i] − run_start
//! duration ≥ fail_threshold     →  Fail
//! duration ≥ suspect_threshold  →  Suspect
//! ```
//!
//! Missing readings are `NotEvaluated` and leave the run untouched.

use serde::{Deserialize, Serialize};

use crate::{
    config::TestName,
    errors::QcResult,
    flags::{Flag, FlagSequence},
    series::{CanonicalSeries, Observation},
    time::{elapsed_seconds, Timestamp},
    traits::QcTest,
};

use super::utils;

const TEST: &str = TestName::FlatLine.as_str();

/// Flat line thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatLineTest {
    /// Meters; readings closer than this are indistinguishable
    pub tolerance: f64,
    /// Seconds of flat run before `Suspect`
    pub suspect_threshold: f64,
    /// Seconds of flat run before `Fail`
    pub fail_threshold: f64,
}

/// Start of the current flat run
#[derive(Debug, Clone, Copy)]
struct FlatRun {
    start: Timestamp,
    reference: f64,
}

impl FlatLineTest {
    pub fn new(tolerance: f64, suspect_threshold: f64, fail_threshold: f64) -> Self {
        Self {
            tolerance,
            suspect_threshold,
            fail_threshold,
        }
    }

    /// Advance the run with one observation and grade it
    fn step(&self, run: &mut Option<FlatRun>, observation: &Observation) -> Flag {
        let Some(value) = observation.reading() else {
            return Flag::NotEvaluated;
        };

        let current = match *run {
            Some(active) if (value - active.reference).abs() <= self.tolerance => active,
            _ => {
                let fresh = FlatRun {
                    start: observation.timestamp,
                    reference: value,
                };
                *run = Some(fresh);
                fresh
            }
        };

        let duration = elapsed_seconds(current.start, observation.timestamp);
        utils::grade(duration, self.suspect_threshold, self.fail_threshold)
    }
}

impl QcTest for FlatLineTest {
    fn name(&self) -> TestName {
        TestName::FlatLine
    }

    fn validate(&self) -> QcResult<()> {
        utils::check_non_negative(TEST, "tolerance", self.tolerance)?;
        utils::check_positive(TEST, "suspect_threshold", self.suspect_threshold)?;
        utils::check_positive(TEST, "fail_threshold", self.fail_threshold)?;
        utils::check_order(
            TEST,
            "suspect_threshold",
            self.suspect_threshold,
            "fail_threshold",
            self.fail_threshold,
        )
    }

    fn evaluate(&self, series: &CanonicalSeries) -> FlagSequence {
        series
            .iter()
            .scan(None::<FlatRun>, |run, observation| Some(self.step(run, observation)))
            .collect()
    }
}
