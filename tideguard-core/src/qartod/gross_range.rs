//! Gross range test
//!
//! Flags readings outside the plausible water-level envelope of a station:
//! - outside the fail span: the sensor reported something impossible
//! - outside the suspect span: possible but outside the expected range
//!
//! Each observation is judged on its own; there is no history.

use serde::{Deserialize, Serialize};

use crate::{
    config::TestName,
    errors::QcResult,
    flags::{Flag, FlagSequence},
    series::CanonicalSeries,
    traits::QcTest,
};

use super::utils;

const TEST: &str = TestName::GrossRange.as_str();

/// Gross range thresholds in meters
///
/// Invariant: `fail_lower ≤ suspect_lower ≤ suspect_upper ≤ fail_upper`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrossRangeTest {
    pub suspect_lower: f64,
    pub suspect_upper: f64,
    pub fail_lower: f64,
    pub fail_upper: f64,
}

impl GrossRangeTest {
    /// Build from `(lower, upper)` spans
    pub fn from_spans(suspect_span: (f64, f64), fail_span: (f64, f64)) -> Self {
        Self {
            suspect_lower: suspect_span.0,
            suspect_upper: suspect_span.1,
            fail_lower: fail_span.0,
            fail_upper: fail_span.1,
        }
    }

    pub fn suspect_span(&self) -> [f64; 2] {
        [self.suspect_lower, self.suspect_upper]
    }

    pub fn fail_span(&self) -> [f64; 2] {
        [self.fail_lower, self.fail_upper]
    }

    /// Flag one reading
    pub fn classify(&self, value: f64) -> Flag {
        if !value.is_finite() {
            Flag::NotEvaluated
        } else if value < self.fail_lower || value > self.fail_upper {
            Flag::Fail
        } else if value < self.suspect_lower || value > self.suspect_upper {
            Flag::Suspect
        } else {
            Flag::Pass
        }
    }
}

impl QcTest for GrossRangeTest {
    fn name(&self) -> TestName {
        TestName::GrossRange
    }

    fn validate(&self) -> QcResult<()> {
        utils::check_finite(TEST, "suspect_lower", self.suspect_lower)?;
        utils::check_finite(TEST, "suspect_upper", self.suspect_upper)?;
        utils::check_finite(TEST, "fail_lower", self.fail_lower)?;
        utils::check_finite(TEST, "fail_upper", self.fail_upper)?;

        utils::check_order(TEST, "fail_lower", self.fail_lower, "suspect_lower", self.suspect_lower)?;
        utils::check_order(TEST, "suspect_lower", self.suspect_lower, "suspect_upper", self.suspect_upper)?;
        utils::check_order(TEST, "suspect_upper", self.suspect_upper, "fail_upper", self.fail_upper)
    }

    fn evaluate(&self, series: &CanonicalSeries) -> FlagSequence {
        series.values().map(|value| self.classify(value)).collect()
    }
}
