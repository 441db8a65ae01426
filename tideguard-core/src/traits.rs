//! Core traits for QC tests
//!
//! These traits define the interface all QARTOD tests implement.
//! Keep them simple: a test is a pure function of its thresholds and a series.

use crate::{
    config::TestName,
    errors::QcResult,
    flags::FlagSequence,
    series::CanonicalSeries,
};

/// A single QARTOD test with its own thresholds
pub trait QcTest {
    /// Which test this is
    fn name(&self) -> TestName;

    /// Check threshold invariants; called before any evaluation
    fn validate(&self) -> QcResult<()>;

    /// Flag every observation of `series`.
    ///
    /// The result always has exactly `series.len()` flags.
    fn evaluate(&self, series: &CanonicalSeries) -> FlagSequence;

    /// Validate, then evaluate
    fn run(&self, series: &CanonicalSeries) -> QcResult<FlagSequence> {
        self.validate()?;
        Ok(self.evaluate(series))
    }
}

/// Values that may stand for "no reading"
pub trait Observable {
    /// Usable for numeric comparison (finite)
    fn is_present(&self) -> bool;
}

impl Observable for f64 {
    fn is_present(&self) -> bool {
        self.is_finite()
    }
}

impl Observable for f32 {
    fn is_present(&self) -> bool {
        self.is_finite()
    }
}

impl<T: Observable> Observable for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Observable::is_present)
    }
}
