//! Common Threshold Checks and Scan Helpers
//!
//! ## Overview
//!
//! Shared functionality for the four QARTOD tests: threshold invariant
//! checks that turn into configuration errors, and the small numeric helpers
//! the sequential scans rely on.
//!
//! ## Design Principles
//!
//! ### 1. Pure Functions
//! Every helper is a pure function of its arguments, so tests built on them
//! stay pure and can run on many series at once.
//!
//! ### 2. Missing Values Never Compare
//! Helpers that look at readings take `Option<f64>` from
//! [`Observation::reading`](crate::series::Observation::reading). A `None`
//! short-circuits before any arithmetic.
//!
//! ## Threshold Checks
//!
//! ```text
//! check_finite      → InvalidThreshold  (NaN, ±inf)
//! check_non_negative→ InvalidThreshold  (value < 0)
//! check_order       → ThresholdOrder    (lower > upper)
//! ```

use crate::{
    errors::{QcError, QcResult},
    flags::Flag,
};

/// Reject NaN and infinite thresholds
pub fn check_finite(test: &'static str, field: &'static str, value: f64) -> QcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(QcError::InvalidThreshold {
            test,
            field,
            value,
            reason: "must be a finite number",
        })
    }
}

/// Reject non-finite or negative thresholds
pub fn check_non_negative(test: &'static str, field: &'static str, value: f64) -> QcResult<()> {
    check_finite(test, field, value)?;
    if value < 0.0 {
        return Err(QcError::InvalidThreshold {
            test,
            field,
            value,
            reason: "must not be negative",
        });
    }
    Ok(())
}

/// Reject non-finite, zero, or negative thresholds
pub fn check_positive(test: &'static str, field: &'static str, value: f64) -> QcResult<()> {
    check_finite(test, field, value)?;
    if value <= 0.0 {
        return Err(QcError::InvalidThreshold {
            test,
            field,
            value,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

/// Require `lower <= upper`
pub fn check_order(
    test: &'static str,
    lower_field: &'static str,
    lower: f64,
    upper_field: &'static str,
    upper: f64,
) -> QcResult<()> {
    if lower > upper {
        Err(QcError::ThresholdOrder {
            test,
            lower_field,
            lower,
            upper_field,
            upper,
        })
    } else {
        Ok(())
    }
}

/// Grade a magnitude against a suspect and a fail level (both inclusive)
pub fn grade(magnitude: f64, suspect: f64, fail: f64) -> Flag {
    if magnitude >= fail {
        Flag::Fail
    } else if magnitude >= suspect {
        Flag::Suspect
    } else {
        Flag::Pass
    }
}
