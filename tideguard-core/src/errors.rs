//! Error Types for QC Configuration and Series Problems
//!
//! ## Design Philosophy
//!
//! TideGuard separates problems the caller must fix from conditions the
//! engine absorbs on its own:
//!
//! 1. **Fail Fast**: Bad thresholds and malformed series are reported before
//!    any flag is computed. No partial flag sequence is ever returned.
//!
//! 2. **Absorbed Locally**: Missing readings and empty or single-observation
//!    series are normal input. They become `NotEvaluated` flags, never errors.
//!
//! 3. **Actionable Messages**: Each variant names the test, the threshold
//!    fields, and the offending values so a presentation layer can show
//!    "upper bound below lower bound" rather than a raw fault.
//!
//! ## Error Categories
//!
//! ### Configuration
//! - `ThresholdOrder`: bounds in the wrong order (e.g. `fail_lower > suspect_lower`)
//! - `MissingThreshold`: a test is enabled but a required field is absent
//! - `InvalidThreshold`: a threshold is not finite or out of its domain
//! - `InvalidNormalization`: a unit factor or station elevation is unusable
//!
//! ### Data
//! - `DuplicateTimestamp` / `NonMonotonicTimestamp`: the series is unusable
//!   and must be re-fetched or re-normalized
//! - `LengthMismatch`: a flag sequence is not aligned with its series
//!
//! ### Collaborator
//! - `Provider`: a retrieval function behind a `SeriesProvider` failed
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use tideguard_core::{ErrorCategory, QcError};
//!
//! fn describe(err: &QcError) -> &'static str {
//!     match err.category() {
//!         ErrorCategory::Configuration => "fix the thresholds and run again",
//!         ErrorCategory::Data => "re-fetch the series",
//!         ErrorCategory::Provider => "check the telemetry source",
//!     }
//! }
//! # let _ = describe;
//! ```

use thiserror_no_std::Error;

use crate::time::Timestamp;

/// Result type for QC operations
pub type QcResult<T> = Result<T, QcError>;

/// Broad class of a [`QcError`], used by callers to pick a recovery path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Thresholds or normalization parameters must be corrected
    Configuration,
    /// The series itself is unusable
    Data,
    /// A telemetry collaborator failed
    Provider,
}

/// Errors raised by the QC engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QcError {
    /// Two bounds of one test are in the wrong order
    #[error("{test}: {lower_field} ({lower}) must not exceed {upper_field} ({upper})")]
    ThresholdOrder {
        /// Stable test name, e.g. `gross_range_test`
        test: &'static str,
        /// Field expected to hold the smaller value
        lower_field: &'static str,
        /// Value supplied for `lower_field`
        lower: f64,
        /// Field expected to hold the larger value
        upper_field: &'static str,
        /// Value supplied for `upper_field`
        upper: f64,
    },

    /// A test is enabled but one of its thresholds was not supplied
    #[error("{test} is enabled but {field} is not set")]
    MissingThreshold {
        test: &'static str,
        field: &'static str,
    },

    /// A threshold is NaN, infinite, or outside its domain
    #[error("{test}: {field} = {value} is invalid ({reason})")]
    InvalidThreshold {
        test: &'static str,
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Unit factor or station elevation cannot be used for normalization
    #[error("Invalid normalization: {field} = {value} ({reason})")]
    InvalidNormalization {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Two observations share a timestamp
    #[error("Duplicate timestamp {timestamp} at index {index}")]
    DuplicateTimestamp {
        index: usize,
        timestamp: Timestamp,
    },

    /// An observation is earlier than its predecessor
    #[error("Timestamp {timestamp} at index {index} precedes {previous}")]
    NonMonotonicTimestamp {
        index: usize,
        timestamp: Timestamp,
        previous: Timestamp,
    },

    /// A flag sequence does not line up with its series
    #[error("Flag sequence has {actual} flags, series has {expected} observations")]
    LengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// A provider adapter could not produce a series
    #[error("Provider {provider} failed: {message}")]
    Provider {
        provider: String,
        message: String,
    },
}

impl QcError {
    /// Classify the error for recovery decisions
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ThresholdOrder { .. }
            | Self::MissingThreshold { .. }
            | Self::InvalidThreshold { .. }
            | Self::InvalidNormalization { .. } => ErrorCategory::Configuration,
            Self::DuplicateTimestamp { .. }
            | Self::NonMonotonicTimestamp { .. }
            | Self::LengthMismatch { .. } => ErrorCategory::Data,
            Self::Provider { .. } => ErrorCategory::Provider,
        }
    }

    /// True for threshold and normalization problems
    pub fn is_configuration(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }
}
