//! Core QC engine for TideGuard
//!
//! Applies QARTOD water-level tests to time series from any telemetry
//! source and rolls the per-test flags up into one flag per observation.
//!
//! Key properties:
//! - One canonical input: meters on a single datum, strictly increasing time
//! - Tests are pure functions of thresholds and series
//! - Bad thresholds fail before any flag is computed
//! - Missing readings and short series never raise errors
//!
//! ```
//! use tideguard_core::{CanonicalSeries, Flag, QcPipeline};
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let pipeline = QcPipeline::builder()
//!     .gross_range((-1.0, 1.0), (-2.0, 2.0))
//!     .rate_of_change(0.001)
//!     .build()?;
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap();
//! let series = CanonicalSeries::from_pairs([
//!     (t0, 0.50),
//!     (t0 + Duration::minutes(6), 0.55),
//!     (t0 + Duration::minutes(12), 2.50),
//! ])?;
//!
//! let report = pipeline.run_default(&series)?;
//! assert_eq!(report.rollup().as_slice(), &[Flag::NotEvaluated, Flag::Pass, Flag::Fail]);
//! # Ok::<(), tideguard_core::QcError>(())
//! ```

#![deny(unsafe_code)]

#[macro_use]
mod macros;

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod errors;
pub mod flags;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod qartod;
pub mod series;
pub mod time;
pub mod traits;

// Public API
pub use config::{PipelineConfig, RawPipelineConfig, TestConfig, TestName};
pub use errors::{ErrorCategory, QcError, QcResult};
pub use flags::{Flag, FlagCounts, FlagSequence};
pub use normalize::{LengthUnit, NativeSeries, Representation};
pub use pipeline::{QcPipeline, QcPipelineBuilder, QcReport};
pub use provider::{SeriesProvider, SeriesRequest};
pub use series::{CanonicalSeries, Observation};
pub use time::Timestamp;
pub use traits::QcTest;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
