//! QARTOD Water-Level Tests
//!
//! ## Overview
//!
//! Four automated tests from the QARTOD water-level manual. Each one takes a
//! [`CanonicalSeries`](crate::series::CanonicalSeries) and its own thresholds
//! and returns one flag per observation.
//!
//! | Test            | Looks at                  | Flags produced                  |
//! |-----------------|---------------------------|---------------------------------|
//! | Gross range     | each reading alone        | Pass, Suspect, Fail             |
//! | Rate of change  | reading and predecessor   | Pass, Suspect                   |
//! | Spike           | reading and both neighbours | Pass, Suspect, Fail           |
//! | Flat line       | current flat run duration | Pass, Suspect, Fail             |
//!
//! All four produce `NotEvaluated` when the data they need is missing.
//!
//! ## Sequential Scans
//!
//! Rate of change and flat line walk the series once, left to right,
//! carrying only the state they need (previous observation, current flat
//! run). They are written as `Iterator::scan` folds so nothing outlives a
//! single call.
//!
//! ## Usage Example
//!
//! ```rust
//! use tideguard_core::qartod::{GrossRangeTest, SpikeTest};
//! use tideguard_core::{CanonicalSeries, Flag, QcTest};
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap();
//! let series = CanonicalSeries::from_pairs([
//!     (t0, 1.0),
//!     (t0 + Duration::minutes(6), 1.5),
//!     (t0 + Duration::minutes(12), 1.0),
//! ])?;
//!
//! let spikes = SpikeTest::new(0.2, 0.4).run(&series)?;
//! assert_eq!(spikes.get(1), Some(Flag::Fail));
//!
//! let range = GrossRangeTest::from_spans((-1.0, 1.0), (-2.0, 2.0)).run(&series)?;
//! assert_eq!(range.get(1), Some(Flag::Suspect));
//! # Ok::<(), tideguard_core::QcError>(())
//! ```

mod flat_line;
mod gross_range;
mod rate_of_change;
mod spike;
pub(crate) mod utils;

pub use flat_line::FlatLineTest;
pub use gross_range::GrossRangeTest;
pub use rate_of_change::RateOfChangeTest;
pub use spike::SpikeTest;
