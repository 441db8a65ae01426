//! Constants for TideGuard Core
//!
//! Unit conversions, time conversions, and the stable names under which
//! QC results are published. Every numeric value used by the engine is
//! defined here with its unit in the name.
//!
//! ## Organization
//!
//! - **Units**: length conversions into meters
//! - **Time**: time unit conversions
//! - **Naming**: result keys shared with presentation layers

/// Length conversion factors into meters.
pub mod units;

/// Time unit conversions.
pub mod time;

/// Stable result and configuration key names.
pub mod naming;

pub use units::{FEET_TO_METERS, MM_PER_METER, CM_PER_METER};
pub use time::{MS_PER_SECOND, NANOS_PER_SECOND, SECONDS_PER_MINUTE, SECONDS_PER_HOUR};
pub use naming::{DEFAULT_VARIABLE, QARTOD_ROLLUP_KEY};
