//! Time handling for observation series
//!
//! Observations carry wall-clock UTC timestamps. Providers report at
//! irregular intervals, so every time-aware test works from elapsed real
//! time rather than sample counts.

use chrono::{DateTime, Duration, Utc};

use crate::constants::time::{MS_PER_SECOND, NANOS_PER_SECOND};

/// Point in time of an observation
pub type Timestamp = DateTime<Utc>;

/// Elapsed seconds from `earlier` to `later`, with nanosecond resolution.
///
/// Negative when `later` precedes `earlier`. Spans too long for an `i64`
/// of nanoseconds (about 292 years) fall back to milliseconds.
pub fn elapsed_seconds(earlier: Timestamp, later: Timestamp) -> f64 {
    let delta = later - earlier;
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / NANOS_PER_SECOND as f64,
        None => delta.num_milliseconds() as f64 / MS_PER_SECOND as f64,
    }
}

/// Convert a whole number of seconds into a `chrono::Duration`
pub fn seconds(secs: i64) -> Duration {
    Duration::seconds(secs)
}

/// Convert a whole number of minutes into a `chrono::Duration`
pub fn minutes(mins: i64) -> Duration {
    Duration::minutes(mins)
}
