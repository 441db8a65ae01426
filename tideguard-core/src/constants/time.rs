//! Time-Related Constants

/// Milliseconds per second.
pub const MS_PER_SECOND: i64 = 1_000;

/// Nanoseconds per second.
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: i64 = 60;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: i64 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;
