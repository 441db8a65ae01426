//! Result Key Names
//!
//! Presentation layers align flag sequences back to the source series by
//! these keys, so they are part of the public contract.

/// Variable name for water level in meters relative to NAVD88.
pub const DEFAULT_VARIABLE: &str = "navd88_meters";

/// Infix between variable and test name in per-test result keys.
///
/// `navd88_meters` + `gross_range_test` → `navd88_meters_qartod_gross_range_test`
pub const QARTOD_KEY_INFIX: &str = "_qartod_";

/// Key of the aggregated rollup flag sequence.
pub const QARTOD_ROLLUP_KEY: &str = "qartod_qc_rollup";
