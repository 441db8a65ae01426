//! Length Conversion Factors
//!
//! Providers report water level in their own units. All values are
//! converted to meters before any test runs.

/// Meters per international foot.
///
/// Exact by definition (1959 international yard and pound agreement).
pub const FEET_TO_METERS: f64 = 0.3048;

/// Millimeters per meter.
///
/// Ranging sensors report distance to the water surface in millimeters.
pub const MM_PER_METER: f64 = 1_000.0;

/// Centimeters per meter.
pub const CM_PER_METER: f64 = 100.0;
