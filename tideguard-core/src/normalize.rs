//! Unit and Datum Normalization
//!
//! Providers report water level in their own terms. A gauge may report feet
//! above NAVD88; a ranging sensor reports the distance in millimeters from
//! the sensor down to the water surface. Every test works on meters, so each
//! native series carries a [`Representation`] saying how to get there:
//!
//! ```text
//! Direct            meters = value × unit_to_meters
//! DistanceToSurface meters = station_elevation_meters − value_mm / 1000
//! ```
//!
//! Normalization runs exactly once per series. It cannot tell whether a
//! series was already converted, so callers must not feed a canonical series
//! back through it.

use serde::{Deserialize, Serialize};

use crate::{
    constants::units::{CM_PER_METER, FEET_TO_METERS, MM_PER_METER},
    errors::{QcError, QcResult},
    series::{CanonicalSeries, Observation},
    time::Timestamp,
};

/// Length units reported by providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Meters,
    Centimeters,
    Millimeters,
    Feet,
}

impl LengthUnit {
    /// Multiplier from this unit into meters
    pub fn to_meters(self) -> f64 {
        match self {
            LengthUnit::Meters => 1.0,
            LengthUnit::Centimeters => 1.0 / CM_PER_METER,
            LengthUnit::Millimeters => 1.0 / MM_PER_METER,
            LengthUnit::Feet => FEET_TO_METERS,
        }
    }

    /// Convert `value` in this unit into meters
    pub fn convert(self, value: f64) -> f64 {
        value * self.to_meters()
    }
}

/// How a provider's raw values map onto meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Representation {
    /// Values are already water level, in some length unit
    Direct { unit_to_meters: f64 },
    /// Values are millimeters from a sensor down to the water surface
    DistanceToSurface { station_elevation_meters: f64 },
}

impl Representation {
    /// Water level reported in `unit`
    pub fn direct(unit: LengthUnit) -> Self {
        Representation::Direct {
            unit_to_meters: unit.to_meters(),
        }
    }

    /// Ranging sensor mounted at `station_elevation_meters`
    pub fn distance_to_surface(station_elevation_meters: f64) -> Self {
        Representation::DistanceToSurface {
            station_elevation_meters,
        }
    }

    pub fn validate(&self) -> QcResult<()> {
        match *self {
            Representation::Direct { unit_to_meters } => {
                if !unit_to_meters.is_finite() || unit_to_meters <= 0.0 {
                    return Err(QcError::InvalidNormalization {
                        field: "unit_to_meters",
                        value: unit_to_meters,
                        reason: "must be finite and positive",
                    });
                }
            }
            Representation::DistanceToSurface {
                station_elevation_meters,
            } => {
                if !station_elevation_meters.is_finite() {
                    return Err(QcError::InvalidNormalization {
                        field: "station_elevation_meters",
                        value: station_elevation_meters,
                        reason: "must be finite",
                    });
                }
            }
        }
        Ok(())
    }

    /// Meters for one raw value; non-finite stays non-finite
    pub fn apply(&self, raw: f64) -> f64 {
        match *self {
            Representation::Direct { unit_to_meters } => raw * unit_to_meters,
            Representation::DistanceToSurface {
                station_elevation_meters,
            } => station_elevation_meters - raw / MM_PER_METER,
        }
    }
}

/// Series exactly as a provider reported it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeSeries {
    pub representation: Representation,
    /// `(timestamp, raw value)` in provider order; non-finite means no reading
    pub readings: Vec<(Timestamp, f64)>,
}

impl NativeSeries {
    pub fn new(representation: Representation, readings: Vec<(Timestamp, f64)>) -> Self {
        Self {
            representation,
            readings,
        }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Convert into a validated canonical series in meters
    pub fn normalize(self) -> QcResult<CanonicalSeries> {
        normalize(self)
    }
}

/// Convert a native series into meters and check its ordering
pub fn normalize(native: NativeSeries) -> QcResult<CanonicalSeries> {
    let representation = native.representation;
    representation.validate()?;

    qc_debug!(
        "normalizing {} readings with {:?}",
        native.readings.len(),
        representation
    );

    let observations = native
        .readings
        .into_iter()
        .map(|(timestamp, raw)| {
            if raw.is_finite() {
                Observation::new(timestamp, representation.apply(raw))
            } else {
                Observation::missing(timestamp)
            }
        })
        .collect();

    CanonicalSeries::new(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::minutes;
    use chrono::{TimeZone, Utc};

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap()
    }

    fn readings(values: &[f64]) -> Vec<(Timestamp, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (t0() + minutes(6 * i as i64), *v))
            .collect()
    }

    #[test]
    fn unit_factors() {
        assert_eq!(LengthUnit::Meters.to_meters(), 1.0);
        assert!((LengthUnit::Feet.convert(10.0) - 3.048).abs() < 1e-12);
        assert!((LengthUnit::Millimeters.convert(1500.0) - 1.5).abs() < 1e-12);
        assert!((LengthUnit::Centimeters.convert(25.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn factor_of_one_is_a_no_op() {
        let raw = readings(&[1.25, -0.5, 3.0]);
        let series = normalize(NativeSeries::new(Representation::direct(LengthUnit::Meters), raw.clone()))
            .unwrap();
        let values: Vec<f64> = series.values().collect();
        assert_eq!(values, vec![1.25, -0.5, 3.0]);
        assert!(series.timestamps().eq(raw.iter().map(|(t, _)| *t)));
    }

    #[test]
    fn feet_gauge() {
        let series = NativeSeries::new(Representation::direct(LengthUnit::Feet), readings(&[1.0, 2.0]))
            .normalize()
            .unwrap();
        let values: Vec<f64> = series.values().collect();
        assert_eq!(values, vec![0.3048, 0.6096]);
    }

    #[test]
    fn ranging_sensor_subtracts_distance() {
        let series = NativeSeries::new(
            Representation::distance_to_surface(4.0),
            readings(&[2500.0, 3000.0]),
        )
        .normalize()
        .unwrap();
        let values: Vec<f64> = series.values().collect();
        assert_eq!(values, vec![1.5, 1.0]);
    }

    #[test]
    fn missing_readings_stay_missing() {
        let series = NativeSeries::new(
            Representation::distance_to_surface(4.0),
            readings(&[2500.0, f64::NAN, f64::INFINITY]),
        )
        .normalize()
        .unwrap();
        assert_eq!(series.missing_count(), 2);
        assert_eq!(series.get(0).and_then(|o| o.reading()), Some(1.5));
    }

    #[test]
    fn rejects_unusable_parameters() {
        for factor in [0.0, -0.3048, f64::NAN, f64::INFINITY] {
            let native = NativeSeries::new(Representation::Direct { unit_to_meters: factor }, vec![]);
            assert!(matches!(
                normalize(native),
                Err(QcError::InvalidNormalization { field: "unit_to_meters", .. })
            ));
        }

        let native = NativeSeries::new(Representation::distance_to_surface(f64::NAN), vec![]);
        assert!(normalize(native).unwrap_err().is_configuration());
    }

    #[test]
    fn ordering_is_checked_after_conversion() {
        let mut raw = readings(&[1.0, 2.0]);
        raw.swap(0, 1);
        let err = normalize(NativeSeries::new(Representation::direct(LengthUnit::Feet), raw)).unwrap_err();
        assert!(matches!(err, QcError::NonMonotonicTimestamp { index: 1, .. }));
    }

    #[test]
    fn representation_json_shape() {
        let json = serde_json::to_value(Representation::distance_to_surface(4.2)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "distance_to_surface", "station_elevation_meters": 4.2 })
        );
    }
}
