//! Telemetry Provider Interface
//!
//! The engine never talks to a network. A [`SeriesProvider`] is anything
//! that can hand back a [`NativeSeries`] for a station and time range;
//! retrieval, paging and response parsing live with the caller.
//!
//! Two adapter shapes cover the sources in use:
//!
//! - [`DirectGauge`]: a tide gauge that reports water level in a length unit
//!   relative to the working datum.
//! - [`RangingSensor`]: a downward-looking sensor that reports millimeters to
//!   the water surface from a known elevation.
//!
//! Both wrap a caller-supplied fetch function and attach the representation,
//! so the only provider-specific knowledge in the engine is how to reach
//! meters. Nothing downstream of [`fetch_canonical`] knows which provider
//! produced a series.
//!
//! ```rust
//! use tideguard_core::provider::{fetch_canonical, DirectGauge, SeriesRequest};
//! use tideguard_core::normalize::LengthUnit;
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap();
//! let gauge = DirectGauge::new("noaa-coops", LengthUnit::Feet, move |_request: &SeriesRequest| {
//!     Ok(vec![(start, 10.0), (start + Duration::minutes(6), 10.5)])
//! });
//!
//! let request = SeriesRequest::new("8418150", start, start + Duration::hours(1));
//! let series = fetch_canonical(&gauge, &request)?;
//! assert_eq!(series.len(), 2);
//! # Ok::<(), tideguard_core::QcError>(())
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{QcError, QcResult},
    normalize::{LengthUnit, NativeSeries, Representation},
    series::CanonicalSeries,
    time::Timestamp,
};

/// Station and UTC time range to fetch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub station_id: String,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl SeriesRequest {
    pub fn new(station_id: impl Into<String>, start: Timestamp, end: Timestamp) -> Self {
        Self {
            station_id: station_id.into(),
            start,
            end,
        }
    }

    /// Whether `timestamp` falls inside `[start, end]`
    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Source of native water-level series
pub trait SeriesProvider {
    /// Short name used in error messages
    fn name(&self) -> &str;

    /// Fetch the station's series for the requested range
    fn fetch_series(&self, request: &SeriesRequest) -> QcResult<NativeSeries>;
}

/// Raw `(timestamp, value)` pairs from a caller's retrieval code
pub type Readings = Vec<(Timestamp, f64)>;

/// Gauge reporting water level directly, in `unit`
pub struct DirectGauge<F> {
    name: String,
    unit: LengthUnit,
    fetch: F,
}

impl<F> DirectGauge<F>
where
    F: Fn(&SeriesRequest) -> Result<Readings, String>,
{
    pub fn new(name: impl Into<String>, unit: LengthUnit, fetch: F) -> Self {
        Self {
            name: name.into(),
            unit,
            fetch,
        }
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }
}

impl<F> SeriesProvider for DirectGauge<F>
where
    F: Fn(&SeriesRequest) -> Result<Readings, String>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_series(&self, request: &SeriesRequest) -> QcResult<NativeSeries> {
        let readings = (self.fetch)(request).map_err(|message| provider_error(&self.name, message))?;
        Ok(NativeSeries::new(Representation::direct(self.unit), readings))
    }
}

/// Ranging sensor reporting millimeters down to the water surface
pub struct RangingSensor<F> {
    name: String,
    station_elevation_meters: f64,
    fetch: F,
}

impl<F> RangingSensor<F>
where
    F: Fn(&SeriesRequest) -> Result<Readings, String>,
{
    pub fn new(name: impl Into<String>, station_elevation_meters: f64, fetch: F) -> Self {
        Self {
            name: name.into(),
            station_elevation_meters,
            fetch,
        }
    }

    pub fn station_elevation_meters(&self) -> f64 {
        self.station_elevation_meters
    }
}

impl<F> SeriesProvider for RangingSensor<F>
where
    F: Fn(&SeriesRequest) -> Result<Readings, String>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_series(&self, request: &SeriesRequest) -> QcResult<NativeSeries> {
        let readings = (self.fetch)(request).map_err(|message| provider_error(&self.name, message))?;
        Ok(NativeSeries::new(
            Representation::distance_to_surface(self.station_elevation_meters),
            readings,
        ))
    }
}

/// Canned series keyed by station, for tests and offline runs
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    name: String,
    stations: HashMap<String, NativeSeries>,
}

impl MemoryProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stations: HashMap::new(),
        }
    }

    /// Register the full series for a station
    pub fn with_station(mut self, station_id: impl Into<String>, series: NativeSeries) -> Self {
        self.stations.insert(station_id.into(), series);
        self
    }
}

impl SeriesProvider for MemoryProvider {
    fn name(&self) -> &str {
        &self.name
    }

    /// Readings of the station that fall inside the requested range
    fn fetch_series(&self, request: &SeriesRequest) -> QcResult<NativeSeries> {
        let stored = self.stations.get(&request.station_id).ok_or_else(|| {
            provider_error(&self.name, format!("unknown station {}", request.station_id))
        })?;

        let readings = stored
            .readings
            .iter()
            .copied()
            .filter(|(timestamp, _)| request.contains(*timestamp))
            .collect();

        Ok(NativeSeries::new(stored.representation, readings))
    }
}

fn provider_error(provider: &str, message: String) -> QcError {
    QcError::Provider {
        provider: provider.to_string(),
        message,
    }
}

/// Fetch from `provider` and normalize into a canonical series
pub fn fetch_canonical<P>(provider: &P, request: &SeriesRequest) -> QcResult<CanonicalSeries>
where
    P: SeriesProvider + ?Sized,
{
    let native = provider.fetch_series(request)?;
    qc_debug!(
        "{} returned {} readings for station {}",
        provider.name(),
        native.len(),
        request.station_id
    );
    native.normalize()
}
