//! Canonical water-level series
//!
//! A `CanonicalSeries` is the only input the QC tests accept: observations in
//! meters relative to one vertical datum, with strictly increasing
//! timestamps. Ordering is checked once at construction; after that the
//! series is immutable and every test can rely on it.

use serde::{Deserialize, Serialize};

use crate::{
    errors::{QcError, QcResult},
    time::Timestamp,
    traits::Observable,
};

/// Single water-level reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: Timestamp,
    /// Meters relative to the series datum; non-finite means no reading
    #[serde(with = "missing_as_null")]
    pub value: f64,
}

impl Observation {
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Placeholder for a reading the provider did not deliver
    pub fn missing(timestamp: Timestamp) -> Self {
        Self { timestamp, value: f64::NAN }
    }

    /// Value if it is usable for comparisons
    pub fn reading(&self) -> Option<f64> {
        self.value.is_present().then_some(self.value)
    }
}

/// Time-ordered observations in one unit and datum
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CanonicalSeries {
    observations: Vec<Observation>,
}

impl CanonicalSeries {
    /// Build a series, rejecting duplicate or out-of-order timestamps
    pub fn new(observations: Vec<Observation>) -> QcResult<Self> {
        check_ordering(&observations)?;
        Ok(Self { observations })
    }

    /// Build a series from `(timestamp, value)` pairs
    pub fn from_pairs<I>(pairs: I) -> QcResult<Self>
    where
        I: IntoIterator<Item = (Timestamp, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(timestamp, value)| Observation::new(timestamp, value))
                .collect(),
        )
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.observations.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> + '_ {
        self.observations.iter()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.observations.iter().map(|obs| obs.timestamp)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|obs| obs.value)
    }

    /// Number of observations without a usable reading
    pub fn missing_count(&self) -> usize {
        self.observations
            .iter()
            .filter(|obs| obs.reading().is_none())
            .count()
    }

    /// Fewer than two observations: no sequential test has anything to compare
    pub fn is_degenerate(&self) -> bool {
        self.observations.len() < 2
    }

    /// First and last timestamps, if any
    pub fn time_span(&self) -> Option<(Timestamp, Timestamp)> {
        match (self.observations.first(), self.observations.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for CanonicalSeries {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            observations: Vec<Observation>,
        }

        let raw = Raw::deserialize(deserializer)?;
        CanonicalSeries::new(raw.observations).map_err(serde::de::Error::custom)
    }
}

/// Missing readings travel as `null` in JSON instead of failing on NaN
mod missing_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::traits::Observable;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_present() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

fn check_ordering(observations: &[Observation]) -> QcResult<()> {
    for (index, pair) in observations.windows(2).enumerate() {
        let (previous, current) = (pair[0].timestamp, pair[1].timestamp);
        if current == previous {
            return Err(QcError::DuplicateTimestamp {
                index: index + 1,
                timestamp: current,
            });
        }
        if current < previous {
            return Err(QcError::NonMonotonicTimestamp {
                index: index + 1,
                timestamp: current,
                previous,
            });
        }
    }
    Ok(())
}
