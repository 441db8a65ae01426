//! Shared fixtures for integration tests
//!
//! - Synthetic semidiurnal tide generator with seeded noise
//! - Fault injectors: spikes, stuck sensor, telemetry gaps
//! - A threshold set sized for the generated tide

#![allow(dead_code)]

use std::f64::consts::PI;
use std::ops::Range;

use chrono::{TimeZone, Utc};
use tideguard_core::{
    time::{minutes, Timestamp},
    CanonicalSeries, PipelineConfig, QcPipeline,
};

/// M2 tidal constituent period in hours
pub const M2_PERIOD_HOURS: f64 = 12.42;

/// Default sampling interval, as delivered by most gauges
pub const SAMPLE_MINUTES: i64 = 6;

pub fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap()
}

/// Semidiurnal water level around a mean, with uniform noise
pub struct TideGenerator {
    mean: f64,
    amplitude: f64,
    noise: f64,
    interval_minutes: i64,
    seed: u32,
}

impl TideGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            mean: 0.0,
            amplitude: 1.5,
            noise: 0.0,
            interval_minutes: SAMPLE_MINUTES,
            seed,
        }
    }

    pub fn mean(mut self, mean: f64) -> Self {
        self.mean = mean;
        self
    }

    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Peak noise in meters
    pub fn noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    pub fn interval_minutes(mut self, interval_minutes: i64) -> Self {
        self.interval_minutes = interval_minutes;
        self
    }

    /// `samples` readings starting at [`t0`]
    pub fn readings(&mut self, samples: usize) -> Vec<(Timestamp, f64)> {
        (0..samples)
            .map(|i| {
                let elapsed_minutes = self.interval_minutes * i as i64;
                let hours = elapsed_minutes as f64 / 60.0;
                let tide = self.amplitude * (2.0 * PI * hours / M2_PERIOD_HOURS).sin();
                let noise = self.random_noise();
                (t0() + minutes(elapsed_minutes), self.mean + tide + noise)
            })
            .collect()
    }

    pub fn series(&mut self, samples: usize) -> CanonicalSeries {
        series_from(self.readings(samples))
    }

    fn random_noise(&mut self) -> f64 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        let uniform = self.seed as f64 / u32::MAX as f64;
        (uniform - 0.5) * 2.0 * self.noise
    }
}

pub fn series_from(readings: Vec<(Timestamp, f64)>) -> CanonicalSeries {
    CanonicalSeries::from_pairs(readings).unwrap()
}

/// Add `delta` meters to one reading
pub fn inject_spike(readings: &mut [(Timestamp, f64)], index: usize, delta: f64) {
    readings[index].1 += delta;
}

/// Hold the reading at `range.start` for the whole range
pub fn inject_flat(readings: &mut [(Timestamp, f64)], range: Range<usize>) {
    let stuck = readings[range.start].1;
    for reading in &mut readings[range] {
        reading.1 = stuck;
    }
}

/// Drop the readings in `range`
pub fn inject_gap(readings: &mut [(Timestamp, f64)], range: Range<usize>) {
    for reading in &mut readings[range] {
        reading.1 = f64::NAN;
    }
}

/// Thresholds sized for a 1.5 m tide sampled every 6 minutes
pub fn tide_config() -> PipelineConfig {
    QcPipeline::builder()
        .gross_range((-2.0, 2.0), (-3.0, 3.0))
        .rate_of_change(0.001)
        .spike(0.2, 0.4)
        .flat_line(0.005, 7200.0, 10800.0)
        .build()
        .unwrap()
        .config()
        .clone()
}

pub fn tide_pipeline() -> QcPipeline {
    QcPipeline::new(tide_config()).unwrap()
}
