//! Pipeline builder
//!
//! Collects tests one at a time and validates them all in
//! [`build`](QcPipelineBuilder::build).

use crate::{
    config::{PipelineConfig, TestConfig},
    errors::QcResult,
    qartod::{FlatLineTest, GrossRangeTest, RateOfChangeTest, SpikeTest},
};

use super::QcPipeline;

/// Fluent construction of a [`QcPipeline`]
///
/// Adding the same test twice keeps the later thresholds.
#[derive(Debug, Clone, Default)]
pub struct QcPipelineBuilder {
    config: PipelineConfig,
}

impl QcPipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Enable gross range with `(lower, upper)` spans in meters
    pub fn gross_range(self, suspect_span: (f64, f64), fail_span: (f64, f64)) -> Self {
        self.test(GrossRangeTest::from_spans(suspect_span, fail_span))
    }

    /// Enable rate of change with a threshold in meters per second
    pub fn rate_of_change(self, rate_threshold: f64) -> Self {
        self.test(RateOfChangeTest::new(rate_threshold))
    }

    /// Enable spike with thresholds in meters
    pub fn spike(self, suspect_threshold: f64, fail_threshold: f64) -> Self {
        self.test(SpikeTest::new(suspect_threshold, fail_threshold))
    }

    /// Enable flat line with tolerance in meters and thresholds in seconds
    pub fn flat_line(self, tolerance: f64, suspect_threshold: f64, fail_threshold: f64) -> Self {
        self.test(FlatLineTest::new(tolerance, suspect_threshold, fail_threshold))
    }

    /// Enable any test
    pub fn test(mut self, test: impl Into<TestConfig>) -> Self {
        self.config.insert(test);
        self
    }

    pub fn build(self) -> QcResult<QcPipeline> {
        QcPipeline::new(self.config)
    }
}
