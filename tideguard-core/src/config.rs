//! Pipeline Configuration
//!
//! ## Two Forms
//!
//! - [`PipelineConfig`] is what the engine runs: a map from [`TestName`] to
//!   that test's thresholds. A test is enabled exactly when it has an entry,
//!   so an enabled test can never be missing a threshold.
//! - [`RawPipelineConfig`] is what collaborators hand in: each test carries an
//!   `enabled` switch and optional threshold fields, the shape an input form
//!   or JSON file naturally produces. [`RawPipelineConfig::into_pipeline`]
//!   drops disabled tests and rejects enabled tests with gaps.
//!
//! ```rust
//! use tideguard_core::config::{RawPipelineConfig, TestName};
//!
//! let raw: RawPipelineConfig = serde_json::from_str(r#"{
//!     "spike_test": { "enabled": true, "suspect_threshold": 0.2, "fail_threshold": 0.4 },
//!     "flat_line_test": { "enabled": false }
//! }"#)?;
//!
//! let config = raw.into_pipeline()?;
//! assert!(config.is_enabled(TestName::Spike));
//! assert!(!config.is_enabled(TestName::FlatLine));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants::naming::QARTOD_KEY_INFIX,
    errors::{QcError, QcResult},
    flags::FlagSequence,
    qartod::{FlatLineTest, GrossRangeTest, RateOfChangeTest, SpikeTest},
    series::CanonicalSeries,
    traits::QcTest,
};

/// Identifier of a QARTOD test
///
/// Ordering is the fixed order the pipeline runs tests in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TestName {
    #[serde(rename = "gross_range_test")]
    GrossRange,
    #[serde(rename = "rate_of_change_test")]
    RateOfChange,
    #[serde(rename = "spike_test")]
    Spike,
    #[serde(rename = "flat_line_test")]
    FlatLine,
}

impl TestName {
    /// Every test, in run order
    pub const ALL: [TestName; 4] = [
        TestName::GrossRange,
        TestName::RateOfChange,
        TestName::Spike,
        TestName::FlatLine,
    ];

    /// Stable external name
    pub const fn as_str(self) -> &'static str {
        match self {
            TestName::GrossRange => "gross_range_test",
            TestName::RateOfChange => "rate_of_change_test",
            TestName::Spike => "spike_test",
            TestName::FlatLine => "flat_line_test",
        }
    }

    /// Parse a stable external name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|test| test.as_str() == name)
    }

    /// Result key for this test's flags on `variable`, e.g. `navd88_meters_qartod_spike_test`
    pub fn result_key(self, variable: &str) -> String {
        format!("{variable}{QARTOD_KEY_INFIX}{}", self.as_str())
    }
}

impl fmt::Display for TestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds for one enabled test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestConfig {
    GrossRange(GrossRangeTest),
    RateOfChange(RateOfChangeTest),
    Spike(SpikeTest),
    FlatLine(FlatLineTest),
}

impl TestConfig {
    /// The test these thresholds drive
    pub fn as_test(&self) -> &dyn QcTest {
        match self {
            TestConfig::GrossRange(test) => test,
            TestConfig::RateOfChange(test) => test,
            TestConfig::Spike(test) => test,
            TestConfig::FlatLine(test) => test,
        }
    }
}

impl QcTest for TestConfig {
    fn name(&self) -> TestName {
        self.as_test().name()
    }

    fn validate(&self) -> QcResult<()> {
        self.as_test().validate()
    }

    fn evaluate(&self, series: &CanonicalSeries) -> FlagSequence {
        self.as_test().evaluate(series)
    }
}

impl From<GrossRangeTest> for TestConfig {
    fn from(test: GrossRangeTest) -> Self {
        TestConfig::GrossRange(test)
    }
}

impl From<RateOfChangeTest> for TestConfig {
    fn from(test: RateOfChangeTest) -> Self {
        TestConfig::RateOfChange(test)
    }
}

impl From<SpikeTest> for TestConfig {
    fn from(test: SpikeTest) -> Self {
        TestConfig::Spike(test)
    }
}

impl From<FlatLineTest> for TestConfig {
    fn from(test: FlatLineTest) -> Self {
        TestConfig::FlatLine(test)
    }
}

/// Enabled tests and their thresholds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    tests: BTreeMap<TestName, TestConfig>,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a test, replacing any earlier thresholds for it
    pub fn insert(&mut self, test: impl Into<TestConfig>) -> Option<TestConfig> {
        let test = test.into();
        self.tests.insert(test.name(), test)
    }

    /// Chaining form of [`insert`](Self::insert)
    pub fn with(mut self, test: impl Into<TestConfig>) -> Self {
        self.insert(test);
        self
    }

    pub fn remove(&mut self, name: TestName) -> Option<TestConfig> {
        self.tests.remove(&name)
    }

    pub fn get(&self, name: TestName) -> Option<&TestConfig> {
        self.tests.get(&name)
    }

    pub fn is_enabled(&self, name: TestName) -> bool {
        self.tests.contains_key(&name)
    }

    /// Enabled tests in run order
    pub fn iter(&self) -> impl Iterator<Item = &TestConfig> + '_ {
        self.tests.values()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Check every enabled test, stopping at the first bad one
    pub fn validate(&self) -> QcResult<()> {
        self.iter().try_for_each(QcTest::validate)
    }

    /// External form with every test present and the disabled ones switched off
    pub fn to_raw(&self) -> RawPipelineConfig {
        let mut raw = RawPipelineConfig::default();
        for test in self.iter() {
            match *test {
                TestConfig::GrossRange(t) => {
                    raw.gross_range_test = RawGrossRange {
                        enabled: true,
                        suspect_span: Some(t.suspect_span()),
                        fail_span: Some(t.fail_span()),
                    }
                }
                TestConfig::RateOfChange(t) => {
                    raw.rate_of_change_test = RawRateOfChange {
                        enabled: true,
                        threshold: Some(t.rate_threshold),
                    }
                }
                TestConfig::Spike(t) => {
                    raw.spike_test = RawSpike {
                        enabled: true,
                        suspect_threshold: Some(t.suspect_threshold),
                        fail_threshold: Some(t.fail_threshold),
                    }
                }
                TestConfig::FlatLine(t) => {
                    raw.flat_line_test = RawFlatLine {
                        enabled: true,
                        tolerance: Some(t.tolerance),
                        suspect_threshold: Some(t.suspect_threshold),
                        fail_threshold: Some(t.fail_threshold),
                    }
                }
            }
        }
        raw
    }
}

impl FromIterator<TestConfig> for PipelineConfig {
    fn from_iter<I: IntoIterator<Item = TestConfig>>(iter: I) -> Self {
        let mut config = Self::new();
        for test in iter {
            config.insert(test);
        }
        config
    }
}

/// Gross range entry as entered: spans are `[lower, upper]` in meters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGrossRange {
    pub enabled: bool,
    pub suspect_span: Option<[f64; 2]>,
    pub fail_span: Option<[f64; 2]>,
}

/// Rate of change entry as entered: `threshold` in meters per second
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRateOfChange {
    pub enabled: bool,
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSpike {
    pub enabled: bool,
    pub suspect_threshold: Option<f64>,
    pub fail_threshold: Option<f64>,
}

/// Flat line entry as entered: tolerance in meters, thresholds in seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFlatLine {
    pub enabled: bool,
    pub tolerance: Option<f64>,
    pub suspect_threshold: Option<f64>,
    pub fail_threshold: Option<f64>,
}

/// Collaborator-facing configuration, one entry per test
///
/// Tests omitted from the input are disabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPipelineConfig {
    pub gross_range_test: RawGrossRange,
    pub rate_of_change_test: RawRateOfChange,
    pub spike_test: RawSpike,
    pub flat_line_test: RawFlatLine,
}

fn required<T>(test: TestName, field: &'static str, value: Option<T>) -> QcResult<T> {
    value.ok_or(QcError::MissingThreshold {
        test: test.as_str(),
        field,
    })
}

impl RawPipelineConfig {
    /// Keep the enabled tests, requiring each to be complete and valid
    pub fn into_pipeline(self) -> QcResult<PipelineConfig> {
        let mut config = PipelineConfig::new();

        let gross = self.gross_range_test;
        if gross.enabled {
            let name = TestName::GrossRange;
            let [suspect_lower, suspect_upper] = required(name, "suspect_span", gross.suspect_span)?;
            let [fail_lower, fail_upper] = required(name, "fail_span", gross.fail_span)?;
            config.insert(GrossRangeTest::from_spans(
                (suspect_lower, suspect_upper),
                (fail_lower, fail_upper),
            ));
        }

        let rate = self.rate_of_change_test;
        if rate.enabled {
            let threshold = required(TestName::RateOfChange, "threshold", rate.threshold)?;
            config.insert(RateOfChangeTest::new(threshold));
        }

        let spike = self.spike_test;
        if spike.enabled {
            let name = TestName::Spike;
            config.insert(SpikeTest::new(
                required(name, "suspect_threshold", spike.suspect_threshold)?,
                required(name, "fail_threshold", spike.fail_threshold)?,
            ));
        }

        let flat = self.flat_line_test;
        if flat.enabled {
            let name = TestName::FlatLine;
            config.insert(FlatLineTest::new(
                required(name, "tolerance", flat.tolerance)?,
                required(name, "suspect_threshold", flat.suspect_threshold)?,
                required(name, "fail_threshold", flat.fail_threshold)?,
            ));
        }

        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<RawPipelineConfig> for PipelineConfig {
    type Error = QcError;

    fn try_from(raw: RawPipelineConfig) -> QcResult<Self> {
        raw.into_pipeline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> PipelineConfig {
        PipelineConfig::new()
            .with(FlatLineTest::new(0.03, 7200.0, 10800.0))
            .with(GrossRangeTest::from_spans((-1.0, 1.0), (-2.0, 2.0)))
            .with(SpikeTest::new(0.2, 0.4))
            .with(RateOfChangeTest::new(0.001))
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(TestName::GrossRange.as_str(), "gross_range_test");
        assert_eq!(TestName::FlatLine.to_string(), "flat_line_test");
        assert_eq!(TestName::from_name("spike_test"), Some(TestName::Spike));
        assert_eq!(TestName::from_name("climatology_test"), None);
        assert_eq!(
            serde_json::to_string(&TestName::RateOfChange).unwrap(),
            "\"rate_of_change_test\""
        );
    }

    #[test]
    fn result_keys() {
        assert_eq!(
            TestName::Spike.result_key("navd88_meters"),
            "navd88_meters_qartod_spike_test"
        );
    }

    #[test]
    fn iterates_in_run_order() {
        let order: Vec<TestName> = full().iter().map(QcTest::name).collect();
        assert_eq!(order, TestName::ALL.to_vec());
    }

    #[test]
    fn presence_means_enabled() {
        let mut config = full();
        assert_eq!(config.len(), 4);
        config.remove(TestName::Spike);
        assert!(!config.is_enabled(TestName::Spike));
        assert!(config.get(TestName::Spike).is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_reports_first_bad_test() {
        let config = full().with(SpikeTest::new(0.5, 0.1));
        assert!(matches!(
            config.validate(),
            Err(QcError::ThresholdOrder { test: "spike_test", .. })
        ));
    }

    #[test]
    fn raw_disabled_tests_are_dropped() {
        let raw: RawPipelineConfig = serde_json::from_str(
            r#"{ "rate_of_change_test": { "enabled": false, "threshold": 0.01 } }"#,
        )
        .unwrap();
        assert!(raw.into_pipeline().unwrap().is_empty());
    }

    #[test]
    fn raw_enabled_test_needs_every_threshold() {
        let raw: RawPipelineConfig = serde_json::from_str(
            r#"{ "flat_line_test": { "enabled": true, "tolerance": 0.03, "suspect_threshold": 7200 } }"#,
        )
        .unwrap();
        assert_eq!(
            raw.into_pipeline(),
            Err(QcError::MissingThreshold {
                test: "flat_line_test",
                field: "fail_threshold",
            })
        );
    }

    #[test]
    fn raw_thresholds_are_validated() {
        let raw: RawPipelineConfig = serde_json::from_str(
            r#"{ "gross_range_test": { "enabled": true, "suspect_span": [1.0, -1.0], "fail_span": [-2.0, 2.0] } }"#,
        )
        .unwrap();
        assert!(raw.into_pipeline().unwrap_err().is_configuration());
    }

    #[test]
    fn raw_round_trip() {
        let config = full();
        assert_eq!(PipelineConfig::try_from(config.to_raw()), Ok(config));
    }
}
