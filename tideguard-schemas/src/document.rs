//! QC Configuration Document
//!
//! Station metadata plus the QARTOD thresholds used for each stream. The
//! document holds no engine state; everything in it is plain data that
//! serializes with `serde_json`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tideguard_core::{
    qartod::{FlatLineTest, GrossRangeTest, RateOfChangeTest, SpikeTest},
    PipelineConfig, TestConfig,
};

use crate::{SchemaError, SchemaResult};

/// Where the data came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationMetadata {
    pub station_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// First day of data the thresholds were tuned on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Sensor or gauge elevation, meters above NAVD88
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navd88_elevation_meters: Option<f64>,
    /// Mean lower low water, meters from NAVD88
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mllw: Option<f64>,
    /// Mean higher high water, meters from NAVD88
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mhhw: Option<f64>,
}

impl StationMetadata {
    pub fn new(station_id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            station_id: station_id.into(),
            name: None,
            latitude,
            longitude,
            start_date: None,
            navd88_elevation_meters: None,
            mllw: None,
            mhhw: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_elevation(mut self, navd88_elevation_meters: f64) -> Self {
        self.navd88_elevation_meters = Some(navd88_elevation_meters);
        self
    }

    /// Tidal datum offsets in meters from NAVD88
    pub fn with_datums(mut self, mllw: f64, mhhw: f64) -> Self {
        self.mllw = Some(mllw);
        self.mhhw = Some(mhhw);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrossRangeEntry {
    pub suspect_span: [f64; 2],
    pub fail_span: [f64; 2],
}

/// `threshold` is in meters per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateOfChangeEntry {
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikeEntry {
    pub suspect_threshold: f64,
    pub fail_threshold: f64,
}

/// Thresholds are in seconds of flat run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatLineEntry {
    pub tolerance: f64,
    pub suspect_threshold: f64,
    pub fail_threshold: f64,
}

/// Thresholds for one stream; an absent test was disabled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QartodTests {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_range_test: Option<GrossRangeEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_of_change_test: Option<RateOfChangeEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spike_test: Option<SpikeEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_line_test: Option<FlatLineEntry>,
}

impl QartodTests {
    /// Engine configuration for these entries, validated
    pub fn to_pipeline(&self) -> SchemaResult<PipelineConfig> {
        let mut config = PipelineConfig::new();

        if let Some(entry) = self.gross_range_test {
            let [suspect_lower, suspect_upper] = entry.suspect_span;
            let [fail_lower, fail_upper] = entry.fail_span;
            config.insert(GrossRangeTest::from_spans(
                (suspect_lower, suspect_upper),
                (fail_lower, fail_upper),
            ));
        }
        if let Some(entry) = self.rate_of_change_test {
            config.insert(RateOfChangeTest::new(entry.threshold));
        }
        if let Some(entry) = self.spike_test {
            config.insert(SpikeTest::new(entry.suspect_threshold, entry.fail_threshold));
        }
        if let Some(entry) = self.flat_line_test {
            config.insert(FlatLineTest::new(
                entry.tolerance,
                entry.suspect_threshold,
                entry.fail_threshold,
            ));
        }

        config.validate()?;
        Ok(config)
    }
}

impl From<&PipelineConfig> for QartodTests {
    fn from(config: &PipelineConfig) -> Self {
        let mut tests = QartodTests::default();
        for test in config.iter() {
            match *test {
                TestConfig::GrossRange(t) => {
                    tests.gross_range_test = Some(GrossRangeEntry {
                        suspect_span: t.suspect_span(),
                        fail_span: t.fail_span(),
                    })
                }
                TestConfig::RateOfChange(t) => {
                    tests.rate_of_change_test = Some(RateOfChangeEntry {
                        threshold: t.rate_threshold,
                    })
                }
                TestConfig::Spike(t) => {
                    tests.spike_test = Some(SpikeEntry {
                        suspect_threshold: t.suspect_threshold,
                        fail_threshold: t.fail_threshold,
                    })
                }
                TestConfig::FlatLine(t) => {
                    tests.flat_line_test = Some(FlatLineEntry {
                        tolerance: t.tolerance,
                        suspect_threshold: t.suspect_threshold,
                        fail_threshold: t.fail_threshold,
                    })
                }
            }
        }
        tests
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    pub qartod: QartodTests,
}

/// Streams that share one context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QartodContext {
    pub streams: BTreeMap<String, StreamConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QartodSection {
    pub contexts: Vec<QartodContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QcSection {
    pub qartod: QartodSection,
}

/// Exported description of a QC run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcConfigDocument {
    pub station: StationMetadata,
    pub qc: QcSection,
}

impl QcConfigDocument {
    /// Document with no streams yet
    pub fn new(station: StationMetadata) -> Self {
        Self {
            station,
            qc: QcSection::default(),
        }
    }

    /// Document describing one stream
    pub fn from_pipeline(station: StationMetadata, variable: &str, config: &PipelineConfig) -> Self {
        Self::new(station).with_stream(variable, config)
    }

    /// Add or replace a stream in the first context
    pub fn with_stream(mut self, variable: &str, config: &PipelineConfig) -> Self {
        let contexts = &mut self.qc.qartod.contexts;
        if contexts.is_empty() {
            contexts.push(QartodContext::default());
        }
        contexts[0].streams.insert(
            variable.to_string(),
            StreamConfig {
                qartod: QartodTests::from(config),
            },
        );
        self
    }

    /// Stream variables across every context, in document order
    pub fn variables(&self) -> Vec<&str> {
        self.qc
            .qartod
            .contexts
            .iter()
            .flat_map(|context| context.streams.keys().map(String::as_str))
            .collect()
    }

    /// Entries for `variable` from the first context that defines it
    pub fn stream(&self, variable: &str) -> Option<&QartodTests> {
        self.qc
            .qartod
            .contexts
            .iter()
            .find_map(|context| context.streams.get(variable))
            .map(|stream| &stream.qartod)
    }

    /// Recover the validated engine configuration for `variable`
    pub fn pipeline_config(&self, variable: &str) -> SchemaResult<PipelineConfig> {
        self.stream(variable)
            .ok_or_else(|| SchemaError::MissingStream(variable.to_string()))?
            .to_pipeline()
    }

    pub fn to_json(&self) -> SchemaResult<String> {
        serde_json::to_string(self).map_err(|e| SchemaError::Serialization(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> SchemaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SchemaError::Serialization(e.to_string()))
    }

    /// Parse a document and check every stream's thresholds
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let document: Self = serde_json::from_str(json).map_err(|e| SchemaError::Parse(e.to_string()))?;
        for context in &document.qc.qartod.contexts {
            for stream in context.streams.values() {
                stream.qartod.to_pipeline()?;
            }
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tideguard_core::{QcError, TestName};

    fn station() -> StationMetadata {
        StationMetadata::new("8418150", 43.6567, -70.2467)
            .with_name("Portland, ME")
            .with_datums(-1.55, 1.45)
    }

    fn config() -> PipelineConfig {
        PipelineConfig::new()
            .with(GrossRangeTest::from_spans((-2.0, 3.0), (-3.0, 4.0)))
            .with(SpikeTest::new(0.2286, 0.4572))
    }

    #[test]
    fn nested_layout() {
        let document = QcConfigDocument::from_pipeline(station(), "navd88_meters", &config());
        let json = serde_json::to_value(&document).unwrap();

        let tests = &json["qc"]["qartod"]["contexts"][0]["streams"]["navd88_meters"]["qartod"];
        assert_eq!(tests["gross_range_test"]["suspect_span"], serde_json::json!([-2.0, 3.0]));
        assert_eq!(tests["spike_test"]["fail_threshold"], serde_json::json!(0.4572));
        assert!(tests.get("rate_of_change_test").is_none());
        assert!(json["station"].get("start_date").is_none());
        assert_eq!(json["station"]["name"], "Portland, ME");
    }

    #[test]
    fn round_trips_pipeline_config() {
        let document = QcConfigDocument::from_pipeline(station(), "navd88_meters", &config());
        let restored = QcConfigDocument::from_json(&document.to_json().unwrap()).unwrap();

        assert_eq!(restored, document);
        assert_eq!(restored.pipeline_config("navd88_meters").unwrap(), config());
    }

    #[test]
    fn unknown_stream() {
        let document = QcConfigDocument::from_pipeline(station(), "navd88_meters", &config());
        assert!(matches!(
            document.pipeline_config("water_temperature"),
            Err(SchemaError::MissingStream(name)) if name == "water_temperature"
        ));
    }

    #[test]
    fn streams_accumulate() {
        let rate_only = PipelineConfig::new().with(RateOfChangeTest::new(0.000635));
        let document = QcConfigDocument::new(station())
            .with_stream("navd88_meters", &config())
            .with_stream("mllw_meters", &rate_only);

        assert_eq!(document.variables(), vec!["mllw_meters", "navd88_meters"]);
        let restored = document.pipeline_config("mllw_meters").unwrap();
        assert!(restored.is_enabled(TestName::RateOfChange));
        assert_eq!(restored.len(), 1);
    }

    #[test]
    fn invalid_thresholds_are_rejected_on_load() {
        let json = r#"{
            "station": { "station_id": "x", "latitude": 0.0, "longitude": 0.0 },
            "qc": { "qartod": { "contexts": [ { "streams": { "navd88_meters": { "qartod": {
                "spike_test": { "suspect_threshold": 0.5, "fail_threshold": 0.1 }
            } } } } ] } }
        }"#;
        assert!(matches!(
            QcConfigDocument::from_json(json),
            Err(SchemaError::Invalid(QcError::ThresholdOrder { test: "spike_test", .. }))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            QcConfigDocument::from_json("{ \"station\": 3 }"),
            Err(SchemaError::Parse(_))
        ));
    }

    #[test]
    fn start_date_is_iso() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 13).unwrap();
        let document = QcConfigDocument::new(station().with_start_date(start));
        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["station"]["start_date"], "2024-01-13");
    }
}
