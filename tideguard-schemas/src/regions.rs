//! Regional Default Thresholds
//!
//! Starting QARTOD thresholds for a region's tidal regime, computed from a
//! station's tidal datums. Operators are expected to review and adjust them;
//! every test comes back enabled.

use tideguard_core::{
    config::{RawFlatLine, RawGrossRange, RawRateOfChange, RawSpike},
    constants::SECONDS_PER_HOUR,
    LengthUnit, PipelineConfig, QcResult, RawPipelineConfig,
};

/// Threshold presets for one coastal region
pub trait Region: Send + Sync {
    fn name(&self) -> &'static str;

    /// Who tuned the presets
    fn attribution(&self) -> &'static str;

    /// Every test enabled, with thresholds for a station whose MLLW and MHHW
    /// are given in meters from NAVD88
    fn calculate_defaults(&self, mllw: f64, mhhw: f64) -> RawPipelineConfig;

    /// [`calculate_defaults`](Region::calculate_defaults) as a validated engine configuration
    fn pipeline_config(&self, mllw: f64, mhhw: f64) -> QcResult<PipelineConfig> {
        self.calculate_defaults(mllw, mhhw).into_pipeline()
    }
}

fn feet(value: f64) -> f64 {
    LengthUnit::Feet.convert(value)
}

/// Gulf of Maine, not the New England Shelf
///
/// - Gross range: MLLW − 4.5 ft to MHHW + 6 ft, the same span for suspect
///   and fail. The upper limit sits above the highest recorded storm tides
///   in the region; the lower limit below the lowest recorded water at
///   Eastport.
/// - Rate of change: 0.75 ft per 6 minutes. The fastest tidal rate at
///   Eastport is about 0.5 ft per 6 minutes at mid-tide, plus 0.25 ft for
///   sustained wind-driven set-up. This differs from the published preset,
///   which stores the bare 0.75 ft (0.2286) as the threshold with no time
///   base; here it is divided by the 6-minute window to give meters per
///   second, the unit the rate of change test uses.
/// - Spike: 0.75 ft suspect, 1.5 ft fail.
/// - Flat line: within 0.1 ft for 2 hours is suspect, 3 hours fail. Neap
///   tides around slack water in Portland still move about 0.25 ft per hour.
#[derive(Debug, Clone, Copy, Default)]
pub struct GulfOfMaine;

impl GulfOfMaine {
    const BELOW_MLLW_FT: f64 = 4.5;
    const ABOVE_MHHW_FT: f64 = 6.0;
    const RATE_FT: f64 = 0.75;
    const RATE_WINDOW_SECS: f64 = 6.0 * 60.0;
    const SPIKE_SUSPECT_FT: f64 = 0.75;
    const SPIKE_FAIL_FT: f64 = 1.5;
    const FLAT_TOLERANCE_FT: f64 = 0.1;
    const FLAT_SUSPECT_HOURS: i64 = 2;
    const FLAT_FAIL_HOURS: i64 = 3;
}

impl Region for GulfOfMaine {
    fn name(&self) -> &'static str {
        "Gulf of Maine"
    }

    fn attribution(&self) -> &'static str {
        "Hannah Baranes, GMRI 2024"
    }

    fn calculate_defaults(&self, mllw: f64, mhhw: f64) -> RawPipelineConfig {
        let span = [mllw - feet(Self::BELOW_MLLW_FT), mhhw + feet(Self::ABOVE_MHHW_FT)];

        RawPipelineConfig {
            gross_range_test: RawGrossRange {
                enabled: true,
                suspect_span: Some(span),
                fail_span: Some(span),
            },
            rate_of_change_test: RawRateOfChange {
                enabled: true,
                threshold: Some(feet(Self::RATE_FT) / Self::RATE_WINDOW_SECS),
            },
            spike_test: RawSpike {
                enabled: true,
                suspect_threshold: Some(feet(Self::SPIKE_SUSPECT_FT)),
                fail_threshold: Some(feet(Self::SPIKE_FAIL_FT)),
            },
            flat_line_test: RawFlatLine {
                enabled: true,
                tolerance: Some(feet(Self::FLAT_TOLERANCE_FT)),
                suspect_threshold: Some((Self::FLAT_SUSPECT_HOURS * SECONDS_PER_HOUR) as f64),
                fail_threshold: Some((Self::FLAT_FAIL_HOURS * SECONDS_PER_HOUR) as f64),
            },
        }
    }
}

static REGIONS: &[&dyn Region] = &[&GulfOfMaine];

/// Every region with presets
pub fn regions() -> &'static [&'static dyn Region] {
    REGIONS
}

/// Look a region up by its display name
pub fn region_by_name(name: &str) -> Option<&'static dyn Region> {
    REGIONS.iter().copied().find(|region| region.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tideguard_core::{QcTest, TestConfig, TestName};

    const MLLW: f64 = -1.55;
    const MHHW: f64 = 1.45;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn gulf_of_maine_gross_range() {
        let defaults = GulfOfMaine.calculate_defaults(MLLW, MHHW);
        let [lower, upper] = defaults.gross_range_test.suspect_span.unwrap();
        assert!(close(lower, -1.55 - 1.3716));
        assert!(close(upper, 1.45 + 1.8288));
        assert_eq!(defaults.gross_range_test.fail_span, defaults.gross_range_test.suspect_span);
    }

    #[test]
    fn gulf_of_maine_thresholds_in_si_units() {
        let defaults = GulfOfMaine.calculate_defaults(MLLW, MHHW);
        assert!(close(defaults.rate_of_change_test.threshold.unwrap(), 0.2286 / 360.0));
        assert!(close(defaults.spike_test.suspect_threshold.unwrap(), 0.2286));
        assert!(close(defaults.spike_test.fail_threshold.unwrap(), 0.4572));
        assert!(close(defaults.flat_line_test.tolerance.unwrap(), 0.03048));
        assert_eq!(defaults.flat_line_test.suspect_threshold, Some(7200.0));
        assert_eq!(defaults.flat_line_test.fail_threshold, Some(10800.0));
    }

    #[test]
    fn defaults_enable_and_validate_every_test() {
        let config = GulfOfMaine.pipeline_config(MLLW, MHHW).unwrap();
        assert_eq!(config.len(), TestName::ALL.len());
        assert!(config.iter().all(|test| test.validate().is_ok()));
        assert!(matches!(
            config.get(TestName::RateOfChange),
            Some(TestConfig::RateOfChange(_))
        ));
    }

    #[test]
    fn lookup_by_name() {
        let region = region_by_name("Gulf of Maine").unwrap();
        assert_eq!(region.attribution(), "Hannah Baranes, GMRI 2024");
        assert!(region_by_name("Gulf of Mexico").is_none());
    }
}
