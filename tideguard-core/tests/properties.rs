//! Property tests: invariants every QC test and the rollup must keep for
//! arbitrary series and thresholds.

mod common;

use proptest::prelude::*;
use tideguard_core::{
    aggregate::rollup,
    qartod::{FlatLineTest, GrossRangeTest, RateOfChangeTest, SpikeTest},
    time::{seconds, Timestamp},
    CanonicalSeries, Flag, FlagSequence, LengthUnit, NativeSeries, QcTest, Representation,
};

use common::{t0, tide_config};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn arb_flag() -> impl Strategy<Value = Flag> {
    prop_oneof![
        Just(Flag::Pass),
        Just(Flag::NotEvaluated),
        Just(Flag::Suspect),
        Just(Flag::Fail),
    ]
}

/// Reading that is missing about one time in eight
fn arb_reading() -> impl Strategy<Value = f64> {
    prop_oneof![
        7 => -5.0f64..5.0,
        1 => Just(f64::NAN),
    ]
}

/// Irregularly sampled series: gaps of 1 s to 1 h
fn arb_series(max_len: usize) -> impl Strategy<Value = CanonicalSeries> {
    prop::collection::vec((1i64..3600, arb_reading()), 0..max_len).prop_map(|steps| {
        let mut at = 0;
        let readings = steps.into_iter().map(|(gap, value)| {
            at += gap;
            (t0() + seconds(at), value)
        });
        CanonicalSeries::from_pairs(readings).unwrap()
    })
}

fn regular(interval_secs: i64, values: &[f64]) -> CanonicalSeries {
    CanonicalSeries::from_pairs(
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (t0() + seconds(interval_secs * i as i64), *v)),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Every test returns exactly one flag per observation.
    #[test]
    fn flags_align_with_series(series in arb_series(64)) {
        for test in tide_config().iter() {
            prop_assert_eq!(test.evaluate(&series).len(), series.len());
        }
    }

    /// Readings strictly inside the suspect span pass; beyond the fail bounds fail.
    #[test]
    fn gross_range_bands(
        suspect_half in 0.5f64..2.0,
        margin in 0.1f64..2.0,
        inside in -0.99f64..0.99,
        beyond in 0.01f64..10.0,
        below in any::<bool>(),
    ) {
        let fail_half = suspect_half + margin;
        let test = GrossRangeTest::from_spans((-suspect_half, suspect_half), (-fail_half, fail_half));
        prop_assert!(test.validate().is_ok());

        prop_assert_eq!(test.classify(inside * suspect_half), Flag::Pass);
        let outside = if below { -fail_half - beyond } else { fail_half + beyond };
        prop_assert_eq!(test.classify(outside), Flag::Fail);
    }

    /// The rollup is never better than any input and passes only if all pass.
    #[test]
    fn rollup_is_worst_of_inputs(
        sequences in (0usize..32).prop_flat_map(|len| {
            prop::collection::vec(prop::collection::vec(arb_flag(), len), 1..5)
        }),
    ) {
        let len = sequences[0].len();
        let sequences: Vec<FlagSequence> = sequences.into_iter().map(FlagSequence::from).collect();
        let rolled = rollup(len, &sequences).unwrap();

        prop_assert_eq!(rolled.len(), len);
        for (index, flag) in rolled.iter().enumerate() {
            let inputs: Vec<Flag> = sequences.iter().filter_map(|s| s.get(index)).collect();
            prop_assert!(inputs.iter().all(|input| flag >= *input));
            prop_assert_eq!(flag == Flag::Pass, inputs.iter().all(|input| *input == Flag::Pass));
            prop_assert!(inputs.contains(&flag));
        }
    }

    /// With no tests at all, every observation is NotEvaluated.
    #[test]
    fn rollup_of_nothing_is_not_evaluated(len in 0usize..64) {
        let rolled = rollup(len, std::iter::empty()).unwrap();
        prop_assert_eq!(rolled, FlagSequence::filled(Flag::NotEvaluated, len));
    }

    /// A constant series escalates exactly when the flat duration crosses each threshold.
    #[test]
    fn flat_line_on_constant_series(
        interval in 60i64..1800,
        len in 2usize..80,
        level in -3.0f64..3.0,
    ) {
        let test = FlatLineTest::new(0.01, 7200.0, 10800.0);
        let flags = test.evaluate(&regular(interval, &vec![level; len]));

        for (index, flag) in flags.iter().enumerate() {
            let duration = interval * index as i64;
            let expected = if duration >= 10800 {
                Flag::Fail
            } else if duration >= 7200 {
                Flag::Suspect
            } else {
                Flag::Pass
            };
            prop_assert_eq!(flag, expected);
        }
    }

    /// A series that always moves by more than the tolerance never flat-lines.
    #[test]
    fn flat_line_on_rising_series(
        steps in prop::collection::vec(0.02f64..0.5, 1..80),
        interval in 60i64..1800,
    ) {
        let values: Vec<f64> = steps
            .iter()
            .scan(0.0, |level, step| {
                *level += step;
                Some(*level)
            })
            .collect();
        let flags = FlatLineTest::new(0.01, 600.0, 900.0).evaluate(&regular(interval, &values));
        prop_assert!(flags.iter().all(|flag| flag == Flag::Pass));
    }

    /// A change of exactly `rate × 60` over one minute is Suspect; half of it passes.
    #[test]
    fn rate_of_change_at_threshold(
        rate_units in 1u32..4096,
        start_units in -4096i32..4096,
        rising in any::<bool>(),
    ) {
        // Dyadic values keep the arithmetic exact
        let rate = f64::from(rate_units) / 1024.0;
        let start = f64::from(start_units) / 64.0;
        let limit = if rising { rate * 60.0 } else { -rate * 60.0 };

        let test = RateOfChangeTest::new(rate);
        let at_limit = regular(60, &[start, start + limit]);
        let below = regular(60, &[start, start + limit / 2.0]);

        prop_assert_eq!(test.evaluate(&at_limit).get(1), Some(Flag::Suspect));
        prop_assert_eq!(test.evaluate(&below).get(1), Some(Flag::Pass));
    }

    /// Spike never flags the ends of the series.
    #[test]
    fn spike_ends_are_not_evaluated(series in arb_series(64)) {
        let flags = SpikeTest::new(0.2, 0.4).evaluate(&series);
        if let Some(first) = flags.get(0) {
            prop_assert_eq!(first, Flag::NotEvaluated);
        }
        if let Some(last) = flags.len().checked_sub(1).and_then(|i| flags.get(i)) {
            prop_assert_eq!(last, Flag::NotEvaluated);
        }
    }

    /// Normalizing meters with a factor of one leaves every reading untouched.
    #[test]
    fn unit_factor_of_one_is_identity(values in prop::collection::vec(arb_reading(), 0..64)) {
        let readings: Vec<(Timestamp, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, v)| (t0() + seconds(60 * i as i64), *v))
            .collect();

        let series = NativeSeries::new(Representation::direct(LengthUnit::Meters), readings)
            .normalize()
            .unwrap();

        prop_assert_eq!(series.len(), values.len());
        for (observation, raw) in series.iter().zip(&values) {
            match observation.reading() {
                Some(value) => {
                    prop_assert_eq!(value, *raw);
                }
                None => {
                    prop_assert!(!raw.is_finite());
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Reference Cases
// ---------------------------------------------------------------------------

#[test]
fn spike_reference_case() {
    let series = regular(360, &[1.0, 1.5, 1.0]);
    let flags = SpikeTest::new(0.2, 0.4).run(&series).unwrap();
    assert_eq!(flags.as_slice(), &[Flag::NotEvaluated, Flag::Fail, Flag::NotEvaluated]);
}

#[test]
fn gross_range_reference_case() {
    let test = GrossRangeTest::from_spans((-1.0, 1.0), (-2.0, 2.0));
    let flags = test.run(&regular(360, &[1.5, 2.5, 0.5])).unwrap();
    assert_eq!(flags.as_slice(), &[Flag::Suspect, Flag::Fail, Flag::Pass]);
}

#[test]
fn degenerate_series_never_error() {
    let pipeline = tideguard_core::QcPipeline::new(tide_config()).unwrap();
    for series in [CanonicalSeries::empty(), regular(60, &[1.0])] {
        let report = pipeline.run_default(&series).unwrap();
        assert!(report.rollup().iter().all(|flag| flag == Flag::NotEvaluated));
        assert_eq!(report.len(), series.len());
    }
}
