//! Basic QC Example
//!
//! This example runs the four QARTOD tests over a short water-level record
//! with a spike, a stuck stretch and a gap, and prints the flags.
//!
//! ## What You'll Learn
//!
//! - Building a canonical series from provider readings
//! - Configuring a pipeline with the builder
//! - Reading per-test flags and the rollup by key
//! - Handling configuration errors
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_qc
//! ```

use chrono::{Duration, TimeZone, Utc};
use tideguard_core::{
    provider::{fetch_canonical, RangingSensor, SeriesRequest},
    Flag, QcError, QcPipeline, TestName,
};

fn main() -> Result<(), QcError> {
    println!("TideGuard Basic QC Example");
    println!("==========================\n");

    let t0 = Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap();

    // Distance to water in mm from a sensor 4.2 m above NAVD88
    let distances = [
        3800.0, 3750.0, 3690.0, 2900.0, 3580.0, 3530.0, f64::NAN, 3430.0, 3430.0, 3430.0, 3430.0,
        3430.0, 3430.0, 3430.0, 3430.0, 3430.0, 3430.0, 3430.0,
    ];
    let readings: Vec<_> = distances
        .iter()
        .enumerate()
        .map(|(i, mm)| (t0 + Duration::minutes(15 * i as i64), *mm))
        .collect();

    let sensor = RangingSensor::new("ranging-sensor", 4.2, move |_: &SeriesRequest| Ok(readings.clone()));
    let request = SeriesRequest::new("demo-station", t0, t0 + Duration::hours(6));
    let series = fetch_canonical(&sensor, &request)?;

    println!("Fetched {} observations ({} missing)\n", series.len(), series.missing_count());

    // Thresholds: meters, meters per second, seconds
    let pipeline = QcPipeline::builder()
        .gross_range((-2.0, 2.0), (-3.0, 3.0))
        .rate_of_change(0.0005)
        .spike(0.2, 0.4)
        .flat_line(0.01, 7200.0, 10800.0)
        .build()?;

    let report = pipeline.run_default(&series)?;

    println!("{:<22} {:>8}  {:<6} {:<6} {:<6} {:<6}  rollup", "time", "meters", "gross", "rate", "spike", "flat");
    for (index, observation) in series.iter().enumerate() {
        let flag_of = |test: TestName| {
            report
                .test(test)
                .and_then(|flags| flags.get(index))
                .map_or(String::from("-"), |flag| flag.code().to_string())
        };
        let rollup = report.rollup().get(index).unwrap_or(Flag::NotEvaluated);
        println!(
            "{:<22} {:>8.3}  {:<6} {:<6} {:<6} {:<6}  {}",
            observation.timestamp.format("%Y-%m-%d %H:%M"),
            observation.value,
            flag_of(TestName::GrossRange),
            flag_of(TestName::RateOfChange),
            flag_of(TestName::Spike),
            flag_of(TestName::FlatLine),
            rollup,
        );
    }

    println!("\nFlag counts by key:");
    for (key, counts) in report.counts() {
        println!(
            "  {:<42} pass={:<3} not_evaluated={:<3} suspect={:<3} fail={}",
            key, counts.pass, counts.not_evaluated, counts.suspect, counts.fail
        );
    }

    // Bad thresholds are rejected before anything runs
    println!("\nConfiguration errors:");
    match QcPipeline::builder().spike(0.5, 0.2).build() {
        Ok(_) => println!("  unexpected: pipeline accepted"),
        Err(e) => println!("  {} ({:?})", e, e.category()),
    }

    Ok(())
}
