//! QC Pipeline Runner
//!
//! ## Overview
//!
//! A [`QcPipeline`] owns a validated [`PipelineConfig`] and applies every
//! enabled test to a canonical series, then rolls the per-test flags up into
//! one flag per observation:
//!
//! ```text
//!                 ┌→ gross_range_test    ─┐
//! CanonicalSeries ├→ rate_of_change_test ─┼→ rollup (worst wins) → QcReport
//!                 ├→ spike_test          ─┤
//!                 └→ flat_line_test      ─┘
//! ```
//!
//! Thresholds are checked once, when the pipeline is built. A pipeline that
//! exists can run any series without a configuration error; only a series
//! that breaks alignment can still fail a run.
//!
//! ## Module Organization
//!
//! - Runner and batch execution (this file)
//! - `builder` - Fluent construction from individual tests
//! - `report` - Keyed results and per-flag summaries
//!
//! ## Usage Example
//!
//! ```rust
//! use tideguard_core::{CanonicalSeries, Flag, QcPipeline};
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let pipeline = QcPipeline::builder()
//!     .gross_range((-1.0, 1.0), (-2.0, 2.0))
//!     .spike(0.2, 0.4)
//!     .build()?;
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap();
//! let series = CanonicalSeries::from_pairs([
//!     (t0, 0.5),
//!     (t0 + Duration::minutes(6), 1.5),
//!     (t0 + Duration::minutes(12), 0.5),
//! ])?;
//!
//! let report = pipeline.run("navd88_meters", &series)?;
//! assert_eq!(report.rollup().get(1), Some(Flag::Fail));
//! assert!(report.get("navd88_meters_qartod_spike_test").is_some());
//! # Ok::<(), tideguard_core::QcError>(())
//! ```

mod builder;
mod report;

pub use builder::QcPipelineBuilder;
pub use report::QcReport;

use std::{panic, thread};

use crate::{
    aggregate,
    config::{PipelineConfig, TestName},
    constants::naming::DEFAULT_VARIABLE,
    errors::{QcError, QcResult},
    flags::FlagSequence,
    series::CanonicalSeries,
    traits::QcTest,
};

/// Validated set of tests ready to run
#[derive(Debug, Clone, PartialEq)]
pub struct QcPipeline {
    config: PipelineConfig,
}

/// One series to check in a batch: variable name and its data
pub type BatchItem<'a> = (&'a str, &'a CanonicalSeries);

impl QcPipeline {
    /// Validate `config` and wrap it
    pub fn new(config: PipelineConfig) -> QcResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn builder() -> QcPipelineBuilder {
        QcPipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every enabled test on `series` and roll the results up
    pub fn run(&self, variable: &str, series: &CanonicalSeries) -> QcResult<QcReport> {
        if series.is_degenerate() {
            qc_warn!(
                "{}: series has {} observation(s), tests will not evaluate",
                variable,
                series.len()
            );
        }

        let mut results: Vec<(TestName, FlagSequence)> = Vec::with_capacity(self.config.len());
        for test in self.config.iter() {
            let name = test.name();
            qc_debug!("{}: running {} on {} observations", variable, name, series.len());

            let flags = test.evaluate(series);
            if flags.len() != series.len() {
                return Err(QcError::LengthMismatch {
                    expected: series.len(),
                    actual: flags.len(),
                });
            }
            if !flags.is_empty() && flags.all_not_evaluated() {
                qc_warn!("{}: {} could not evaluate any observation", variable, name);
            }
            results.push((name, flags));
        }

        let rollup = aggregate::rollup(series.len(), results.iter().map(|(_, flags)| flags))?;
        Ok(QcReport::new(variable, results, rollup))
    }

    /// [`run`](Self::run) under the default `navd88_meters` variable
    pub fn run_default(&self, series: &CanonicalSeries) -> QcResult<QcReport> {
        self.run(DEFAULT_VARIABLE, series)
    }

    /// Run independent series in parallel on scoped worker threads
    ///
    /// Items are split into contiguous chunks, one per worker, with no more
    /// workers than the machine's available parallelism. Results come back
    /// in input order. One series failing does not stop the others; a
    /// panicking worker is re-raised on the caller.
    pub fn run_batch(&self, items: &[BatchItem<'_>]) -> Vec<QcResult<QcReport>> {
        if items.is_empty() {
            return Vec::new();
        }

        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(items.len());
        let chunk_size = items.len().div_ceil(workers);
        qc_debug!("running {} series on {} worker(s)", items.len(), workers);

        thread::scope(|scope| {
            let handles: Vec<_> = items
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|&(variable, series)| self.run(variable, series))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
                .collect()
        })
    }
}

impl TryFrom<PipelineConfig> for QcPipeline {
    type Error = QcError;

    fn try_from(config: PipelineConfig) -> QcResult<Self> {
        Self::new(config)
    }
}
