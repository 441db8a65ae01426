//! QARTOD Configuration Documents and Regional Presets
//!
//! ## Overview
//!
//! This crate describes QC runs to the outside world. A
//! [`QcConfigDocument`] records the station a configuration was built for and
//! exactly the thresholds each stream ran with, in the nested layout QARTOD
//! tooling reads:
//!
//! ```json
//! {
//!   "station": { "station_id": "8418150", "latitude": 43.66, "longitude": -70.25 },
//!   "qc": {
//!     "qartod": {
//!       "contexts": [
//!         {
//!           "streams": {
//!             "navd88_meters": {
//!               "qartod": {
//!                 "gross_range_test": { "suspect_span": [-2.0, 3.5], "fail_span": [-2.0, 3.5] },
//!                 "rate_of_change_test": { "threshold": 0.000635 },
//!                 "spike_test": { "suspect_threshold": 0.2286, "fail_threshold": 0.4572 },
//!                 "flat_line_test": { "tolerance": 0.03048, "suspect_threshold": 7200, "fail_threshold": 10800 }
//!               }
//!             }
//!           }
//!         }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! Documents round-trip: a [`PipelineConfig`](tideguard_core::PipelineConfig)
//! written into a document comes back out unchanged and validated.
//!
//! ## Regional Defaults
//!
//! Sensible thresholds depend on the tidal regime. A [`Region`] turns a
//! station's datum offsets into a complete starting configuration that an
//! operator can then adjust.
//!
//! ## Usage Example
//!
//! ```rust
//! use tideguard_schemas::{GulfOfMaine, QcConfigDocument, Region, StationMetadata};
//!
//! let station = StationMetadata::new("8418150", 43.66, -70.25).with_datums(-1.55, 1.45);
//! let config = GulfOfMaine.pipeline_config(-1.55, 1.45)?;
//!
//! let document = QcConfigDocument::from_pipeline(station, "navd88_meters", &config);
//! let json = document.to_json_pretty()?;
//!
//! let restored = QcConfigDocument::from_json(&json)?;
//! assert_eq!(restored.pipeline_config("navd88_meters")?, config);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use tideguard_core::QcError;

pub mod document;
pub mod regions;

pub use document::{
    FlatLineEntry, GrossRangeEntry, QartodContext, QartodTests, QcConfigDocument, RateOfChangeEntry,
    SpikeEntry, StationMetadata, StreamConfig,
};
pub use regions::{region_by_name, regions, GulfOfMaine, Region};

/// Result type for document operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Document-related errors
#[derive(Debug, thiserror_no_std::Error)]
pub enum SchemaError {
    #[error("Failed to serialize QC document: {0}")]
    Serialization(String),

    #[error("Failed to parse QC document: {0}")]
    Parse(String),

    #[error("Stream not found: {0}")]
    MissingStream(String),

    #[error("Invalid thresholds: {0}")]
    Invalid(#[from] QcError),
}
