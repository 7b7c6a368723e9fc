// Sensor Events - Binary sensor-event dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Sensor Events
//!
//! Synthetic binary sensor-event datasets.
//!
//! Every simulated sensor reports a 0/1 state on a fixed-step time grid.
//! A random number of "events" per sensor force contiguous stretches of the
//! grid to 1. The merged table is sorted by `(timestamp, sensor_id)` and
//! exported as CSV with header `timestamp,sensor_id,sensor_value`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sensor_events::{generate_to_file, GeneratorConfig, GenerationManifest};
//!
//! // 24 hours, 3 sensors, 5 second samples
//! let config = GeneratorConfig::new()
//!     .with_sensors(3)
//!     .with_seed(42)
//!     .with_output_file("sensor_data_continuous.csv");
//!
//! let generation = generate_to_file(&config).unwrap();
//! GenerationManifest::from_generation(&generation, &config.output_file)
//!     .to_json_file("sensor_data_continuous.manifest.json")
//!     .unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Generator configuration and validation
//! - [`timeline`]: Timestamp grids and per-sensor timelines
//! - [`generator`]: Random event placement
//! - [`dataset`]: Event table and CSV I/O
//! - [`manifest`]: JSON description of a generated file

pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod timeline;

// Re-exports for convenience
pub use config::{GeneratorConfig, OversizePolicy, DEFAULT_OUTPUT_FILE};
pub use dataset::{ActivityStats, EventTable, Reading};
pub use error::{DatasetError, GeneratorError, Result};
pub use generator::{
    generate, generate_sensor_timeline, generate_to_file, Generation, GenerationReport,
    SensorReport,
};
pub use manifest::{EventManifest, GenerationManifest, SensorEventManifest};
pub use timeline::{timestamp_grid, EventSpan, SensorTimeline};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
