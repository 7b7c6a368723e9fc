// Sensor Events - Generation manifest
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Manifest describing a generated dataset file.
//!
//! Written next to the CSV so the exact events and seed behind a file can be
//! recovered without regenerating it.

use crate::dataset::timestamp_format;
use crate::generator::Generation;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Manifest for one generated CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationManifest {
    /// CSV file the manifest describes.
    pub output_file: String,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Random seed used.
    pub seed: u64,
    #[serde(with = "timestamp_format")]
    pub start: NaiveDateTime,
    #[serde(with = "timestamp_format")]
    pub end: NaiveDateTime,
    pub sample_interval_secs: u64,
    /// Samples per sensor.
    pub grid_len: usize,
    pub sensor_count: usize,
    pub row_count: usize,
    pub sensors: Vec<SensorEventManifest>,
}

/// Per-sensor section of the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorEventManifest {
    pub sensor_id: u32,
    pub events: Vec<EventManifest>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_durations_secs: Vec<u64>,
    pub active_samples: usize,
    pub active_fraction: f64,
}

/// One placed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventManifest {
    pub start_step: usize,
    pub steps: usize,
    pub duration_secs: u64,
    /// Timestamp of the first marked sample.
    #[serde(with = "timestamp_format")]
    pub starts_at: NaiveDateTime,
}

impl GenerationManifest {
    /// Build a manifest from a generation run.
    pub fn from_generation(generation: &Generation, output_file: impl AsRef<Path>) -> Self {
        let report = &generation.report;
        let step_secs = report.sample_interval_secs as i64;

        let sensors = report
            .sensors
            .iter()
            .map(|sensor| {
                let stats = generation.table.stats(sensor.sensor_id);
                SensorEventManifest {
                    sensor_id: sensor.sensor_id,
                    events: sensor
                        .events
                        .iter()
                        .map(|e| EventManifest {
                            start_step: e.start_step,
                            steps: e.steps,
                            duration_secs: e.duration_secs,
                            starts_at: report.start
                                + Duration::seconds(step_secs * e.start_step as i64),
                        })
                        .collect(),
                    skipped_durations_secs: sensor.skipped_durations_secs.clone(),
                    active_samples: stats.as_ref().map_or(0, |s| s.active_samples),
                    active_fraction: stats.as_ref().map_or(0.0, |s| s.active_fraction),
                }
            })
            .collect();

        Self {
            output_file: output_file.as_ref().display().to_string(),
            generated_at: Utc::now(),
            seed: report.seed,
            start: report.start,
            end: report.end,
            sample_interval_secs: report.sample_interval_secs,
            grid_len: report.grid_len,
            sensor_count: report.sensors.len(),
            row_count: generation.table.len(),
            sensors,
        }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to JSON file.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    /// Load from JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
