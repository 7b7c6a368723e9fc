// Sensor Events - Dataset structures
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Event table and CSV I/O.
//!
//! The CSV layout is one reading per line:
//!
//! ```text
//! timestamp,sensor_id,sensor_value
//! 2024-12-12 00:00:00,1,0
//! 2024-12-12 00:00:00,2,1
//! ```

use crate::error::DatasetError;
use crate::timeline;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Columns every event CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = ["timestamp", "sensor_id", "sensor_value"];

/// `YYYY-MM-DD HH:MM:SS` (de)serialization for reading timestamps.
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(s.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

/// A single binary sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reading {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub sensor_id: u32,
    /// 0 = inactive, 1 = active.
    pub sensor_value: u8,
}

impl Reading {
    /// Create a new reading.
    pub fn new(timestamp: NaiveDateTime, sensor_id: u32, sensor_value: u8) -> Self {
        Self {
            timestamp,
            sensor_id,
            sensor_value,
        }
    }

    /// Whether the sensor is active.
    pub fn is_active(&self) -> bool {
        self.sensor_value == 1
    }
}

/// Readings of all sensors, sorted by `(timestamp, sensor_id)`.
///
/// The row index is the position in [`EventTable::rows`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTable {
    rows: Vec<Reading>,
}

/// Activity summary for one sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityStats {
    pub samples: usize,
    pub active_samples: usize,
    pub active_fraction: f64,
    /// Number of maximal active runs.
    pub runs: usize,
}

impl EventTable {
    /// Build a table from readings in any order.
    pub fn from_readings(readings: impl IntoIterator<Item = Reading>) -> Self {
        let mut rows: Vec<Reading> = readings.into_iter().collect();
        rows.sort_by_key(|r| (r.timestamp, r.sensor_id));
        Self { rows }
    }

    /// Get all rows.
    pub fn rows(&self) -> &[Reading] {
        &self.rows
    }

    /// Get the row at a zero-based index.
    pub fn row(&self, index: usize) -> Option<&Reading> {
        self.rows.get(index)
    }

    /// Get number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check the `(timestamp, sensor_id)` ordering.
    pub fn is_sorted(&self) -> bool {
        self.rows
            .windows(2)
            .all(|w| (w[0].timestamp, w[0].sensor_id) <= (w[1].timestamp, w[1].sensor_id))
    }

    /// Distinct sensor IDs in order of first appearance.
    pub fn sensor_ids(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|r| seen.insert(r.sensor_id))
            .map(|r| r.sensor_id)
            .collect()
    }

    /// Readings of one sensor in timestamp order.
    pub fn sensor_readings(&self, sensor_id: u32) -> Vec<Reading> {
        self.rows
            .iter()
            .filter(|r| r.sensor_id == sensor_id)
            .copied()
            .collect()
    }

    /// Earliest and latest timestamps.
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.rows.first()?.timestamp, self.rows.last()?.timestamp))
    }

    /// Activity summary for a sensor.
    pub fn stats(&self, sensor_id: u32) -> Option<ActivityStats> {
        let values: Vec<u8> = self
            .rows
            .iter()
            .filter(|r| r.sensor_id == sensor_id)
            .map(|r| r.sensor_value)
            .collect();

        if values.is_empty() {
            return None;
        }

        let active_samples = values.iter().filter(|&&v| v == 1).count();
        Some(ActivityStats {
            samples: values.len(),
            active_samples,
            active_fraction: active_samples as f64 / values.len() as f64,
            runs: timeline::active_runs(&values).len(),
        })
    }

    /// Write CSV to any writer.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), DatasetError> {
        let mut writer = csv::Writer::from_writer(writer);
        if self.rows.is_empty() {
            writer.write_record(REQUIRED_COLUMNS)?;
        }
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Export to CSV file.
    pub fn to_csv(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let file = File::create(path)?;
        self.write_csv(file)
    }

    /// Read CSV from any reader.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::Reader::from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(DatasetError::Empty);
        }
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h.trim() == column) {
                return Err(DatasetError::MissingColumn(column.to_string()));
            }
        }

        let mut rows = Vec::new();
        for (i, result) in reader.deserialize::<Reading>().enumerate() {
            let reading = result?;
            if reading.sensor_value > 1 {
                return Err(DatasetError::InvalidValue {
                    line: i as u64 + 2,
                    value: reading.sensor_value,
                });
            }
            rows.push(reading);
        }

        Ok(Self::from_readings(rows))
    }

    /// Import from CSV file.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::read_csv(file)
    }
}
