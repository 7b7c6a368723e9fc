// Sensor Events - Error types
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Error types for dataset generation and I/O.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Main error type for generator operations
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Sample interval must be at least one second
    #[error("Invalid sample interval: {0}s (must be > 0)")]
    InvalidSampleInterval(u64),

    /// Time range is reversed
    #[error("End {end} is before start {start}")]
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// No sensors requested
    #[error("Sensor count must be at least 1")]
    NoSensors,

    /// Min/max bounds are reversed
    #[error("Invalid {name} bounds: min {min} > max {max}")]
    InvalidBounds { name: &'static str, min: u64, max: u64 },

    /// An event can be longer than the whole timeline
    #[error("Event of {steps} steps does not fit a timeline of {grid_len} samples")]
    EventLongerThanTimeline { steps: usize, grid_len: usize },

    /// Span marked outside of the grid
    #[error("Span {start}..{end} is outside the timeline (len {len})")]
    SpanOutOfRange { start: usize, end: usize, len: usize },

    /// Dataset I/O error
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Config or manifest file error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config or manifest JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Dataset (CSV) error types.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid sensor value {value} at line {line} (expected 0 or 1)")]
    InvalidValue { line: u64, value: u8 },

    #[error("Empty dataset")]
    Empty,
}
