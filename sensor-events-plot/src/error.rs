// Sensor Events Plot - Step-chart rendering
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Error types for plot rendering

use sensor_events::DatasetError;
use thiserror::Error;

/// Main error type for plot operations
#[derive(Error, Debug)]
pub enum PlotError {
    /// Nothing to draw
    #[error("Cannot plot an empty table")]
    EmptyTable,

    /// Input CSV could not be loaded
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Backend drawing failure
    #[error("Render error: {0}")]
    Render(String),
}

/// Result type alias for plot operations
pub type Result<T> = std::result::Result<T, PlotError>;

pub(crate) fn render_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}
