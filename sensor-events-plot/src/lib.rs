// Sensor Events Plot - Step-chart rendering
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Sensor Events Plot
//!
//! Renders binary sensor-event tables as step charts: one line per sensor
//! over a shared time axis, y padded to `[-0.1, 1.1]`, x ticked every two
//! hours and labelled `HH:00`.
//!
//! ```rust,no_run
//! use sensor_events::EventTable;
//! use sensor_events_plot::{render_svg, PlotConfig};
//!
//! let table = EventTable::from_csv("sensor_data_continuous.csv").unwrap();
//! render_svg(&table, &PlotConfig::default(), "sensor_states.svg").unwrap();
//! ```

pub mod axis;
pub mod config;
pub mod error;
pub mod render;
pub mod series;

pub use axis::{hour_ticks, tick_label, HourAxis};
pub use config::PlotConfig;
pub use error::{PlotError, Result};
pub use render::{render_csv_to_svg, render_svg, render_svg_string};
pub use series::StepSeries;
