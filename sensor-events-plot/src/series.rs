// Sensor Events Plot - Step-chart rendering
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Per-sensor step series.

use chrono::NaiveDateTime;
use sensor_events::EventTable;

/// Readings of one sensor, ready to be drawn as a step line.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSeries {
    pub sensor_id: u32,
    /// `(timestamp, value)` in timestamp order.
    pub points: Vec<(NaiveDateTime, u8)>,
}

impl StepSeries {
    /// One series per distinct sensor, in order of first appearance.
    pub fn from_table(table: &EventTable) -> Vec<StepSeries> {
        table
            .sensor_ids()
            .into_iter()
            .map(|sensor_id| {
                let points = table
                    .sensor_readings(sensor_id)
                    .iter()
                    .map(|r| (r.timestamp, r.sensor_value))
                    .collect();
                StepSeries { sensor_id, points }
            })
            .collect()
    }

    /// Legend label.
    pub fn label(&self) -> String {
        format!("Sensor {}", self.sensor_id)
    }

    /// Vertices of a "post" step path with x in seconds since `origin`.
    ///
    /// Each value holds from its own timestamp until the next one.
    pub fn step_points(&self, origin: NaiveDateTime) -> Vec<(f64, f64)> {
        let x = |t: NaiveDateTime| (t - origin).num_seconds() as f64;

        let mut out = Vec::with_capacity(self.points.len() * 2);
        let mut prev: Option<u8> = None;
        for &(t, v) in &self.points {
            if let Some(p) = prev {
                out.push((x(t), f64::from(p)));
            }
            out.push((x(t), f64::from(v)));
            prev = Some(v);
        }
        out
    }
}
