// Sensor Events - Sensor timelines
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Fixed-step timestamp grids and per-sensor binary timelines.

use crate::dataset::Reading;
use crate::error::{GeneratorError, Result};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Number of grid instants from `start` to `end` inclusive.
///
/// The last instant is the largest `start + k * interval` not after `end`.
pub fn grid_len(start: NaiveDateTime, end: NaiveDateTime, interval_secs: u64) -> Result<usize> {
    if interval_secs == 0 {
        return Err(GeneratorError::InvalidSampleInterval(interval_secs));
    }
    if end < start {
        return Err(GeneratorError::EndBeforeStart { start, end });
    }
    let span_secs = (end - start).num_seconds() as u64;
    Ok((span_secs / interval_secs) as usize + 1)
}

/// Enumerate the grid instants from `start` to `end` inclusive.
pub fn timestamp_grid(
    start: NaiveDateTime,
    end: NaiveDateTime,
    interval_secs: u64,
) -> Result<Vec<NaiveDateTime>> {
    let len = grid_len(start, end, interval_secs)?;
    let step = i64::try_from(interval_secs)
        .map_err(|_| GeneratorError::InvalidSampleInterval(interval_secs))?;

    Ok((0..len as i64)
        .map(|i| start + Duration::seconds(i * step))
        .collect())
}

/// A contiguous run of samples forced active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpan {
    /// First marked sample index.
    pub start_step: usize,
    /// Number of marked samples (may be 0 for sub-interval events).
    pub steps: usize,
    /// Drawn duration in seconds.
    pub duration_secs: u64,
}

impl EventSpan {
    /// Create a new span.
    pub fn new(start_step: usize, steps: usize, duration_secs: u64) -> Self {
        Self {
            start_step,
            steps,
            duration_secs,
        }
    }

    /// One past the last marked sample.
    pub fn end_step(&self) -> usize {
        self.start_step + self.steps
    }

    /// Marked sample indices.
    pub fn range(&self) -> Range<usize> {
        self.start_step..self.end_step()
    }
}

/// Binary readings of one sensor across the whole grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorTimeline {
    pub sensor_id: u32,
    pub timestamps: Vec<NaiveDateTime>,
    pub values: Vec<u8>,
}

impl SensorTimeline {
    /// Create an all-inactive timeline over the given grid.
    pub fn new(sensor_id: u32, timestamps: Vec<NaiveDateTime>) -> Self {
        let values = vec![0; timestamps.len()];
        Self {
            sensor_id,
            timestamps,
            values,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Force the span to active. Overlaps with earlier spans stay active.
    pub fn mark(&mut self, span: &EventSpan) -> Result<()> {
        if span.end_step() > self.len() {
            return Err(GeneratorError::SpanOutOfRange {
                start: span.start_step,
                end: span.end_step(),
                len: self.len(),
            });
        }
        self.values[span.range()].fill(1);
        Ok(())
    }

    /// Number of active samples.
    pub fn active_samples(&self) -> usize {
        self.values.iter().filter(|&&v| v == 1).count()
    }

    /// Maximal runs of active samples.
    pub fn active_runs(&self) -> Vec<Range<usize>> {
        active_runs(&self.values)
    }

    /// Readings in timestamp order.
    pub fn readings(&self) -> impl Iterator<Item = Reading> + '_ {
        self.timestamps
            .iter()
            .zip(&self.values)
            .map(move |(&timestamp, &sensor_value)| Reading {
                timestamp,
                sensor_id: self.sensor_id,
                sensor_value,
            })
    }
}

/// Maximal runs of `1` in a binary series.
pub fn active_runs(values: &[u8]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut run_start = None;

    for (i, &v) in values.iter().enumerate() {
        match (v == 1, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = run_start {
        runs.push(s..values.len());
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 12)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_grid_inclusive_end() {
        let grid = timestamp_grid(at(0, 0, 0), at(0, 1, 0), 5).unwrap();
        assert_eq!(grid.len(), 13);
        assert_eq!(grid[0], at(0, 0, 0));
        assert_eq!(grid[1], at(0, 0, 5));
        assert_eq!(grid[12], at(0, 1, 0));
    }

    #[test]
    fn test_grid_unaligned_end() {
        // 00:00:00 .. 00:00:12 at 5s -> 0, 5, 10
        let grid = timestamp_grid(at(0, 0, 0), at(0, 0, 12), 5).unwrap();
        assert_eq!(grid, vec![at(0, 0, 0), at(0, 0, 5), at(0, 0, 10)]);
    }

    #[test]
    fn test_grid_single_instant() {
        let grid = timestamp_grid(at(6, 0, 0), at(6, 0, 0), 5).unwrap();
        assert_eq!(grid, vec![at(6, 0, 0)]);
    }

    #[test]
    fn test_grid_rejects_invalid() {
        assert!(matches!(
            timestamp_grid(at(0, 0, 0), at(0, 1, 0), 0),
            Err(GeneratorError::InvalidSampleInterval(0))
        ));
        assert!(matches!(
            timestamp_grid(at(0, 1, 0), at(0, 0, 0), 5),
            Err(GeneratorError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn test_mark_overlapping_spans() {
        let grid = timestamp_grid(at(0, 0, 0), at(0, 0, 45), 5).unwrap();
        let mut timeline = SensorTimeline::new(1, grid);
        assert_eq!(timeline.len(), 10);

        timeline.mark(&EventSpan::new(2, 3, 15)).unwrap();
        timeline.mark(&EventSpan::new(3, 4, 20)).unwrap();

        assert_eq!(timeline.values, vec![0, 0, 1, 1, 1, 1, 1, 0, 0, 0]);
        assert_eq!(timeline.active_samples(), 5);
        assert_eq!(timeline.active_runs(), vec![2..7]);
    }

    #[test]
    fn test_mark_zero_steps_is_noop() {
        let grid = timestamp_grid(at(0, 0, 0), at(0, 0, 20), 5).unwrap();
        let mut timeline = SensorTimeline::new(1, grid);
        timeline.mark(&EventSpan::new(5, 0, 3)).unwrap();
        assert_eq!(timeline.active_samples(), 0);
    }

    #[test]
    fn test_mark_out_of_range() {
        let grid = timestamp_grid(at(0, 0, 0), at(0, 0, 20), 5).unwrap();
        let mut timeline = SensorTimeline::new(1, grid);
        let result = timeline.mark(&EventSpan::new(3, 3, 15));
        assert!(matches!(
            result,
            Err(GeneratorError::SpanOutOfRange { start: 3, end: 6, len: 5 })
        ));
        assert_eq!(timeline.active_samples(), 0);
    }

    #[test]
    fn test_mark_span_ending_at_grid_end() {
        let grid = timestamp_grid(at(0, 0, 0), at(0, 0, 20), 5).unwrap();
        let mut timeline = SensorTimeline::new(1, grid);
        timeline.mark(&EventSpan::new(3, 2, 10)).unwrap();
        assert_eq!(timeline.values, vec![0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_active_runs() {
        assert!(active_runs(&[]).is_empty());
        assert!(active_runs(&[0, 0]).is_empty());
        assert_eq!(active_runs(&[1, 1, 0, 1, 0, 0, 1]), vec![0..2, 3..4, 6..7]);
    }

    #[test]
    fn test_readings() {
        let grid = timestamp_grid(at(0, 0, 0), at(0, 0, 5), 5).unwrap();
        let mut timeline = SensorTimeline::new(4, grid);
        timeline.mark(&EventSpan::new(1, 1, 5)).unwrap();

        let readings: Vec<Reading> = timeline.readings().collect();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].sensor_id, 4);
        assert_eq!(readings[0].sensor_value, 0);
        assert_eq!(readings[1].timestamp, at(0, 0, 5));
        assert_eq!(readings[1].sensor_value, 1);
    }
}
