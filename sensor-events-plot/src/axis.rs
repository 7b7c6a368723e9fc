// Sensor Events Plot - Step-chart rendering
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Time-axis ticks and labels.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use std::ops::Range;

/// Tick label format (hour of day).
pub const TICK_FORMAT: &str = "%H:00";

/// Whole-hour instants in `[start, end]` whose hour is a multiple of
/// `interval_hours`.
pub fn hour_ticks(start: NaiveDateTime, end: NaiveDateTime, interval_hours: u32) -> Vec<NaiveDateTime> {
    let interval = interval_hours.max(1);
    let Some(hour) = NaiveTime::from_hms_opt(start.hour(), 0, 0) else {
        return Vec::new();
    };

    let mut t = NaiveDateTime::new(start.date(), hour);
    if t < start {
        t += Duration::hours(1);
    }

    let mut ticks = Vec::new();
    while t <= end {
        if t.hour() % interval == 0 {
            ticks.push(t);
        }
        t += Duration::hours(1);
    }
    ticks
}

/// Label for a tick instant.
pub fn tick_label(t: NaiveDateTime) -> String {
    t.format(TICK_FORMAT).to_string()
}

/// Label for an x offset in seconds from `origin`.
pub fn offset_label(origin: NaiveDateTime, offset_secs: f64) -> String {
    tick_label(origin + Duration::seconds(offset_secs.round() as i64))
}

/// Seconds from `origin` for each tick.
pub fn tick_offsets(origin: NaiveDateTime, ticks: &[NaiveDateTime]) -> Vec<f64> {
    ticks
        .iter()
        .map(|t| (*t - origin).num_seconds() as f64)
        .collect()
}

/// X axis in seconds since the first timestamp, with bold key points
/// pinned to the hour ticks and no light lines.
#[derive(Debug, Clone)]
pub struct HourAxis {
    origin: NaiveDateTime,
    range: (f64, f64),
    ticks: Vec<f64>,
}

impl HourAxis {
    /// Axis over `[start, end]` ticked every `interval_hours`.
    ///
    /// A zero-length range is widened to one second.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, interval_hours: u32) -> Self {
        let span = ((end - start).num_seconds() as f64).max(1.0);
        let ticks = hour_ticks(start, end, interval_hours);
        Self {
            origin: start,
            range: (0.0, span),
            ticks: tick_offsets(start, &ticks),
        }
    }

    pub fn origin(&self) -> NaiveDateTime {
        self.origin
    }

    /// Tick positions in seconds since the origin.
    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    /// Label for a position on this axis.
    pub fn label(&self, offset_secs: f64) -> String {
        offset_label(self.origin, offset_secs)
    }
}

impl Ranged for HourAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        RangedCoordf64::from(self.range.0..self.range.1).map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            return Vec::new();
        }
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.range.0..self.range.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use plotters::coord::ranged1d::{BoldPoints, LightPoints};

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_full_day_ticks() {
        let ticks = hour_ticks(at(12, 0, 0), at(13, 0, 0), 2);
        assert_eq!(ticks.len(), 13);
        assert_eq!(ticks[0], at(12, 0, 0));
        assert_eq!(ticks[1], at(12, 2, 0));
        assert_eq!(ticks[12], at(13, 0, 0));

        let labels: Vec<String> = ticks.iter().map(|t| tick_label(*t)).collect();
        assert_eq!(labels[0], "00:00");
        assert_eq!(labels[5], "10:00");
        assert_eq!(labels[11], "22:00");
    }

    #[test]
    fn test_ticks_align_to_even_hours() {
        // 01:30 -> 06:10: first even whole hour is 02:00
        let ticks = hour_ticks(at(12, 1, 30), at(12, 6, 10), 2);
        assert_eq!(ticks, vec![at(12, 2, 0), at(12, 4, 0), at(12, 6, 0)]);
    }

    #[test]
    fn test_ticks_short_range() {
        assert!(hour_ticks(at(12, 1, 0), at(12, 1, 30), 2).is_empty());
        assert_eq!(hour_ticks(at(12, 0, 0), at(12, 0, 1), 2), vec![at(12, 0, 0)]);
    }

    #[test]
    fn test_zero_interval_means_hourly() {
        let ticks = hour_ticks(at(12, 0, 0), at(12, 3, 0), 0);
        assert_eq!(ticks.len(), 4);
    }

    #[test]
    fn test_offsets_and_labels() {
        let origin = at(12, 0, 0);
        let offsets = tick_offsets(origin, &[at(12, 0, 0), at(12, 2, 0)]);
        assert_eq!(offsets, vec![0.0, 7200.0]);
        assert_eq!(offset_label(origin, 7200.0), "02:00");
        assert_eq!(offset_label(origin, 14_400.4), "04:00");
    }

    #[test]
    fn test_hour_axis_key_points() {
        let axis = HourAxis::new(at(12, 1, 30), at(12, 6, 10), 2);

        assert_eq!(axis.range(), 0.0..16_800.0);
        assert_eq!(axis.key_points(BoldPoints(10)), vec![1800.0, 9000.0, 16_200.0]);
        assert!(axis.key_points(LightPoints::new(10, 100)).is_empty());

        let labels: Vec<String> = axis.ticks().iter().map(|x| axis.label(*x)).collect();
        assert_eq!(labels, vec!["02:00", "04:00", "06:00"]);
    }

    #[test]
    fn test_hour_axis_maps_linearly() {
        let axis = HourAxis::new(at(12, 0, 0), at(13, 0, 0), 2);
        assert_eq!(axis.map(&0.0, (0, 1000)), 0);
        assert_eq!(axis.map(&43_200.0, (0, 1000)), 500);
        assert_eq!(axis.map(&86_400.0, (0, 1000)), 1000);
    }

    #[test]
    fn test_hour_axis_single_instant() {
        let axis = HourAxis::new(at(12, 0, 0), at(12, 0, 0), 2);
        assert_eq!(axis.range(), 0.0..1.0);
        assert_eq!(axis.ticks(), &[0.0]);
    }
}
