// Sensor Events - Core generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Core dataset generation logic.
//!
//! Each sensor gets the same timestamp grid, starts fully inactive, and then
//! receives a random number of events. An event draws a duration, converts it
//! to whole sample steps, draws a start index so the span fits the grid, and
//! forces that span active. All sensors draw from one seeded RNG in sensor-id
//! order, so a fixed seed reproduces the whole dataset.

use crate::config::{GeneratorConfig, OversizePolicy};
use crate::dataset::EventTable;
use crate::error::{GeneratorError, Result};
use crate::timeline::{timestamp_grid, EventSpan, SensorTimeline};
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Events placed on one sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReport {
    pub sensor_id: u32,
    /// Events in placement order.
    pub events: Vec<EventSpan>,
    /// Durations (seconds) of events dropped under [`OversizePolicy::Skip`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_durations_secs: Vec<u64>,
}

/// What a generation run did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Seed actually used (drawn from entropy when the config has none).
    pub seed: u64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub sample_interval_secs: u64,
    pub grid_len: usize,
    pub sensors: Vec<SensorReport>,
}

impl GenerationReport {
    /// Total events placed across sensors.
    pub fn event_count(&self) -> usize {
        self.sensors.iter().map(|s| s.events.len()).sum()
    }

    /// Total events skipped across sensors.
    pub fn skipped_count(&self) -> usize {
        self.sensors.iter().map(|s| s.skipped_durations_secs.len()).sum()
    }
}

/// Output of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub table: EventTable,
    pub report: GenerationReport,
}

/// Generate one sensor's timeline over a prebuilt grid.
pub fn generate_sensor_timeline<R: Rng>(
    sensor_id: u32,
    grid: &[NaiveDateTime],
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<(SensorTimeline, SensorReport)> {
    let mut timeline = SensorTimeline::new(sensor_id, grid.to_vec());
    let grid_len = timeline.len();

    let event_count = rng.gen_range(config.min_events..=config.max_events);
    let mut report = SensorReport {
        sensor_id,
        events: Vec::with_capacity(event_count as usize),
        skipped_durations_secs: Vec::new(),
    };

    for _ in 0..event_count {
        let duration_secs =
            rng.gen_range(config.min_event_duration_secs..=config.max_event_duration_secs);
        let mut steps = config.duration_steps(duration_secs);

        if steps > grid_len {
            match config.oversize_policy {
                OversizePolicy::Reject => {
                    return Err(GeneratorError::EventLongerThanTimeline { steps, grid_len });
                }
                OversizePolicy::Clamp => steps = grid_len,
                OversizePolicy::Skip => {
                    debug!(sensor_id, duration_secs, steps, "skipping oversized event");
                    report.skipped_durations_secs.push(duration_secs);
                    continue;
                }
            }
        }

        let start_step = rng.gen_range(0..=grid_len - steps);
        let span = EventSpan::new(start_step, steps, duration_secs);
        timeline.mark(&span)?;
        report.events.push(span);
    }

    debug!(
        sensor_id,
        events = report.events.len(),
        active = timeline.active_samples(),
        "sensor timeline generated"
    );

    Ok((timeline, report))
}

/// Generate the merged event table for every sensor.
pub fn generate(config: &GeneratorConfig) -> Result<Generation> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);

    let grid = timestamp_grid(config.start, config.end, config.sample_interval_secs)?;
    let grid_len = grid.len();

    let mut readings = Vec::with_capacity(grid_len * config.sensors as usize);
    let mut sensors = Vec::with_capacity(config.sensors as usize);

    for sensor_id in 1..=config.sensors {
        let (timeline, report) = generate_sensor_timeline(sensor_id, &grid, config, &mut rng)?;
        readings.extend(timeline.readings());
        sensors.push(report);
    }

    let table = EventTable::from_readings(readings);
    let report = GenerationReport {
        seed,
        start: config.start,
        end: config.end,
        sample_interval_secs: config.sample_interval_secs,
        grid_len,
        sensors,
    };

    info!(
        seed,
        sensors = config.sensors,
        grid_len,
        rows = table.len(),
        events = report.event_count(),
        "dataset generated"
    );

    Ok(Generation { table, report })
}

/// Generate and write the CSV to `config.output_file`.
pub fn generate_to_file(config: &GeneratorConfig) -> Result<Generation> {
    let generation = generate(config)?;
    generation.table.to_csv(&config.output_file)?;
    info!(path = %config.output_file.display(), "dataset written");
    Ok(generation)
}
