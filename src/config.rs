// Sensor Events - Generator configuration
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Configuration for event dataset generation.
//!
//! Every field has a default, so an empty JSON object is a valid config file
//! and `GeneratorConfig::default()` reproduces the stock 24-hour, 3-sensor
//! dataset.

use crate::error::{GeneratorError, Result};
use crate::timeline;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default output file name.
pub const DEFAULT_OUTPUT_FILE: &str = "sensor_data_continuous.csv";

/// What to do with an event whose step count exceeds the timeline length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OversizePolicy {
    /// Refuse configurations where the longest event cannot fit.
    #[default]
    Reject,
    /// Shorten the event to the full timeline.
    Clamp,
    /// Drop the event and record it as skipped.
    Skip,
}

impl fmt::Display for OversizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OversizePolicy::Reject => "reject",
            OversizePolicy::Clamp => "clamp",
            OversizePolicy::Skip => "skip",
        };
        f.write_str(s)
    }
}

impl FromStr for OversizePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(OversizePolicy::Reject),
            "clamp" => Ok(OversizePolicy::Clamp),
            "skip" => Ok(OversizePolicy::Skip),
            other => Err(format!(
                "unknown oversize policy '{}' (expected reject, clamp or skip)",
                other
            )),
        }
    }
}

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// First instant of every sensor timeline.
    pub start: NaiveDateTime,
    /// Last instant (inclusive) of every sensor timeline.
    pub end: NaiveDateTime,
    /// Number of simulated sensors, numbered from 1.
    pub sensors: u32,
    /// Spacing between readings in seconds.
    pub sample_interval_secs: u64,
    /// Minimum number of events per sensor.
    pub min_events: u32,
    /// Maximum number of events per sensor.
    pub max_events: u32,
    /// Minimum event duration in seconds.
    pub min_event_duration_secs: u64,
    /// Maximum event duration in seconds.
    pub max_event_duration_secs: u64,
    /// CSV output path.
    pub output_file: PathBuf,
    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Handling of events longer than the timeline.
    pub oversize_policy: OversizePolicy,
}

fn default_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, 12)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn default_end() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, 13)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            sensors: 3,
            sample_interval_secs: 5,
            min_events: 1,
            max_events: 5,
            min_event_duration_secs: 60,
            max_event_duration_secs: 3 * 3600,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            seed: None,
            oversize_policy: OversizePolicy::Reject,
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time range.
    pub fn with_range(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Set start instant.
    pub fn with_start(mut self, start: NaiveDateTime) -> Self {
        self.start = start;
        self
    }

    /// Set end instant.
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = end;
        self
    }

    /// Set number of sensors.
    pub fn with_sensors(mut self, sensors: u32) -> Self {
        self.sensors = sensors;
        self
    }

    /// Set sample interval in seconds.
    pub fn with_sample_interval_secs(mut self, secs: u64) -> Self {
        self.sample_interval_secs = secs;
        self
    }

    /// Set event count bounds (inclusive).
    pub fn with_events(mut self, min: u32, max: u32) -> Self {
        self.min_events = min;
        self.max_events = max;
        self
    }

    /// Set event duration bounds in seconds (inclusive).
    pub fn with_event_duration_secs(mut self, min: u64, max: u64) -> Self {
        self.min_event_duration_secs = min;
        self.max_event_duration_secs = max;
        self
    }

    /// Set output file.
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set oversize policy.
    pub fn with_oversize_policy(mut self, policy: OversizePolicy) -> Self {
        self.oversize_policy = policy;
        self
    }

    /// Number of samples in each sensor timeline.
    pub fn grid_len(&self) -> Result<usize> {
        timeline::grid_len(self.start, self.end, self.sample_interval_secs)
    }

    /// Convert a duration to whole sample steps (truncating).
    pub fn duration_steps(&self, secs: u64) -> usize {
        if self.sample_interval_secs == 0 {
            return 0;
        }
        (secs / self.sample_interval_secs) as usize
    }

    /// Check the configuration before generating anything.
    pub fn validate(&self) -> Result<()> {
        if self.sample_interval_secs == 0 {
            return Err(GeneratorError::InvalidSampleInterval(0));
        }
        if self.end < self.start {
            return Err(GeneratorError::EndBeforeStart {
                start: self.start,
                end: self.end,
            });
        }
        if self.sensors == 0 {
            return Err(GeneratorError::NoSensors);
        }
        if self.min_events > self.max_events {
            return Err(GeneratorError::InvalidBounds {
                name: "event count",
                min: u64::from(self.min_events),
                max: u64::from(self.max_events),
            });
        }
        if self.min_event_duration_secs > self.max_event_duration_secs {
            return Err(GeneratorError::InvalidBounds {
                name: "event duration",
                min: self.min_event_duration_secs,
                max: self.max_event_duration_secs,
            });
        }

        let grid_len = self.grid_len()?;
        let longest = self.duration_steps(self.max_event_duration_secs);
        if self.oversize_policy == OversizePolicy::Reject && self.max_events > 0 && longest > grid_len
        {
            return Err(GeneratorError::EventLongerThanTimeline {
                steps: longest,
                grid_len,
            });
        }

        Ok(())
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save to a JSON file.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 12)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.start, at(0, 0, 0));
        assert_eq!(config.end, at(0, 0, 0) + chrono::Duration::days(1));
        assert_eq!(config.sensors, 3);
        assert_eq!(config.sample_interval_secs, 5);
        assert_eq!((config.min_events, config.max_events), (1, 5));
        assert_eq!(config.max_event_duration_secs, 10_800);
        assert_eq!(config.output_file, PathBuf::from("sensor_data_continuous.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_grid_len() {
        // 86400 / 5 + 1
        assert_eq!(GeneratorConfig::default().grid_len().unwrap(), 17_281);
    }

    #[test]
    fn test_duration_steps_truncates() {
        let config = GeneratorConfig::new().with_sample_interval_secs(5);
        assert_eq!(config.duration_steps(4), 0);
        assert_eq!(config.duration_steps(5), 1);
        assert_eq!(config.duration_steps(14), 2);
    }

    #[test]
    fn test_validate_zero_interval() {
        let config = GeneratorConfig::new().with_sample_interval_secs(0);
        assert!(matches!(
            config.validate(),
            Err(GeneratorError::InvalidSampleInterval(0))
        ));
    }

    #[test]
    fn test_validate_end_before_start() {
        let config = GeneratorConfig::new().with_range(at(1, 0, 0), at(0, 0, 0));
        assert!(matches!(
            config.validate(),
            Err(GeneratorError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn test_validate_no_sensors() {
        let config = GeneratorConfig::new().with_sensors(0);
        assert!(matches!(config.validate(), Err(GeneratorError::NoSensors)));
    }

    #[test]
    fn test_validate_reversed_bounds() {
        let events = GeneratorConfig::new().with_events(4, 2);
        assert!(matches!(
            events.validate(),
            Err(GeneratorError::InvalidBounds { name: "event count", .. })
        ));

        let durations = GeneratorConfig::new().with_event_duration_secs(600, 60);
        assert!(matches!(
            durations.validate(),
            Err(GeneratorError::InvalidBounds { name: "event duration", .. })
        ));
    }

    #[test]
    fn test_validate_oversize_by_policy() {
        // 13-sample timeline, events up to 120 steps
        let config = GeneratorConfig::new()
            .with_range(at(0, 0, 0), at(0, 1, 0))
            .with_event_duration_secs(60, 600);

        assert!(matches!(
            config.validate(),
            Err(GeneratorError::EventLongerThanTimeline { steps: 120, grid_len: 13 })
        ));
        assert!(config
            .clone()
            .with_oversize_policy(OversizePolicy::Clamp)
            .validate()
            .is_ok());
        assert!(config
            .with_oversize_policy(OversizePolicy::Skip)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_oversize_policy_parse() {
        assert_eq!("clamp".parse::<OversizePolicy>(), Ok(OversizePolicy::Clamp));
        assert_eq!("SKIP".parse::<OversizePolicy>(), Ok(OversizePolicy::Skip));
        assert!("truncate".parse::<OversizePolicy>().is_err());
        assert_eq!(OversizePolicy::Reject.to_string(), "reject");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "sensors": 7, "oversize_policy": "skip" }"#).unwrap();
        assert_eq!(config.sensors, 7);
        assert_eq!(config.oversize_policy, OversizePolicy::Skip);
        assert_eq!(config.sample_interval_secs, 5);
        assert_eq!(config.start, at(0, 0, 0));
    }

    #[test]
    fn test_json_file_roundtrip() {
        let config = GeneratorConfig::new()
            .with_sensors(2)
            .with_seed(99)
            .with_output_file("out.csv");

        let temp_file = NamedTempFile::new().unwrap();
        config.to_json_file(temp_file.path()).unwrap();
        let loaded = GeneratorConfig::from_json_file(temp_file.path()).unwrap();

        assert_eq!(loaded, config);
    }
}
