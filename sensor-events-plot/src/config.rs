// Sensor Events Plot - Step-chart rendering
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Configuration types for plot rendering

/// Figure configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Figure width in pixels (default: 1500)
    pub width: u32,

    /// Figure height in pixels (default: 800)
    pub height: u32,

    /// Chart caption
    pub title: String,

    /// X axis description
    pub x_label: String,

    /// Y axis description
    pub y_label: String,

    /// Hours between x-axis ticks
    pub tick_interval_hours: u32,

    /// Padding above 1 and below 0 on the y axis
    pub y_padding: f64,

    /// Stroke width of each series
    pub line_width: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 800,
            title: "Sensor States Over Time".to_string(),
            x_label: "Hour of Day".to_string(),
            y_label: "State (0=OFF, 1=ON)".to_string(),
            tick_interval_hours: 2,
            y_padding: 0.1,
            line_width: 2,
        }
    }
}

impl PlotConfig {
    /// Create a configuration with custom figure size
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Set the caption
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the tick interval
    pub fn tick_interval_hours(mut self, hours: u32) -> Self {
        self.tick_interval_hours = hours;
        self
    }

    /// Y axis bounds
    pub fn y_range(&self) -> (f64, f64) {
        (-self.y_padding, 1.0 + self.y_padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_config_default() {
        let config = PlotConfig::default();
        assert_eq!((config.width, config.height), (1500, 800));
        assert_eq!(config.tick_interval_hours, 2);
        assert_eq!(config.line_width, 2);
        assert_eq!(config.title, "Sensor States Over Time");
    }

    #[test]
    fn test_plot_config_with_size() {
        let config = PlotConfig::with_size(640, 480).title("Line 4");
        assert_eq!(config.width, 640);
        assert_eq!(config.title, "Line 4");
        assert_eq!(config.x_label, "Hour of Day");
    }
}
