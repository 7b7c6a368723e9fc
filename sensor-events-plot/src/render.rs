// Sensor Events Plot - Step-chart rendering
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! SVG rendering of sensor step charts.

use crate::axis::HourAxis;
use crate::config::PlotConfig;
use crate::error::{render_err, PlotError, Result};
use crate::series::StepSeries;
use plotters::coord::Shift;
use plotters::prelude::*;
use sensor_events::EventTable;
use std::path::Path;
use tracing::{debug, info};

const GRID_COLOR: RGBColor = RGBColor(176, 176, 176);

/// Render the table to an SVG file.
pub fn render_svg(table: &EventTable, config: &PlotConfig, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    draw_chart(&root, table, config)?;
    info!(path = %path.display(), "plot written");
    Ok(())
}

/// Render the table to an SVG document in memory.
pub fn render_svg_string(table: &EventTable, config: &PlotConfig) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();
        draw_chart(&root, table, config)?;
    }
    Ok(svg)
}

/// Load a CSV and render it to an SVG file.
pub fn render_csv_to_svg(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &PlotConfig,
) -> Result<()> {
    let table = EventTable::from_csv(input)?;
    render_svg(&table, config, output)
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &EventTable,
    config: &PlotConfig,
) -> Result<()> {
    let (start, end) = table.time_range().ok_or(PlotError::EmptyTable)?;
    let series = StepSeries::from_table(table);

    let x_axis = HourAxis::new(start, end, config.tick_interval_hours);
    let (y_min, y_max) = config.y_range();
    debug!(series = series.len(), ticks = x_axis.ticks().len(), "drawing step chart");

    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x_axis.clone(), y_min..y_max)
        .map_err(render_err)?;

    let x_formatter = |x: &f64| x_axis.label(*x);
    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .x_label_formatter(&x_formatter)
        .y_labels(7)
        .bold_line_style(GRID_COLOR.mix(0.7))
        .light_line_style(TRANSPARENT)
        .draw()
        .map_err(render_err)?;

    for (idx, s) in series.iter().enumerate() {
        let style = Palette99::pick(idx).stroke_width(config.line_width);
        chart
            .draw_series(LineSeries::new(s.step_points(start), style))
            .map_err(render_err)?
            .label(s.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.25))
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}
