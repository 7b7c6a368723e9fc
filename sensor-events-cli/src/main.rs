// Sensor Events CLI - Dataset generator and plotter
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Sensor Events CLI
//!
//! Generate binary sensor-event datasets and render them as step charts.
//!
//! ## Usage
//!
//! ```bash
//! # Stock dataset: 24h, 3 sensors, 5s samples -> sensor_data_continuous.csv
//! sensor-events generate
//!
//! # Reproducible run with a manifest
//! sensor-events generate --sensors 5 --seed 42 --output events.csv --manifest events.json
//!
//! # Plot it
//! sensor-events plot --input events.csv --output events.svg
//! ```

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use sensor_events::{
    generate_to_file, GenerationManifest, GeneratorConfig, GeneratorError, OversizePolicy,
};
use sensor_events_plot::{render_csv_to_svg, PlotConfig, PlotError};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Binary sensor-event dataset generator and plotter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a sensor-event CSV
    Generate(GenerateArgs),
    /// Render a sensor-event CSV as a step chart (SVG)
    Plot(PlotArgs),
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// JSON config file; flags override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start instant (YYYY-MM-DD HH:MM:SS)
    #[arg(long, value_parser = parse_datetime)]
    start: Option<NaiveDateTime>,

    /// End instant, inclusive (YYYY-MM-DD HH:MM:SS)
    #[arg(long, value_parser = parse_datetime)]
    end: Option<NaiveDateTime>,

    /// Number of sensors
    #[arg(short, long)]
    sensors: Option<u32>,

    /// Seconds between readings
    #[arg(long)]
    sample_rate_secs: Option<u64>,

    /// Minimum events per sensor
    #[arg(long)]
    min_events: Option<u32>,

    /// Maximum events per sensor
    #[arg(long)]
    max_events: Option<u32>,

    /// Minimum event duration in seconds
    #[arg(long)]
    min_duration_secs: Option<u64>,

    /// Maximum event duration in seconds
    #[arg(long)]
    max_duration_secs: Option<u64>,

    /// Output CSV path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Events longer than the timeline: reject, clamp or skip
    #[arg(long)]
    oversize: Option<OversizePolicy>,

    /// Also write a JSON manifest of the placed events
    #[arg(short, long)]
    manifest: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct PlotArgs {
    /// Input CSV (timestamp,sensor_id,sensor_value)
    #[arg(short, long)]
    input: PathBuf,

    /// Output SVG path
    #[arg(short, long, default_value = "sensor_states.svg")]
    output: PathBuf,

    /// Figure width in pixels
    #[arg(long, default_value = "1500")]
    width: u32,

    /// Figure height in pixels
    #[arg(long, default_value = "800")]
    height: u32,

    /// Chart caption
    #[arg(long)]
    title: Option<String>,

    /// Hours between x-axis ticks
    #[arg(long, default_value = "2")]
    tick_hours: u32,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error("Failed to write manifest: {0}")]
    Manifest(#[from] std::io::Error),
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
        .ok_or_else(|| format!("invalid timestamp '{}' (expected YYYY-MM-DD HH:MM:SS)", s))
}

impl GenerateArgs {
    /// Resolve the effective configuration: defaults, then file, then flags.
    fn into_config(self) -> Result<GeneratorConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_json_file(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(start) = self.start {
            config.start = start;
        }
        if let Some(end) = self.end {
            config.end = end;
        }
        if let Some(sensors) = self.sensors {
            config.sensors = sensors;
        }
        if let Some(secs) = self.sample_rate_secs {
            config.sample_interval_secs = secs;
        }
        if let Some(n) = self.min_events {
            config.min_events = n;
        }
        if let Some(n) = self.max_events {
            config.max_events = n;
        }
        if let Some(secs) = self.min_duration_secs {
            config.min_event_duration_secs = secs;
        }
        if let Some(secs) = self.max_duration_secs {
            config.max_event_duration_secs = secs;
        }
        if let Some(output) = self.output {
            config.output_file = output;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(policy) = self.oversize {
            config.oversize_policy = policy;
        }

        Ok(config)
    }
}

impl PlotArgs {
    fn plot_config(&self) -> PlotConfig {
        let config = PlotConfig::with_size(self.width, self.height).tick_interval_hours(self.tick_hours);
        match &self.title {
            Some(title) => config.title(title.as_str()),
            None => config,
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let manifest_path = args.manifest.clone();
    let config = args.into_config()?;

    let generation = generate_to_file(&config)?;
    info!(
        "Wrote {} rows ({} sensors x {} samples, seed {}) to {}",
        generation.table.len(),
        config.sensors,
        generation.report.grid_len,
        generation.report.seed,
        config.output_file.display()
    );

    if let Some(path) = manifest_path {
        GenerationManifest::from_generation(&generation, &config.output_file).to_json_file(&path)?;
        info!("Manifest written to {}", path.display());
    }

    Ok(())
}

fn run_plot(args: PlotArgs) -> Result<(), CliError> {
    render_csv_to_svg(&args.input, &args.output, &args.plot_config())?;
    info!("Plot of {} written to {}", args.input.display(), args.output.display());
    Ok(())
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Generate(args) => run_generate(args),
        Command::Plot(args) => run_plot(args),
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    info!("Sensor Events v{}", env!("CARGO_PKG_VERSION"));

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
