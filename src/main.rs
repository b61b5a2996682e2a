//! CLI entry point for the station traffic tool.
//!
//! Loads a station roster and a trip log from local CSV files, then computes
//! marker sizes and flow colors for one time-of-day selection or a sweep over
//! the whole day.

mod infra;

use crate::infra::config::load_view_config;
use crate::infra::source::{load_stations, load_trips};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use station_traffic::output::{append_view, print_json, print_pretty};
use station_traffic::timefmt::parse_time_of_day;
use station_traffic::{TimeSelection, TrafficSession};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "station_traffic")]
#[command(about = "Bike-share station traffic by time of day", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// Station roster CSV (id/short_name, name, lat, lon)
    #[arg(short, long, default_value = "data/stations.csv")]
    stations: String,

    /// Trip log CSV (start_station_id, end_station_id, started_at, ended_at)
    #[arg(short, long, default_value = "data/trips.csv")]
    trips: String,

    /// Optional JSON file overriding marker radius ranges
    #[arg(long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute markers for a single time of day (or all trips)
    View {
        #[command(flatten)]
        data: DataArgs,

        /// Time of day as HH:MM
        #[arg(long, conflicts_with = "minute")]
        at: Option<String>,

        /// Minute of day, 0-1439
        #[arg(long)]
        minute: Option<u32>,

        /// CSV file to append marker rows to
        #[arg(short, long, default_value = "markers.csv")]
        output: String,

        /// Also log the full view as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Compute markers for every step of the day, plus the unfiltered view
    Sweep {
        #[command(flatten)]
        data: DataArgs,

        /// Minutes between consecutive selections
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u16).range(1..1440))]
        step: u16,

        /// CSV file to append marker rows to
        #[arg(short, long, default_value = "sweep.csv")]
        output: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/station_traffic.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("station_traffic.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::View {
            data,
            at,
            minute,
            output,
            json,
        } => {
            let selection = match (at, minute) {
                (Some(text), _) => parse_time_of_day(&text)?,
                (None, Some(m)) => TimeSelection::at_minute(m)?,
                (None, None) => TimeSelection::All,
            };
            let session = open_session(&data)?;
            view(&session, selection, &output, json)?;
        }
        Commands::Sweep { data, step, output } => {
            let session = open_session(&data)?;
            sweep(&session, step, &output)?;
        }
    }

    Ok(())
}

/// Loads both datasets and builds the session with its unfiltered baseline.
#[tracing::instrument(skip(data), fields(stations = %data.stations, trips = %data.trips))]
fn open_session(data: &DataArgs) -> Result<TrafficSession> {
    let config = load_view_config(data.config.as_deref())?;
    let stations = load_stations(&data.stations)?;
    let trips = load_trips(&data.trips)?;

    info!(
        stations = stations.len(),
        trips = trips.len(),
        "Datasets loaded"
    );

    let session = TrafficSession::with_config(stations, trips, config);
    info!(
        baseline_max = session.baseline_max(),
        "Radius domain fixed from unfiltered traffic"
    );
    Ok(session)
}

/// Runs one pass and appends its markers to `output`.
#[tracing::instrument(skip(session))]
fn view(session: &TrafficSession, selection: TimeSelection, output: &str, json: bool) -> Result<()> {
    let view = session.view(selection);
    print_pretty(&view);
    if json {
        print_json(&view)?;
    }

    let rows = append_view(output, &view)?;
    let busiest = view
        .markers
        .iter()
        .max_by_key(|m| m.traffic.total_traffic)
        .map(|m| m.traffic.station.id.to_string());

    info!(
        label = %view.label,
        trips = view.trip_count,
        rows,
        busiest = busiest.as_deref().unwrap_or("-"),
        output,
        "View written"
    );
    Ok(())
}

/// Appends the unfiltered view, then one view every `step` minutes.
#[tracing::instrument(skip(session))]
fn sweep(session: &TrafficSession, step: u16, output: &str) -> Result<()> {
    let selections = std::iter::once(TimeSelection::All)
        .chain(TimeSelection::every(step));

    let mut total_rows = 0;
    for selection in selections {
        let view = session.view(selection);
        total_rows += append_view(output, &view)?;
        info!(label = %view.label, trips = view.trip_count, "Sweep step written");
    }

    info!(output, rows = total_rows, "Sweep complete");
    Ok(())
}
