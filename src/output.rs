//! Output formatting and persistence for traffic views.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::TrafficError;
use crate::session::{StationMarker, TrafficView};
use csv::WriterBuilder;
use std::fs::OpenOptions;

/// Flat CSV row for one marker under one selection.
#[derive(Debug, Serialize)]
pub struct MarkerRecord {
    pub selection: String,
    pub minute: Option<u16>,
    pub station_id: String,
    pub station_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub departures: usize,
    pub arrivals: usize,
    pub total_traffic: usize,
    pub radius: f64,
    pub flow_ratio: f64,
    pub flow_bucket: f64,
}

impl MarkerRecord {
    pub fn from_marker(view: &TrafficView, marker: &StationMarker) -> Self {
        let station = &marker.traffic.station;
        MarkerRecord {
            selection: view.label.clone(),
            minute: view.selection.minute(),
            station_id: station.id.to_string(),
            station_name: station.name.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            departures: marker.traffic.departures,
            arrivals: marker.traffic.arrivals,
            total_traffic: marker.traffic.total_traffic,
            radius: marker.radius,
            flow_ratio: marker.flow_ratio,
            flow_bucket: marker.flow.value(),
        }
    }
}

/// Logs a view using Rust's debug pretty-print format.
pub fn print_pretty(view: &TrafficView) {
    debug!("{:#?}", view);
}

/// Logs a view as pretty-printed JSON.
pub fn print_json(view: &TrafficView) -> Result<(), TrafficError> {
    info!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

/// Appends one row per marker of `view` to a CSV file.
///
/// Writes the header first when the file is new or still empty.
pub fn append_view(path: &str, view: &TrafficView) -> Result<usize, TrafficError> {
    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let needs_header = file.metadata()?.len() == 0;
    debug!(path, needs_header, rows = view.markers.len(), "Appending CSV records");

    let mut writer = WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);

    for marker in &view.markers {
        writer.serialize(MarkerRecord::from_marker(view, marker))?;
    }
    writer.flush()?;

    Ok(view.markers.len())
}
