//! Local CSV loader for the station roster and the trip log.
//!
//! Column names follow the public Bluebikes exports; extra columns are ignored.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use station_traffic::{Station, StationId, Trip};
use std::fs::File;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct StationRow {
    #[serde(alias = "short_name", alias = "Number")]
    id: String,
    #[serde(default, alias = "Name")]
    name: Option<String>,
    #[serde(alias = "lat", alias = "Lat")]
    latitude: f64,
    #[serde(alias = "lon", alias = "Long")]
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct TripRow {
    start_station_id: String,
    end_station_id: String,
    #[serde(deserialize_with = "timestamp")]
    started_at: NaiveDateTime,
    #[serde(deserialize_with = "timestamp")]
    ended_at: NaiveDateTime,
}

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp {raw:?}")))
}

/// Loads the station roster, skipping rows that cannot be read.
///
/// Both loaders share this policy: a bad row is logged and dropped, while a
/// missing or unreadable file is an error.
pub fn load_stations(path: &str) -> Result<Vec<Station>> {
    let file = File::open(path).with_context(|| format!("opening station roster {path}"))?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut stations = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.deserialize::<StationRow>() {
        match result {
            Ok(row) => stations.push(Station {
                id: StationId(row.id),
                name: row.name.filter(|n| !n.is_empty()),
                latitude: row.latitude,
                longitude: row.longitude,
            }),
            Err(e) => {
                skipped += 1;
                debug!(error = %e, "Skipping malformed station row");
            }
        }
    }

    if skipped > 0 {
        warn!(path, skipped, "Some station rows could not be read");
    }
    debug!(path, count = stations.len(), "Stations loaded");
    Ok(stations)
}

/// Loads trips, skipping rows that cannot be read, such as bad timestamps.
pub fn load_trips(path: &str) -> Result<Vec<Trip>> {
    let file = File::open(path).with_context(|| format!("opening trip log {path}"))?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut trips = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.deserialize::<TripRow>() {
        match result {
            Ok(row) => trips.push(Trip {
                start_station_id: StationId(row.start_station_id),
                end_station_id: StationId(row.end_station_id),
                started_at: row.started_at,
                ended_at: row.ended_at,
            }),
            Err(e) => {
                skipped += 1;
                debug!(error = %e, "Skipping malformed trip row");
            }
        }
    }

    if skipped > 0 {
        warn!(path, skipped, "Some trip rows could not be read");
    }
    debug!(path, count = trips.len(), "Trips loaded");
    Ok(trips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn write_temp(name: &str, content: &str) -> String {
        let path = format!("{}/{}", env::temp_dir().display(), name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_stations_with_aliases() {
        let path = write_temp(
            "station_traffic_stations.csv",
            "short_name,name,lat,lon\nA32000,Kendall T,42.3625,-71.0843\nB32001,,42.35,-71.1\n",
        );

        let stations = load_stations(&path).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id, StationId::from("A32000"));
        assert_eq!(stations[0].name.as_deref(), Some("Kendall T"));
        assert_eq!(stations[1].name, None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_stations_skips_bad_rows() {
        let path = write_temp(
            "station_traffic_stations_bad.csv",
            "id,name,latitude,longitude
A1,Good,42.36,-71.09
A2,Bad,north,-71.1
A3,,42.37,-71.08
",
        );

        let stations = load_stations(&path).unwrap();
        let ids: Vec<_> = stations.iter().map(|s| s.id.0.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A3"]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_trips_skips_bad_rows() {
        let path = write_temp(
            "station_traffic_trips.csv",
            "ride_id,bike_type,started_at,ended_at,start_station_id,end_station_id,is_member\n\
             r1,classic,2024-03-01 00:10:12.000,2024-03-01 00:40:00.000,A1,B2,1\n\
             r2,electric,not a time,2024-03-01 00:40:00,A1,B2,0\n\
             r3,classic,2024-03-01T08:30:00,2024-03-01T08:45:59,B2,A1,1\n",
        );

        let trips = load_trips(&path).unwrap();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].started_minutes(), 10);
        assert_eq!(trips[1].ended_minutes(), 525);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_stations("/nonexistent/stations.csv").is_err());
    }
}
