use crate::model::{Station, StationId, StationTraffic, Trip};
use std::collections::HashMap;
use tracing::trace;

/// Counts departures and arrivals for every station in `stations`.
///
/// Departures are grouped by `start_station_id`, arrivals by `end_station_id`.
/// Stations nobody rode to or from get zero, and trips naming an unknown
/// station are simply not counted for that direction. The output follows the
/// order of `stations` and owns fresh copies of them.
pub fn compute_traffic(stations: &[Station], trips: &[Trip]) -> Vec<StationTraffic> {
    let mut departures: HashMap<&StationId, usize> = HashMap::new();
    let mut arrivals: HashMap<&StationId, usize> = HashMap::new();

    for trip in trips {
        *departures.entry(&trip.start_station_id).or_default() += 1;
        *arrivals.entry(&trip.end_station_id).or_default() += 1;
    }

    trace!(
        trips = trips.len(),
        departure_keys = departures.len(),
        arrival_keys = arrivals.len(),
        "Grouped trips by station"
    );

    stations
        .iter()
        .map(|station| {
            StationTraffic::new(
                station.clone(),
                departures.get(&station.id).copied().unwrap_or(0),
                arrivals.get(&station.id).copied().unwrap_or(0),
            )
        })
        .collect()
}

/// Largest `total_traffic` in `traffic`, or 0 when empty.
pub fn max_total_traffic(traffic: &[StationTraffic]) -> usize {
    traffic.iter().map(|t| t.total_traffic).max().unwrap_or(0)
}
