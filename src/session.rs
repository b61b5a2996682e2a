//! Session context owning the loaded datasets.
//!
//! The roster and trip log are loaded once and shared read-only. Every call to
//! [`TrafficSession::view`] runs an independent filter + aggregate + encode
//! pass and returns freshly allocated markers, so views for different
//! selections can be held side by side.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::engine::encoding::{FlowBucket, RadiusScale, ViewConfig, flow_bucket, flow_ratio};
use crate::engine::index::MinuteIndex;
use crate::engine::traffic::{compute_traffic, max_total_traffic};
use crate::model::{Station, StationTraffic, TimeSelection, Trip};
use crate::timefmt::format_time;

/// One marker ready for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMarker {
    pub traffic: StationTraffic,
    pub radius: f64,
    pub flow_ratio: f64,
    pub flow: FlowBucket,
}

/// Everything the renderer needs for one slider position.
#[derive(Debug, Clone, Serialize)]
pub struct TrafficView {
    pub selection: TimeSelection,
    pub label: String,
    pub scale: RadiusScale,
    pub trip_count: usize,
    pub markers: Vec<StationMarker>,
}

pub struct TrafficSession {
    stations: Arc<[Station]>,
    index: MinuteIndex,
    config: ViewConfig,
    baseline_max: usize,
}

impl TrafficSession {
    pub fn new(stations: Vec<Station>, trips: Vec<Trip>) -> Self {
        Self::with_config(stations, trips, ViewConfig::default())
    }

    /// Builds the session and computes the unfiltered baseline that fixes the
    /// radius domain for every later view.
    pub fn with_config(stations: Vec<Station>, trips: Vec<Trip>, config: ViewConfig) -> Self {
        let stations: Arc<[Station]> = stations.into();
        let trips: Arc<[Trip]> = trips.into();

        let baseline_max = max_total_traffic(&compute_traffic(&stations, &trips));
        debug!(
            stations = stations.len(),
            trips = trips.len(),
            baseline_max,
            "Session baseline computed"
        );

        Self {
            stations,
            index: MinuteIndex::new(trips),
            config,
            baseline_max,
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn trips(&self) -> &[Trip] {
        self.index.trips()
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Maximum total traffic over the unfiltered data.
    pub fn baseline_max(&self) -> usize {
        self.baseline_max
    }

    /// Radius scale for `selection`. The domain always comes from the
    /// unfiltered baseline so sizes stay comparable across selections.
    pub fn radius_scale(&self, selection: TimeSelection) -> RadiusScale {
        RadiusScale::new(self.baseline_max, self.config.range_for(selection))
    }

    /// Per-station counts for `selection`.
    pub fn traffic(&self, selection: TimeSelection) -> Vec<StationTraffic> {
        compute_traffic(&self.stations, &self.index.filter(selection))
    }

    pub fn view(&self, selection: TimeSelection) -> TrafficView {
        let trips = self.index.filter(selection);
        let scale = self.radius_scale(selection);

        let markers: Vec<StationMarker> = compute_traffic(&self.stations, &trips)
            .into_iter()
            .map(|traffic| StationMarker {
                radius: scale.radius(traffic.total_traffic),
                flow_ratio: flow_ratio(traffic.departures, traffic.total_traffic),
                flow: flow_bucket(&traffic),
                traffic,
            })
            .collect();

        debug!(
            ?selection,
            trips = trips.len(),
            markers = markers.len(),
            "View computed"
        );

        TrafficView {
            selection,
            label: format_time(selection),
            scale,
            trip_count: trips.len(),
            markers,
        }
    }
}
