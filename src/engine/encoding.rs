//! Marker size and color encoding derived from station traffic.
//!
//! Radius follows a square-root scale over `[0, max unfiltered total]`. The
//! color indicator is the share of departures, quantized into three buckets.

use serde::{Deserialize, Serialize};

use crate::model::{StationTraffic, TimeSelection};

/// Pixel range of marker radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusRange {
    pub min: f64,
    pub max: f64,
}

impl RadiusRange {
    pub const fn new(min: f64, max: f64) -> Self {
        RadiusRange { min, max }
    }
}

/// Radius ranges used with and without an active time filter.
///
/// Filtering shrinks counts, so the filtered range starts above zero to keep
/// small stations visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub unfiltered_radius: RadiusRange,
    pub filtered_radius: RadiusRange,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            unfiltered_radius: RadiusRange::new(0.0, 25.0),
            filtered_radius: RadiusRange::new(3.0, 50.0),
        }
    }
}

impl ViewConfig {
    pub fn range_for(&self, selection: TimeSelection) -> RadiusRange {
        if selection.is_filtered() {
            self.filtered_radius
        } else {
            self.unfiltered_radius
        }
    }
}

/// Square-root scale from `[0, domain_max]` onto a [`RadiusRange`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadiusScale {
    pub domain_max: usize,
    pub range: RadiusRange,
}

impl RadiusScale {
    pub fn new(domain_max: usize, range: RadiusRange) -> Self {
        RadiusScale { domain_max, range }
    }

    /// Maps a traffic count to a radius.
    ///
    /// An empty domain (`domain_max == 0`) maps everything to `range.min`.
    /// Values above the domain extrapolate rather than clamp.
    pub fn radius(&self, value: usize) -> f64 {
        if self.domain_max == 0 {
            return self.range.min;
        }
        let t = (value as f64).sqrt() / (self.domain_max as f64).sqrt();
        self.range.min + t * (self.range.max - self.range.min)
    }
}

/// Departure-vs-arrival indicator for a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowBucket {
    /// Mostly arrivals (ratio below 1/3).
    Arrivals,
    Balanced,
    /// Mostly departures (ratio of 2/3 or more).
    Departures,
}

impl FlowBucket {
    /// The bucket as the numeric value fed to the color interpolator.
    pub fn value(&self) -> f64 {
        match self {
            FlowBucket::Arrivals => 0.0,
            FlowBucket::Balanced => 0.5,
            FlowBucket::Departures => 1.0,
        }
    }
}

/// Departures over total traffic; 0.5 when the station saw no trips at all.
pub fn flow_ratio(departures: usize, total_traffic: usize) -> f64 {
    if total_traffic == 0 {
        0.5
    } else {
        departures as f64 / total_traffic as f64
    }
}

/// Three-step quantize over `[0, 1]` with thresholds at 1/3 and 2/3.
pub fn quantize_flow(ratio: f64) -> FlowBucket {
    if ratio < 1.0 / 3.0 {
        FlowBucket::Arrivals
    } else if ratio < 2.0 / 3.0 {
        FlowBucket::Balanced
    } else {
        FlowBucket::Departures
    }
}

pub fn flow_bucket(traffic: &StationTraffic) -> FlowBucket {
    quantize_flow(flow_ratio(traffic.departures, traffic.total_traffic))
}
