//! Station, trip and time-selection records consumed by the traffic engine.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::TrafficError;

/// Number of minutes in a day; valid minute selections are `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Identifier shared by the station roster and the trip log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub String);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(id: &str) -> Self {
        StationId(id.to_string())
    }
}

impl From<String> for StationId {
    fn from(id: String) -> Self {
        StationId(id)
    }
}

/// A bike-share dock. Position is owned by the renderer and never touched here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Station {
    pub fn new(id: impl Into<StationId>, latitude: f64, longitude: f64) -> Self {
        Station {
            id: id.into(),
            name: None,
            latitude,
            longitude,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

/// A single rental from one station to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub start_station_id: StationId,
    pub end_station_id: StationId,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
}

impl Trip {
    pub fn started_minutes(&self) -> u16 {
        minutes_since_midnight(&self.started_at)
    }

    pub fn ended_minutes(&self) -> u16 {
        minutes_since_midnight(&self.ended_at)
    }
}

/// Minute of the day for `ts`; seconds and below are discarded.
pub fn minutes_since_midnight(ts: &NaiveDateTime) -> u16 {
    // hour < 24 and minute < 60, so this always fits.
    (ts.hour() * 60 + ts.minute()) as u16
}

/// A minute of the day in `[0, 1439]`.
///
/// The field is private: values only come from [`MinuteOfDay::new`], which
/// also backs deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32")]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// # Errors
    ///
    /// Returns [`TrafficError::InvalidSelection`] when `minute > 1439`.
    pub fn new(minute: u32) -> Result<Self, TrafficError> {
        if minute < u32::from(MINUTES_PER_DAY) {
            Ok(MinuteOfDay(minute as u16))
        } else {
            Err(TrafficError::InvalidSelection(minute))
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u32> for MinuteOfDay {
    type Error = TrafficError;

    fn try_from(minute: u32) -> Result<Self, Self::Error> {
        MinuteOfDay::new(minute)
    }
}

/// Slider position: either every trip, or a minute of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSelection {
    #[default]
    All,
    Minute(MinuteOfDay),
}

impl TimeSelection {
    /// Builds a minute selection, rejecting anything past 23:59.
    ///
    /// # Errors
    ///
    /// Returns [`TrafficError::InvalidSelection`] when `minute > 1439`.
    pub fn at_minute(minute: u32) -> Result<Self, TrafficError> {
        MinuteOfDay::new(minute).map(TimeSelection::Minute)
    }

    /// Minute selections from midnight onward, `step` minutes apart.
    /// A `step` of zero is treated as one.
    pub fn every(step: u16) -> impl Iterator<Item = TimeSelection> {
        (0..MINUTES_PER_DAY)
            .step_by(usize::from(step.max(1)))
            .map(|m| TimeSelection::Minute(MinuteOfDay(m)))
    }

    pub fn minute(&self) -> Option<u16> {
        match self {
            TimeSelection::All => None,
            TimeSelection::Minute(m) => Some(m.get()),
        }
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self, TimeSelection::Minute(_))
    }
}

/// Per-station counts for one aggregation pass.
///
/// Always a fresh record: recomputing with another selection never touches a
/// previously returned `StationTraffic`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationTraffic {
    pub station: Station,
    pub departures: usize,
    pub arrivals: usize,
    pub total_traffic: usize,
}

impl StationTraffic {
    pub fn new(station: Station, departures: usize, arrivals: usize) -> Self {
        StationTraffic {
            station,
            departures,
            arrivals,
            total_traffic: departures + arrivals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_minutes_since_midnight_drops_seconds() {
        assert_eq!(minutes_since_midnight(&at(0, 0, 0)), 0);
        assert_eq!(minutes_since_midnight(&at(10, 5, 59)), 605);
        assert_eq!(minutes_since_midnight(&at(23, 59, 59)), 1439);
    }

    #[test]
    fn test_at_minute_bounds() {
        assert_eq!(TimeSelection::at_minute(0).unwrap().minute(), Some(0));
        assert_eq!(TimeSelection::at_minute(1439).unwrap().minute(), Some(1439));
        assert!(matches!(
            TimeSelection::at_minute(1440),
            Err(TrafficError::InvalidSelection(1440))
        ));
    }

    #[test]
    fn test_selection_helpers() {
        assert_eq!(TimeSelection::All.minute(), None);
        assert!(!TimeSelection::All.is_filtered());
        let half_past = TimeSelection::at_minute(30).unwrap();
        assert_eq!(half_past.minute(), Some(30));
        assert!(half_past.is_filtered());
    }

    #[test]
    fn test_deserialize_checks_range() {
        let ok: TimeSelection = serde_json::from_str(r#"{"minute":1439}"#).unwrap();
        assert_eq!(ok.minute(), Some(1439));

        let all: TimeSelection = serde_json::from_str(r#""all""#).unwrap();
        assert_eq!(all, TimeSelection::All);

        let err = serde_json::from_str::<TimeSelection>(r#"{"minute":5000}"#).unwrap_err();
        assert!(err.to_string().contains("5000"));
    }

    #[test]
    fn test_serialize_round_trips_through_check() {
        let json = serde_json::to_string(&TimeSelection::at_minute(485).unwrap()).unwrap();
        assert_eq!(json, r#"{"minute":485}"#);
    }

    #[test]
    fn test_every_covers_day() {
        let hourly: Vec<_> = TimeSelection::every(60).filter_map(|s| s.minute()).collect();
        assert_eq!(hourly.len(), 24);
        assert_eq!(hourly.first(), Some(&0));
        assert_eq!(hourly.last(), Some(&1380));
        assert_eq!(TimeSelection::every(0).count(), 1440);
    }

    #[test]
    fn test_station_traffic_total_is_sum() {
        let t = StationTraffic::new(Station::new("A32", 42.36, -71.09), 4, 7);
        assert_eq!(t.total_traffic, 11);
    }
}
