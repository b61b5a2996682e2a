use std::sync::Arc;

use tracing::debug;

use crate::engine::filter::WINDOW_MINUTES;
use crate::model::{MINUTES_PER_DAY, TimeSelection, Trip};

/// Trip positions bucketed by start minute and by end minute.
///
/// Answers the same question as [`filter_trips`](crate::engine::filter::filter_trips)
/// while only visiting the 121 buckets around the selection. A pass costs
/// time proportional to the matching trips, not to the whole log.
pub struct MinuteIndex {
    trips: Arc<[Trip]>,
    started: Vec<Vec<usize>>,
    ended: Vec<Vec<usize>>,
}

impl MinuteIndex {
    pub fn new(trips: Arc<[Trip]>) -> Self {
        let slots = usize::from(MINUTES_PER_DAY);
        let mut started = vec![Vec::new(); slots];
        let mut ended = vec![Vec::new(); slots];

        for (pos, trip) in trips.iter().enumerate() {
            started[usize::from(trip.started_minutes())].push(pos);
            ended[usize::from(trip.ended_minutes())].push(pos);
        }

        debug!(trips = trips.len(), "Built minute index");

        Self {
            trips,
            started,
            ended,
        }
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Trips starting or ending within the window around `selection`, in the
    /// order they appear in the trip log.
    pub fn filter(&self, selection: TimeSelection) -> Vec<Trip> {
        let Some(selected) = selection.minute() else {
            return self.trips.to_vec();
        };

        // Clamped, not wrapped: the window never crosses midnight.
        let lo = usize::from(selected.saturating_sub(WINDOW_MINUTES));
        let hi = usize::from((selected + WINDOW_MINUTES).min(MINUTES_PER_DAY - 1));

        let mut hits: Vec<usize> = self.started[lo..=hi]
            .iter()
            .chain(&self.ended[lo..=hi])
            .flatten()
            .copied()
            .collect();

        // Positions restore log order; a trip matching on both ends appears twice.
        hits.sort_unstable();
        hits.dedup();

        hits.into_iter().map(|pos| self.trips[pos].clone()).collect()
    }
}
