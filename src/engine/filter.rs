use crate::model::{TimeSelection, Trip};

/// Half-width of the window around the selected minute, in minutes.
pub const WINDOW_MINUTES: u16 = 60;

/// Returns true when `minute` lies within [`WINDOW_MINUTES`] of `selected`.
///
/// Distance is linear over the day, not circular: 00:05 is 1435 minutes away
/// from 23:50.
pub fn within_window(minute: u16, selected: u16) -> bool {
    minute.abs_diff(selected) <= WINDOW_MINUTES
}

/// Keeps trips that start or end within the window around `selection`.
///
/// [`TimeSelection::All`] returns every trip in the original order.
pub fn filter_trips(trips: &[Trip], selection: TimeSelection) -> Vec<Trip> {
    match selection {
        TimeSelection::All => trips.to_vec(),
        TimeSelection::Minute(selected) => trips
            .iter()
            .filter(|trip| {
                within_window(trip.started_minutes(), selected.get())
                    || within_window(trip.ended_minutes(), selected.get())
            })
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::trip;

    #[test]
    fn test_no_filter_passthrough() {
        let trips = vec![
            trip("1", "2", 10, 40),
            trip("2", "3", 900, 915),
            trip("3", "1", 1400, 1439),
        ];
        assert_eq!(filter_trips(&trips, TimeSelection::All), trips);
    }

    #[test]
    fn test_window_boundary() {
        let trips = vec![trip("1", "2", 600, 605)];

        assert_eq!(filter_trips(&trips, TimeSelection::at_minute(600).unwrap()).len(), 1);
        assert_eq!(filter_trips(&trips, TimeSelection::at_minute(660).unwrap()).len(), 1);
        // 605 + 60 = 665 still reaches via the end time
        assert_eq!(filter_trips(&trips, TimeSelection::at_minute(665).unwrap()).len(), 1);
        assert_eq!(filter_trips(&trips, TimeSelection::at_minute(666).unwrap()).len(), 0);
        assert_eq!(filter_trips(&trips, TimeSelection::at_minute(540).unwrap()).len(), 1);
        assert_eq!(filter_trips(&trips, TimeSelection::at_minute(539).unwrap()).len(), 0);
    }

    #[test]
    fn test_start_only_boundary() {
        // started 600, ended far away: only the start minute can match
        let trips = vec![trip("1", "2", 600, 900)];
        assert_eq!(filter_trips(&trips, TimeSelection::at_minute(660).unwrap()).len(), 1);
        assert_eq!(filter_trips(&trips, TimeSelection::at_minute(661).unwrap()).len(), 0);
    }

    #[test]
    fn test_matches_on_end_time_only() {
        let trips = vec![trip("1", "2", 100, 400)];
        assert_eq!(filter_trips(&trips, TimeSelection::at_minute(450).unwrap()).len(), 1);
    }

    #[test]
    fn test_window_does_not_wrap_past_midnight() {
        // Documented asymmetry: 00:05 does not see a trip that ended at 23:50,
        // even though the two are 15 minutes apart on a clock face.
        let trips = vec![trip("1", "2", 1420, 1430)];
        assert!(filter_trips(&trips, TimeSelection::at_minute(5).unwrap()).is_empty());

        let early = vec![trip("1", "2", 2, 10)];
        assert!(filter_trips(&early, TimeSelection::at_minute(1435).unwrap()).is_empty());
    }

    #[test]
    fn test_filter_keeps_order() {
        let trips = vec![
            trip("a", "b", 500, 510),
            trip("b", "c", 100, 110),
            trip("c", "a", 520, 530),
        ];
        let kept = filter_trips(&trips, TimeSelection::at_minute(515).unwrap());
        assert_eq!(kept, vec![trips[0].clone(), trips[2].clone()]);
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_trips(&[], TimeSelection::at_minute(10).unwrap()).is_empty());
        assert!(filter_trips(&[], TimeSelection::All).is_empty());
    }
}
