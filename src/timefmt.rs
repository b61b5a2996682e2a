//! Slider labels: minute of day to `h:MM AM/PM` and back from `HH:MM`.

use chrono::{Duration, NaiveTime, Timelike};

use crate::error::TrafficError;
use crate::model::TimeSelection;

/// Label shown next to the slider when no filter is active.
pub const ANY_TIME_LABEL: &str = "(any time)";

/// Formats a selection the way the slider shows it, e.g. `8:05 AM`.
///
/// The hour carries no leading zero, matching US short time style.
pub fn format_time(selection: TimeSelection) -> String {
    match selection {
        TimeSelection::All => ANY_TIME_LABEL.to_string(),
        TimeSelection::Minute(m) => {
            let (time, _) = NaiveTime::default()
                .overflowing_add_signed(Duration::minutes(i64::from(m.get())));
            time.format("%-I:%M %p").to_string()
        }
    }
}

/// Parses a 24-hour `HH:MM` string into a minute selection.
///
/// # Errors
///
/// Returns [`TrafficError::InvalidTimeLabel`] when `text` is not a valid time.
pub fn parse_time_of_day(text: &str) -> Result<TimeSelection, TrafficError> {
    let time = NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .map_err(|_| TrafficError::InvalidTimeLabel(text.to_string()))?;
    TimeSelection::at_minute(time.hour() * 60 + time.minute())
}
