//! Error type shared by the library modules.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrafficError {
    /// Slider value outside `[0, 1439]`.
    #[error("invalid time selection: minute {0} is outside 0..=1439")]
    InvalidSelection(u32),
    /// Text that does not read as `HH:MM`.
    #[error("invalid time of day: {0:?}")]
    InvalidTimeLabel(String),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
