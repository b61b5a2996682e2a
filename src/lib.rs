pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod session;
pub mod timefmt;

pub use error::TrafficError;
pub use model::{Station, StationId, StationTraffic, TimeSelection, Trip};
pub use session::{StationMarker, TrafficSession, TrafficView};
