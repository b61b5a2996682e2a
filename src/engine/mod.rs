//! Time filtering, per-station aggregation and marker encoding.
//!
//! A pass narrows the trip log to a time window, counts departures and
//! arrivals for every station, then maps the counts to a radius and a
//! departure/arrival color bucket.

pub mod encoding;
pub mod filter;
pub mod index;
pub mod traffic;
