//! Binary-side collaborators: local data loading and view configuration.

pub mod config;
pub mod source;
