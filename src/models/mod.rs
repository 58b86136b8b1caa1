//! Data models for the sunshine finder
//!
//! This module contains the core domain models organized by concern:
//! - Location: coordinates and sampled candidate points
//! - Weather: current conditions for one coordinate
//! - Search: scored samples and the ranked result

pub mod location;
pub mod search;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{Coordinate, Location};
pub use search::{ScoredLocation, SearchResult, WeatherAtLocation};
pub use weather::WeatherObservation;
