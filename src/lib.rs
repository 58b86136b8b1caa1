//! Sunshine Finder - find the sunniest spot around you
//!
//! Samples current weather on concentric rings around the current position,
//! scores each sample and reports the best locations. The same search is
//! available from the command line and as a JSON-RPC tool server.

pub mod cli;
pub mod config;
pub mod error;
pub mod finder;
pub mod location_provider;
pub mod logging;
pub mod mcp;
pub mod models;
pub mod sampling;
pub mod scoring;
pub mod weather;
#[cfg(feature = "http")]
pub mod web;

// Re-export core types for public API
pub use config::SunshineConfig;
pub use error::SunshineError;
pub use finder::{SunshineFinder, rank};
pub use location_provider::{
    CommandLocationProvider, ConfiguredLocationProvider, FixedLocationProvider, LocationProvider,
};
pub use models::{
    Coordinate, Location, ScoredLocation, SearchResult, WeatherAtLocation, WeatherObservation,
};
pub use scoring::{SubScores, score};
pub use weather::{MetNoClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SunshineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
