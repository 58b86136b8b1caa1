//! Scored samples and search results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Coordinate, Location, WeatherObservation};

/// One location with the weather found there and its composite score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredLocation {
    pub location: Location,
    pub weather: WeatherObservation,
    /// Composite score (0-100, one decimal)
    pub score: f64,
}

/// Outcome of one `find_sunshine` run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Center the pattern was generated around
    pub current_location: Coordinate,
    /// Best locations, highest score first
    pub best_locations: Vec<ScoredLocation>,
    /// Number of locations that were fetched and scored
    pub total_checked: usize,
    /// Number of locations generated for this search
    pub total_attempted: usize,
    /// When this result was produced
    pub generated_at: DateTime<Utc>,
}

impl SearchResult {
    /// Highest scoring location, if any sample succeeded
    #[must_use]
    pub fn best(&self) -> Option<&ScoredLocation> {
        self.best_locations.first()
    }

    #[must_use]
    pub fn total_failed(&self) -> usize {
        self.total_attempted.saturating_sub(self.total_checked)
    }
}

/// Weather and score for an arbitrary coordinate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAtLocation {
    pub location: Coordinate,
    pub weather: WeatherObservation,
    pub score: f64,
}
