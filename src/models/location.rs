//! Coordinate and sampled location models

use serde::{Deserialize, Serialize};

/// A position in decimal degrees.
///
/// Only finiteness is expected; range checks are left to callers.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Format as a `lat, lon` string with four decimals
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// A candidate point produced by the sampling pattern
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    /// Human-readable label, e.g. "Current Location" or "25km N"
    pub name: String,
    /// Ring radius this point sits on, 0 for the center
    pub distance_km: f64,
}

impl Location {
    /// Label used for the search center
    pub const CENTER_NAME: &'static str = "Current Location";

    #[must_use]
    pub fn new(coordinate: Coordinate, name: String, distance_km: f64) -> Self {
        Self {
            coordinate,
            name,
            distance_km,
        }
    }

    /// The search center itself
    #[must_use]
    pub fn center(coordinate: Coordinate) -> Self {
        Self::new(coordinate, Self::CENTER_NAME.to_string(), 0.0)
    }

    #[must_use]
    pub fn is_center(&self) -> bool {
        self.distance_km == 0.0
    }

    #[must_use]
    pub fn format_coordinates(&self) -> String {
        self.coordinate.format_coordinates()
    }
}
