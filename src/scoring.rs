//! Weather desirability scoring
//!
//! Maps one [`WeatherObservation`] to a 0-100 score. Each weather dimension is
//! turned into a sub-score and the sub-scores are combined with fixed weights,
//! cloud coverage carrying the most weight.

use serde::{Deserialize, Serialize};

use crate::models::WeatherObservation;

/// Temperature with the best sub-score, in Celsius
pub const OPTIMAL_TEMPERATURE_C: f64 = 22.5;
/// Sub-score points lost per degree away from the optimum
pub const TEMPERATURE_PENALTY_PER_DEGREE: f64 = 4.0;
/// Sub-score points lost per mm of precipitation
pub const PRECIPITATION_PENALTY_PER_MM: f64 = 20.0;
/// Wind speed with the best sub-score, in m/s
pub const OPTIMAL_WIND_SPEED_MS: f64 = 5.0;
/// Sub-score points lost per m/s away from the optimum
pub const WIND_PENALTY_PER_MS: f64 = 5.0;

pub const TEMPERATURE_WEIGHT: f64 = 0.3;
pub const CLOUD_WEIGHT: f64 = 0.4;
pub const PRECIPITATION_WEIGHT: f64 = 0.2;
pub const WIND_WEIGHT: f64 = 0.1;

const MAX_SCORE: f64 = 100.0;

/// Per-dimension contributions before weighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub temperature: f64,
    pub cloud: f64,
    pub precipitation: f64,
    pub wind: f64,
}

impl SubScores {
    /// Compute the sub-scores for one observation
    #[must_use]
    pub fn from_weather(weather: &WeatherObservation) -> Self {
        let temperature = clamp_score(
            MAX_SCORE
                - (weather.temperature - OPTIMAL_TEMPERATURE_C).abs()
                    * TEMPERATURE_PENALTY_PER_DEGREE,
        );

        // Not clamped: out-of-range coverage from the provider flows into the sum.
        let cloud = MAX_SCORE - weather.cloud_coverage;

        let precipitation =
            clamp_score(MAX_SCORE - weather.precipitation * PRECIPITATION_PENALTY_PER_MM);

        let wind = clamp_score(
            MAX_SCORE - (weather.wind_speed - OPTIMAL_WIND_SPEED_MS).abs() * WIND_PENALTY_PER_MS,
        );

        Self {
            temperature,
            cloud,
            precipitation,
            wind,
        }
    }

    /// Weighted sum, unrounded
    #[must_use]
    pub fn weighted_total(&self) -> f64 {
        self.temperature * TEMPERATURE_WEIGHT
            + self.cloud * CLOUD_WEIGHT
            + self.precipitation * PRECIPITATION_WEIGHT
            + self.wind * WIND_WEIGHT
    }
}

/// Composite score for one observation, rounded to one decimal place
#[must_use]
pub fn score(weather: &WeatherObservation) -> f64 {
    round_one_decimal(SubScores::from_weather(weather).weighted_total())
}

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, MAX_SCORE)
}

/// Exact halves go to the even neighbour: 71.25 -> 71.2, 71.75 -> 71.8
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
