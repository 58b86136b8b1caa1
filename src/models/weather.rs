//! Weather observation model and display methods

use serde::{Deserialize, Serialize};

/// Current conditions at one coordinate, as reported by the provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherObservation {
    /// Air temperature in Celsius
    pub temperature: f64,
    /// Cloud area fraction in percent (0-100)
    pub cloud_coverage: f64,
    /// Precipitation amount in mm
    pub precipitation: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Observation time as reported by the provider
    pub timestamp: String,
}

impl WeatherObservation {
    /// Temperature used when the provider omits it
    pub const DEFAULT_TEMPERATURE: f64 = 0.0;
    /// Missing cloud data is treated as fully overcast
    pub const DEFAULT_CLOUD_COVERAGE: f64 = 100.0;
    pub const DEFAULT_PRECIPITATION: f64 = 0.0;
    pub const DEFAULT_WIND_SPEED: f64 = 0.0;

    #[must_use]
    pub fn new(
        temperature: f64,
        cloud_coverage: f64,
        precipitation: f64,
        wind_speed: f64,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            temperature,
            cloud_coverage,
            precipitation,
            wind_speed,
            timestamp: timestamp.into(),
        }
    }

    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temperature)
    }

    #[must_use]
    pub fn format_cloud_coverage(&self) -> String {
        format!("{}%", self.cloud_coverage)
    }

    #[must_use]
    pub fn format_precipitation(&self) -> String {
        format!("{}mm", self.precipitation)
    }

    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{}m/s", self.wind_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting() {
        let weather = WeatherObservation::new(18.5, 40.0, 0.2, 3.1, "2025-06-01T12:00:00Z");
        assert_eq!(weather.format_temperature(), "18.5°C");
        assert_eq!(weather.format_cloud_coverage(), "40%");
        assert_eq!(weather.format_precipitation(), "0.2mm");
        assert_eq!(weather.format_wind(), "3.1m/s");
    }
}
